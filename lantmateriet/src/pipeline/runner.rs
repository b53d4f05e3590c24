use anyhow::{Result, anyhow, bail};
use futures::{StreamExt, stream};
use std::{fmt, path::PathBuf, sync::Arc};

/// Runs `callback` on every item on the blocking pool, at most `workers` at a time.
///
/// Results come back in input order. A panicking callback only fails its own item.
pub async fn map_parallel<T, O, F>(items: Vec<T>, workers: usize, callback: F) -> Vec<Result<O>>
where
	T: Send + 'static,
	O: Send + 'static,
	F: Fn(T) -> Result<O> + Send + Sync + 'static,
{
	let callback = Arc::new(callback);
	let mut results: Vec<(usize, Result<O>)> = stream::iter(items.into_iter().enumerate())
		.map(|(index, item)| {
			let cb = Arc::clone(&callback);
			async move {
				match tokio::task::spawn_blocking(move || cb(item)).await {
					Ok(result) => (index, result),
					Err(e) => (index, Err(anyhow!("worker task failed: {e}"))),
				}
			}
		})
		.buffer_unordered(workers.max(1))
		.collect()
		.await;

	results.sort_by_key(|(index, _)| *index);
	results.into_iter().map(|(_, result)| result).collect()
}

/// A layer or category that could not be processed.
#[derive(Debug)]
pub struct JobFailure {
	pub layer: String,
	/// `None` when the whole layer failed
	pub category: Option<String>,
	pub error: anyhow::Error,
}

impl fmt::Display for JobFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.category {
			Some(category) => write!(f, "{}/{category}: {:#}", self.layer, self.error),
			None => write!(f, "{}: {:#}", self.layer, self.error),
		}
	}
}

/// Summary of an extraction run.
#[derive(Debug, Default)]
pub struct ExtractReport {
	pub written: Vec<PathBuf>,
	pub failures: Vec<JobFailure>,
}

impl ExtractReport {
	pub fn is_success(&self) -> bool {
		self.failures.is_empty()
	}

	/// Turns collected failures into a single error.
	pub fn into_result(self) -> Result<Vec<PathBuf>> {
		if self.failures.is_empty() {
			return Ok(self.written);
		}
		let lines: Vec<String> = self.failures.iter().map(|failure| format!("  {failure}")).collect();
		bail!("{} job(s) failed:\n{}", self.failures.len(), lines.join("\n"))
	}
}
