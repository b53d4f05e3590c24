use super::{ExtractReport, JobFailure, VectorSource, map_parallel, plan_layer, write_sweden_base};
use crate::config::Config;
use anyhow::{Result, anyhow};
use std::{
	path::{Path, PathBuf},
	sync::Arc,
	time::Instant,
};

/// Splits every layer of a source into dissolved category files.
#[derive(Debug, Clone)]
pub struct Extractor {
	config: Arc<Config>,
	workers: usize,
}

impl Extractor {
	pub fn new(config: Config, workers: usize) -> Self {
		Self {
			config: Arc::new(config),
			workers: workers.max(1),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Processes the layers one after another and their categories in parallel.
	///
	/// A failing layer or category is recorded in the report; the remaining
	/// work continues. Only errors listing the source abort the run.
	pub async fn run(&self, source: &dyn VectorSource, target: &Path) -> Result<ExtractReport> {
		let start = Instant::now();
		let mut report = ExtractReport::default();

		let layers = source.layers()?;
		log::info!("extracting {} layers with {} workers", layers.len(), self.workers);

		for layer in layers {
			if let Err(error) = self.run_layer(source, &layer, target, &mut report).await {
				log::error!("{layer}: {error:#}");
				report.failures.push(JobFailure {
					layer,
					category: None,
					error,
				});
			}
		}

		log::info!(
			"wrote {} files in {:.1?}, {} failures",
			report.written.len(),
			start.elapsed(),
			report.failures.len()
		);
		Ok(report)
	}

	async fn run_layer(&self, source: &dyn VectorSource, layer: &str, target: &Path, report: &mut ExtractReport) -> Result<()> {
		let features = source.read_layer(layer)?;
		let plan = plan_layer(&self.config, layer, features)?;
		log::info!("{layer}: {} categories", plan.jobs.len());

		let config = Arc::clone(&self.config);
		let job_target = target.to_path_buf();
		let labels: Vec<String> = plan.jobs.iter().map(|job| job.category.clone()).collect();
		let results = map_parallel(plan.jobs, self.workers, move |job| job.run(&config, &job_target)).await;

		let mut kept = Vec::new();
		let mut failed = false;
		for (category, result) in labels.into_iter().zip(results) {
			match result {
				Ok(outcome) => {
					log::debug!("{layer}/{category}: {} features", outcome.feature_count);
					report.written.push(outcome.path);
					kept.extend(outcome.kept);
				}
				Err(error) => {
					log::error!("{layer}/{category}: {error:#}");
					failed = true;
					report.failures.push(JobFailure {
						layer: layer.to_string(),
						category: Some(category),
						error,
					});
				}
			}
		}

		if plan.sweden_base {
			if failed {
				log::warn!("{layer}: skipping Sweden base since categories failed");
			} else {
				let config = Arc::clone(&self.config);
				let (layer, target) = (layer.to_string(), target.to_path_buf());
				let path: PathBuf = tokio::task::spawn_blocking(move || write_sweden_base(&config, &layer, &kept, &target))
					.await
					.map_err(|e| anyhow!("worker task failed: {e}"))??;
				report.written.push(path);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		ExtractError,
		config::{LayerConfig, OutputConfig},
	};
	use anyhow::bail;
	use geo::{Geometry, Rect, coord, line_string};
	use lantmateriet_geometry::{FeatureSet, GeoFeature, GeoProperties, read_geojson_file};
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap;
	use tempfile::TempDir;

	#[derive(Debug, Default)]
	struct MemorySource {
		layers: BTreeMap<String, FeatureSet>,
	}

	impl VectorSource for MemorySource {
		fn layers(&self) -> Result<Vec<String>> {
			let mut names: Vec<String> = self.layers.keys().cloned().collect();
			names.push("broken".to_string());
			Ok(names)
		}

		fn read_layer(&self, layer: &str) -> Result<FeatureSet> {
			match self.layers.get(layer) {
				Some(set) => Ok(set.clone()),
				None => bail!("cannot read {layer}"),
			}
		}
	}

	fn square(x: f64, category: &str) -> GeoFeature {
		GeoFeature::with_properties(
			Geometry::Polygon(Rect::new(coord! { x: x, y: 0.0 }, coord! { x: x + 1.0, y: 1.0 }).to_polygon()),
			GeoProperties::from(vec![("objekttyp", category)]),
		)
	}

	fn road(category: &str) -> GeoFeature {
		GeoFeature::with_properties(
			Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0)]),
			GeoProperties::from(vec![("objekttyp", category)]),
		)
	}

	fn config(strict: bool) -> Config {
		let mark = LayerConfig {
			categories: BTreeMap::from([
				("Sjö".to_string(), "03_sjo.geojson".to_string()),
				("Åker".to_string(), "09_aker.geojson".to_string()),
			]),
			strict,
			sweden_base: true,
		};
		Config {
			layers: BTreeMap::from([("mark".to_string(), mark)]),
			output: OutputConfig {
				reproject: false,
				precision: None,
			},
			..Config::default()
		}
	}

	fn source() -> MemorySource {
		MemorySource {
			layers: BTreeMap::from([
				(
					"mark".to_string(),
					FeatureSet::from(vec![square(0.0, "Sjö"), square(1.0, "Sjö"), square(2.0, "Åker")]),
				),
				("vaglinje".to_string(), FeatureSet::from(vec![road("Motorväg")])),
			]),
		}
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn extracts_layers_and_sweden_base() {
		let dir = TempDir::new().unwrap();
		let report = Extractor::new(config(true), 2).run(&source(), dir.path()).await.unwrap();

		let relative: Vec<PathBuf> = report
			.written
			.iter()
			.map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
			.collect();
		assert_eq!(
			relative,
			vec![
				PathBuf::from("mark/03_sjo.geojson"),
				PathBuf::from("mark/09_aker.geojson"),
				PathBuf::from("mark/00_sverige.geojson"),
				PathBuf::from("vaglinje/01_motorvag.geojson"),
			]
		);

		assert_eq!(report.failures.len(), 1);
		assert_eq!(report.failures[0].layer, "broken");
		assert_eq!(report.failures[0].category, None);

		assert_eq!(read_geojson_file(&dir.path().join("mark/03_sjo.geojson")).unwrap().len(), 1);
		assert_eq!(read_geojson_file(&dir.path().join("mark/00_sverige.geojson")).unwrap().len(), 1);
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn schema_mismatch_fails_only_that_layer() {
		let dir = TempDir::new().unwrap();
		let mut source = source();
		source.layers.get_mut("mark").unwrap().push(square(9.0, "Skog"));

		let report = Extractor::new(config(true), 2).run(&source, dir.path()).await.unwrap();

		let mark = report.failures.iter().find(|failure| failure.layer == "mark").unwrap();
		assert!(matches!(
			mark.error.downcast_ref::<ExtractError>(),
			Some(ExtractError::SchemaMismatch { .. })
		));
		assert!(!dir.path().join("mark").exists());
		assert!(dir.path().join("vaglinje/01_motorvag.geojson").exists());
		assert!(report.into_result().is_err());
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn lenient_layer_accepts_new_categories() {
		let dir = TempDir::new().unwrap();
		let mut source = source();
		source.layers.get_mut("mark").unwrap().push(square(9.0, "Skog"));

		let report = Extractor::new(config(false), 2).run(&source, dir.path()).await.unwrap();

		assert!(report.failures.iter().all(|failure| failure.layer == "broken"));
		assert!(dir.path().join("mark/02_skog.geojson").exists());
		assert_eq!(read_geojson_file(&dir.path().join("mark/00_sverige.geojson")).unwrap().len(), 2);
	}
}
