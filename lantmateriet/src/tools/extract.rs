use anyhow::{Context, Result};
use lantmateriet::{
	config::{Config, DetailLevel},
	pipeline::{Extractor, GeoJsonDirectory},
};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// directory with one <layer>.geojson file per layer
	#[arg()]
	source_dir: PathBuf,

	/// output directory, receives <layer>/<NN_category>.geojson
	#[arg()]
	target_dir: PathBuf,

	/// built-in category tables to use: 50 or 1m
	#[arg(long, short, value_name = "LEVEL", default_value = "50", display_order = 1)]
	detail_level: DetailLevel,

	/// YAML config file, replaces the built-in tables
	#[arg(long, short, value_name = "FILE", display_order = 1)]
	config: Option<PathBuf>,

	/// number of categories processed in parallel [default: number of CPUs]
	#[arg(long, short, value_name = "int", display_order = 2)]
	workers: Option<usize>,

	/// write coordinates in SWEREF 99 TM instead of WGS 84
	#[arg(long, display_order = 3)]
	keep_crs: bool,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = match &arguments.config {
		Some(path) => Config::from_path(path)?,
		None => Config::for_detail_level(arguments.detail_level)?,
	};
	if arguments.keep_crs {
		config.output.reproject = false;
	}

	let workers = arguments.workers.unwrap_or_else(num_cpus::get);
	let source = GeoJsonDirectory::new(&arguments.source_dir)?;

	log::info!("extract from {:?} to {:?}", arguments.source_dir, arguments.target_dir);

	let report = Extractor::new(config, workers)
		.run(&source, &arguments.target_dir)
		.await
		.with_context(|| format!("extracting {:?}", arguments.source_dir))?;

	let written = report.into_result()?;
	log::info!("finished writing {} files", written.len());

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;

	#[test]
	fn unsupported_detail_level() {
		let err = run_command(vec!["lantmateriet", "extract", "in", "out", "--detail-level", "250"])
			.unwrap_err()
			.to_string();
		assert!(err.contains("is not implemented"), "{err}");
	}

	#[test]
	fn missing_source_dir() {
		let dir = assert_fs::TempDir::new().unwrap();
		let source = dir.path().join("missing");
		let target = dir.path().join("out");
		let err = run_command(vec!["lantmateriet", "extract", source.to_str().unwrap(), target.to_str().unwrap()])
			.unwrap_err()
			.to_string();
		assert!(err.contains("does not exist"), "{err}");
	}
}
