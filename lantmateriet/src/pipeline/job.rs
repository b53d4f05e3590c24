use super::CategoryJob;
use crate::config::Config;
use anyhow::{Context, Result};
use lantmateriet_geometry::{FeatureSet, GeometryDissolver, SpatialProximityGrouper, crs, write_geojson_file};
use std::{
	path::{Path, PathBuf},
	time::Instant,
};

/// What a finished category job leaves behind.
#[derive(Debug)]
pub struct CategoryOutcome {
	pub layer: String,
	pub category: String,
	pub path: PathBuf,
	pub feature_count: usize,
	/// Dissolved features in grid coordinates, when requested
	pub kept: Option<FeatureSet>,
}

impl CategoryJob {
	pub fn output_path(&self, target: &Path) -> PathBuf {
		target.join(&self.layer).join(&self.file_name)
	}

	/// Dissolves, measures and writes one category.
	pub fn run(self, config: &Config, target: &Path) -> Result<CategoryOutcome> {
		let start = Instant::now();
		let path = self.output_path(target);
		let CategoryJob {
			layer,
			category,
			field,
			strategy,
			measures,
			keep_result,
			features,
			..
		} = self;

		features.verify_category(&field, &category)?;
		let input_count = features.len();

		let dissolver = GeometryDissolver::new(SpatialProximityGrouper::new(config.tolerance), &field);
		let mut dissolved = dissolver
			.dissolve(strategy, features)
			.with_context(|| format!("dissolving {layer}/{category} ({strategy})"))?;
		measures.apply(&mut dissolved);

		let kept = keep_result.then(|| dissolved.clone());
		if config.output.reproject {
			crs::unproject(&mut dissolved).with_context(|| format!("reprojecting {layer}/{category}"))?;
		}
		write_geojson_file(&path, &dissolved, config.output.precision)?;

		log::debug!(
			"{layer}/{category}: {input_count} → {} features in {:.2?}",
			dissolved.len(),
			start.elapsed()
		);

		Ok(CategoryOutcome {
			layer,
			category,
			path,
			feature_count: dissolved.len(),
			kept,
		})
	}
}
