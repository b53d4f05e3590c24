use crate::config::Config;
use anyhow::{Context, Result};
use geo::{Geometry, Polygon, unary_union};
use lantmateriet_geometry::{FeatureSet, GeoFeature, Measures, crs, explode, write_geojson_file};
use std::path::{Path, PathBuf};

pub const SWEDEN_FILE_NAME: &str = "00_sverige.geojson";

/// Unions the polygons of all categories of a layer into one land outline.
pub fn sweden_base(parts: &[FeatureSet]) -> FeatureSet {
	let polygons: Vec<Polygon<f64>> = parts
		.iter()
		.flat_map(|part| part.iter())
		.flat_map(|feature| match &feature.geometry {
			Geometry::Polygon(polygon) => vec![polygon.clone()],
			Geometry::MultiPolygon(multi) => multi.0.clone(),
			_ => vec![],
		})
		.collect();

	if polygons.is_empty() {
		return FeatureSet::new();
	}

	let union = unary_union(&polygons);
	let mut set = explode(FeatureSet::from(vec![GeoFeature::new(Geometry::MultiPolygon(union))]));
	Measures::ALL.apply(&mut set);
	set
}

/// Writes the land outline of `layer` next to its categories.
pub fn write_sweden_base(config: &Config, layer: &str, parts: &[FeatureSet], target: &Path) -> Result<PathBuf> {
	let mut set = sweden_base(parts);
	log::debug!("{layer}: Sweden base has {} polygons", set.len());
	if config.output.reproject {
		crs::unproject(&mut set).with_context(|| format!("reprojecting the {layer} Sweden base"))?;
	}
	let path = target.join(layer).join(SWEDEN_FILE_NAME);
	write_geojson_file(&path, &set, config.output.precision)?;
	Ok(path)
}
