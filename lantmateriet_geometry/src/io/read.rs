use crate::{FeatureSet, FeatureSetError, GeoFeature, GeoProperties, GeoValue};
use anyhow::{Context, Result};
use geo::Geometry;
use geojson::GeoJson;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// Reads a GeoJSON document into a feature set.
///
/// A single `Feature` or bare geometry is accepted as a one-feature set.
/// Features with a `null` geometry are rejected.
pub fn read_geojson(reader: impl Read) -> Result<FeatureSet> {
	let document: GeoJson = serde_json::from_reader(reader).context("parsing GeoJSON")?;

	let features = match document {
		GeoJson::FeatureCollection(collection) => collection.features,
		GeoJson::Feature(feature) => vec![feature],
		GeoJson::Geometry(geometry) => {
			let geometry = Geometry::<f64>::try_from(geometry.value).context("converting geometry")?;
			return Ok(FeatureSet::from(vec![GeoFeature::new(geometry)]));
		}
	};

	features
		.into_iter()
		.enumerate()
		.map(|(index, feature)| -> Result<GeoFeature> {
			let geometry = feature.geometry.ok_or(FeatureSetError::NullGeometry { index })?;
			let geometry = Geometry::<f64>::try_from(geometry.value)
				.with_context(|| format!("converting geometry of feature {index}"))?;
			let properties: GeoProperties = feature
				.properties
				.unwrap_or_default()
				.iter()
				.map(|(key, value)| (key.clone(), GeoValue::from_json(value)))
				.collect();
			Ok(GeoFeature::with_properties(geometry, properties))
		})
		.collect()
}

pub fn read_geojson_file(path: &Path) -> Result<FeatureSet> {
	let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
	read_geojson(BufReader::new(file)).with_context(|| format!("reading {path:?}"))
}
