use crate::FeatureSet;
use anyhow::{Context, Result};
use geo::{Coord, MapCoordsInPlace};
use geojson::{Feature, FeatureCollection, JsonObject};
use std::{
	fs::{self, File},
	io::{BufWriter, Write},
	path::Path,
};

/// Builds a FeatureCollection, optionally rounding coordinates to `precision` decimals.
pub fn to_feature_collection(set: &FeatureSet, precision: Option<u8>) -> FeatureCollection {
	let features = set
		.iter()
		.map(|feature| {
			let mut geometry = feature.geometry.clone();
			if let Some(precision) = precision {
				let factor = 10f64.powi(i32::from(precision));
				geometry.map_coords_in_place(|c| Coord {
					x: (c.x * factor).round() / factor,
					y: (c.y * factor).round() / factor,
				});
			}
			let properties: JsonObject = feature
				.properties
				.iter()
				.map(|(key, value)| (key.clone(), value.to_json()))
				.collect();
			Feature {
				bbox: None,
				geometry: Some(geojson::Geometry::new(geojson::Value::from(&geometry))),
				id: None,
				properties: Some(properties),
				foreign_members: None,
			}
		})
		.collect();

	FeatureCollection {
		bbox: None,
		features,
		foreign_members: None,
	}
}

pub fn write_geojson(writer: impl Write, set: &FeatureSet, precision: Option<u8>) -> Result<()> {
	let mut writer = BufWriter::new(writer);
	serde_json::to_writer(&mut writer, &to_feature_collection(set, precision))?;
	writer.flush()?;
	Ok(())
}

/// Writes `set` to `path`, creating missing parent directories.
pub fn write_geojson_file(path: &Path, set: &FeatureSet, precision: Option<u8>) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).with_context(|| format!("creating directory {parent:?}"))?;
	}
	let file = File::create(path).with_context(|| format!("creating {path:?}"))?;
	write_geojson(file, set, precision).with_context(|| format!("writing {path:?}"))
}
