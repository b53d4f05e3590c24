//! Reprojection between SWEREF 99 TM and WGS 84, backed by PROJ.
//!
//! Lantmäteriet delivers data in SWEREF 99 TM (EPSG:3006); GeoJSON output is
//! written in WGS 84 longitude/latitude (EPSG:4326).

use crate::FeatureSet;
use anyhow::{Context, Result};
use geo::{Coord, MapCoords};
use proj::Proj;

/// SWEREF 99 TM, the grid of the source data.
pub const SWEREF99_TM: &str = "EPSG:3006";

/// WGS 84 longitude/latitude.
pub const WGS84: &str = "EPSG:4326";

/// A transformation between two known reference systems.
///
/// Axes are in GIS order on both sides: easting/northing for grids,
/// longitude/latitude for geographic systems.
pub struct Reprojection {
	proj: Proj,
	source: String,
	target: String,
}

impl Reprojection {
	pub fn new(source: &str, target: &str) -> Result<Self> {
		let proj = Proj::new_known_crs(source, target, None)
			.with_context(|| format!("creating a transformation from {source} to {target}"))?;
		Ok(Self {
			proj,
			source: source.to_string(),
			target: target.to_string(),
		})
	}

	/// SWEREF 99 TM grid to WGS 84 degrees.
	pub fn to_wgs84() -> Result<Self> {
		Self::new(SWEREF99_TM, WGS84)
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn convert(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
		let (x, y) = self
			.proj
			.convert((coord.x, coord.y))
			.with_context(|| format!("reprojecting ({}, {}) from {} to {}", coord.x, coord.y, self.source, self.target))?;
		Ok(Coord { x, y })
	}

	/// Reprojects every coordinate of the set in place.
	pub fn apply(&self, set: &mut FeatureSet) -> Result<()> {
		for feature in &mut set.features {
			// `try_map_coords_in_place` on `Geometry` cannot be monomorphized in geo 0.32
			// (its GeometryCollection arm recurses with `&func`), so map by value instead.
			feature.geometry = feature.geometry.try_map_coords(|c| self.convert(c))?;
		}
		Ok(())
	}
}

impl std::fmt::Debug for Reprojection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Reprojection({} -> {})", self.source, self.target)
	}
}

/// Reprojects a set from SWEREF 99 TM to WGS 84 degrees.
pub fn unproject(set: &mut FeatureSet) -> Result<()> {
	if set.is_empty() {
		return Ok(());
	}
	Reprojection::to_wgs84()?.apply(set)
}
