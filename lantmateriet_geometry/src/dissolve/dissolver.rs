use super::{DissolveStrategy, SpatialProximityGrouper, explode, polygonize};
use crate::{FeatureSet, FeatureSetError, GeoFeature};
use geo::{Geometry, LineString, Polygon, unary_union};
use std::collections::HashMap;

pub const DEFAULT_CATEGORY_FIELD: &str = "objekttyp";

/// Merges touching geometries of one category.
#[derive(Clone, Debug)]
pub struct GeometryDissolver {
	grouper: SpatialProximityGrouper,
	category_field: String,
}

impl Default for GeometryDissolver {
	fn default() -> Self {
		Self::new(SpatialProximityGrouper::default(), DEFAULT_CATEGORY_FIELD)
	}
}

impl GeometryDissolver {
	pub fn new(grouper: SpatialProximityGrouper, category_field: &str) -> Self {
		Self {
			grouper,
			category_field: category_field.to_string(),
		}
	}

	pub fn category_field(&self) -> &str {
		&self.category_field
	}

	pub fn dissolve(&self, strategy: DissolveStrategy, set: FeatureSet) -> Result<FeatureSet, FeatureSetError> {
		match strategy {
			DissolveStrategy::Touching => self.dissolve_touching(set),
			DissolveStrategy::Exterior => self.dissolve_exterior(set),
			DissolveStrategy::Explode => self.dissolve_explode(set),
		}
	}

	/// Unions every cluster of touching polygons and explodes the result.
	///
	/// The union is stored on the cluster's representative, which keeps its
	/// attributes; the other members are dropped. When nothing touches, the
	/// input is returned as it is, without exploding.
	pub fn dissolve_touching(&self, set: FeatureSet) -> Result<FeatureSet, FeatureSetError> {
		set.verify_finite()?;
		set.verify_polygonal()?;

		let clusters = self.grouper.group(&set.geometries());
		if clusters.is_empty() {
			return Ok(set);
		}

		let mut dropped = vec![false; set.len()];
		let mut merged = HashMap::with_capacity(clusters.len());
		for (&primary, members) in &clusters {
			let polygons: Vec<Polygon<f64>> = members
				.iter()
				.flat_map(|&member| polygons_of(&set.features[member].geometry))
				.collect();
			merged.insert(primary, unary_union(&polygons));
			for &member in members {
				if member != primary {
					dropped[member] = true;
				}
			}
		}

		let input_len = set.len();
		let kept: FeatureSet = set
			.into_iter()
			.enumerate()
			.filter(|(index, _)| !dropped[*index])
			.map(|(index, mut feature)| {
				if let Some(union) = merged.remove(&index) {
					feature.geometry = Geometry::MultiPolygon(union);
				}
				feature
			})
			.collect();

		let result = explode(kept);
		log::debug!(
			"dissolved {} features in {} clusters into {} parts",
			input_len,
			clusters.len(),
			result.len()
		);
		Ok(result)
	}

	/// Rebuilds the category from the outer rings of all its polygons.
	///
	/// Holes disappear. The output only carries the category attribute of the
	/// first input feature.
	pub fn dissolve_exterior(&self, set: FeatureSet) -> Result<FeatureSet, FeatureSetError> {
		set.verify_finite()?;
		set.verify_polygonal()?;

		let Some(properties) = set.features.first().map(|f| f.properties.only(&self.category_field)) else {
			return Ok(FeatureSet::new());
		};

		let rings: Vec<LineString<f64>> = explode(set)
			.into_iter()
			.filter_map(|feature| match feature.geometry {
				Geometry::Polygon(polygon) => Some(polygon.into_inner().0),
				_ => None,
			})
			.collect();

		let result: FeatureSet = polygonize(&rings)
			.into_iter()
			.map(|polygon| GeoFeature::with_properties(Geometry::Polygon(polygon), properties.clone()))
			.collect();

		log::debug!("rebuilt {} exterior rings into {} polygons", rings.len(), result.len());
		Ok(result)
	}

	/// Splits multi-part geometries without merging anything.
	pub fn dissolve_explode(&self, set: FeatureSet) -> Result<FeatureSet, FeatureSetError> {
		set.verify_finite()?;
		Ok(explode(set))
	}
}

fn polygons_of(geometry: &Geometry<f64>) -> Vec<Polygon<f64>> {
	match geometry {
		Geometry::Polygon(polygon) => vec![polygon.clone()],
		Geometry::MultiPolygon(multi) => multi.0.clone(),
		_ => Vec::new(),
	}
}
