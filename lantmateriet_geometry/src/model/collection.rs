use super::{GeoFeature, geometry_kind};
use crate::FeatureSetError;
use geo::{CoordsIter, Geometry};
use std::collections::BTreeMap;

/// Largest absolute coordinate a dissolve accepts.
///
/// Polygonize snaps vertices to an integer grid, which must not overflow.
pub const MAX_COORDINATE: f64 = 1e9;

/// Broad geometry family of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
	Polygon,
	Line,
	Point,
}

impl GeometryKind {
	pub fn of(geometry: &Geometry<f64>) -> Option<GeometryKind> {
		match geometry {
			Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
				Some(GeometryKind::Polygon)
			}
			Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => Some(GeometryKind::Line),
			Geometry::Point(_) | Geometry::MultiPoint(_) => Some(GeometryKind::Point),
			Geometry::GeometryCollection(c) => c.iter().find_map(GeometryKind::of),
		}
	}
}

/// Ordered set of features of one layer or category.
///
/// The position of a feature is its identity during a dissolve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureSet {
	pub features: Vec<GeoFeature>,
}

impl FeatureSet {
	pub fn new() -> Self {
		Self { features: Vec::new() }
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn push(&mut self, feature: GeoFeature) {
		self.features.push(feature);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, GeoFeature> {
		self.features.iter()
	}

	pub fn geometries(&self) -> Vec<&Geometry<f64>> {
		self.features.iter().map(|f| &f.geometry).collect()
	}

	/// Geometry family of the first feature.
	pub fn kind(&self) -> Option<GeometryKind> {
		self.features.first().and_then(|f| GeometryKind::of(&f.geometry))
	}

	/// Rejects NaN and infinite coordinates, and any beyond [`MAX_COORDINATE`].
	pub fn verify_finite(&self) -> Result<(), FeatureSetError> {
		for (index, feature) in self.features.iter().enumerate() {
			for c in feature.geometry.coords_iter() {
				if !(c.x.is_finite() && c.y.is_finite()) {
					return Err(FeatureSetError::NonFiniteCoordinate { index });
				}
				if c.x.abs() > MAX_COORDINATE || c.y.abs() > MAX_COORDINATE {
					return Err(FeatureSetError::CoordinateOutOfRange {
						index,
						limit: MAX_COORDINATE,
					});
				}
			}
		}
		Ok(())
	}

	pub fn verify_polygonal(&self) -> Result<(), FeatureSetError> {
		for (index, feature) in self.features.iter().enumerate() {
			if !matches!(feature.geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_)) {
				return Err(FeatureSetError::NotPolygonal {
					index,
					kind: geometry_kind(&feature.geometry),
				});
			}
		}
		Ok(())
	}

	/// Checks that every feature carries `field = category`.
	pub fn verify_category(&self, field: &str, category: &str) -> Result<(), FeatureSetError> {
		for (index, feature) in self.features.iter().enumerate() {
			let found = feature.category(field);
			if found != Some(category) {
				return Err(FeatureSetError::CategoryMismatch {
					index,
					field: field.to_string(),
					expected: category.to_string(),
					found: found.map(str::to_string),
				});
			}
		}
		Ok(())
	}

	/// Splits the set by the string value of `field`, keeping feature order within each part.
	///
	/// Features without a string value end up under the empty name.
	pub fn split_by(self, field: &str) -> BTreeMap<String, FeatureSet> {
		let mut parts: BTreeMap<String, FeatureSet> = BTreeMap::new();
		for feature in self.features {
			let key = feature.category(field).unwrap_or_default().to_string();
			parts.entry(key).or_default().push(feature);
		}
		parts
	}
}

impl From<Vec<GeoFeature>> for FeatureSet {
	fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}
}

impl FromIterator<GeoFeature> for FeatureSet {
	fn from_iter<T: IntoIterator<Item = GeoFeature>>(iter: T) -> Self {
		Self {
			features: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for FeatureSet {
	type Item = GeoFeature;
	type IntoIter = std::vec::IntoIter<GeoFeature>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeoProperties, GeoValue};
	use geo::{line_string, point};
	use pretty_assertions::assert_eq;

	fn feature(category: &str) -> GeoFeature {
		let mut f = GeoFeature::new_example();
		f.set_property("objekttyp", category);
		f
	}

	#[test]
	fn split_by_keeps_order_within_category() {
		let mut a = feature("Sjö");
		a.set_property("n", 1);
		let mut b = feature("Åker");
		b.set_property("n", 2);
		let mut c = feature("Sjö");
		c.set_property("n", 3);

		let parts = FeatureSet::from(vec![a, b, c]).split_by("objekttyp");
		assert_eq!(parts.keys().collect::<Vec<_>>(), vec!["Sjö", "Åker"]);
		let ns: Vec<_> = parts["Sjö"].iter().map(|f| f.properties.get("n").cloned()).collect();
		assert_eq!(ns, vec![Some(GeoValue::from(1)), Some(GeoValue::from(3))]);
	}

	#[test]
	fn verify_category_reports_first_mismatch() {
		let set = FeatureSet::from(vec![feature("Sjö"), feature("Åker")]);
		assert_eq!(set.verify_category("objekttyp", "Sjö"), Err(FeatureSetError::CategoryMismatch {
			index: 1,
			field: "objekttyp".to_string(),
			expected: "Sjö".to_string(),
			found: Some("Åker".to_string()),
		}));
		assert!(FeatureSet::new().verify_category("objekttyp", "Sjö").is_ok());
	}

	#[test]
	fn verify_polygonal_rejects_lines() {
		let line = GeoFeature::with_properties(
			Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
			GeoProperties::new(),
		);
		let set = FeatureSet::from(vec![feature("Sjö"), line]);
		assert_eq!(set.verify_polygonal(), Err(FeatureSetError::NotPolygonal {
			index: 1,
			kind: "LineString"
		}));
	}

	#[test]
	fn verify_finite_rejects_nan() {
		let set = FeatureSet::from(vec![GeoFeature::new(Geometry::Point(point!(x: f64::NAN, y: 1.0)))]);
		assert_eq!(set.verify_finite(), Err(FeatureSetError::NonFiniteCoordinate { index: 0 }));
	}

	#[test]
	fn verify_finite_rejects_far_away_coordinates() {
		let set = FeatureSet::from(vec![
			GeoFeature::new(Geometry::Point(point!(x: 7.0e6, y: 500000.0))),
			GeoFeature::new(Geometry::Point(point!(x: 1.0e11, y: 1.0))),
		]);
		assert_eq!(
			set.verify_finite(),
			Err(FeatureSetError::CoordinateOutOfRange {
				index: 1,
				limit: MAX_COORDINATE
			})
		);
	}

	#[test]
	fn kind_follows_first_feature() {
		assert_eq!(FeatureSet::new().kind(), None);
		assert_eq!(FeatureSet::from(vec![feature("Sjö")]).kind(), Some(GeometryKind::Polygon));
		let point = GeoFeature::new(Geometry::Point(point!(x: 1.0, y: 1.0)));
		assert_eq!(FeatureSet::from(vec![point]).kind(), Some(GeometryKind::Point));
	}
}
