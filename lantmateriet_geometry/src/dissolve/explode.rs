use crate::{FeatureSet, GeoFeature};
use geo::Geometry;

/// Splits a geometry into its single parts.
///
/// Collections are flattened recursively; `Rect` and `Triangle` become polygons.
pub fn explode_geometry(geometry: Geometry<f64>) -> Vec<Geometry<f64>> {
	match geometry {
		Geometry::MultiPolygon(mp) => mp.0.into_iter().map(Geometry::Polygon).collect(),
		Geometry::MultiLineString(ml) => ml.0.into_iter().map(Geometry::LineString).collect(),
		Geometry::MultiPoint(mp) => mp.0.into_iter().map(Geometry::Point).collect(),
		Geometry::GeometryCollection(gc) => gc.0.into_iter().flat_map(explode_geometry).collect(),
		Geometry::Rect(r) => vec![Geometry::Polygon(r.to_polygon())],
		Geometry::Triangle(t) => vec![Geometry::Polygon(t.to_polygon())],
		other => vec![other],
	}
}

/// One feature per single part, attributes copied to every part.
pub fn explode(set: FeatureSet) -> FeatureSet {
	set.into_iter()
		.flat_map(|feature| {
			let properties = feature.properties;
			explode_geometry(feature.geometry)
				.into_iter()
				.map(move |geometry| GeoFeature::with_properties(geometry, properties.clone()))
		})
		.collect()
}
