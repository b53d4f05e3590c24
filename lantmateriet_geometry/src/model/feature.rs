use super::{GeoProperties, GeoValue};
use geo::Geometry;

#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub geometry: Geometry<f64>,
	pub properties: GeoProperties,
}

impl GeoFeature {
	pub fn new(geometry: Geometry<f64>) -> Self {
		Self {
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn with_properties(geometry: Geometry<f64>, properties: GeoProperties) -> Self {
		Self { geometry, properties }
	}

	pub fn set_property<T>(&mut self, key: &str, value: T)
	where
		GeoValue: From<T>,
	{
		self.properties.insert(key, GeoValue::from(value));
	}

	/// String value of `key`, if present and a string.
	pub fn category(&self, key: &str) -> Option<&str> {
		self.properties.get(key).and_then(GeoValue::as_str)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		use geo::polygon;
		Self {
			geometry: Geometry::Polygon(polygon![
				(x: 0.0, y: 0.0),
				(x: 1.0, y: 0.0),
				(x: 1.0, y: 1.0),
				(x: 0.0, y: 1.0),
			]),
			properties: GeoProperties::from(vec![
				("objekttyp", GeoValue::from("Sjö")),
				("kkod", GeoValue::from(1)),
			]),
		}
	}
}

/// Short name of the geometry variant, used in error messages.
pub fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
	match geometry {
		Geometry::Point(_) => "Point",
		Geometry::Line(_) => "Line",
		Geometry::LineString(_) => "LineString",
		Geometry::Polygon(_) => "Polygon",
		Geometry::MultiPoint(_) => "MultiPoint",
		Geometry::MultiLineString(_) => "MultiLineString",
		Geometry::MultiPolygon(_) => "MultiPolygon",
		Geometry::GeometryCollection(_) => "GeometryCollection",
		Geometry::Rect(_) => "Rect",
		Geometry::Triangle(_) => "Triangle",
	}
}
