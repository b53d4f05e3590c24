//! Planar measures written onto dissolved features.

use crate::{FeatureSet, GeometryKind};
use geo::{Area, Geometry, LineString, Polygon};

pub const AREA_FIELD: &str = "area_m2";
pub const LENGTH_FIELD: &str = "length_m";

/// Which measures to (re)compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measures {
	pub area: bool,
	pub length: bool,
}

impl Measures {
	pub const NONE: Measures = Measures {
		area: false,
		length: false,
	};
	pub const ALL: Measures = Measures { area: true, length: true };

	/// Polygons get area and length, lines only length, points nothing.
	pub fn for_kind(kind: GeometryKind) -> Measures {
		match kind {
			GeometryKind::Polygon => Measures::ALL,
			GeometryKind::Line => Measures {
				area: false,
				length: true,
			},
			GeometryKind::Point => Measures::NONE,
		}
	}

	/// Overwrites `area_m2` and `length_m` on every feature.
	pub fn apply(&self, set: &mut FeatureSet) {
		for feature in &mut set.features {
			if self.area {
				let value = area(&feature.geometry);
				feature.set_property(AREA_FIELD, value);
			}
			if self.length {
				let value = length(&feature.geometry);
				feature.set_property(LENGTH_FIELD, value);
			}
		}
	}
}

pub fn area(geometry: &Geometry<f64>) -> f64 {
	geometry.unsigned_area()
}

/// Length of lines, perimeter of polygons including their holes, zero for points.
pub fn length(geometry: &Geometry<f64>) -> f64 {
	match geometry {
		Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
		Geometry::Line(line) => line.dx().hypot(line.dy()),
		Geometry::LineString(line) => line_length(line),
		Geometry::MultiLineString(lines) => lines.iter().map(line_length).sum(),
		Geometry::Polygon(polygon) => perimeter(polygon),
		Geometry::MultiPolygon(polygons) => polygons.iter().map(perimeter).sum(),
		Geometry::Rect(rect) => perimeter(&rect.to_polygon()),
		Geometry::Triangle(triangle) => perimeter(&triangle.to_polygon()),
		Geometry::GeometryCollection(collection) => collection.iter().map(length).sum(),
	}
}

fn line_length(line: &LineString<f64>) -> f64 {
	line.lines().map(|segment| segment.dx().hypot(segment.dy())).sum()
}

fn perimeter(polygon: &Polygon<f64>) -> f64 {
	line_length(polygon.exterior()) + polygon.interiors().iter().map(line_length).sum::<f64>()
}
