use thiserror::Error;

/// Input that violates the preconditions of a dissolve.
///
/// Raised before any grouping or union work begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureSetError {
	#[error("feature {index} has no geometry")]
	NullGeometry { index: usize },

	#[error("feature {index} has a non-finite coordinate")]
	NonFiniteCoordinate { index: usize },

	#[error("feature {index} has a coordinate beyond {limit} m")]
	CoordinateOutOfRange { index: usize, limit: f64 },

	#[error("feature {index} is a {kind}, expected a polygon or multipolygon")]
	NotPolygonal { index: usize, kind: &'static str },

	#[error("feature {index} has {field} = {found:?}, expected {expected:?}")]
	CategoryMismatch {
		index: usize,
		field: String,
		expected: String,
		found: Option<String>,
	},
}
