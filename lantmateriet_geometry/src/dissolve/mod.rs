mod adjacency;
mod dissolver;
mod explode;
mod grouper;
mod polygonize;

pub use adjacency::*;
pub use dissolver::*;
pub use explode::*;
pub use grouper::*;
pub use polygonize::*;

/// Largest gap, in CRS units, at which two geometries still count as touching.
pub const TOUCHING_MAX_DIST: f64 = 1e-5;

/// Grid size used to merge vertices when noding linework.
pub const NODE_SNAP: f64 = 1e-8;

/// How the features of one category are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DissolveStrategy {
	/// Union connected clusters of touching polygons.
	Touching,
	/// Rebuild polygons from the outer rings only, dropping holes.
	Exterior,
	/// Only split multi-part geometries.
	Explode,
}

impl std::fmt::Display for DissolveStrategy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			DissolveStrategy::Touching => "touching",
			DissolveStrategy::Exterior => "exterior",
			DissolveStrategy::Explode => "explode",
		})
	}
}
