//! Geometry core for Lantmäteriet topography extracts.
//!
//! Provides the feature model, the touching-geometry dissolve, exterior
//! polygonization, measures, SWEREF 99 TM reprojection and GeoJSON I/O.
//!
//! ```rust
//! use geo::{Geometry, polygon};
//! use lantmateriet_geometry::{FeatureSet, GeoFeature, GeometryDissolver};
//!
//! let left = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
//! let right = polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0)];
//! let set = FeatureSet::from(vec![
//! 	GeoFeature::new(Geometry::Polygon(left)),
//! 	GeoFeature::new(Geometry::Polygon(right)),
//! ]);
//!
//! let dissolved = GeometryDissolver::default().dissolve_touching(set).unwrap();
//! assert_eq!(dissolved.len(), 1);
//! ```

pub mod crs;
pub mod dissolve;
mod error;
pub mod io;
pub mod measure;
mod model;

pub use dissolve::*;
pub use error::*;
pub use io::*;
pub use measure::Measures;
pub use model::*;
