//! # lantmateriet
//!
//! Turns Lantmäteriet topography layers into clean, per-category GeoJSON files.
//!
//! Every layer of a source is split by its feature type (`objekttyp`, or
//! `texttyp` for text layers). Each category is then processed on its own:
//! polygons that touch across map tile seams are dissolved, multi-part results
//! are exploded, area and length are recomputed and the result is written in
//! WGS 84.
//!
//! ```no_run
//! use lantmateriet::{config::{Config, DetailLevel}, pipeline::{Extractor, GeoJsonDirectory}};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//! 	let config = Config::for_detail_level(DetailLevel::Fifty)?;
//! 	let source = GeoJsonDirectory::new(Path::new("topografi_50"))?;
//! 	let report = Extractor::new(config, 4).run(&source, Path::new("out")).await?;
//! 	for path in report.into_result()? {
//! 		println!("{}", path.display());
//! 	}
//! 	Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod pipeline;

pub use error::*;
pub use lantmateriet_geometry as geometry;
