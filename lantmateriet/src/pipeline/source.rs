use anyhow::{Context, Result, ensure};
use lantmateriet_geometry::{FeatureSet, read_geojson_file};
use std::{
	fmt::Debug,
	fs,
	path::{Path, PathBuf},
};

/// Anything that can list and read vector layers.
pub trait VectorSource: Debug + Send + Sync {
	/// Layer names, sorted.
	fn layers(&self) -> Result<Vec<String>>;

	fn read_layer(&self, layer: &str) -> Result<FeatureSet>;
}

/// A directory holding one `<layer>.geojson` file per layer.
#[derive(Debug, Clone)]
pub struct GeoJsonDirectory {
	path: PathBuf,
}

impl GeoJsonDirectory {
	pub fn new(path: &Path) -> Result<Self> {
		ensure!(path.is_dir(), "source directory {path:?} does not exist");
		Ok(Self {
			path: path.to_path_buf(),
		})
	}

	fn layer_path(&self, layer: &str) -> PathBuf {
		self.path.join(format!("{layer}.geojson"))
	}
}

impl VectorSource for GeoJsonDirectory {
	fn layers(&self) -> Result<Vec<String>> {
		let mut layers = Vec::new();
		for entry in fs::read_dir(&self.path).with_context(|| format!("listing {:?}", self.path))? {
			let path = entry?.path();
			if path.is_file() && path.extension().is_some_and(|e| e.eq_ignore_ascii_case("geojson")) {
				if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
					layers.push(stem.to_string());
				}
			}
		}
		layers.sort();
		Ok(layers)
	}

	fn read_layer(&self, layer: &str) -> Result<FeatureSet> {
		let path = self.layer_path(layer);
		log::debug!("reading layer {layer} from {path:?}");
		read_geojson_file(&path)
	}
}
