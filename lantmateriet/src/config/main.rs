use super::{DetailLevel, LayerConfig, OutputConfig};
use anyhow::{Context, Result};
use lantmateriet_geometry::{DEFAULT_CATEGORY_FIELD, DissolveStrategy, GeometryKind, TOUCHING_MAX_DIST};
use serde::Deserialize;
use std::{
	collections::{BTreeMap, BTreeSet},
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// Immutable extraction settings, shared by all workers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Attribute that holds the feature type
	#[serde(default = "default_category_field")]
	pub category_field: String,

	/// Attribute that holds the feature type of text layers
	#[serde(default = "default_text_field")]
	pub text_field: String,

	/// Largest gap at which two polygons count as touching, in CRS units
	#[serde(default = "default_tolerance")]
	pub tolerance: f64,

	/// Categories that are never written
	#[serde(default)]
	pub exclude: BTreeSet<String>,

	/// Polygon categories rebuilt from their outer rings only
	#[serde(default)]
	pub exteriorise: BTreeSet<String>,

	/// Per-layer settings, keyed by layer name
	#[serde(default)]
	pub layers: BTreeMap<String, LayerConfig>,

	#[serde(default)]
	pub output: OutputConfig,
}

fn default_category_field() -> String {
	DEFAULT_CATEGORY_FIELD.to_string()
}

fn default_text_field() -> String {
	String::from("texttyp")
}

fn default_tolerance() -> f64 {
	TOUCHING_MAX_DIST
}

impl Default for Config {
	fn default() -> Self {
		Config {
			category_field: default_category_field(),
			text_field: default_text_field(),
			tolerance: default_tolerance(),
			exclude: BTreeSet::new(),
			exteriorise: BTreeSet::new(),
			layers: BTreeMap::new(),
			output: OutputConfig::default(),
		}
	}
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path:?}"))
	}

	/// Built-in category tables of a Lantmäteriet product.
	pub fn for_detail_level(level: DetailLevel) -> Result<Self> {
		Config::from_string(level.builtin_yaml()).with_context(|| format!("parsing built-in config for detail level {level}"))
	}

	pub fn layer(&self, layer: &str) -> Option<&LayerConfig> {
		self.layers.get(layer)
	}

	/// Category attribute of `layer`; text layers use their own field.
	pub fn category_field_for(&self, layer: &str) -> &str {
		if layer.contains("text") {
			&self.text_field
		} else {
			&self.category_field
		}
	}

	pub fn is_excluded(&self, category: &str) -> bool {
		self.exclude.contains(category)
	}

	/// Chooses how a category is dissolved, once, from its geometry family.
	pub fn strategy_for(&self, kind: GeometryKind, category: &str) -> DissolveStrategy {
		match kind {
			GeometryKind::Polygon if self.exteriorise.contains(category) => DissolveStrategy::Exterior,
			GeometryKind::Polygon => DissolveStrategy::Touching,
			GeometryKind::Line | GeometryKind::Point => DissolveStrategy::Explode,
		}
	}
}
