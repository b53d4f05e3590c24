use serde::Deserialize;
use std::collections::BTreeMap;

/// Settings of one source layer.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
	/// Category name → output file name. Categories missing here get a normalised name.
	#[serde(default)]
	pub categories: BTreeMap<String, String>,

	/// Fail the layer when its categories differ from `categories`
	#[serde(default)]
	pub strict: bool,

	/// Also write the union of all categories as `00_sverige.geojson`
	#[serde(default)]
	pub sweden_base: bool,
}

/// How results are written.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
	/// Convert from SWEREF 99 TM to WGS 84 before writing
	#[serde(default = "default_reproject")]
	pub reproject: bool,

	/// Decimals kept in written coordinates, all when unset
	#[serde(default)]
	pub precision: Option<u8>,
}

fn default_reproject() -> bool {
	true
}

impl Default for OutputConfig {
	fn default() -> Self {
		OutputConfig {
			reproject: default_reproject(),
			precision: None,
		}
	}
}
