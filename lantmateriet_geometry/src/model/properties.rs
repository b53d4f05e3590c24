use super::GeoValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Attribute map of a feature, ordered by key so written files are stable.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties(BTreeMap<String, GeoValue>);

impl GeoProperties {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: GeoValue) {
		self.0.insert(key.into(), value);
	}

	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.0.iter()
	}

	/// A copy holding only `key`, empty if the attribute is missing.
	pub fn only(&self, key: &str) -> GeoProperties {
		self.0.get_key_value(key).map(|(k, v)| (k.clone(), v.clone())).into_iter().collect()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl From<Vec<(&str, &str)>> for GeoProperties {
	fn from(value: Vec<(&str, &str)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), GeoValue::from(v))).collect()
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties(BTreeMap::from_iter(iter))
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}
