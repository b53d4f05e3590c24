use deunicode::deunicode_with_tofu;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Output stem for every category name: `NN_` plus an ASCII slug.
///
/// `NN` is the 1-based position of the name in sorted order, so the numbering
/// does not depend on the order in which names were encountered.
pub fn normalise_item_names<S: AsRef<str>>(names: &[S]) -> BTreeMap<String, String> {
	names
		.iter()
		.map(|name| name.as_ref())
		.sorted_unstable()
		.dedup()
		.enumerate()
		.map(|(index, name)| (name.to_string(), format!("{:02}_{}", index + 1, slug(name))))
		.collect()
}

/// Lower-case ASCII form of a category name.
///
/// Letters are transliterated; characters without an ASCII form are dropped.
pub fn slug(name: &str) -> String {
	deunicode_with_tofu(&name.to_lowercase(), "")
		.replace(' ', "_")
		.replace(['-', ','], "")
		.replace('/', "_")
}
