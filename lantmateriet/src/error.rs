use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
	#[error("detail level {0:?} is not implemented, use \"50\" or \"1m\"")]
	UnsupportedDetailLevel(String),

	#[error(
		"categories of layer {layer:?} do not match the configuration (missing: {missing:?}, unexpected: {unexpected:?}); has the input data changed?"
	)]
	SchemaMismatch {
		layer: String,
		missing: BTreeSet<String>,
		unexpected: BTreeSet<String>,
	},
}
