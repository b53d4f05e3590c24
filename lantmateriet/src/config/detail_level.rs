use crate::ExtractError;
use std::{fmt::Display, str::FromStr};

/// Product the source data comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailLevel {
	/// Topografi 50
	Fifty,
	/// Topografi 1M
	OneMillion,
}

impl DetailLevel {
	pub(crate) fn builtin_yaml(self) -> &'static str {
		match self {
			DetailLevel::Fifty => include_str!("topografi_50.yml"),
			DetailLevel::OneMillion => include_str!("topografi_1m.yml"),
		}
	}
}

impl FromStr for DetailLevel {
	type Err = ExtractError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"50" => Ok(DetailLevel::Fifty),
			"1m" => Ok(DetailLevel::OneMillion),
			_ => Err(ExtractError::UnsupportedDetailLevel(s.to_string())),
		}
	}
}

impl Display for DetailLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			DetailLevel::Fifty => "50",
			DetailLevel::OneMillion => "1m",
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("50", DetailLevel::Fifty)]
	#[case("1m", DetailLevel::OneMillion)]
	#[case("1M", DetailLevel::OneMillion)]
	fn parses_known_levels(#[case] input: &str, #[case] expected: DetailLevel) {
		assert_eq!(input.parse::<DetailLevel>().unwrap(), expected);
		assert_eq!(expected.to_string().parse::<DetailLevel>().unwrap(), expected);
	}

	#[rstest]
	#[case("10")]
	#[case("250")]
	#[case("")]
	fn rejects_unknown_levels(#[case] input: &str) {
		assert_eq!(
			input.parse::<DetailLevel>(),
			Err(ExtractError::UnsupportedDetailLevel(input.to_string()))
		);
	}
}
