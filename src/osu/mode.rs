use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::error::ScorepostError;

// {{{ Mode
/// The four osu! rulesets. Every place which needs to turn a mode into
/// a name, an url segment or a number goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Mode {
	#[default]
	Osu,
	Taiko,
	Catch,
	Mania,
}

impl Mode {
	pub const MODES: [Mode; 4] = [Self::Osu, Self::Taiko, Self::Catch, Self::Mania];

	pub const MODE_STRINGS: [&'static str; 4] = ["osu!", "osu!taiko", "osu!catch", "osu!mania"];
	pub const MODE_URL_SEGMENTS: [&'static str; 4] = ["osu", "taiko", "fruits", "mania"];

	/// Alternative names accepted when parsing user input.
	const MODE_ALIASES: [&'static str; 4] = ["std", "taiko", "catch", "mania"];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}

	#[inline]
	pub fn display_name(self) -> &'static str {
		Self::MODE_STRINGS[self.to_index()]
	}

	#[inline]
	pub fn url_segment(self) -> &'static str {
		Self::MODE_URL_SEGMENTS[self.to_index()]
	}

	#[inline]
	pub fn value(self) -> u8 {
		self as u8
	}

	#[inline]
	pub fn is_default(self) -> bool {
		self == Self::default()
	}
}

impl TryFrom<i64> for Mode {
	type Error = ScorepostError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		usize::try_from(value)
			.ok()
			.and_then(|i| Self::MODES.get(i).copied())
			.ok_or_else(|| ScorepostError::InvalidMode(value.to_string()))
	}
}

impl FromStr for Mode {
	type Err = ScorepostError;

	/// Accepts the numeric value, the display name, the url segment, or
	/// one of a few common aliases (case insensitive).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if let Ok(value) = s.parse::<i64>() {
			return Self::try_from(value);
		}

		let lower = s.to_lowercase();
		for (i, mode) in Self::MODES.iter().enumerate() {
			if lower == Self::MODE_STRINGS[i]
				|| lower == Self::MODE_URL_SEGMENTS[i]
				|| lower == Self::MODE_ALIASES[i]
			{
				return Ok(*mode);
			}
		}

		Err(ScorepostError::InvalidMode(s.to_owned()))
	}
}

impl Display for Mode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.display_name())
	}
}

impl<'de> Deserialize<'de> for Mode {
	/// Modes appear both as numbers and as strings in the wild (the v1 api
	/// sends `"0"`, config files are free to say `taiko`), so both are
	/// accepted here.
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Number(i64),
			Text(String),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Number(n) => Self::try_from(n),
			Raw::Text(s) => Self::from_str(&s),
		}
		.map_err(serde::de::Error::custom)
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod mode_tests {
	use super::*;

	#[test]
	fn derivations_agree_with_numeric_value() {
		for mode in Mode::MODES {
			assert_eq!(Mode::try_from(mode.value() as i64).unwrap(), mode);
			assert_eq!(mode.url_segment().parse::<Mode>().unwrap(), mode);
			assert_eq!(mode.display_name().parse::<Mode>().unwrap(), mode);
		}

		assert_eq!(Mode::Catch.url_segment(), "fruits");
		assert_eq!(Mode::Mania.display_name(), "osu!mania");
	}

	#[test]
	fn rejects_out_of_range_modes() {
		for value in [-1, 4, 100] {
			assert!(matches!(
				Mode::try_from(value),
				Err(ScorepostError::InvalidMode(_))
			));
		}

		assert!("ctb but spelled wrong".parse::<Mode>().is_err());
	}

	#[test]
	fn parses_user_input() {
		assert_eq!(" 1 ".parse::<Mode>().unwrap(), Mode::Taiko);
		assert_eq!("STD".parse::<Mode>().unwrap(), Mode::Osu);
		assert_eq!("catch".parse::<Mode>().unwrap(), Mode::Catch);
	}
}
// }}}
