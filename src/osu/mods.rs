use std::fmt::Display;

// {{{ Mod set
/// A canonical set of osu! mods.
///
/// Constructing a set through [ModSet::from_bits] drops unknown bits and
/// resolves the two incompatible pairs the game can report together:
/// SuddenDeath is dropped in favour of Perfect, and DoubleTime is dropped
/// in favour of Nightcore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModSet(u32);

impl ModSet {
	pub const NO_FAIL: u32 = 1 << 0;
	pub const EASY: u32 = 1 << 1;
	pub const TOUCH_DEVICE: u32 = 1 << 2;
	pub const HIDDEN: u32 = 1 << 3;
	pub const HARD_ROCK: u32 = 1 << 4;
	pub const SUDDEN_DEATH: u32 = 1 << 5;
	pub const DOUBLE_TIME: u32 = 1 << 6;
	pub const RELAX: u32 = 1 << 7;
	pub const HALF_TIME: u32 = 1 << 8;
	pub const NIGHTCORE: u32 = 1 << 9;
	pub const FLASHLIGHT: u32 = 1 << 10;
	pub const AUTOPLAY: u32 = 1 << 11;
	pub const SPUN_OUT: u32 = 1 << 12;
	pub const AUTOPILOT: u32 = 1 << 13;
	pub const PERFECT: u32 = 1 << 14;

	/// Display order of the abbreviations. This is the order the post
	/// renders mods in, regardless of bit position.
	pub const MOD_TABLE: [(u32, &'static str); 15] = [
		(Self::NO_FAIL, "NF"),
		(Self::EASY, "EZ"),
		(Self::TOUCH_DEVICE, "TD"),
		(Self::HIDDEN, "HD"),
		(Self::HARD_ROCK, "HR"),
		(Self::SUDDEN_DEATH, "SD"),
		(Self::DOUBLE_TIME, "DT"),
		(Self::RELAX, "RX"),
		(Self::HALF_TIME, "HT"),
		(Self::NIGHTCORE, "NC"),
		(Self::FLASHLIGHT, "FL"),
		(Self::AUTOPLAY, "AT"),
		(Self::SPUN_OUT, "SO"),
		(Self::AUTOPILOT, "AP"),
		(Self::PERFECT, "PF"),
	];

	/// Mods which change the difficulty or the pp of a play.
	pub const PERFORMANCE_MODS: [u32; 7] = [
		Self::FLASHLIGHT,
		Self::NIGHTCORE,
		Self::HALF_TIME,
		Self::DOUBLE_TIME,
		Self::HARD_ROCK,
		Self::HIDDEN,
		Self::EASY,
	];

	const KNOWN_BITS: u32 = (1 << 15) - 1;

	pub fn from_bits(bitmask: u32) -> Self {
		let mut bits = bitmask & Self::KNOWN_BITS;

		if bits & Self::SUDDEN_DEATH != 0 && bits & Self::PERFECT != 0 {
			bits &= !Self::SUDDEN_DEATH;
		}

		if bits & Self::DOUBLE_TIME != 0 && bits & Self::NIGHTCORE != 0 {
			bits &= !Self::DOUBLE_TIME;
		}

		Self(bits)
	}

	#[inline]
	pub fn bits(self) -> u32 {
		self.0
	}

	#[inline]
	pub fn contains(self, flag: u32) -> bool {
		self.0 & flag == flag
	}

	#[inline]
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Abbreviations of every mod in the set, in table order.
	pub fn abbreviations(self) -> Vec<&'static str> {
		Self::MOD_TABLE
			.iter()
			.filter(|(flag, _)| self.contains(*flag))
			.map(|(_, name)| *name)
			.collect()
	}

	/// Restricts the set to the mods that matter for performance
	/// calculation, returned as a raw bitmask.
	pub fn sanitized(self) -> u32 {
		Self::PERFORMANCE_MODS
			.iter()
			.filter(|flag| self.contains(**flag))
			.fold(0, |acc, flag| acc | flag)
	}

	/// The ` +HDDT`-style suffix, minus the leading space. Empty when the
	/// set is.
	pub fn suffix(self) -> String {
		if self.is_empty() {
			String::new()
		} else {
			format!("+{}", self.abbreviations().concat())
		}
	}
}

impl Display for ModSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.suffix())
	}
}
// }}}
// {{{ Bitmask helpers
/// Decodes a raw bitmask into the ordered list of mod abbreviations.
#[inline]
pub fn decode(bitmask: u32) -> Vec<&'static str> {
	ModSet::from_bits(bitmask).abbreviations()
}

/// Decodes a raw bitmask and keeps only the performance-relevant mods.
#[inline]
pub fn sanitize(bitmask: u32) -> u32 {
	ModSet::from_bits(bitmask).sanitized()
}
// }}}
// {{{ Tests
#[cfg(test)]
mod mods_tests {
	use super::*;

	const ALL_MASKS: std::ops::Range<u32> = 0..(1 << 15);

	#[test]
	fn empty_bitmask_decodes_to_nothing() {
		assert!(decode(0).is_empty());
		assert_eq!(sanitize(0), 0);
		assert_eq!(ModSet::from_bits(0).suffix(), "");
	}

	#[test]
	fn unknown_bits_are_ignored() {
		let mask = ModSet::HIDDEN | (1 << 20) | (1 << 30);
		assert_eq!(decode(mask), vec!["HD"]);
		assert_eq!(ModSet::from_bits(1 << 29).suffix(), "");
	}

	#[test]
	fn order_follows_table_not_bits() {
		let mask = ModSet::FLASHLIGHT | ModSet::HIDDEN | ModSet::NO_FAIL | ModSet::HARD_ROCK;
		assert_eq!(decode(mask), vec!["NF", "HD", "HR", "FL"]);
	}

	#[test]
	fn perfect_drops_sudden_death() {
		for mask in ALL_MASKS {
			if mask & ModSet::SUDDEN_DEATH != 0 && mask & ModSet::PERFECT != 0 {
				let decoded = decode(mask);
				assert!(!decoded.contains(&"SD"), "SD kept for mask {mask}");
				assert!(decoded.contains(&"PF"));
			}
		}

		assert_eq!(decode(ModSet::SUDDEN_DEATH), vec!["SD"]);
	}

	#[test]
	fn nightcore_collapses_double_time() {
		for mask in ALL_MASKS {
			if mask & ModSet::DOUBLE_TIME != 0 && mask & ModSet::NIGHTCORE != 0 {
				let suffix = ModSet::from_bits(mask).suffix();
				assert!(suffix.contains("NC"), "missing NC for mask {mask}");
				assert!(!suffix.contains("DT"), "DT kept for mask {mask}");
				assert!(!suffix.contains("DTNC"));
			}
		}
	}

	#[test]
	fn double_time_nightcore_sanitizes_to_nightcore() {
		let mask = ModSet::DOUBLE_TIME | ModSet::NIGHTCORE;
		assert_eq!(sanitize(mask), ModSet::NIGHTCORE);
		assert_eq!(ModSet::from_bits(mask).suffix(), "+NC");

		assert_eq!(
			sanitize(mask | ModSet::HIDDEN),
			ModSet::NIGHTCORE | ModSet::HIDDEN
		);
		assert_eq!(ModSet::from_bits(mask | ModSet::HIDDEN).suffix(), "+HDNC");
	}

	#[test]
	fn sanitize_drops_cosmetic_mods() {
		let mask = ModSet::NO_FAIL
			| ModSet::HIDDEN
			| ModSet::DOUBLE_TIME
			| ModSet::SPUN_OUT
			| ModSet::PERFECT
			| ModSet::TOUCH_DEVICE;
		assert_eq!(sanitize(mask), ModSet::HIDDEN | ModSet::DOUBLE_TIME);

		for mask in ALL_MASKS {
			let sanitized = sanitize(mask);
			assert_eq!(sanitized & !mask, 0, "sanitize invented mods for {mask}");
		}
	}
}
// }}}
