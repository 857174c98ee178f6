use std::fmt::Display;

use crate::error::ScorepostError;

use super::metrics::HitCounts;
use super::mode::Mode;

// {{{ Approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApprovalStatus {
	Graveyard,
	WorkInProgress,
	Pending,
	Ranked,
	Approved,
	Qualified,
	Loved,
}

impl ApprovalStatus {
	pub const STATUSES: [Self; 7] = [
		Self::Graveyard,
		Self::WorkInProgress,
		Self::Pending,
		Self::Ranked,
		Self::Approved,
		Self::Qualified,
		Self::Loved,
	];

	pub const STATUS_STRINGS: [&'static str; 7] = [
		"graveyard",
		"wip",
		"pending",
		"ranked",
		"approved",
		"qualified",
		"loved",
	];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}

	/// The numeric value used by the api, between -2 and 4.
	#[inline]
	pub fn value(self) -> i32 {
		self.to_index() as i32 - 2
	}

	/// Whether plays on maps with this status award pp.
	#[inline]
	pub fn awards_pp(self) -> bool {
		matches!(self, Self::Ranked | Self::Approved)
	}

	/// Qualifier appended after the pp value of a post. Plays on maps
	/// that award pp need none.
	#[inline]
	pub fn qualifier(self) -> Option<&'static str> {
		if self.awards_pp() {
			None
		} else {
			Some("if ranked")
		}
	}
}

impl TryFrom<i32> for ApprovalStatus {
	type Error = ScorepostError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		usize::try_from(value + 2)
			.ok()
			.and_then(|i| Self::STATUSES.get(i).copied())
			.ok_or_else(|| {
				ScorepostError::InvalidRecord(format!("unknown approval status {value}"))
			})
	}
}

impl Display for ApprovalStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", Self::STATUS_STRINGS[self.to_index()])
	}
}
// }}}
// {{{ Score record
/// A single play, as reported by the score provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
	pub beatmap_id: u64,
	pub user_id: u64,
	pub combo: u32,
	pub hits: HitCounts,

	/// Raw mod bitmask, before any canonicalization.
	pub mods: u32,

	/// Only present for plays the server kept around permanently.
	pub score_id: Option<u64>,
	pub rank: Option<String>,
}
// }}}
// {{{ Beatmap record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatmapRecord {
	pub artist: String,
	pub title: String,
	pub creator: String,
	pub difficulty_name: String,
	pub max_combo: u32,
	pub mode: Mode,
	pub status: ApprovalStatus,
}
// }}}
