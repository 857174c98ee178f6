use crate::error::ScorepostError;

// {{{ Hit counts
/// Judgement counts of a single play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCounts {
	pub n300: u32,
	pub n100: u32,
	pub n50: u32,
	pub misses: u32,
}

impl HitCounts {
	#[inline]
	pub fn new(n300: u32, n100: u32, n50: u32, misses: u32) -> Self {
		Self {
			n300,
			n100,
			n50,
			misses,
		}
	}

	#[inline]
	pub fn total(&self) -> u64 {
		self.n300 as u64 + self.n100 as u64 + self.n50 as u64 + self.misses as u64
	}

	/// Accuracy as a percentage in `[0, 100]`.
	pub fn accuracy(&self) -> Result<f64, ScorepostError> {
		accuracy(self.n300, self.n100, self.n50, self.misses)
	}
}
// }}}
// {{{ Accuracy
pub fn accuracy(n300: u32, n100: u32, n50: u32, misses: u32) -> Result<f64, ScorepostError> {
	let total = n300 as f64 + n100 as f64 + n50 as f64 + misses as f64;
	if total == 0.0 {
		return Err(ScorepostError::ZeroJudgements);
	}

	let points = 300.0 * n300 as f64 + 100.0 * n100 as f64 + 50.0 * n50 as f64;
	Ok((100.0 * points / (300.0 * total)).min(100.0))
}
// }}}
// {{{ Completion
/// How far a play's combo may fall short of the map's max combo while
/// still counting as a full combo. Slider ends and similar objects make
/// the api's combo values disagree slightly on actual FCs.
pub const FULL_COMBO_TOLERANCE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	FullCombo,
	PartialNoMiss,
	PartialWithMiss,
}

impl Completion {
	#[inline]
	pub fn is_full_combo(self) -> bool {
		self == Self::FullCombo
	}
}

pub fn classify_completion(achieved_combo: u32, max_combo: u32, misses: u32) -> Completion {
	if misses > 0 {
		Completion::PartialWithMiss
	} else if max_combo.saturating_sub(achieved_combo) <= FULL_COMBO_TOLERANCE {
		Completion::FullCombo
	} else {
		Completion::PartialNoMiss
	}
}
// }}}
