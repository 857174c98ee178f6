use rosu_pp::model::mode::GameMode;
use tracing::debug;

use crate::error::ScorepostError;
use crate::timed;

use super::metrics::{Completion, HitCounts};
use super::mode::Mode;
use super::mods::ModSet;

// {{{ Request & result
/// Everything the calculator needs to know about a play, besides the
/// beatmap itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceRequest {
	pub mode: Mode,
	pub accuracy: f64,
	pub hits: HitCounts,

	/// Sanitized mod bitmask, see [super::mods::sanitize].
	pub mods: u32,
	pub combo: u32,
}

impl PerformanceRequest {
	/// The request a full combo of the same play would make.
	///
	/// Misses are zeroed but *not* turned into 300s, and the accuracy is
	/// left as is. The result is an upper-bound estimate rather than the
	/// pp of a score that could actually be set.
	pub fn full_combo_projection(&self, max_combo: u32) -> Self {
		Self {
			combo: max_combo,
			hits: HitCounts {
				misses: 0,
				..self.hits
			},
			..*self
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceResult {
	pub stars: f64,
	pub pp: f64,
}
// }}}
// {{{ Calculator
pub trait PerformanceCalculator {
	/// Computes the star rating and pp of a play on the given beatmap.
	///
	/// Must fail with [ScorepostError::DataUnavailable] when the beatmap
	/// bytes cannot be understood.
	fn calculate(
		&self,
		beatmap: &[u8],
		request: &PerformanceRequest,
	) -> Result<PerformanceResult, ScorepostError>;
}

/// [PerformanceCalculator] backed by `rosu-pp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosuCalculator;

impl RosuCalculator {
	#[inline]
	fn game_mode(mode: Mode) -> GameMode {
		match mode {
			Mode::Osu => GameMode::Osu,
			Mode::Taiko => GameMode::Taiko,
			Mode::Catch => GameMode::Catch,
			Mode::Mania => GameMode::Mania,
		}
	}

	/// `rosu-pp` reads the clock rate off the DoubleTime bit, which the
	/// sanitized mods drop whenever Nightcore is present.
	#[inline]
	fn legacy_mods(mods: u32) -> u32 {
		if mods & ModSet::NIGHTCORE != 0 {
			mods | ModSet::DOUBLE_TIME
		} else {
			mods
		}
	}
}

impl PerformanceCalculator for RosuCalculator {
	fn calculate(
		&self,
		beatmap: &[u8],
		request: &PerformanceRequest,
	) -> Result<PerformanceResult, ScorepostError> {
		let map = rosu_pp::Beatmap::from_bytes(beatmap).map_err(|e| {
			ScorepostError::DataUnavailable(format!("could not parse beatmap file: {e}"))
		})?;

		if map.hit_objects.is_empty() {
			return Err(ScorepostError::DataUnavailable(
				"beatmap file contains no hit objects".to_owned(),
			));
		}

		let attrs = rosu_pp::Performance::new(&map)
			.mode_or_ignore(Self::game_mode(request.mode))
			.mods(Self::legacy_mods(request.mods))
			.accuracy(request.accuracy)
			.n300(request.hits.n300)
			.n100(request.hits.n100)
			.n50(request.hits.n50)
			.misses(request.hits.misses)
			.combo(request.combo)
			.calculate();

		Ok(PerformanceResult {
			stars: attrs.stars(),
			pp: attrs.pp(),
		})
	}
}
// }}}
// {{{ Evaluator
/// Outcome of evaluating a play: its own pp, plus the pp it would have
/// been worth as a full combo when it wasn't one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
	pub actual: PerformanceResult,
	pub if_full_combo: Option<PerformanceResult>,
}

/// Runs a calculator against a single, already downloaded, beatmap.
pub struct PerformanceEvaluator<'a, C> {
	calculator: &'a C,
	beatmap: &'a [u8],
}

impl<'a, C: PerformanceCalculator> PerformanceEvaluator<'a, C> {
	#[inline]
	pub fn new(calculator: &'a C, beatmap: &'a [u8]) -> Self {
		Self {
			calculator,
			beatmap,
		}
	}

	pub fn evaluate(&self, request: &PerformanceRequest) -> Result<PerformanceResult, ScorepostError> {
		self.calculator.calculate(self.beatmap, request)
	}

	pub fn evaluate_full_combo_projection(
		&self,
		request: &PerformanceRequest,
		max_combo: u32,
	) -> Result<PerformanceResult, ScorepostError> {
		self.calculator
			.calculate(self.beatmap, &request.full_combo_projection(max_combo))
	}

	/// Evaluates the play, and projects it to a full combo unless it
	/// already is one.
	pub fn evaluate_play(
		&self,
		request: &PerformanceRequest,
		completion: Completion,
		max_combo: u32,
	) -> Result<Evaluation, ScorepostError> {
		let actual = timed!("evaluate", { self.evaluate(request)? });
		debug!(stars = actual.stars, pp = actual.pp, "Evaluated play");

		let if_full_combo = if completion.is_full_combo() {
			None
		} else {
			let projection = timed!("evaluate_full_combo_projection", {
				self.evaluate_full_combo_projection(request, max_combo)?
			});
			debug!(pp = projection.pp, "Evaluated full combo projection");
			Some(projection)
		};

		Ok(Evaluation {
			actual,
			if_full_combo,
		})
	}
}
// }}}
// {{{ Testing helpers
#[cfg(test)]
pub mod testing {
	use std::sync::Mutex;

	use super::*;

	/// Calculator which records every request it gets, and derives a fake
	/// pp value from the combo so tests can tell calls apart.
	#[derive(Default)]
	pub struct MockCalculator {
		pub requests: Mutex<Vec<PerformanceRequest>>,
	}

	impl MockCalculator {
		pub fn calls(&self) -> Vec<PerformanceRequest> {
			self.requests.lock().unwrap().clone()
		}
	}

	impl PerformanceCalculator for MockCalculator {
		fn calculate(
			&self,
			beatmap: &[u8],
			request: &PerformanceRequest,
		) -> Result<PerformanceResult, ScorepostError> {
			if beatmap.is_empty() {
				return Err(ScorepostError::DataUnavailable("empty beatmap".to_owned()));
			}

			self.requests.lock().unwrap().push(*request);
			Ok(PerformanceResult {
				stars: 5.4321,
				pp: request.combo as f64 + 0.4 - 10.0 * request.hits.misses as f64,
			})
		}
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod performance_tests {
	use super::testing::MockCalculator;
	use super::*;

	fn request(combo: u32, misses: u32) -> PerformanceRequest {
		PerformanceRequest {
			mode: Mode::Osu,
			accuracy: 97.5,
			hits: HitCounts::new(900, 40, 5, misses),
			mods: ModSet::HIDDEN,
			combo,
		}
	}

	#[test]
	fn full_combo_is_never_projected() {
		let calculator = MockCalculator::default();
		let evaluator = PerformanceEvaluator::new(&calculator, b"osu file format v14");

		let evaluation = evaluator
			.evaluate_play(&request(1000, 0), Completion::FullCombo, 1000)
			.unwrap();

		assert!(evaluation.if_full_combo.is_none());
		assert_eq!(calculator.calls().len(), 1);
	}

	#[test]
	fn partial_plays_are_projected() {
		for (completion, misses) in [
			(Completion::PartialNoMiss, 0),
			(Completion::PartialWithMiss, 3),
		] {
			let calculator = MockCalculator::default();
			let evaluator = PerformanceEvaluator::new(&calculator, b"osu file format v14");
			let original = request(500, misses);

			let evaluation = evaluator.evaluate_play(&original, completion, 1000).unwrap();
			let calls = calculator.calls();

			assert_eq!(calls.len(), 2);
			assert_eq!(calls[0], original);

			let projected = calls[1];
			assert_eq!(projected.combo, 1000);
			assert_eq!(projected.hits.misses, 0);
			assert_eq!(projected.hits.n300, original.hits.n300);
			assert_eq!(projected.hits.n100, original.hits.n100);
			assert_eq!(projected.hits.n50, original.hits.n50);
			assert_eq!(projected.accuracy, original.accuracy);
			assert_eq!(projected.mods, original.mods);

			assert!(evaluation.if_full_combo.unwrap().pp > evaluation.actual.pp);
		}
	}

	#[test]
	fn unreadable_beatmaps_abort_evaluation() {
		let calculator = MockCalculator::default();
		let evaluator = PerformanceEvaluator::new(&calculator, &[]);

		assert!(matches!(
			evaluator.evaluate_play(&request(10, 1), Completion::PartialWithMiss, 20),
			Err(ScorepostError::DataUnavailable(_))
		));
	}

	#[test]
	fn rosu_rejects_garbage() {
		let res = RosuCalculator.calculate(b"definitely not a beatmap", &request(10, 0));
		assert!(matches!(res, Err(ScorepostError::DataUnavailable(_))));
	}

	#[test]
	fn rosu_restores_double_time_for_nightcore() {
		assert_eq!(
			RosuCalculator::legacy_mods(ModSet::NIGHTCORE),
			ModSet::NIGHTCORE | ModSet::DOUBLE_TIME
		);
		assert_eq!(RosuCalculator::legacy_mods(ModSet::HIDDEN), ModSet::HIDDEN);
	}
}
// }}}
