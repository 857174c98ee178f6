use std::fmt::Display;

use tracing::info;

use crate::error::ScorepostError;
use crate::osu::api::{BeatmapFileProvider, BeatmapProvider, ScoreProvider};
use crate::osu::metrics::classify_completion;
use crate::osu::mode::Mode;
use crate::osu::mods::ModSet;
use crate::osu::performance::{PerformanceCalculator, PerformanceEvaluator, PerformanceRequest};
use crate::osu::records::ScoreRecord;
use crate::timed;

pub mod format;

use format::PostFormatter;

// {{{ Scorepost
/// A finished post, together with what is needed to link to the play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorepost {
	pub text: String,
	pub mode: Mode,
	pub score_id: Option<u64>,
}

impl Scorepost {
	#[inline]
	pub fn link(&self) -> Option<String> {
		score_link(self.score_id, self.mode)
	}
}

impl Display for Scorepost {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.text)
	}
}

/// Permalink to a play on the osu! website. Only plays with a permanent
/// identifier have one.
pub fn score_link(score_id: Option<u64>, mode: Mode) -> Option<String> {
	score_id.map(|id| format!("https://osu.ppy.sh/scores/{}/{}", mode.url_segment(), id))
}
// }}}
// {{{ Scoreposter
/// The whole pipeline: fetches a play and everything around it, then
/// turns it into a [Scorepost].
///
/// Holds no per-request state, so a single instance can serve any
/// number of concurrent requests.
pub struct Scoreposter<P, C> {
	providers: P,
	calculator: C,
}

impl<P, C> Scoreposter<P, C>
where
	P: ScoreProvider + BeatmapProvider + BeatmapFileProvider,
	C: PerformanceCalculator,
{
	#[inline]
	pub fn new(providers: P, calculator: C) -> Self {
		Self {
			providers,
			calculator,
		}
	}

	#[cfg(test)]
	pub fn providers_mut(&mut self) -> &mut P {
		&mut self.providers
	}

	/// Scorepost for the most recent play of a user.
	pub async fn build_scorepost(
		&self,
		username: &str,
		mode: Mode,
	) -> Result<Scorepost, ScorepostError> {
		let score = timed!("fetch_recent_score", {
			self.providers.recent_score(username, mode).await?
		})
		.ok_or_else(|| ScorepostError::NoRecentPlay(username.to_owned()))?;

		self.build_for_score(username, mode, &score).await
	}

	/// Scoreposts for up to `limit` recent plays of a user, newest first.
	///
	/// Fails as a whole if any single post cannot be built.
	pub async fn build_scoreposts(
		&self,
		username: &str,
		mode: Mode,
		limit: u32,
	) -> Result<Vec<Scorepost>, ScorepostError> {
		let scores = timed!("fetch_recent_scores", {
			self.providers
				.recent_scores(username, mode, limit.max(1))
				.await?
		});

		if scores.is_empty() {
			return Err(ScorepostError::NoRecentPlay(username.to_owned()));
		}

		let mut posts = Vec::with_capacity(scores.len());
		for score in &scores {
			posts.push(self.build_for_score(username, mode, score).await?);
		}

		Ok(posts)
	}

	pub async fn build_for_score(
		&self,
		username: &str,
		mode: Mode,
		score: &ScoreRecord,
	) -> Result<Scorepost, ScorepostError> {
		// Checked before any further network call
		let accuracy = score.hits.accuracy()?;
		let mods = ModSet::from_bits(score.mods);

		let beatmap = timed!("fetch_beatmap", {
			self.providers.beatmap(score.beatmap_id).await?
		});
		let beatmap_file = timed!("fetch_beatmap_file", {
			self.providers.beatmap_file(score.beatmap_id).await?
		});

		let completion = classify_completion(score.combo, beatmap.max_combo, score.hits.misses);
		let request = PerformanceRequest {
			mode,
			accuracy,
			hits: score.hits,
			mods: mods.sanitized(),
			combo: score.combo,
		};

		let evaluation = PerformanceEvaluator::new(&self.calculator, &beatmap_file).evaluate_play(
			&request,
			completion,
			beatmap.max_combo,
		)?;

		let text = PostFormatter {
			username,
			mode,
			score,
			beatmap: &beatmap,
			mods,
			accuracy,
			completion,
			evaluation: &evaluation,
		}
		.format();

		info!(username, beatmap_id = score.beatmap_id, ?completion, "Built scorepost");

		Ok(Scorepost {
			text,
			mode,
			score_id: score.score_id,
		})
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod scorepost_tests {
	use super::testing::*;
	use super::*;
	use crate::osu::metrics::HitCounts;

	#[tokio::test]
	async fn full_combo_scenario() -> Result<(), ScorepostError> {
		let poster = scoreposter(
			vec![score(1000, HitCounts::new(990, 10, 0, 0), 0, None)],
			1000,
		);

		let post = poster.build_scorepost("player", Mode::Osu).await?;

		assert!(post.text.contains(" 99.33% FC | "));
		assert!(!post.text.contains("if FC"));
		assert_eq!(poster.calculator.calls().len(), 1);
		assert_eq!(post.link(), None);
		Ok(())
	}

	#[tokio::test]
	async fn missed_play_scenario() -> Result<(), ScorepostError> {
		let poster = scoreposter(
			vec![score(500, HitCounts::new(900, 50, 0, 3), 0, Some(42))],
			1000,
		);

		let post = poster.build_scorepost("player", Mode::Osu).await?;

		assert!(post.text.contains("500x/1,000x 3❌"));
		// Ranked map, so the play needs no qualifier
		assert!(post.text.ends_with("pp if FC)"));

		let calls = poster.calculator.calls();
		assert_eq!(calls.len(), 2);
		assert_eq!(calls[1].combo, 1000);
		assert_eq!(calls[1].hits.misses, 0);

		assert_eq!(
			post.link().as_deref(),
			Some("https://osu.ppy.sh/scores/osu/42")
		);
		Ok(())
	}

	#[tokio::test]
	async fn nightcore_is_sanitized_and_collapsed() -> Result<(), ScorepostError> {
		let mods = ModSet::DOUBLE_TIME | ModSet::NIGHTCORE | ModSet::NO_FAIL;
		let poster = scoreposter(
			vec![score(1000, HitCounts::new(1000, 0, 0, 0), mods, None)],
			1000,
		);

		let post = poster.build_scorepost("player", Mode::Osu).await?;

		assert!(post.text.contains(" +NFNC "));
		assert_eq!(poster.calculator.calls()[0].mods, ModSet::NIGHTCORE);
		Ok(())
	}

	#[tokio::test]
	async fn mode_tag_and_link_follow_requested_mode() -> Result<(), ScorepostError> {
		let poster = scoreposter(
			vec![score(1000, HitCounts::new(1000, 0, 0, 0), 0, Some(7))],
			1000,
		);

		let post = poster.build_scorepost("player", Mode::Catch).await?;

		assert!(post.text.starts_with("(osu!catch) player | "));
		assert_eq!(poster.calculator.calls()[0].mode, Mode::Catch);
		assert_eq!(
			post.link().as_deref(),
			Some("https://osu.ppy.sh/scores/fruits/7")
		);
		Ok(())
	}

	#[tokio::test]
	async fn zero_judgements_abort_before_evaluation() {
		let poster = scoreposter(vec![score(0, HitCounts::default(), 0, None)], 1000);

		let res = poster.build_scorepost("player", Mode::Osu).await;

		assert!(matches!(res, Err(ScorepostError::ZeroJudgements)));
		assert!(poster.calculator.calls().is_empty());
	}

	#[tokio::test]
	async fn no_recent_play() {
		let poster = scoreposter(vec![], 1000);

		let res = poster.build_scorepost("player", Mode::Osu).await;
		assert!(matches!(res, Err(ScorepostError::NoRecentPlay(_))));

		let res = poster.build_scorepost("someone else", Mode::Osu).await;
		assert!(matches!(res, Err(ScorepostError::NoRecentPlay(_))));
	}

	#[tokio::test]
	async fn missing_beatmap_file_is_data_unavailable() {
		let mut poster = scoreposter(
			vec![score(10, HitCounts::new(10, 0, 0, 0), 0, None)],
			10,
		);
		poster.providers.files.clear();

		let res = poster.build_scorepost("player", Mode::Osu).await;
		assert!(matches!(res, Err(ScorepostError::DataUnavailable(_))));
	}

	#[tokio::test]
	async fn several_posts_respect_the_limit() -> Result<(), ScorepostError> {
		let poster = scoreposter(
			vec![
				score(1000, HitCounts::new(1000, 0, 0, 0), 0, None),
				score(400, HitCounts::new(800, 0, 0, 1), 0, None),
				score(999, HitCounts::new(999, 1, 0, 0), 0, None),
			],
			1000,
		);

		let posts = poster.build_scoreposts("player", Mode::Osu, 2).await?;

		assert_eq!(posts.len(), 2);
		assert!(posts[0].text.contains(" FC | "));
		assert!(posts[1].text.contains("400x/1,000x 1❌"));
		Ok(())
	}

	#[test]
	fn links() {
		assert_eq!(score_link(None, Mode::Mania), None);
		assert_eq!(
			score_link(Some(123), Mode::Mania).as_deref(),
			Some("https://osu.ppy.sh/scores/mania/123")
		);
	}
}
// }}}
