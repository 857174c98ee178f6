use std::fmt::Display;

use crate::osu::metrics::Completion;
use crate::osu::mode::Mode;
use crate::osu::mods::ModSet;
use crate::osu::performance::Evaluation;
use crate::osu::records::{BeatmapRecord, ScoreRecord};

// {{{ Number formatting
/// Formats an integer with `,` as the thousands separator.
pub fn with_thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);

	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}

	out
}

#[inline]
fn rounded_pp(pp: f64) -> String {
	with_thousands(pp.round().max(0.0) as u64)
}
// }}}
// {{{ Post formatter
/// Everything that ends up in a scorepost, already computed.
#[derive(Debug, Clone, Copy)]
pub struct PostFormatter<'a> {
	pub username: &'a str,
	pub mode: Mode,
	pub score: &'a ScoreRecord,
	pub beatmap: &'a BeatmapRecord,
	pub mods: ModSet,
	pub accuracy: f64,
	pub completion: Completion,
	pub evaluation: &'a Evaluation,
}

impl PostFormatter<'_> {
	/// The finished post, with every `%20` shown as a space.
	pub fn format(&self) -> String {
		self.to_string().replace("%20", " ")
	}
}

impl Display for PostFormatter<'_> {
	fn fmt(&self, buffer: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let beatmap = self.beatmap;

		// {{{ Header
		if !self.mode.is_default() {
			write!(buffer, "({}) ", self.mode)?;
		}

		write!(
			buffer,
			"{} | {} - {} [{}] (mapped by {}, {:.2}⭐️)",
			self.username,
			beatmap.artist,
			beatmap.title,
			beatmap.difficulty_name,
			beatmap.creator,
			self.evaluation.actual.stars
		)?;

		if !self.mods.is_empty() {
			write!(buffer, " {}", self.mods)?;
		}
		// }}}
		// {{{ Play
		write!(buffer, " {:.2}%", self.accuracy)?;

		match self.completion {
			Completion::FullCombo => write!(buffer, " FC")?,
			Completion::PartialNoMiss | Completion::PartialWithMiss => write!(
				buffer,
				" {}x/{}x",
				with_thousands(self.score.combo as u64),
				with_thousands(beatmap.max_combo as u64)
			)?,
		}

		if self.completion == Completion::PartialWithMiss {
			write!(buffer, " {}❌", self.score.hits.misses)?;
		}
		// }}}
		// {{{ Performance
		write!(buffer, " | {}pp", rounded_pp(self.evaluation.actual.pp))?;

		if let Some(projection) = self.evaluation.if_full_combo {
			write!(buffer, " ({}pp if FC)", rounded_pp(projection.pp))?;
		}

		if let (Some(_), Some(qualifier)) = (self.score.score_id, beatmap.status.qualifier()) {
			write!(buffer, " {}", qualifier)?;
		}
		// }}}

		Ok(())
	}
}
// }}}
