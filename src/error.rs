use thiserror::Error;

/// Everything that can abort the construction of a single scorepost.
///
/// None of these are fatal to the process: each one is scoped to the
/// request that produced it.
#[derive(Debug, Error)]
pub enum ScorepostError {
	#[error("{0} has no recent plays")]
	NoRecentPlay(String),

	#[error("Beatmap data unavailable: {0}")]
	DataUnavailable(String),

	#[error("Invalid mode {0}, expected one of 0 (osu), 1 (taiko), 2 (fruits) or 3 (mania)")]
	InvalidMode(String),

	#[error("The play has no judgements at all")]
	ZeroJudgements,

	#[error("Invalid record: {0}")]
	InvalidRecord(String),

	#[error("{0}")]
	Api(String),
}

impl ScorepostError {
	/// Whether the error was caused by what the user asked for, rather
	/// than by something going wrong on our side.
	pub fn is_user_error(&self) -> bool {
		matches!(
			self,
			Self::NoRecentPlay(_) | Self::InvalidMode(_) | Self::ZeroJudgements
		)
	}
}

impl From<reqwest::Error> for ScorepostError {
	fn from(e: reqwest::Error) -> Self {
		let message = if e.is_timeout() {
			format!("Request timed out: {}", e)
		} else if e.is_connect() {
			format!("Connection failed: {}", e)
		} else if e.is_decode() {
			format!("Malformed API response: {}", e)
		} else if let Some(status) = e.status() {
			format!("HTTP {} error: {}", status.as_u16(), e)
		} else {
			format!("HTTP error: {}", e)
		};

		Self::Api(message)
	}
}
