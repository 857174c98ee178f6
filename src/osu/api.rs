//! The collaborators the scorepost pipeline gets its data from, and an
//! implementation of all of them backed by the osu! v1 api.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_with::{serde_as, DisplayFromStr};
use tracing::{debug, info};

use crate::error::ScorepostError;

use super::metrics::HitCounts;
use super::mode::Mode;
use super::records::{ApprovalStatus, BeatmapRecord, ScoreRecord};

// {{{ Provider traits
pub trait ScoreProvider {
	/// Up to `limit` recent plays of the user, newest first.
	async fn recent_scores(
		&self,
		username: &str,
		mode: Mode,
		limit: u32,
	) -> Result<Vec<ScoreRecord>, ScorepostError>;

	/// The most recent play of the user. Having none is not an error.
	async fn recent_score(
		&self,
		username: &str,
		mode: Mode,
	) -> Result<Option<ScoreRecord>, ScorepostError> {
		Ok(self
			.recent_scores(username, mode, 1)
			.await?
			.into_iter()
			.next())
	}
}

pub trait BeatmapProvider {
	async fn beatmap(&self, beatmap_id: u64) -> Result<BeatmapRecord, ScorepostError>;
}

pub trait BeatmapFileProvider {
	/// Raw contents of the `.osu` file. The bytes are owned by the caller,
	/// so concurrent requests never share a buffer.
	async fn beatmap_file(&self, beatmap_id: u64) -> Result<Vec<u8>, ScorepostError>;
}
// }}}
// {{{ Raw api types
/// The v1 api sends every number as a string.
#[serde_as]
#[derive(Debug, Deserialize)]
struct RawScore {
	#[serde_as(as = "DisplayFromStr")]
	beatmap_id: u64,
	#[serde_as(as = "DisplayFromStr")]
	user_id: u64,
	#[serde_as(as = "DisplayFromStr")]
	maxcombo: u32,
	#[serde_as(as = "DisplayFromStr")]
	count300: u32,
	#[serde_as(as = "DisplayFromStr")]
	count100: u32,
	#[serde_as(as = "DisplayFromStr")]
	count50: u32,
	#[serde_as(as = "DisplayFromStr")]
	countmiss: u32,
	#[serde_as(as = "DisplayFromStr")]
	enabled_mods: u32,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(default)]
	score_id: Option<u64>,
	#[serde(default)]
	rank: Option<String>,
}

impl From<RawScore> for ScoreRecord {
	fn from(raw: RawScore) -> Self {
		Self {
			beatmap_id: raw.beatmap_id,
			user_id: raw.user_id,
			combo: raw.maxcombo,
			hits: HitCounts::new(raw.count300, raw.count100, raw.count50, raw.countmiss),
			mods: raw.enabled_mods,
			// Failed plays come back with an id of 0
			score_id: raw.score_id.filter(|id| *id != 0),
			rank: raw.rank,
		}
	}
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct RawBeatmap {
	artist: String,
	title: String,
	creator: String,
	version: String,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(default)]
	max_combo: Option<u32>,
	mode: Mode,
	#[serde_as(as = "DisplayFromStr")]
	approved: i32,
}

impl TryFrom<RawBeatmap> for BeatmapRecord {
	type Error = ScorepostError;

	fn try_from(raw: RawBeatmap) -> Result<Self, Self::Error> {
		Ok(Self {
			artist: raw.artist,
			title: raw.title,
			creator: raw.creator,
			difficulty_name: raw.version,
			// Some converted or loved maps have no max combo on record
			max_combo: raw.max_combo.unwrap_or_default(),
			mode: raw.mode,
			status: ApprovalStatus::try_from(raw.approved)?,
		})
	}
}
// }}}
// {{{ Api client
pub const DEFAULT_API_URL: &str = "https://osu.ppy.sh/api";
pub const DEFAULT_FILE_URL: &str = "https://osu.ppy.sh/osu";

#[derive(Clone)]
pub struct OsuApi {
	client: Client,
	api_key: String,
	api_url: String,
	file_url: String,
}

impl OsuApi {
	pub fn new(api_key: String, api_url: String, file_url: String) -> Result<Self, ScorepostError> {
		let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

		Ok(Self {
			client,
			api_key,
			api_url: api_url.trim_end_matches('/').to_owned(),
			file_url: file_url.trim_end_matches('/').to_owned(),
		})
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		endpoint: &str,
		query: &[(&str, String)],
	) -> Result<Vec<T>, ScorepostError> {
		let url = format!("{}/{}", self.api_url, endpoint);
		debug!(endpoint, "Querying osu! api");

		let res = self
			.client
			.get(&url)
			.query(&[("k", self.api_key.as_str())])
			.query(query)
			.send()
			.await?
			.error_for_status()?
			.json::<Vec<T>>()
			.await?;

		Ok(res)
	}
}

impl ScoreProvider for OsuApi {
	async fn recent_scores(
		&self,
		username: &str,
		mode: Mode,
		limit: u32,
	) -> Result<Vec<ScoreRecord>, ScorepostError> {
		info!(username, %mode, limit, "Fetching recent scores");
		let raw: Vec<RawScore> = self
			.get_json(
				"get_user_recent",
				&[
					("u", username.to_owned()),
					("m", mode.value().to_string()),
					("limit", limit.to_string()),
					("type", "string".to_owned()),
				],
			)
			.await?;

		Ok(raw.into_iter().map(ScoreRecord::from).collect())
	}
}

impl BeatmapProvider for OsuApi {
	async fn beatmap(&self, beatmap_id: u64) -> Result<BeatmapRecord, ScorepostError> {
		info!(beatmap_id, "Fetching beatmap");
		let raw: Vec<RawBeatmap> = self
			.get_json(
				"get_beatmaps",
				&[("b", beatmap_id.to_string()), ("limit", "1".to_owned())],
			)
			.await?;

		raw.into_iter()
			.next()
			.ok_or_else(|| ScorepostError::DataUnavailable(format!("no beatmap with id {beatmap_id}")))?
			.try_into()
	}
}

impl BeatmapFileProvider for OsuApi {
	async fn beatmap_file(&self, beatmap_id: u64) -> Result<Vec<u8>, ScorepostError> {
		info!(beatmap_id, "Downloading beatmap file");
		let url = format!("{}/{}", self.file_url, beatmap_id);
		let unavailable = |e: reqwest::Error| {
			ScorepostError::DataUnavailable(format!("could not download beatmap {beatmap_id}: {e}"))
		};

		let bytes = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(unavailable)?
			.error_for_status()
			.map_err(unavailable)?
			.bytes()
			.await
			.map_err(unavailable)?;

		if bytes.is_empty() {
			return Err(ScorepostError::DataUnavailable(format!(
				"beatmap {beatmap_id} has no file"
			)));
		}

		Ok(bytes.to_vec())
	}
}
// }}}
