// {{{ Imports
use crate::context::{Error, ErrorKind, PoiseContext, TagError, TaggedError};
use crate::osu::api::{BeatmapFileProvider, BeatmapProvider, ScoreProvider};
use crate::osu::mode::Mode;
use crate::osu::performance::PerformanceCalculator;
use crate::scorepost::{Scorepost, Scoreposter};

use super::discord::MessageContext;
// }}}

// {{{ Rendering
/// The text sent for a single post: the post itself, followed by the
/// permalink when the play has one.
pub fn render_post(post: &Scorepost) -> String {
	match post.link() {
		Some(link) => format!("{}\n{}", post, link),
		None => format!(
			"{}\n(no score link: the play was failed, not a personal best, or set on an unranked map)",
			post
		),
	}
}
// }}}
// {{{ Implementation
/// Posts the `limit` most recent plays of a user.
///
/// The posts are returned so callers can act on the plays afterwards
/// (e.g. link to them) without keeping any state around.
pub async fn recent_impl<P, C>(
	ctx: &mut impl MessageContext,
	scoreposter: &Scoreposter<P, C>,
	username: &str,
	mode: Option<&str>,
	default_mode: Mode,
	limit: u32,
) -> Result<Vec<Scorepost>, TaggedError>
where
	P: ScoreProvider + BeatmapProvider + BeatmapFileProvider,
	C: PerformanceCalculator,
{
	// Rejected before anything touches the network
	let mode = match mode {
		Some(mode) => mode
			.parse::<Mode>()
			.map_err(|e| e.tag(ErrorKind::User))?,
		None => default_mode,
	};

	// Usernames may arrive url-encoded, but the api client encodes them itself
	let username = username.trim().replace("%20", " ");

	let posts = scoreposter
		.build_scoreposts(&username, mode, limit)
		.await
		.map_err(|e| e.tag(ErrorKind::Internal))?;

	for post in &posts {
		ctx.reply(&render_post(post)).await?;
	}

	Ok(posts)
}
// }}}
// {{{ Discord wrapper
/// Post the most recent play of an osu! player
#[poise::command(prefix_command, slash_command, user_cooldown = 1)]
pub async fn recent(
	mut ctx: PoiseContext<'_>,
	#[description = "The player's osu! username"] username: String,
	#[description = "Mode of the play (osu, taiko, fruits, mania, or 0-3)"] mode: Option<String>,
) -> Result<(), Error> {
	let data = ctx.data();
	let res = recent_impl(
		&mut ctx,
		&data.scoreposter,
		&username,
		mode.as_deref(),
		data.config.default_mode,
		1,
	)
	.await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
