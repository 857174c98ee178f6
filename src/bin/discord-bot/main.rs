use poise::serenity_prelude::{self as serenity};
use scoreposter::commands;
use scoreposter::context::config::get_var;
use scoreposter::context::{Error, UserContext};
use scoreposter::logs::init_logging;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

// {{{ Error handler
async fn on_error(error: poise::FrameworkError<'_, UserContext, Error>) {
	if let Err(e) = poise::builtins::on_error(error).await {
		error!("Error while handling error: {}", e)
	}
}
// }}}

#[tokio::main]
async fn main() -> Result<(), Error> {
	init_logging()?;

	// {{{ Poise options
	let options = poise::FrameworkOptions {
		commands: vec![commands::help(), commands::recent::recent()],
		prefix_options: poise::PrefixFrameworkOptions {
			prefix: Some("!".to_owned()),
			edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
				Duration::from_secs(3600),
			))),
			..Default::default()
		},
		on_error: |error| Box::pin(on_error(error)),
		..Default::default()
	};
	// }}}
	// {{{ Start poise
	let framework = poise::Framework::builder()
		.setup(move |ctx, ready, framework| {
			Box::pin(async move {
				info!("Logged in as {}", ready.user.name);
				poise::builtins::register_globally(ctx, &framework.options().commands).await?;
				UserContext::new()
			})
		})
		.options(options)
		.build();

	let token = get_var("SCOREPOSTER_DISCORD_TOKEN")?;
	let intents =
		serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

	let mut client = serenity::ClientBuilder::new(token, intents)
		.framework(framework)
		.await?;

	client.start().await?;
	// }}}

	Ok(())
}
