use clap::Parser;
use command::Cli;
use context::CliContext;
use scoreposter::commands::discord::MessageContext;
use scoreposter::commands::recent::recent_impl;
use scoreposter::context::{Error, UserContext};
use scoreposter::logs::init_logging;

mod command;
mod context;

#[tokio::main]
async fn main() -> Result<(), Error> {
	init_logging()?;

	let cli = Cli::parse();
	let data = UserContext::new()?;
	let mut ctx = CliContext;

	let res = recent_impl(
		&mut ctx,
		&data.scoreposter,
		&cli.username,
		cli.mode.as_deref(),
		data.config.default_mode,
		cli.limit,
	)
	.await;

	if ctx.handle_error(res).await?.is_none() {
		std::process::exit(1);
	}

	Ok(())
}
