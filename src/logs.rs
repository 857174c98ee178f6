use tracing_subscriber::EnvFilter;

use crate::context::Error;

const DEFAULT_FILTER: &str = "warn,scoreposter=info,scoreposter_cli=info,scoreposter_discord_bot=info";

/// Installs the global `tracing` subscriber. `RUST_LOG` replaces the
/// default filter when set.
pub fn init_logging() -> Result<(), Error> {
	let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.try_init()
		.map_err(|e| anyhow::anyhow!(e))?;

	Ok(())
}
