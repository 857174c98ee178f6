extern crate scoreposter;
use scoreposter::commands::discord::MessageContext;
use scoreposter::context::Error;

/// Similar in scope to the mock context used in tests,
/// except replies are printed to the standard output.
#[derive(Default)]
pub struct CliContext;

impl MessageContext for CliContext {
	async fn reply(&mut self, text: &str) -> Result<(), Error> {
		println!("{text}\n");
		Ok(())
	}
}
