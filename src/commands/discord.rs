use crate::context::{Error, PoiseContext, TaggedError};
use crate::get_user_error;

// {{{ Trait
pub trait MessageContext {
	/// Reply to the current message
	async fn reply(&mut self, text: &str) -> Result<(), Error>;

	/// Replies with user errors, and propagates internal ones.
	///
	/// Returns the successful value, if there is one.
	async fn handle_error<V>(&mut self, res: Result<V, TaggedError>) -> Result<Option<V>, Error> {
		match res {
			Ok(v) => Ok(Some(v)),
			Err(err) => {
				let err = get_user_error!(err);
				self.reply(&format!("{err}")).await?;
				Ok(None)
			}
		}
	}
}
// }}}
// {{{ Poise implementation
impl<'a> MessageContext for PoiseContext<'a> {
	async fn reply(&mut self, text: &str) -> Result<(), Error> {
		Self::reply(*self, text).await?;
		Ok(())
	}
}
// }}}
