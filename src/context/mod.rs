// {{{ Imports
use crate::error::ScorepostError;
use crate::osu::api::OsuApi;
use crate::osu::performance::RosuCalculator;
use crate::scorepost::Scoreposter;
use crate::timed;

use config::Config;
// }}}

pub mod config;

// {{{ Common types
pub type Error = anyhow::Error;
pub type PoiseContext<'a> = poise::Context<'a, UserContext, Error>;
pub type OsuScoreposter = Scoreposter<OsuApi, RosuCalculator>;
// }}}
// {{{ Error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	User,
	Internal,
}

#[derive(Debug)]
pub struct TaggedError {
	pub kind: ErrorKind,
	pub error: Error,
}

impl TaggedError {
	#[inline]
	pub fn new(kind: ErrorKind, error: Error) -> Self {
		Self { kind, error }
	}
}

#[macro_export]
macro_rules! get_user_error {
	($err:expr) => {{
		match $err.kind {
			$crate::context::ErrorKind::User => $err.error,
			$crate::context::ErrorKind::Internal => Err($err.error)?,
		}
	}};
}

impl<E: Into<Error>> From<E> for TaggedError {
	fn from(value: E) -> Self {
		Self::new(ErrorKind::Internal, value.into())
	}
}

pub trait TagError {
	fn tag(self, tag: ErrorKind) -> TaggedError;
}

impl TagError for Error {
	fn tag(self, tag: ErrorKind) -> TaggedError {
		TaggedError::new(tag, self)
	}
}

impl TagError for ScorepostError {
	/// Tags the error by who caused it, ignoring `tag` for errors that
	/// are clearly the user's.
	fn tag(self, tag: ErrorKind) -> TaggedError {
		let kind = if self.is_user_error() {
			ErrorKind::User
		} else {
			tag
		};

		TaggedError::new(kind, self.into())
	}
}
// }}}
// {{{ UserContext
/// Custom user data passed to all command functions
pub struct UserContext {
	pub config: Config,
	pub scoreposter: OsuScoreposter,
}

impl UserContext {
	#[inline]
	pub fn new() -> Result<Self, Error> {
		timed!("create_context", {
			let config = Config::load()?;
			Self::from_config(config)
		})
	}

	pub fn from_config(config: Config) -> Result<Self, Error> {
		let api = OsuApi::new(
			config.api_key()?.to_owned(),
			config.api_url.clone(),
			config.file_url.clone(),
		)?;

		Ok(Self {
			scoreposter: Scoreposter::new(api, RosuCalculator),
			config,
		})
	}
}
// }}}
