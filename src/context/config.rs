//! This module provides helpers for working with environment
//! variables, together with a struct that keeps track of every
//! runtime-relevant setting.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::osu::api::{DEFAULT_API_URL, DEFAULT_FILE_URL};
use crate::osu::mode::Mode;

/// Wrapper around [std::env::var] which adds [anyhow] context around errors.
pub fn get_var(name: &str) -> anyhow::Result<String> {
	std::env::var(name).with_context(|| format!("Missing ${name} environment variable"))
}

pub const CONFIG_PATH_VAR: &str = "SCOREPOSTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "scoreposter.toml";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Key for the osu! v1 api. Optional here so a config file can be
	/// committed without it, but required by [Config::api_key].
	pub api_key: Option<String>,

	/// Mode used when a request doesn't name one.
	pub default_mode: Mode,

	pub api_url: String,

	/// Base url `.osu` files get downloaded from, followed by the
	/// beatmap id.
	pub file_url: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_key: None,
			default_mode: Mode::default(),
			api_url: DEFAULT_API_URL.to_owned(),
			file_url: DEFAULT_FILE_URL.to_owned(),
		}
	}
}

impl Config {
	/// Reads the config file (`$SCOREPOSTER_CONFIG`, or `scoreposter.toml`
	/// when unset), then applies environment overrides on top.
	///
	/// A missing file is fine when it was not asked for explicitly.
	pub fn load() -> anyhow::Result<Self> {
		let explicit = get_var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
		let path = explicit
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

		let mut config = if path.exists() || explicit.is_some() {
			Self::from_file(&path)?
		} else {
			Self::default()
		};

		config.apply_overrides(|name| std::env::var(name).ok())?;
		Ok(config)
	}

	pub fn from_file(path: &Path) -> anyhow::Result<Self> {
		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Could not read config file `{path:?}`"))?;

		toml::from_str(&contents).with_context(|| format!("Invalid config file `{path:?}`"))
	}

	/// Overrides settings with whatever `lookup` returns for the
	/// `SCOREPOSTER_*` variables.
	pub fn apply_overrides(
		&mut self,
		lookup: impl Fn(&str) -> Option<String>,
	) -> anyhow::Result<()> {
		if let Some(key) = lookup("SCOREPOSTER_API_KEY") {
			self.api_key = Some(key);
		}

		if let Some(mode) = lookup("SCOREPOSTER_DEFAULT_MODE") {
			self.default_mode = mode
				.parse()
				.with_context(|| "Invalid $SCOREPOSTER_DEFAULT_MODE")?;
		}

		if let Some(url) = lookup("SCOREPOSTER_API_URL") {
			self.api_url = url;
		}

		if let Some(url) = lookup("SCOREPOSTER_FILE_URL") {
			self.file_url = url;
		}

		Ok(())
	}

	pub fn api_key(&self) -> anyhow::Result<&str> {
		self.api_key
			.as_deref()
			.filter(|key| !key.trim().is_empty())
			.context("No osu! api key configured, set $SCOREPOSTER_API_KEY or `api_key`")
	}
}
