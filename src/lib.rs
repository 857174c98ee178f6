#![allow(async_fn_in_trait)]

pub mod commands;
pub mod context;
pub mod error;
pub mod logs;
pub mod osu;
pub mod scorepost;
pub mod time;
