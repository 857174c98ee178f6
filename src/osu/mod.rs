pub mod api;
pub mod metrics;
pub mod mode;
pub mod mods;
pub mod performance;
pub mod records;
