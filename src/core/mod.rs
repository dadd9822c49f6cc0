pub mod backup;
pub mod clock;
pub mod config;
pub mod entry;
pub mod exit;
pub mod log;
pub mod query;
pub mod retention;
pub mod status;
