pub mod archive;
pub mod backup;
pub mod config;
pub mod db;
pub mod entry;
pub mod exit;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
