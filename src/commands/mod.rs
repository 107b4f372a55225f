//! Command implementations for jotter

pub mod create;
pub mod delete;
pub mod dispatch;
pub mod format;
pub mod init;
pub mod list;
pub mod show;
pub mod update;
pub mod watch;
