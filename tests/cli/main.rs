//! Integration tests for the jotter CLI

mod support;

mod create;
mod delete;
mod errors;
mod list;
mod show;
mod update;
mod watch;
