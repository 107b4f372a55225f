//! Jotter Core Library
//!
//! Core domain logic for jotter: a local note store that persists to a
//! shared whole-blob medium and keeps several execution contexts in step
//! with last-write-wins reconciliation.

pub mod clock;
pub mod collection;
pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod id;
pub mod logging;
pub mod medium;
pub mod note;
pub mod session;
pub mod store;
pub mod sync;
