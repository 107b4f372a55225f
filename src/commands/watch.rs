//! `jotter watch` command
//!
//! Keeps a session open on the store, polls for writes made by other
//! instances and reconciles them. With `--open`, the named note plays the
//! part of the note in the editor: its refresh and close events are printed.
//! Ctrl-C stops the loop; the pending write is flushed on the way out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use jotter_core::error::{JotterError, Result};
use jotter_core::id::NoteId;
use jotter_core::sync::EditorUpdate;

use crate::cli::{OutputFormat, WatchArgs};
use crate::commands::dispatch::CommandContext;

/// Execute the watch command
pub fn execute(ctx: &CommandContext, args: &WatchArgs) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .map_err(|e| JotterError::Other(format!("failed to install Ctrl-C handler: {}", e)))?;

    let mut session = ctx.open_session()?;
    session.store().medium().watch(session.store().storage_key())?;

    if let Some(id) = &args.open {
        if !session.open(id) {
            return Err(JotterError::NoteNotFound { id: id.clone() });
        }
    }
    if !ctx.cli.quiet && ctx.cli.format == OutputFormat::Human {
        eprintln!("Watching {} (Ctrl-C to stop)", ctx.store_dir()?.display());
    }

    let interval = Duration::from_millis(args.interval_ms);
    let mut polls: u64 = 0;
    while running.load(Ordering::SeqCst) {
        let open = session.open_id().cloned();
        if session.store().medium().poll_changes()? > 0 {
            for update in session.pump() {
                print_update(ctx.cli.format, open.as_ref(), &update)?;
            }
        }
        session.tick();

        polls += 1;
        if args.polls.is_some_and(|limit| polls >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    let flushed = session.shutdown();
    tracing::debug!(polls, flushed, "watch stopped");
    Ok(())
}

fn print_update(
    format: OutputFormat,
    open: Option<&NoteId>,
    update: &EditorUpdate,
) -> Result<()> {
    let id = open.map(NoteId::as_str).unwrap_or_default();
    match format {
        OutputFormat::Json => {
            let output = match update {
                EditorUpdate::Refresh { title, content } => serde_json::json!({
                    "event": "refresh",
                    "id": id,
                    "title": title,
                    "content": content,
                }),
                EditorUpdate::Closed => serde_json::json!({ "event": "closed", "id": id }),
                EditorUpdate::Unchanged => return Ok(()),
            };
            println!("{}", serde_json::to_string(&output)?);
        }
        OutputFormat::Human => match update {
            EditorUpdate::Refresh { title, .. } => println!("refreshed {}: {}", id, title),
            EditorUpdate::Closed => println!("closed {}: deleted elsewhere", id),
            EditorUpdate::Unchanged => {}
        },
    }
    Ok(())
}
