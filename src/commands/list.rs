//! `jotter list` command

use jotter_core::error::{JotterError, Result};

use crate::commands::dispatch::CommandContext;
use crate::commands::format::{format_timestamp, truncate_title};
use crate::output_by_format_result;

/// Execute the list command: one row per note in creation order
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let store = ctx.open_store()?;
    let notes = store.list();
    tracing::debug!(count = notes.len(), elapsed = ?ctx.start.elapsed(), "list");

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
            Ok::<(), JotterError>(())
        },
        human => {
            if notes.is_empty() {
                if !ctx.cli.quiet {
                    println!("No notes");
                }
            } else {
                for note in &notes {
                    println!(
                        "{} - {}",
                        truncate_title(&note.title),
                        format_timestamp(note.timestamp)
                    );
                }
            }
        }
    )
}
