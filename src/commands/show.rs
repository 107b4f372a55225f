//! `jotter show` command

use jotter_core::error::{JotterError, Result};

use crate::commands::dispatch::CommandContext;
use crate::commands::format::format_timestamp;
use crate::output_by_format_result;

/// Execute the show command
pub fn execute(ctx: &CommandContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let (id, note) = store
        .collection()
        .get_entry(id)
        .ok_or_else(|| JotterError::NoteNotFound { id: id.to_string() })?;

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "id": id,
                "title": note.title,
                "content": note.content,
                "timestamp": note.timestamp,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), JotterError>(())
        },
        human => {
            println!("{}", note.display_title_or(store.default_title()));
            println!("{}", format_timestamp(note.timestamp));
            if !note.content.is_empty() {
                println!();
                println!("{}", note.content);
            }
        }
    )
}
