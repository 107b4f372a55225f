//! `jotter create` command

use jotter_core::error::{JotterError, Result};

use crate::cli::NoteFields;
use crate::commands::dispatch::{persist, CommandContext};
use crate::output_by_format_result;

/// Execute the create command, printing the new note's id
pub fn execute(ctx: &CommandContext, fields: &NoteFields) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = store.create();
    store.update(id.as_str(), fields.to_patch());
    persist(&mut store)?;

    let note = store
        .get(id.as_str())
        .ok_or_else(|| JotterError::NoteNotFound { id: id.to_string() })?;

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "id": id,
                "title": note.title,
                "timestamp": note.timestamp,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), JotterError>(())
        },
        human => {
            println!("{}", id);
        }
    )
}
