//! `jotter update` command

use jotter_core::error::{JotterError, Result};

use crate::cli::NoteFields;
use crate::commands::dispatch::{persist, CommandContext};
use crate::output_by_format_result;

/// Execute the update command. Unknown ids are an error here even though
/// the store treats them as a no-op.
pub fn execute(ctx: &CommandContext, id: &str, fields: &NoteFields) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.get(id).is_none() {
        return Err(JotterError::NoteNotFound { id: id.to_string() });
    }

    let changed = store.update(id, fields.to_patch());
    persist(&mut store)?;

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "id": id,
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), JotterError>(())
        },
        human => {
            if !ctx.cli.quiet {
                if changed {
                    println!("Updated {}", id);
                } else {
                    println!("Nothing to update");
                }
            }
        }
    )
}
