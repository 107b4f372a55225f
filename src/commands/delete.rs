//! `jotter delete` command
//!
//! Asks for confirmation on stdin unless `--yes` is given. Deleting a note
//! that does not exist succeeds without prompting.

use std::io::{self, BufRead, Write};

use jotter_core::error::{JotterError, Result};

use crate::commands::dispatch::{persist, CommandContext};
use crate::output_by_format_result;

const CONFIRM_PROMPT: &str = "Are you sure you want to delete this note?";

/// Execute the delete command
pub fn execute(ctx: &CommandContext, id: &str, yes: bool) -> Result<()> {
    let mut store = ctx.open_store()?;

    let confirmed = store.get(id).is_none() || yes || confirm(io::stdin().lock())?;
    let deleted = confirmed && store.delete(id);
    persist(&mut store)?;

    output_by_format_result!(ctx.cli.format,
        json => {
            let status = if confirmed { "ok" } else { "cancelled" };
            let output = serde_json::json!({
                "status": status,
                "id": id,
                "deleted": deleted,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), JotterError>(())
        },
        human => {
            if !ctx.cli.quiet {
                if !confirmed {
                    println!("Cancelled");
                } else if deleted {
                    println!("Deleted {}", id);
                } else {
                    println!("No note {}; nothing deleted", id);
                }
            }
        }
    )
}

/// Prompt on stderr and read one answer line; only "y"/"yes" confirms
fn confirm(mut input: impl BufRead) -> Result<bool> {
    eprint!("{} [y/N] ", CONFIRM_PROMPT);
    io::stderr().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
