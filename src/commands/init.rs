//! `jotter init` command - create a new store
//!
//! Idempotent: an existing store and config are left as they are.

use jotter_core::config::StoreConfig;
use jotter_core::error::{JotterError, Result};
use jotter_core::store::paths::{CONFIG_FILE, DEFAULT_STORE_DIR};

use crate::cli::paths::resolve_store_path;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;

/// Execute the init command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let dir = match &ctx.cli.store {
        Some(path) => resolve_store_path(ctx.root, path),
        None => ctx.root.join(DEFAULT_STORE_DIR),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|e| JotterError::io_operation("create", dir.display(), e))?;

    let config_path = dir.join(CONFIG_FILE);
    let created = !config_path.exists();
    if created {
        StoreConfig::default().save(&config_path)?;
    }
    tracing::debug!(store = %dir.display(), created, "init");

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "store": dir.display().to_string(),
                "created": created,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), JotterError>(())
        },
        human => {
            if !ctx.cli.quiet {
                if created {
                    println!("Initialized jotter store at {}", dir.display());
                } else {
                    println!("Store already initialized at {}", dir.display());
                }
            }
        }
    )
}
