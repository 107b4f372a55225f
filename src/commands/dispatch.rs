//! Command dispatch logic for jotter

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::paths::{resolve_root_path, resolve_store_path};
use crate::cli::{Cli, Commands};
use crate::commands;
use jotter_core::config::StoreConfig;
use jotter_core::error::{JotterError, Result};
use jotter_core::medium::FileMedium;
use jotter_core::session::Session;
use jotter_core::store::paths::{discover_store, CONFIG_FILE};
use jotter_core::store::{NoteStore, StoreOptions};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());
    tracing::debug!(root = %root.display(), elapsed = ?start.elapsed(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => handle_no_command(),
        Some(Commands::Init) => commands::init::execute(&ctx),
        Some(Commands::Create(fields)) => commands::create::execute(&ctx, fields),
        Some(Commands::Update { id, fields }) => commands::update::execute(&ctx, id, fields),
        Some(Commands::Delete { id, yes }) => commands::delete::execute(&ctx, id, *yes),
        Some(Commands::List) => commands::list::execute(&ctx),
        Some(Commands::Show { id }) => commands::show::execute(&ctx, id),
        Some(Commands::Watch(args)) => commands::watch::execute(&ctx, args),
    }
}

fn handle_no_command() -> Result<()> {
    println!("jotter {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Local notes kept in step across every running instance.");
    println!();
    println!("Run `jotter --help` for usage information.");
    Ok(())
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a Path,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a Path, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// The `--store` directory if given, otherwise `.jotter/` found by
    /// walking up from the root
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.cli.store {
            Some(path) => {
                let resolved = resolve_store_path(self.root, path);
                if resolved.is_dir() {
                    Ok(resolved)
                } else {
                    Err(JotterError::StoreNotFound {
                        search_root: resolved,
                    })
                }
            }
            None => discover_store(self.root),
        }
    }

    /// Open the note store with the settings from its config file
    pub fn open_store(&self) -> Result<NoteStore<FileMedium>> {
        let (medium, options) = self.open_medium()?;
        NoteStore::open(medium, options)
    }

    /// Open a long-lived session on the store
    pub fn open_session(&self) -> Result<Session<FileMedium>> {
        let (medium, options) = self.open_medium()?;
        Session::start(medium, options)
    }

    fn open_medium(&self) -> Result<(FileMedium, StoreOptions)> {
        let dir = self.store_dir()?;
        let config = StoreConfig::load_or_default(&dir.join(CONFIG_FILE))?;
        let medium = FileMedium::open(&dir)?;
        tracing::debug!(
            store = %dir.display(),
            elapsed = ?self.start.elapsed(),
            "open_store"
        );
        Ok((medium, StoreOptions::from(&config)))
    }
}

/// Flush pending writes; a write the medium refused is a command failure
pub fn persist(store: &mut NoteStore<FileMedium>) -> Result<()> {
    store.flush();
    match store.last_persist_error() {
        Some(reason) => Err(JotterError::FailedOperationWithTarget {
            operation: "persist".to_string(),
            target: store.storage_key().to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
