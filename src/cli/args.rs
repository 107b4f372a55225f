use clap::Args;

use jotter_core::note::NotePatch;

/// Note fields accepted by `create` and `update`
#[derive(Args, Debug, Clone, Default)]
pub struct NoteFields {
    /// Note title
    #[arg(long, short)]
    pub title: Option<String>,

    /// Note content (HTML or plain text)
    #[arg(long, short)]
    pub content: Option<String>,
}

impl NoteFields {
    pub fn to_patch(&self) -> NotePatch {
        NotePatch {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Note to keep open while watching
    #[arg(long)]
    pub open: Option<String>,

    /// Polling interval in milliseconds
    #[arg(long, default_value_t = 250)]
    pub interval_ms: u64,

    /// Stop after this many polls instead of waiting for Ctrl-C
    #[arg(long)]
    pub polls: Option<u64>,
}
