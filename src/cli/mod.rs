pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Language;

#[derive(Parser)]
#[command(name = "tidings")]
#[command(about = "A minimalist terminal news reader", long_about = None)]
pub struct Cli {
    /// News language, overriding the config file and locale
    #[arg(short, long, value_enum, global = true)]
    pub lang: Option<Language>,

    /// Path to the read-state database
    #[arg(long, global = true, conflicts_with = "ephemeral")]
    pub db: Option<PathBuf>,

    /// Keep read state in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The TUI is the default when no subcommand is given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI
    Tui,
    /// Print the current news with read markers
    List,
    /// Mark a news item as read by its URL
    MarkRead {
        /// URL of the news item
        url: String,
    },
    /// Show which items are currently read and when they expire
    ReadState,
}
