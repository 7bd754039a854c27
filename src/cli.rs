use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::actor::Role;

#[derive(Debug, Parser)]
#[command(name = "souk", about = "Marketplace buyer/seller chat (CLI + TUI)")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as buyer or seller, overriding `identity.role`
    #[arg(short, long, global = true)]
    pub role: Option<Role>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start TUI shell
    Run,
    /// Print conversation summaries and exit
    List {
        /// Filter by participant name or product
        #[arg(short, long)]
        search: Option<String>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
