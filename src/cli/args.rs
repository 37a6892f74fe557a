//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `pack`: Package collected phrases with text and phrase hashes
//! - `shift`: Print phrase tables with their enum levels moved to the top
//! - `hash`: Hash texts with their description
//! - `init`: Initialize fbt-collect configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::collect::Packager;

#[derive(Debug, Parser)]
#[command(name = "fbt-collect", author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }
}

/// Common arguments shared by the commands that print JSON.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Pretty-print the JSON output (overrides config file)
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct PackCommand {
    /// Collected phrase files; reads stdin when none are given
    pub files: Vec<PathBuf>,

    /// Packager to run (overrides config file)
    #[arg(long, value_enum)]
    pub packager: Option<Packager>,

    /// Hash module used by the text packager: tiger, jenkins or md5 (overrides config file)
    #[arg(long)]
    pub hash_module: Option<String>,

    /// Split phrases with enums into one phrase per enum value
    #[arg(long)]
    pub react_native_mode: bool,

    /// Leave the phrase tables out of the output
    #[arg(long)]
    pub terse: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ShiftCommand {
    /// Collected phrase files; reads stdin when none are given
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HashCommand {
    /// JSON list of {desc, texts}; reads stdin when omitted
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Package collected phrases with text and phrase hashes
    Pack(PackCommand),
    /// Move the enum levels of every phrase table to the top
    Shift(ShiftCommand),
    /// Compute the legacy text hash of each text and description
    Hash(HashCommand),
    /// Initialize a new .fbtrc.json configuration file
    Init,
}
