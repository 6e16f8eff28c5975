//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `rewrite`: Wrap string literals in translation calls
//! - `extract`: Seed registry files with the literals found in code
//! - `checkup`: Compare translation calls with registry files
//! - `fixup`: Interactively reconcile registry files with the code
//! - `init`: Initialize intlwrap configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Rewrite(cmd)) => cmd.args.common.verbose,
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Checkup(cmd)) => cmd.args.common.verbose,
            Some(Command::Fixup(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Registry directory path (overrides config file)
    #[arg(long)]
    pub registry_dir: Option<PathBuf>,

    /// Locale of the strings in code (overrides config file)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Use this registry file for every source file
    #[arg(long, value_name = "FILE", conflicts_with = "all")]
    pub registry: Option<PathBuf>,

    /// Wrap every non-empty string literal and record it in the registry
    #[arg(long)]
    pub all: bool,

    /// Actually write files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub args: RewriteArgs,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write registry files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct CheckupArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckupCommand {
    #[command(flatten)]
    pub args: CheckupArgs,
}

#[derive(Debug, Parser)]
pub struct FixupArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixupCommand {
    #[command(flatten)]
    pub args: FixupArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wrap string literals in translation function calls
    Rewrite(RewriteCommand),
    /// Add the string literals found in code to registry files
    Extract(ExtractCommand),
    /// Report translation ids missing from or unused in registry files
    Checkup(CheckupCommand),
    /// Interactively reconcile registry files with translation calls
    Fixup(FixupCommand),
    /// Initialize a new .intlwraprc.json configuration file
    Init,
}
