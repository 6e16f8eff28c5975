//! Dispatch of a parsed command line to its command handler.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        checkup::checkup, extract::extract, fixup::fixup, init::init, rewrite::rewrite,
    },
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Checkup(cmd)) => checkup(cmd),
        Some(Command::Fixup(cmd)) => fixup(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
