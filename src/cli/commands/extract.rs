//! Extract command - seed registry files with the literals found in code.
//!
//! Every candidate literal containing alphabetic text is added to the file's
//! registry as an untranslated entry. Existing entries are kept as they are.
//!
//! Use `--apply` to actually write registry files (default is dry-run mode).

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{self, plural},
};
use super::helper::{display_path, exit_status, parse_file};
use crate::{
    core::{
        context::RunContext,
        extract::{extract_literals, merge_literals},
        parsers::json::{load_registry_if_exists, save_registry},
    },
    issues::Issue,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = RunContext::new(&args.common)?;
    let apply = args.apply;

    let mut issues: Vec<Issue> = Vec::new();
    // (registry path, strings added)
    let mut updates: Vec<(String, usize)> = Vec::new();

    for file in &ctx.files {
        let literals = match parse_file(file)?
            .and_then(|mut parsed| extract_literals(&mut parsed, &ctx.translate_fn))
        {
            Ok(literals) => literals,
            Err(err) => {
                issues.push(err.into());
                continue;
            }
        };
        if literals.is_empty() {
            continue;
        }

        let registry_path = ctx.registry_path_for(file);
        let mut registry = load_registry_if_exists(&registry_path)?.unwrap_or_default();
        let added = merge_literals(&mut registry, &literals);
        if added == 0 {
            continue;
        }

        if apply {
            save_registry(&registry_path, &registry)?;
        }
        updates.push((display_path(&registry_path), added));
    }

    report::report(&issues);

    if updates.is_empty() {
        if issues.is_empty() {
            report::print_nothing_to_do(ctx.files.len(), "new strings");
        }
    } else {
        for (path, added) in &updates {
            println!(
                "  {} {} (+{} {})",
                "-".blue(),
                path,
                added,
                plural(*added, "string", "strings")
            );
        }

        let total: usize = updates.iter().map(|(_, added)| added).sum();
        let verb = if apply {
            "Added".green().bold()
        } else {
            "Would add".yellow().bold()
        };
        println!(
            "{} {} {} to {} registry {}.",
            verb,
            total,
            plural(total, "string", "strings"),
            updates.len(),
            plural(updates.len(), "file", "files")
        );
        if !apply {
            report::print_apply_hint("write these registry files");
        }
    }

    Ok(exit_status(&issues, !updates.is_empty(), apply))
}
