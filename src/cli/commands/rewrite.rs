//! Rewrite command - wrap string literals in translation function calls.
//!
//! Every scanned file is rewritten against its registry file. Without
//! `--all`, only strings listed in the registry are wrapped and files with
//! no registry are skipped. With `--all`, every non-empty literal is wrapped
//! and recorded in the file's registry. With `--registry`, one registry file
//! is used for every file.
//!
//! Use `--apply` to actually write files (default is dry-run mode).

use std::{collections::HashSet, fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::debug;

use super::super::{
    args::RewriteCommand,
    exit_status::ExitStatus,
    report::{self, plural},
};
use super::helper::{display_path, exit_status, read_source};
use crate::{
    core::{
        WorkingRegistry,
        context::RunContext,
        parsers::json::{load_registry, load_registry_if_exists, save_registry},
        rewrite::{FileRewrite, rewrite_source},
    },
    issues::Issue,
};

/// A file the rewrite changes.
struct FileChange {
    file_path: String,
    rewritten: usize,
    /// Registry file that receives renames or recorded strings.
    registry_path: Option<String>,
}

pub fn rewrite(cmd: RewriteCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = RunContext::new(&args.common)?;
    let options = ctx.rewrite_options();
    let apply = args.apply;

    // A shared registry is loaded once. Every file is decided against the
    // registry as loaded, while renames accumulate in one working copy that
    // is saved after the last file.
    let mut shared = match &args.registry {
        Some(path) if !path.is_file() => bail!("Registry file not found: {}", path.display()),
        Some(path) => Some(WorkingRegistry::selective(load_registry(path)?)),
        None => None,
    };

    let mut issues: Vec<Issue> = Vec::new();
    let mut changes: Vec<FileChange> = Vec::new();
    let mut without_registry = 0;

    for file in &ctx.files {
        let registry_path: PathBuf = match &args.registry {
            Some(path) => path.clone(),
            None => ctx.registry_path_for(file),
        };

        let registry = if let Some(shared) = &shared {
            shared.clone()
        } else if args.all {
            WorkingRegistry::wrap_all(load_registry_if_exists(&registry_path)?)
        } else {
            match load_registry_if_exists(&registry_path)? {
                Some(registry) => WorkingRegistry::selective(registry),
                None => {
                    debug!(file = file.as_str(), registry = %registry_path.display(), "no registry, skipped");
                    without_registry += 1;
                    continue;
                }
            }
        };

        let code = read_source(file)?;
        let result = match rewrite_source(code, file, registry, &options) {
            Ok(result) => result,
            Err(err) => {
                issues.push(err.into());
                continue;
            }
        };

        let source_changed = result.source_changed();
        let registry_changed = match &shared {
            Some(shared) => result.registry.working() != shared.working(),
            None => result.registry_changed(),
        };
        let FileRewrite {
            output,
            rewritten,
            registry,
            warnings,
        } = result;
        issues.extend(warnings.into_iter().map(Issue::from));

        if apply && source_changed {
            fs::write(file, &output).with_context(|| format!("Failed to write file: {}", file))?;
        }
        if let Some(shared) = shared.as_mut() {
            *shared = registry;
        } else if apply && registry_changed {
            save_registry(&registry_path, registry.working())?;
        }

        if source_changed || registry_changed {
            changes.push(FileChange {
                file_path: file.clone(),
                rewritten,
                registry_path: registry_changed.then(|| display_path(&registry_path)),
            });
        }
    }

    if apply
        && let (Some(path), Some(shared)) = (&args.registry, &shared)
        && shared.is_dirty()
    {
        save_registry(path, shared.working())?;
    }

    report::report(&issues);

    if changes.is_empty() {
        if issues.is_empty() {
            report::print_nothing_to_do(ctx.files.len(), "literals to wrap");
        }
    } else {
        print_changes(&changes, apply);
    }

    if without_registry > 0 {
        println!(
            "Note: {} {} without a registry {} skipped (use {} to wrap every literal).",
            without_registry,
            plural(without_registry, "file", "files"),
            plural(without_registry, "was", "were"),
            "--all".cyan()
        );
    }

    Ok(exit_status(&issues, !changes.is_empty(), apply))
}

fn print_changes(changes: &[FileChange], apply: bool) {
    for change in changes {
        println!(
            "  {} {} ({} {})",
            "-".blue(),
            change.file_path,
            change.rewritten,
            plural(change.rewritten, "literal", "literals")
        );
        if let Some(registry_path) = &change.registry_path {
            println!("    {} {}", "registry:".dimmed(), registry_path);
        }
    }

    let literal_count: usize = changes.iter().map(|c| c.rewritten).sum();
    // A shared registry is counted once.
    let registry_count = changes
        .iter()
        .filter_map(|c| c.registry_path.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let verb = if apply {
        "Wrapped".green().bold()
    } else {
        "Would wrap".yellow().bold()
    };
    println!(
        "{} {} {} in {} {} ({} registry {} updated).",
        verb,
        literal_count,
        plural(literal_count, "literal", "literals"),
        changes.len(),
        plural(changes.len(), "file", "files"),
        registry_count,
        plural(registry_count, "file", "files")
    );

    if !apply {
        report::print_apply_hint("write these changes");
    }
}
