//! Fixup command - interactively reconcile registry files with the code.
//!
//! For every file with a registry, strings used in translation calls but
//! missing from the registry are either added as new strings or take over
//! the entry of an unused id they replace. Unused ids left afterwards are
//! removed. Answers are read line by line from stdin.

use std::{
    io::{self, BufRead, Write},
    sync::mpsc,
    thread,
};

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::FixupCommand as FixupCliCommand,
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK, plural},
};
use super::helper::{display_path, fatal_count, parse_file};
use crate::{
    core::{
        context::RunContext,
        fixup::{Fixup, FixupCommand, FixupPrompt, FixupSummary, run_fixup},
        parsers::json::{load_registry_if_exists, save_registry},
        usage::collect_usages,
    },
    issues::Issue,
};

pub fn fixup(cmd: FixupCliCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = RunContext::new(&args.common)?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(FixupCommand::parse(&line)).is_err() {
                break;
            }
        }
    });

    let mut issues: Vec<Issue> = Vec::new();
    let mut updated_files = 0;

    for file in &ctx.files {
        let registry_path = ctx.registry_path_for(file);
        let Some(registry) = load_registry_if_exists(&registry_path)? else {
            continue;
        };

        let usages = match parse_file(file)?
            .and_then(|parsed| collect_usages(&parsed.module, parsed.text(), &ctx.translate_fn))
        {
            Ok(usages) => usages,
            Err(err) => {
                issues.push(err.into());
                continue;
            }
        };

        let mut fixup = Fixup::new(registry, usages.into_iter().map(|u| u.id));
        if !fixup.has_work() {
            continue;
        }

        println!(
            "{} {}",
            file.bold(),
            format!("({})", display_path(&registry_path)).dimmed()
        );

        let mut last_question: Option<FixupPrompt> = None;
        let summary = run_fixup(&mut fixup, &rx, |prompt| {
            if !matches!(prompt, FixupPrompt::Invalid { .. }) {
                last_question = Some(prompt.clone());
            }
            print_prompt(prompt, last_question.as_ref());
        })?;

        if !summary.is_empty() {
            save_registry(&registry_path, fixup.registry())?;
            updated_files += 1;
        }
        print_summary(&summary);
        println!();
    }

    report::report(&issues);

    if updated_files == 0 && issues.is_empty() {
        report::print_nothing_to_do(ctx.files.len(), "registry changes needed");
    } else if updated_files > 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Updated {} registry {}",
                updated_files,
                plural(updated_files, "file", "files")
            )
            .green()
        );
    }

    if fatal_count(&issues) > 0 {
        Ok(ExitStatus::Error)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn print_prompt(prompt: &FixupPrompt, last_question: Option<&FixupPrompt>) {
    match prompt {
        FixupPrompt::NewOrUpdated { candidate } => {
            print!(
                "  \"{}\" is not in the registry. Is it {}ew or {}pdated? ",
                candidate,
                "[n]".cyan(),
                "[u]".cyan()
            );
        }
        FixupPrompt::SelectRenamed { candidate, options } => {
            println!("  Which string does \"{}\" replace?", candidate);
            for (i, option) in options.iter().enumerate() {
                println!("    {}) {}", (i + 1).to_string().cyan(), option);
            }
            print!("  Number: ");
        }
        FixupPrompt::Invalid { input } => {
            println!("  {} \"{}\"", "Invalid answer:".yellow(), input);
            if let Some(question) = last_question {
                print_prompt(question, None);
            }
        }
        FixupPrompt::Finished(_) => {}
    }
    let _ = io::stdout().flush();
}

fn print_summary(summary: &FixupSummary) {
    for id in &summary.added {
        println!("  {} {}", "added".green(), id);
    }
    for (old, new) in &summary.renamed {
        println!("  {} {} -> {}", "renamed".cyan(), old, new);
    }
    for id in &summary.removed {
        println!("  {} {}", "removed".red(), id);
    }
}
