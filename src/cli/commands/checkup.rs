//! Checkup command - compare translation calls with registry files.
//!
//! Reports ids passed to the translation function that are missing from the
//! file's registry (error) and registry ids no call uses (warning).

use std::collections::HashSet;

use anyhow::Result;

use super::super::{args::CheckupCommand, exit_status::ExitStatus, report};
use super::helper::{display_path, fatal_count, parse_file};
use crate::{
    core::{
        context::RunContext, parsers::json::load_registry_if_exists, usage::collect_usages,
    },
    issues::{Issue, MissingStringIssue, UnusedStringIssue},
};

pub fn checkup(cmd: CheckupCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = RunContext::new(&args.common)?;

    let mut issues: Vec<Issue> = Vec::new();

    for file in &ctx.files {
        let usages = match parse_file(file)?
            .and_then(|parsed| collect_usages(&parsed.module, parsed.text(), &ctx.translate_fn))
        {
            Ok(usages) => usages,
            Err(err) => {
                issues.push(err.into());
                continue;
            }
        };

        let registry_path = ctx.registry_path_for(file);
        let registry = load_registry_if_exists(&registry_path)?;
        if registry.is_none() && usages.is_empty() {
            continue;
        }
        let registry = registry.unwrap_or_default();
        let registry_display = display_path(&registry_path);

        for usage in &usages {
            if !registry.contains(&usage.id) {
                issues.push(Issue::MissingString(MissingStringIssue {
                    context: usage.context.clone(),
                    id: usage.id.clone(),
                    registry_path: registry_display.clone(),
                }));
            }
        }

        let used: HashSet<&str> = usages.iter().map(|u| u.id.as_str()).collect();
        for id in registry.ids().filter(|id| !used.contains(id)) {
            issues.push(Issue::UnusedString(UnusedStringIssue {
                registry_path: registry_display.clone(),
                id: id.to_string(),
                source_path: file.clone(),
            }));
        }
    }

    if issues.is_empty() {
        report::print_success(ctx.files.len());
        return Ok(ExitStatus::Success);
    }

    report::report(&issues);

    if fatal_count(&issues) > 0 {
        Ok(ExitStatus::Error)
    } else {
        Ok(ExitStatus::Failure)
    }
}
