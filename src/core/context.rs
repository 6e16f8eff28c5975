use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use tracing::debug;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::{ScanOptions, scan_files},
        rewrite::RewriteOptions,
        utils::TranslateFn,
    },
};

/// Settings and file list for one command run.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--registry-dir`)
/// 2. `.intlwraprc.json`
/// 3. Built-in defaults
pub struct RunContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory source files are scanned from and registry paths are relative to.
    pub root_dir: PathBuf,

    /// Source files to process, sorted.
    pub files: BTreeSet<String>,

    pub translate_fn: TranslateFn,

    pub verbose: bool,
}

impl RunContext {
    /// Load configuration and scan source files.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let search_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&search_dir)?;
        if !config_result.from_file {
            debug!(
                "No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(ref registry_dir) = common_args.registry_dir {
            config.registry_dir = registry_dir.to_string_lossy().to_string();
        }
        if let Some(ref locale) = common_args.source_locale {
            config.source_locale = locale.clone();
        }

        // An explicit --source-root wins over the configured one.
        let root_dir = match &common_args.source_root {
            Some(root) => root.clone(),
            None => PathBuf::from(&config.source_root),
        };
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?
            .to_string();

        let translate_fn = config
            .translate_fn()
            .context("Invalid value for 'translateFunction'")?;
        let ignore_regexp = config
            .ignore_regexp
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("Invalid regular expression in 'ignoreRegexp'")?;

        let registry_dir = resolve_against(&root_dir, &config.registry_dir);
        let scan_result = scan_files(
            &path,
            &ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_regexp: ignore_regexp.as_ref(),
                ignore_test_files: config.ignore_test_files,
                registry_dir: Some(&registry_dir),
                verbose,
            },
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }
        debug!(files = scan_result.files.len(), root = %root_dir.display(), "scanned source files");

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            translate_fn,
            verbose,
        })
    }

    /// Resolve the registry directory path relative to root_dir.
    pub fn resolved_registry_dir(&self) -> PathBuf {
        resolve_against(&self.root_dir, &self.config.registry_dir)
    }

    /// Registry file of a source file:
    /// `<registryDir>/<path relative to root>.<sourceLocale>.json`.
    pub fn registry_path_for(&self, file_path: &str) -> PathBuf {
        let path = Path::new(file_path);
        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        let relative: PathBuf = relative
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();

        let mut name = relative.into_os_string();
        name.push(format!(".{}.json", self.config.source_locale));
        self.resolved_registry_dir().join(name)
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            translate_fn: self.translate_fn.clone(),
            import_source: self.config.import_source.clone(),
        }
    }
}

/// Join a configured relative path onto `root`, keeping `./x` as is when
/// `root` is the current directory.
fn resolve_against(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, path::PathBuf};

    use pretty_assertions::assert_eq;

    use crate::{config::Config, core::context::*};

    fn create_test_context(root_dir: &str, registry_dir: &str) -> RunContext {
        RunContext {
            config: Config {
                registry_dir: registry_dir.to_string(),
                ..Config::default()
            },
            root_dir: PathBuf::from(root_dir),
            files: BTreeSet::new(),
            translate_fn: TranslateFn::default(),
            verbose: false,
        }
    }

    #[test]
    fn test_resolved_registry_dir_absolute_path() {
        let ctx = create_test_context("/project", "/absolute/i18n");
        assert_eq!(ctx.resolved_registry_dir(), PathBuf::from("/absolute/i18n"));
    }

    #[test]
    fn test_resolved_registry_dir_relative_with_dot() {
        let ctx = create_test_context(".", "./i18n");
        assert_eq!(ctx.resolved_registry_dir(), PathBuf::from("./i18n"));
    }

    #[test]
    fn test_resolved_registry_dir_relative_with_root() {
        let ctx = create_test_context("/project/app", "./i18n");
        assert_eq!(
            ctx.resolved_registry_dir(),
            PathBuf::from("/project/app/i18n")
        );
    }

    #[test]
    fn test_registry_path_for_file() {
        let ctx = create_test_context("/project", "./i18n");
        assert_eq!(
            ctx.registry_path_for("/project/src/app.tsx"),
            PathBuf::from("/project/i18n/src/app.tsx.en.json")
        );

        let ctx = create_test_context(".", "./i18n");
        assert_eq!(
            ctx.registry_path_for("./src/app.tsx"),
            PathBuf::from("./i18n/src/app.tsx.en.json")
        );
    }

    #[test]
    fn test_registry_path_uses_source_locale() {
        let mut ctx = create_test_context("/project", "locales");
        ctx.config.source_locale = "fr".to_string();
        assert_eq!(
            ctx.registry_path_for("/project/a.js"),
            PathBuf::from("/project/locales/a.js.fr.json")
        );
    }
}
