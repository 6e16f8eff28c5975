use std::process::ExitCode;

/// Exit status of an intlwrap command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing left to do (exit 0).
    Success,
    /// Problems were found, or a dry-run has changes to apply (exit 1).
    Failure,
    /// A file could not be processed or the run itself failed (exit 2).
    Error,
}

impl ExitStatus {
    /// Status of a command whose changes are only written with `--apply`.
    pub fn for_run(fatal_count: usize, has_pending: bool, apply: bool) -> Self {
        if fatal_count > 0 {
            ExitStatus::Error
        } else if has_pending && !apply {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
