//! Interactive reconciliation of a registry with the ids used in code.
//!
//! Ids used in code but missing from the registry are either new strings or
//! edited versions of ids that are no longer used. [`Fixup`] walks through
//! them one at a time as a state machine; answers arrive as
//! [`FixupCommand`]s and every step yields a [`FixupPrompt`] to show.
//!
//! ```text
//! Idle --Start--> AwaitingNewOrUpdatedChoice --New------------------> (next)
//!                                            --Updated--> AwaitingRenameSelection --Select(n)--> (next)
//! (next): another candidate -> AwaitingNewOrUpdatedChoice, none left -> Done
//! ```

use std::collections::{HashSet, VecDeque};
use std::sync::mpsc::Receiver;

use anyhow::{Result, bail};

use crate::core::{Registry, RegistryEntry};

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupCommand {
    Start,
    /// The candidate is a new string.
    New,
    /// The candidate replaces one of the unused ids.
    Updated,
    /// 1-based choice among the unused ids.
    Select(usize),
    Invalid(String),
}

impl FixupCommand {
    /// Parse one line of user input.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "n" | "new" => FixupCommand::New,
            "u" | "updated" => FixupCommand::Updated,
            other => match other.parse::<usize>() {
                Ok(n) => FixupCommand::Select(n),
                Err(_) => FixupCommand::Invalid(input.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupState {
    Idle,
    AwaitingNewOrUpdatedChoice { candidate: String },
    AwaitingRenameSelection { candidate: String },
    Done,
}

/// What the user should see next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupPrompt {
    NewOrUpdated { candidate: String },
    /// Pick which unused id `candidate` replaces; `options` are numbered from 1.
    SelectRenamed {
        candidate: String,
        options: Vec<String>,
    },
    Invalid { input: String },
    Finished(FixupSummary),
}

/// Changes applied by a finished fixup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixupSummary {
    pub added: Vec<String>,
    /// `(old, new)` pairs.
    pub renamed: Vec<(String, String)>,
    pub removed: Vec<String>,
}

impl FixupSummary {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.renamed.is_empty() && self.removed.is_empty()
    }
}

pub struct Fixup {
    state: FixupState,
    registry: Registry,
    pending: VecDeque<String>,
    unused: Vec<String>,
    summary: FixupSummary,
}

impl Fixup {
    /// Prepare a fixup of `registry` against the ids used in code.
    pub fn new<I, S>(registry: Registry, used_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let used: Vec<String> = used_ids.into_iter().map(Into::into).collect();
        let used_set: HashSet<&str> = used.iter().map(String::as_str).collect();

        let unused = registry
            .ids()
            .filter(|id| !used_set.contains(id))
            .map(str::to_string)
            .collect();

        let mut seen = HashSet::new();
        let pending = used
            .iter()
            .filter(|id| !registry.contains(id) && seen.insert(id.as_str()))
            .cloned()
            .collect();

        Self {
            state: FixupState::Idle,
            registry,
            pending,
            unused,
            summary: FixupSummary::default(),
        }
    }

    pub fn state(&self) -> &FixupState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == FixupState::Done
    }

    /// Whether running the fixup would change anything.
    pub fn has_work(&self) -> bool {
        !self.pending.is_empty() || !self.unused.is_empty()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// The prompt for the current state.
    pub fn current_prompt(&self) -> Option<FixupPrompt> {
        match &self.state {
            FixupState::Idle => None,
            FixupState::AwaitingNewOrUpdatedChoice { candidate } => {
                Some(FixupPrompt::NewOrUpdated {
                    candidate: candidate.clone(),
                })
            }
            FixupState::AwaitingRenameSelection { candidate } => Some(FixupPrompt::SelectRenamed {
                candidate: candidate.clone(),
                options: self.unused.clone(),
            }),
            FixupState::Done => Some(FixupPrompt::Finished(self.summary.clone())),
        }
    }

    /// Feed one command and get the next prompt.
    pub fn handle(&mut self, command: FixupCommand) -> FixupPrompt {
        let state = std::mem::replace(&mut self.state, FixupState::Idle);
        match (state, command) {
            (FixupState::Idle, FixupCommand::Start) => self.advance(),
            (FixupState::AwaitingNewOrUpdatedChoice { candidate }, FixupCommand::New) => {
                self.add(candidate);
                self.advance()
            }
            (FixupState::AwaitingNewOrUpdatedChoice { candidate }, FixupCommand::Updated) => {
                self.state = FixupState::AwaitingRenameSelection { candidate };
                self.prompt()
            }
            (FixupState::AwaitingRenameSelection { candidate }, FixupCommand::Select(n))
                if (1..=self.unused.len()).contains(&n) =>
            {
                let old = self.unused.remove(n - 1);
                self.rename(&old, candidate);
                self.advance()
            }
            (FixupState::Done, _) => {
                self.state = FixupState::Done;
                self.prompt()
            }
            (state, command) => {
                self.state = state;
                FixupPrompt::Invalid {
                    input: match command {
                        FixupCommand::Invalid(input) => input,
                        FixupCommand::Select(n) => n.to_string(),
                        other => format!("{:?}", other).to_lowercase(),
                    },
                }
            }
        }
    }

    fn prompt(&self) -> FixupPrompt {
        self.current_prompt()
            .unwrap_or(FixupPrompt::Invalid { input: String::new() })
    }

    /// Move to the next candidate, or finish.
    fn advance(&mut self) -> FixupPrompt {
        while let Some(candidate) = self.pending.pop_front() {
            if self.unused.is_empty() {
                self.add(candidate);
                continue;
            }
            self.state = FixupState::AwaitingNewOrUpdatedChoice { candidate };
            return self.prompt();
        }

        for id in std::mem::take(&mut self.unused) {
            self.registry.remove(&id);
            self.summary.removed.push(id);
        }
        self.state = FixupState::Done;
        self.prompt()
    }

    fn add(&mut self, id: String) {
        self.registry.insert(RegistryEntry::untranslated(id.as_str()));
        self.summary.added.push(id);
    }

    fn rename(&mut self, old: &str, new: String) {
        let translation = self
            .registry
            .remove(old)
            .map(|entry| entry.translation)
            .unwrap_or_else(|| new.clone());
        self.registry.insert(RegistryEntry {
            id: new.clone(),
            translation,
            modified: true,
        });
        self.summary.renamed.push((old.to_string(), new));
    }
}

/// Drive `fixup` to completion with commands from `commands`.
///
/// `on_prompt` is called with every prompt, starting with the first one.
///
/// # Errors
///
/// Returns an error if the channel closes before the fixup is done.
pub fn run_fixup(
    fixup: &mut Fixup,
    commands: &Receiver<FixupCommand>,
    mut on_prompt: impl FnMut(&FixupPrompt),
) -> Result<FixupSummary> {
    let mut prompt = fixup.handle(FixupCommand::Start);
    loop {
        on_prompt(&prompt);
        if let FixupPrompt::Finished(summary) = prompt {
            return Ok(summary);
        }
        let Ok(command) = commands.recv() else {
            bail!("Input ended before all strings were resolved");
        };
        prompt = fixup.handle(command);
    }
}
