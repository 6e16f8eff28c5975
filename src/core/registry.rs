//! Translation registry and the per-file working snapshot.
//!
//! The [`Registry`] maps a string identifier (the untranslated source text)
//! to its [`RegistryEntry`]. During one file's rewrite the registry is wrapped
//! in a [`WorkingRegistry`], which keeps the registry as loaded for lookups
//! and applies renames/additions to a separate working copy. Every wrap
//! decision within a traversal is therefore made against the same view,
//! no matter which renames already happened earlier in the file.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::template::{FormatStyle, classify_format, marker_count, to_templated};

/// One record of a translation registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// String identifier; also the runtime lookup key of the translation function.
    pub id: String,
    pub translation: String,
    /// Set when the entry was changed and needs a translator's attention.
    #[serde(default)]
    pub modified: bool,
}

impl RegistryEntry {
    pub fn new(id: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            translation: translation.into(),
            modified: false,
        }
    }

    /// Entry whose translation is the identifier itself.
    pub fn untranslated(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id)
    }
}

/// Ordered, id-unique collection of registry entries.
///
/// Iteration order is insertion order; removing an entry keeps the relative
/// order of the others, so untouched entries serialize exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of entries.
    ///
    /// # Errors
    ///
    /// Returns an error if two entries share the same `id`.
    pub fn from_entries(entries: Vec<RegistryEntry>) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            if registry.contains(&entry.id) {
                bail!("Duplicate registry id: \"{}\"", entry.id);
            }
            registry.insert(entry);
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RegistryEntry> {
        let pos = *self.index.get(id)?;
        Some(&mut self.entries[pos])
    }

    /// Insert or overwrite the entry keyed by `entry.id`.
    ///
    /// An overwritten entry keeps its position.
    pub fn insert(&mut self, entry: RegistryEntry) {
        match self.index.get(&entry.id) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<RegistryEntry> {
        let pos = self.index.remove(id)?;
        let entry = self.entries.remove(pos);
        for idx in self.index.values_mut() {
            if *idx > pos {
                *idx -= 1;
            }
        }
        Some(entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RegistryEntry> {
        self.entries
    }
}

/// How wrap candidates are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryMode {
    /// Only strings listed in the registry are wrapped.
    Selective,
    /// Every non-empty literal is wrapped and recorded.
    WrapAll,
}

/// Result of a registry rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// `old` was moved to `new`.
    Renamed,
    /// `old` was not in the working registry (already renamed or never listed).
    Unchanged,
    /// `new` already existed with a different translation, which was kept.
    Collision {
        existing_translation: String,
        dropped_translation: String,
    },
}

/// Working snapshot of a registry for one file's traversal.
#[derive(Debug, Clone)]
pub struct WorkingRegistry {
    lookup: Registry,
    working: Registry,
    mode: RegistryMode,
    dirty: bool,
}

impl WorkingRegistry {
    /// Snapshot for selective mode.
    pub fn selective(registry: Registry) -> Self {
        Self {
            lookup: registry.clone(),
            working: registry,
            mode: RegistryMode::Selective,
            dirty: false,
        }
    }

    /// Snapshot for wrap-everything mode.
    ///
    /// `existing` seeds the working copy so that previously recorded
    /// translations survive; it is never consulted for wrap decisions.
    pub fn wrap_all(existing: Option<Registry>) -> Self {
        let working = existing.unwrap_or_default();
        Self {
            lookup: Registry::new(),
            working,
            mode: RegistryMode::WrapAll,
            dirty: false,
        }
    }

    /// Snapshot from an optional registry: selective when present.
    pub fn from_optional(registry: Option<Registry>) -> Self {
        match registry {
            Some(registry) => Self::selective(registry),
            None => Self::wrap_all(None),
        }
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// Whether the working copy differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a literal with semantic value `value` should be wrapped.
    pub fn should_wrap(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self.mode {
            RegistryMode::Selective => self.lookup.contains(value),
            RegistryMode::WrapAll => true,
        }
    }

    /// Record a wrapped identifier in wrap-everything mode.
    ///
    /// Selective mode never adds entries, so this is a no-op there.
    pub fn record(&mut self, id: &str) {
        if self.mode == RegistryMode::WrapAll && !self.working.contains(id) {
            self.working.insert(RegistryEntry::untranslated(id));
            self.dirty = true;
        }
    }

    /// Move the entry for `old` to the templated identifier `new`.
    ///
    /// Applying the same rename twice is a no-op the second time.
    pub fn rename(&mut self, old: &str, new: &str) -> RenameOutcome {
        if old == new {
            return RenameOutcome::Unchanged;
        }
        let Some(old_entry) = self.working.remove(old) else {
            return RenameOutcome::Unchanged;
        };
        self.dirty = true;

        let translation = migrate_translation(&old_entry, new);

        match self.working.get(new) {
            Some(existing) if existing.translation == translation => RenameOutcome::Renamed,
            Some(existing) => RenameOutcome::Collision {
                existing_translation: existing.translation.clone(),
                dropped_translation: translation,
            },
            None => {
                self.working.insert(RegistryEntry::new(new, translation));
                RenameOutcome::Renamed
            }
        }
    }

    /// The registry as loaded.
    pub fn lookup(&self) -> &Registry {
        &self.lookup
    }

    /// The registry including this pass's renames and additions.
    pub fn working(&self) -> &Registry {
        &self.working
    }

    pub fn into_working(self) -> Registry {
        self.working
    }
}

/// Translation carried over when `old_entry` is renamed to `new`.
///
/// - Untranslated entries (empty, or equal to the old id) take the new id.
/// - Interpolated translations with the same number of markers as the old id
///   are converted the same way the id was.
/// - Anything else is kept verbatim.
fn migrate_translation(old_entry: &RegistryEntry, new: &str) -> String {
    let translation = &old_entry.translation;
    if translation.is_empty() || *translation == old_entry.id {
        return new.to_string();
    }
    if classify_format(translation) == FormatStyle::Interpolated {
        let markers = marker_count(&old_entry.id);
        if let Ok(converted) = to_templated(translation, markers) {
            return converted.text;
        }
    }
    translation.clone()
}
