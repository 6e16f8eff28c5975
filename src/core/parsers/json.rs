use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::registry::{Registry, RegistryEntry};

/// Parse registry JSON text: an array of `{id, translation, modified}` records.
pub fn parse_registry(content: &str) -> Result<Registry> {
    let entries: Vec<RegistryEntry> =
        serde_json::from_str(content).context("Invalid registry JSON")?;
    Registry::from_entries(entries)
}

/// Load a registry file.
pub fn load_registry(path: &Path) -> Result<Registry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry file: {:?}", path))?;
    parse_registry(&content).with_context(|| format!("Failed to load registry file: {:?}", path))
}

/// Load a registry file if it exists.
pub fn load_registry_if_exists(path: &Path) -> Result<Option<Registry>> {
    if path.is_file() {
        load_registry(path).map(Some)
    } else {
        Ok(None)
    }
}

/// Serialize a registry the way it is stored on disk.
pub fn registry_to_json(registry: &Registry) -> Result<String> {
    let mut json = serde_json::to_string_pretty(registry.entries())
        .context("Failed to serialize registry")?;
    json.push('\n');
    Ok(json)
}

/// Write a registry file, creating parent directories as needed.
pub fn save_registry(path: &Path, registry: &Registry) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, registry_to_json(registry)?)
        .with_context(|| format!("Failed to write registry file: {:?}", path))
}
