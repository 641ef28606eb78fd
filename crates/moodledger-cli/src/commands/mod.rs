//! Command implementations

mod insights;
mod specs;

pub use insights::cmd_insights;
pub use specs::{cmd_check, cmd_specs_list, cmd_specs_show};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Load a JSON array of records from disk. The CLI plays the record
/// store's role here; the engine itself never touches files.
pub fn load_records<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid {} JSON in {}", what, path.display()))
}

/// Truncate a string for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
