//! Graph engine settings persistence.
//!
//! Stores tuning knobs for traversal, analytics and reports in a JSON file
//! at an OS-appropriate location.

use crate::core::backlinks::DEFAULT_CONTEXT_WORDS;
use crate::core::network::MAX_STEPS;
use crate::{Result, WikigraphError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted graph settings. Missing keys take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphSettings {
    /// Step budget used when a caller does not pass one.
    pub default_steps: usize,
    /// Words kept on each side of a link in backlink snippets.
    pub context_words: usize,
    /// Upper bound on community detection passes.
    pub community_max_iterations: usize,
    /// How many nodes seed the diameter estimate.
    pub diameter_sample_size: usize,
    pub top_centrality_count: usize,
    pub isolated_sample_count: usize,
    /// Ceiling applied to the modularity estimate.
    pub max_modularity_estimate: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            default_steps: 2,
            context_words: DEFAULT_CONTEXT_WORDS,
            community_max_iterations: 10,
            diameter_sample_size: 50,
            top_centrality_count: 10,
            isolated_sample_count: 10,
            max_modularity_estimate: 0.8,
        }
    }
}

impl GraphSettings {
    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`WikigraphError::InvalidSettings`] naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_STEPS).contains(&self.default_steps) {
            return Err(WikigraphError::InvalidSettings(format!(
                "defaultSteps must be between 1 and {MAX_STEPS}, got {}",
                self.default_steps
            )));
        }
        let counts = [
            ("contextWords", self.context_words),
            ("communityMaxIterations", self.community_max_iterations),
            ("diameterSampleSize", self.diameter_sample_size),
            ("topCentralityCount", self.top_centrality_count),
            ("isolatedSampleCount", self.isolated_sample_count),
        ];
        if let Some((key, _)) = counts.iter().find(|(_, v)| *v == 0) {
            return Err(WikigraphError::InvalidSettings(format!(
                "{key} must be greater than zero"
            )));
        }
        if !(0.0..=1.0).contains(&self.max_modularity_estimate) {
            return Err(WikigraphError::InvalidSettings(format!(
                "maxModularityEstimate must be within 0..=1, got {}",
                self.max_modularity_estimate
            )));
        }
        Ok(())
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/wikigraph/graph-settings.json`
/// - Windows: `%APPDATA%/Wikigraph/graph-settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Wikigraph").join("graph-settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("wikigraph").join("graph-settings.json")
    }
}

/// Loads settings from the default location; returns defaults if the file
/// is missing, corrupt or invalid.
pub fn load_settings() -> GraphSettings {
    let path = settings_file_path();
    if !path.exists() {
        return GraphSettings::default();
    }
    load_settings_from(&path).unwrap_or_else(|e| {
        log::warn!("ignoring graph settings at {}: {e}", path.display());
        GraphSettings::default()
    })
}

/// Loads and validates settings from `path`.
///
/// # Errors
///
/// Returns [`WikigraphError::Io`] if the file cannot be read,
/// [`WikigraphError::Json`] if it is not valid settings JSON, or
/// [`WikigraphError::InvalidSettings`] if a value is out of range.
pub fn load_settings_from(path: &Path) -> Result<GraphSettings> {
    let content = fs::read_to_string(path)?;
    let settings: GraphSettings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Saves settings to the default location.
///
/// # Errors
///
/// See [`save_settings_to`].
pub fn save_settings(settings: &GraphSettings) -> Result<()> {
    save_settings_to(&settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`WikigraphError::InvalidSettings`] for out-of-range values and
/// [`WikigraphError::Io`] if the file cannot be written.
pub fn save_settings_to(path: &Path, settings: &GraphSettings) -> Result<()> {
    settings.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
