//! Preset registry — named remote endpoints loaded from embedded TOML.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`]. A preset lets callers select a
//! known dataset by id instead of spelling out its URL.

use serde::Deserialize;

/// TOML configs embedded at compile time.
const PRESET_TOMLS: &[(&str, &str)] = &[(
    "gainesville",
    include_str!("../sources/gainesville.toml"),
)];

/// Total number of configured presets (used in tests).
#[cfg(test)]
const EXPECTED_PRESET_COUNT: usize = 1;

/// A named remote dataset exposing the incident export fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresetDefinition {
    /// Unique identifier (e.g., `"gainesville"`).
    pub id: String,
    /// Human-readable name (e.g., `"Gainesville Police Department"`).
    pub name: String,
    /// City the dataset covers.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// Socrata resource URL.
    pub api_url: String,
    /// Human-readable portal page for the dataset.
    #[serde(default)]
    pub portal_url: Option<String>,
}

/// Parses a single preset definition.
///
/// # Errors
///
/// Returns [`toml::de::Error`] if the TOML is malformed or missing fields.
pub fn parse_preset_toml(toml_str: &str) -> Result<PresetDefinition, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns all configured presets, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_presets() -> Vec<PresetDefinition> {
    PRESET_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_preset_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a preset by id.
#[must_use]
pub fn find_preset(id: &str) -> Option<PresetDefinition> {
    all_presets().into_iter().find(|p| p.id == id)
}
