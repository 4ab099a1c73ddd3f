//! Parameter persistence.
//!
//! Saves and loads the scalar parameter set as JSON under its historical
//! key names. Loading parses into a staging [`SarcomereRecord`] first, so
//! a malformed or truncated file is rejected as a whole and never leaves
//! a half-applied parameter set behind.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{SarcomereParameters, SarcomereRecord};

/// Serialize the parameter set to a pretty-printed JSON file.
pub fn save_parameters(params: &SarcomereParameters, path: &Path) -> Result<()> {
    let record = SarcomereRecord::from(params);
    let json = serde_json::to_string_pretty(&record)
        .context("failed to serialize sarcomere parameters")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write parameter file {}", path.display()))?;
    log::info!("saved sarcomere parameters to {}", path.display());
    Ok(())
}

/// Load a parameter set from a JSON file.
///
/// All-or-nothing: the file is parsed into a complete record before any
/// conversion, so on error the caller's current parameters are untouched.
pub fn load_parameters(path: &Path) -> Result<SarcomereParameters> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file {}", path.display()))?;
    let record: SarcomereRecord = serde_json::from_str(&json)
        .with_context(|| format!("malformed parameter file {}", path.display()))?;
    let params = SarcomereParameters::from(&record);
    params
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid parameters in {}: {e}", path.display()))?;
    log::info!("loaded sarcomere parameters from {}", path.display());
    Ok(params)
}
