use std::path::PathBuf;

use langcode_core::{ConverterRegistry, LangError};
use serde::Serialize;
use thiserror::Error;

use crate::config::load_config_or_default;
use crate::error::CliError;

#[derive(Debug, Error)]
pub enum SchemesCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Lang(#[from] LangError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SchemesOptions {
    pub json: bool,
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeEntry {
    pub name: String,
    pub reverse: bool,
    pub codes: usize,
}

/// Lists the schemes bound after the config has been applied.
pub fn run_schemes(
    options: &SchemesOptions,
    registry: &ConverterRegistry,
) -> Result<String, SchemesCommandError> {
    let config = load_config_or_default(&options.config_path)?;
    config.prepare(registry)?;

    let mut entries = Vec::new();
    for name in registry.schemes() {
        let converter = registry.get(&name)?;
        entries.push(SchemeEntry {
            reverse: converter.as_reverse().is_some(),
            codes: converter.codes().len(),
            name,
        });
    }

    if options.json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let direction = if entry.reverse { "both" } else { "forward" };
            format!("{}\t{direction}\t{}", entry.name, entry.codes)
        })
        .collect();
    Ok(lines.join("\n"))
}
