use std::path::PathBuf;

use langcode_core::{ConverterRegistry, LangError, Language};
use serde::Serialize;
use thiserror::Error;

use crate::config::load_config_or_default;
use crate::error::CliError;

/// Pseudo-schemes handled by the command itself rather than a converter.
const IETF: &str = "ietf";
const ALPHA3: &str = "alpha3";

#[derive(Debug, Error)]
pub enum ConvertCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Lang(#[from] LangError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub code: String,
    pub from: String,
    pub to: String,
    pub json: bool,
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    pub input: String,
    pub from: String,
    pub to: String,
    pub language: String,
    pub output: String,
}

pub fn run_convert(
    options: &ConvertOptions,
    registry: &ConverterRegistry,
) -> Result<String, ConvertCommandError> {
    let config = load_config_or_default(&options.config_path)?;
    config.prepare(registry)?;

    let language = match options.from.as_str() {
        IETF => registry.parse_ietf(&options.code)?,
        ALPHA3 => match &config.unknown_language {
            Some(fallback) => Language::with_fallback(&options.code, fallback)?,
            None => Language::new(&options.code)?,
        },
        scheme => registry.from_code(&options.code, scheme)?,
    };
    let output = match options.to.as_str() {
        IETF => registry.ietf(&language),
        ALPHA3 => language.alpha3().to_string(),
        scheme => registry.convert(&language, scheme)?,
    };

    let report = ConvertReport {
        input: options.code.clone(),
        from: options.from.clone(),
        to: options.to.clone(),
        language: registry.ietf(&language),
        output,
    };
    if options.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.output)
    }
}
