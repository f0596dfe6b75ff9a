use std::path::PathBuf;

use langcode_core::{ConverterRegistry, LangError};
use serde::Serialize;
use thiserror::Error;

use crate::config::load_config_or_default;
use crate::error::CliError;

#[derive(Debug, Error)]
pub enum ParseCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Lang(#[from] LangError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub tag: String,
    pub json: bool,
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub tag: String,
    pub alpha3: String,
    pub name: String,
    pub country: Option<String>,
    pub script: Option<String>,
    pub canonical: String,
    pub known: bool,
}

pub fn run_parse(
    options: &ParseOptions,
    registry: &ConverterRegistry,
) -> Result<String, ParseCommandError> {
    let config = load_config_or_default(&options.config_path)?;
    config.prepare(registry)?;

    let language = registry.parse_ietf(&options.tag)?;
    let report = ParseReport {
        tag: options.tag.clone(),
        alpha3: language.alpha3().to_string(),
        name: language.record().name.clone(),
        country: language.country().map(|country| country.alpha2().to_string()),
        script: language.script().map(|script| script.code().to_string()),
        canonical: registry.ietf(&language),
        known: language.is_known(),
    };

    if options.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(render_report(&report))
}

fn render_report(report: &ParseReport) -> String {
    [
        format!("alpha3:    {}", report.alpha3),
        format!("name:      {}", report.name),
        format!("country:   {}", report.country.as_deref().unwrap_or("-")),
        format!("script:    {}", report.script.as_deref().unwrap_or("-")),
        format!("canonical: {}", report.canonical),
        format!("known:     {}", report.known),
    ]
    .join("\n")
}
