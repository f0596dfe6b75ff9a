use std::path::PathBuf;

use langcode_core::converters;
use thiserror::Error;

use crate::command_convert::{ConvertCommandError, ConvertOptions, run_convert};
use crate::command_parse::{ParseCommandError, ParseOptions, run_parse};
use crate::command_schemes::{SchemesCommandError, SchemesOptions, run_schemes};

const DEFAULT_CONFIG: &str = "langcode.toml";

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Convert(#[from] ConvertCommandError),
    #[error(transparent)]
    Parse(#[from] ParseCommandError),
    #[error(transparent)]
    Schemes(#[from] SchemesCommandError),
}

/// Runs the command named by the process arguments and returns its output.
pub fn run() -> Result<String, CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    let registry = converters();
    match command.as_str() {
        "convert" => {
            let options = parse_convert_options(args.collect())?;
            Ok(run_convert(&options, registry)?)
        }
        "parse" => {
            let options = parse_parse_options(args.collect())?;
            Ok(run_parse(&options, registry)?)
        }
        "schemes" => {
            let options = parse_schemes_options(args.collect())?;
            Ok(run_schemes(&options, registry)?)
        }
        _ => Err(CliAppError::Usage(usage())),
    }
}

/// The line printed to stderr when a command fails.
pub fn failure_message(err: &CliAppError) -> String {
    format!("error: {err}")
}

fn parse_convert_options(args: Vec<String>) -> Result<ConvertOptions, CliAppError> {
    let mut code = None;
    let mut from = None;
    let mut to = None;
    let mut json = false;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--from" => from = Some(next_value("--from", &mut iter)?),
            "--to" => to = Some(next_value("--to", &mut iter)?),
            "--json" => json = true,
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            value if code.is_none() && !value.starts_with("--") => code = Some(value.to_string()),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let code = code.ok_or_else(|| CliAppError::Usage(usage()))?;
    let from = from.ok_or_else(|| CliAppError::Usage(usage()))?;
    let to = to.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(ConvertOptions {
        code,
        from,
        to,
        json,
        config_path,
    })
}

fn parse_parse_options(args: Vec<String>) -> Result<ParseOptions, CliAppError> {
    let mut tag = None;
    let mut json = false;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            value if tag.is_none() && !value.starts_with("--") => tag = Some(value.to_string()),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let tag = tag.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(ParseOptions {
        tag,
        json,
        config_path,
    })
}

fn parse_schemes_options(args: Vec<String>) -> Result<SchemesOptions, CliAppError> {
    let mut json = false;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(SchemesOptions { json, config_path })
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    "usage: langcode convert <code> --from <scheme|alpha3|ietf> --to <scheme|alpha3|ietf> [--json] [--config <path>]\n       langcode parse <tag> [--json] [--config <path>]\n       langcode schemes [--json] [--config <path>]".to_string()
}
