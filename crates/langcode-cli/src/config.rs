use std::fs;
use std::path::Path;

use langcode_core::ConverterRegistry;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::CliError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Alpha-3 code used in place of an unknown `--from alpha3` code.
    pub unknown_language: Option<String>,
    /// Schemes resolved before any command runs.
    pub preload: Vec<String>,
    /// Clear the registry and bind every discoverable scheme up front.
    pub load_all: bool,
}

impl CliConfig {
    pub fn prepare(&self, registry: &ConverterRegistry) -> Result<(), CliError> {
        if self.load_all {
            registry.clear();
            registry.load_all()?;
            info!(count = registry.schemes().len(), "loaded all schemes");
        }
        for name in &self.preload {
            registry.get(name)?;
            debug!(scheme = name.as_str(), "preloaded scheme");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<CliConfig, CliError> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> Result<CliConfig, CliError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(CliConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, load_config_or_default};
    use crate::error::CliError;
    use langcode_core::{BuiltinDiscovery, ConverterRegistry, LangError};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("langcode_{name}_{nanos}.toml"));
        path
    }

    #[test]
    fn uses_default_when_missing() {
        let path = temp_path("missing");
        let config = load_config_or_default(&path).expect("config");
        assert!(config.unknown_language.is_none());
        assert!(config.preload.is_empty());
        assert!(!config.load_all);
    }

    #[test]
    fn loads_from_file() {
        let path = temp_path("config");
        let contents = r#"
unknown_language = "und"
preload = ["alpha2", "opensubtitles"]
"#;
        fs::write(&path, contents).expect("write");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.unknown_language.as_deref(), Some("und"));
        assert_eq!(config.preload, vec!["alpha2", "opensubtitles"]);
        assert!(!config.load_all);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_invalid_toml() {
        let path = temp_path("invalid");
        fs::write(&path, "load_all = \"yes\"").expect("write");
        let err = load_config_or_default(&path).expect_err("bad type");
        assert!(matches!(err, CliError::Toml(_)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn prepare_preloads_schemes() {
        let registry = ConverterRegistry::new(BuiltinDiscovery);
        let config = CliConfig {
            preload: vec!["alpha3b".to_string()],
            ..CliConfig::default()
        };
        config.prepare(&registry).expect("prepare");
        assert_eq!(registry.schemes(), vec!["alpha3b"]);
    }

    #[test]
    fn prepare_loads_everything() {
        let registry = ConverterRegistry::new(BuiltinDiscovery);
        registry.get("alpha2").expect("alpha2");
        let config = CliConfig {
            load_all: true,
            ..CliConfig::default()
        };
        config.prepare(&registry).expect("prepare");
        assert_eq!(registry.schemes().len(), 7);
    }

    #[test]
    fn prepare_reports_unknown_scheme() {
        let registry = ConverterRegistry::new(BuiltinDiscovery);
        let config = CliConfig {
            preload: vec!["klingon".to_string()],
            ..CliConfig::default()
        };
        let err = config.prepare(&registry).expect_err("unknown scheme");
        assert!(matches!(
            err,
            CliError::Registry(LangError::UnknownScheme(name)) if name == "klingon"
        ));
    }
}
