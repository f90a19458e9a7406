use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// ledger_path: ~/events/ledger.json
/// log_level: info
/// color: never
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where events, scores, labels and the trained model are kept
    /// (default: ~/.config/evalue/ledger.json)
    #[serde(default)]
    pub ledger_path: Option<String>,

    /// tracing filter directive, e.g. "info" or "evalue=debug" (default: warn)
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(super::DEFAULT_LOG_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
ledger_path: /tmp/ledger.json
log_level: debug
color: never
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.ledger_path.as_deref(), Some("/tmp/ledger.json"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("base_score: 100\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            ledger_path: Some("ledger.json".to_string()),
            log_level: Some("info".to_string()),
            color: ColorMode::Always,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
