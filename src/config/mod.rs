pub use tf_core::config::*;

use anyhow::{Context, Result};
use std::path::Path;
use tf_rules::{RuleEngine, RuleSet};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    for warning in validate_config(&config) {
        tracing::warn!(config = %path.display(), "{}", warning);
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./titleforged.toml",
        "~/.config/titleforged/config.toml",
        "/etc/titleforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Every non-fatal problem with `config`.
///
/// Adds the rule-set diagnostics (unparseable JSON, patterns that will never
/// compile) to the structural warnings from [`Config::validate`]. None of
/// these stop the engine: bad rule JSON runs as an empty cascade and a bad
/// pattern is skipped.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = config.validate();

    if config.title.mode == TitleMode::Rules {
        match RuleSet::try_parse(&config.title.rules) {
            Ok(rules) => {
                let engine = RuleEngine::new(rules);
                warnings.extend(engine.invalid_rules().iter().map(|e| e.to_string()));
            }
            Err(e) => warnings.push(e.to_string()),
        }
    }

    warnings
}
