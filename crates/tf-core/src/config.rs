//! Application configuration types.
//!
//! The top-level [`Config`] struct carries the title-engine settings, the
//! user-supplied ffmpeg options, tool paths, and library-scan settings.
//! Every section defaults sensibly so a completely empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: TitleConfig,
    pub advanced: AdvancedConfig,
    pub tools: ToolsConfig,
    pub scan: ScanConfig,
}

impl Config {
    /// Return a list of validation warnings (non-fatal issues).
    ///
    /// Rule JSON and pattern problems are reported by the rules crate; this
    /// only covers the structural settings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.title.mode == TitleMode::Rules && self.title.rules.trim().is_empty() {
            warnings.push("title.mode is \"rules\" but title.rules is empty; no title will match".into());
        }

        if self.title.mode == TitleMode::Strip && !self.title.rules.trim().is_empty() {
            warnings.push("title.rules is ignored while title.mode is \"strip\"".into());
        }

        if !self.advanced.enabled
            && (!self.advanced.main_options.trim().is_empty()
                || !self.advanced.advanced_options.trim().is_empty())
        {
            warnings.push(
                "advanced options are set but advanced.enabled is false; they will be ignored"
                    .into(),
            );
        }

        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every probe will time out".into());
        }

        if self.scan.extensions.is_empty() {
            warnings.push("scan.extensions is empty; no file will be considered".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Which rule set drives the title engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleMode {
    /// Apply the user-supplied JSON rules in `title.rules`.
    #[default]
    Rules,
    /// Blank every non-empty stream title.
    Strip,
}

/// Stream-title engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub mode: TitleMode,
    /// Copy the first titled video stream's title to the container title
    /// when the container has none.
    pub copy_video_to_global: bool,
    /// Blank the title of a stream that is the only one of its type.
    pub delete_singles: bool,
    /// JSON array of `{pattern, replace, disposition?}` objects.
    pub rules: String,
}

/// User-written ffmpeg options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    pub enabled: bool,
    pub main_options: String,
    pub advanced_options: String,
}

impl AdvancedConfig {
    /// Whitespace-tokenized main options, empty unless advanced mode is on.
    pub fn main_args(&self) -> Vec<String> {
        self.tokens(&self.main_options)
    }

    /// Whitespace-tokenized advanced options, empty unless advanced mode is on.
    pub fn advanced_args(&self) -> Vec<String> {
        self.tokens(&self.advanced_options)
    }

    fn tokens(&self, raw: &str) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }
        raw.split_whitespace().map(str::to_string).collect()
    }
}

/// Paths to external CLI tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Library scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (lowercase, without dot) treated as video files.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["mkv", "mp4", "m4v", "avi", "mov", "ts", "webm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Config::default();
        assert_eq!(cfg.title.mode, TitleMode::Rules);
        assert!(!cfg.title.copy_video_to_global);
        assert!(!cfg.title.delete_singles);
        assert!(!cfg.advanced.enabled);
        assert_eq!(cfg.tools.timeout_secs, 300);
        assert!(cfg.scan.extensions.contains(&"mkv".to_string()));
    }

    #[test]
    fn parse_empty_json_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.tools.timeout_secs, 300);
        assert!(cfg.title.rules.is_empty());
    }

    #[test]
    fn parse_partial_sections() {
        let json = r#"{"title": {"mode": "strip", "delete_singles": true}}"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.title.mode, TitleMode::Strip);
        assert!(cfg.title.delete_singles);
        assert!(!cfg.title.copy_video_to_global);
    }

    #[test]
    fn advanced_args_empty_when_disabled() {
        let adv = AdvancedConfig {
            enabled: false,
            main_options: "-map 0".into(),
            advanced_options: "-max_muxing_queue_size 1024".into(),
        };
        assert!(adv.main_args().is_empty());
        assert!(adv.advanced_args().is_empty());
    }

    #[test]
    fn advanced_args_tokenized_on_whitespace() {
        let adv = AdvancedConfig {
            enabled: true,
            main_options: "  -map 0\n-c   copy ".into(),
            advanced_options: "-max_muxing_queue_size\t1024".into(),
        };
        assert_eq!(adv.main_args(), vec!["-map", "0", "-c", "copy"]);
        assert_eq!(
            adv.advanced_args(),
            vec!["-max_muxing_queue_size", "1024"]
        );
    }

    #[test]
    fn empty_rules_in_rules_mode_warns() {
        let cfg = Config::default();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("title.rules is empty")));
    }

    #[test]
    fn ignored_advanced_options_warn() {
        let mut cfg = Config::default();
        cfg.title.rules = "[]".into();
        cfg.advanced.main_options = "-map 0".into();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("advanced.enabled")));
    }

    #[test]
    fn strip_mode_without_rules_has_no_warnings() {
        let mut cfg = Config::default();
        cfg.title.mode = TitleMode::Strip;
        let warnings = cfg.validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }
}
