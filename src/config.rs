//! Configuration handling for xaml-analyzer

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".xamlanalyzer.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Rule enable/disable patterns
    #[serde(default)]
    pub rules: RulesConfig,

    /// File patterns to exclude when walking directories
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Rule thresholds
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Rule-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    /// Rules to enable (supports wildcards like "LOGIC-*")
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable (supports wildcards)
    #[serde(default)]
    pub disable: Vec<String>,
}

/// Numeric limits used by the rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    /// Deepest element nesting before MAINT-001 fires
    pub max_nesting_depth: usize,
    /// Longest query string tolerated in a selector URL
    pub max_url_query_length: usize,
    /// Log messages expected inside each row loop
    pub min_loop_log_messages: usize,
    /// Log messages expected across the workflow
    pub min_log_messages: usize,
    /// Activity count above which a workflow needs a TryCatch
    pub max_activities_without_try_catch: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_nesting_depth: 7,
            max_url_query_length: 50,
            min_loop_log_messages: 2,
            min_log_messages: 3,
            max_activities_without_try_catch: 5,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Find and load configuration from the given directory or its parents
    pub fn find_and_load(start_dir: &Path) -> Option<Self> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        log::debug!("Using config {}", config_path.display());
                        Some(config)
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        None
                    }
                };
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Check if a rule should be run
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.matches_pattern(rule_id, &self.rules.disable) {
            return false;
        }

        // An empty enable list means every rule runs
        if self.rules.enable.is_empty() {
            return true;
        }

        self.matches_pattern(rule_id, &self.rules.enable)
    }

    /// Check if a file should be skipped
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|glob| glob.matches(&path_str))
                .unwrap_or(false)
        })
    }

    fn matches_pattern(&self, rule_id: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => rule_id.starts_with(prefix),
            None => pattern == rule_id,
        })
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    Read(PathBuf, String),

    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.thresholds.max_nesting_depth, 7);
        assert_eq!(config.thresholds.max_url_query_length, 50);
        assert_eq!(config.thresholds.min_loop_log_messages, 2);
        assert_eq!(config.thresholds.min_log_messages, 3);
        assert_eq!(config.thresholds.max_activities_without_try_catch, 5);
    }

    #[test]
    fn test_rule_enabled_default() {
        let config = Config::default();
        assert!(config.is_rule_enabled("ERR-001"));
        assert!(config.is_rule_enabled("LOGIC-005"));
    }

    #[test]
    fn test_rule_disabled() {
        let mut config = Config::default();
        config.rules.disable.push("TIME-001".to_string());
        assert!(!config.is_rule_enabled("TIME-001"));
        assert!(config.is_rule_enabled("LOG-001"));
    }

    #[test]
    fn test_rule_wildcard_disable() {
        let mut config = Config::default();
        config.rules.disable.push("LOGIC-*".to_string());
        assert!(!config.is_rule_enabled("LOGIC-001"));
        assert!(!config.is_rule_enabled("LOGIC-005"));
        assert!(config.is_rule_enabled("LOG-001"));
    }

    #[test]
    fn test_rule_wildcard_enable() {
        let mut config = Config::default();
        config.rules.enable.push("XL-*".to_string());
        assert!(config.is_rule_enabled("XL-002"));
        assert!(!config.is_rule_enabled("WEB-001"));
    }

    #[test]
    fn test_disable_wins_over_enable() {
        let mut config = Config::default();
        config.rules.enable.push("WEB-*".to_string());
        config.rules.disable.push("WEB-002".to_string());
        assert!(config.is_rule_enabled("WEB-001"));
        assert!(!config.is_rule_enabled("WEB-002"));
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "rules": { "disable": ["MAINT-002"] },
            "exclude": ["**/Tests/**"],
            "thresholds": { "maxNestingDepth": 10 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(!config.is_rule_enabled("MAINT-002"));
        assert_eq!(config.thresholds.max_nesting_depth, 10);
        // Unspecified thresholds keep their defaults
        assert_eq!(config.thresholds.min_log_messages, 3);
        assert_eq!(config.exclude, vec!["**/Tests/**"]);
    }

    #[test]
    fn test_is_excluded() {
        let mut config = Config::default();
        config.exclude.push("**/Framework/**".to_string());
        config.exclude.push("*.backup.xaml".to_string());

        assert!(config.is_excluded(Path::new("proj/Framework/Init.xaml")));
        assert!(config.is_excluded(Path::new("Main.backup.xaml")));
        assert!(!config.is_excluded(Path::new("proj/Main.xaml")));
    }

    #[test]
    fn test_invalid_exclude_pattern_ignored() {
        let mut config = Config::default();
        config.exclude.push("[".to_string());
        assert!(!config.is_excluded(Path::new("Main.xaml")));
    }

    #[test]
    fn test_config_error_display() {
        let read_err = ConfigError::Read(PathBuf::from("cfg.json"), "not found".to_string());
        assert_eq!(read_err.to_string(), "Failed to read config file 'cfg.json': not found");

        let parse_err = ConfigError::Parse(PathBuf::from("bad.json"), "invalid".to_string());
        assert_eq!(parse_err.to_string(), "Failed to parse config file 'bad.json': invalid");
    }

    #[test]
    fn test_load_nonexistent_config() {
        assert!(Config::load(Path::new("/nonexistent/config.json")).is_err());
    }

    #[test]
    fn test_load_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ rules: ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_find_and_load_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "disable": ["TIME-001"] } }"#,
        )
        .unwrap();

        let sub_dir = temp_dir.path().join("Workflows");
        fs::create_dir(&sub_dir).unwrap();

        let config = Config::find_and_load(&sub_dir).unwrap();
        assert!(!config.is_rule_enabled("TIME-001"));
    }

    #[test]
    fn test_find_and_load_not_found() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::find_and_load(temp_dir.path()).is_none());
    }
}
