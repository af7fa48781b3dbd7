use crate::error::{Result, SchemeError};
use dialoguer::{Confirm, Input, Password};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "schemefinder";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub profiles: ProfileStoreConfig,
}

/// Where the scheme ruleset comes from. A local path wins over a URL.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for DatasetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetConfig")
            .field("path", &self.path)
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Read plain numbers under "max"/"min" style column labels as bounds.
    #[serde(default = "default_true")]
    pub header_heuristics: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            header_heuristics: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileStoreConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for ProfileStoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_id: default_user_id(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_user_id() -> String {
    "local".to_string()
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SchemeError::Config(format!(
                "Config file not found at {:?}. Run `schemefinder init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SchemeError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Load the config if one exists; otherwise fall back to defaults so that
    /// commands given `--dataset` work without any setup.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists(None) {
            return Self::load(config_override);
        }
        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| SchemeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/schemefinder/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchemeError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up schemefinder.");
        println!();

        println!("Scheme dataset (leave path blank to use a URL)");
        let path: String = Input::new()
            .with_prompt("  Dataset file (JSON or YAML)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SchemeError::Config(format!("Input error: {}", e)))?;

        let (url, token) = if path.is_empty() {
            let url: String = Input::new()
                .with_prompt("  Dataset URL")
                .interact_text()
                .map_err(|e| SchemeError::Config(format!("Input error: {}", e)))?;
            let token: String = Password::new()
                .with_prompt("  Bearer token (optional)")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| SchemeError::Config(format!("Input error: {}", e)))?;
            (Some(url), Some(token).filter(|t| !t.is_empty()))
        } else {
            (None, None)
        };

        println!();

        let header_heuristics = Confirm::new()
            .with_prompt("Treat numbers under \"max\"/\"min\" columns as limits?")
            .default(true)
            .interact()
            .map_err(|e| SchemeError::Config(format!("Input error: {}", e)))?;

        let user_id: String = Input::new()
            .with_prompt("Profile owner id")
            .default(default_user_id())
            .interact_text()
            .map_err(|e| SchemeError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            dataset: DatasetConfig {
                path: Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty()),
                url,
                token,
            },
            matcher: MatcherConfig { header_heuristics },
            profiles: ProfileStoreConfig {
                enabled: true,
                user_id,
            },
        };

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SchemeError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# schemefinder configuration\n# Generated by `schemefinder init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("SCHEMEFINDER_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SchemeError::Config("Cannot determine data directory".into()))?
            .join(APP_DIR);

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("profiles.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
dataset:
  path: data/schemes.json
matcher:
  header_heuristics: false
profiles:
  enabled: false
  user_id: farmer-42
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.dataset.path, Some(PathBuf::from("data/schemes.json")));
        assert!(config.dataset.url.is_none());
        assert!(!config.matcher.header_heuristics);
        assert!(!config.profiles.enabled);
        assert_eq!(config.profiles.user_id, "farmer-42");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::parse("dataset:\n  url: https://example.org/schemes.json\n").unwrap();
        assert!(config.matcher.header_heuristics);
        assert!(config.profiles.enabled);
        assert_eq!(config.profiles.user_id, "local");
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("SCHEMEFINDER_TEST_TOKEN", "s3cret");
        let yaml = "dataset:\n  url: https://example.org\n  token: ${SCHEMEFINDER_TEST_TOKEN}\n";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.dataset.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        let out = Config::substitute_env_vars("token: ${SCHEMEFINDER_SURELY_UNSET_VAR}");
        assert_eq!(out, "token: ${SCHEMEFINDER_SURELY_UNSET_VAR}");
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let dataset = DatasetConfig {
            path: None,
            url: Some("https://example.org".into()),
            token: Some("s3cret".into()),
        };
        let debug = format!("{:?}", dataset);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.dataset.path = Some(PathBuf::from("schemes.yaml"));
        config.write_to(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.dataset.path, Some(PathBuf::from("schemes.yaml")));
    }

    #[test]
    fn missing_override_is_a_config_error() {
        let err = Config::load(Some(PathBuf::from("/nonexistent/schemefinder.yaml"))).unwrap_err();
        assert!(matches!(err, SchemeError::Config(_)));
    }
}
