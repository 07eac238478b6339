use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "guide-stepper.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {config_path}")]
    ConfigNotFound { config_path: PathBuf },

    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the MDX content tree. Relative paths are resolved against the
    /// directory holding the config file.
    pub content_dir: PathBuf,
    /// Document extensions to scan, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("."),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.content_dir = Self::expand_path(&config.content_dir).unwrap_or(config.content_dir);
        if config.content_dir.is_relative()
            && let Some(parent) = config_path.parent()
        {
            config.content_dir = parent.join(&config.content_dir);
        }

        Ok(Some(config))
    }

    /// Load from `explicit` if given, else the first of [`Config::search_paths`] that exists.
    ///
    /// An explicit path that does not exist is an error; otherwise a missing
    /// config is `Ok(None)`.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(config_path) = explicit {
            return match Self::load_from_path(config_path)? {
                Some(config) => Ok(Some(config)),
                None => Err(ConfigError::ConfigNotFound {
                    config_path: config_path.to_path_buf(),
                }),
            };
        }

        for config_path in Self::search_paths() {
            if let Some(config) = Self::load_from_path(&config_path)? {
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn search_paths() -> Vec<PathBuf> {
        vec![PathBuf::from(LOCAL_CONFIG_FILE), Self::config_path()]
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/guide-stepper");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/guide-stepper/config.toml"));
    }

    #[test]
    fn test_search_paths_prefer_local_file() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from(LOCAL_CONFIG_FILE));
        assert_eq!(paths[1], Config::config_path());
    }

    #[test]
    fn test_extensions_default_when_missing() {
        let config: Config = toml::from_str(r#"content_dir = "/srv/docs""#).unwrap();
        assert_eq!(config.extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("GUIDE_STEPPER_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$GUIDE_STEPPER_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("GUIDE_STEPPER_TEST_VAR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let result = Config::load(Some(&missing));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "content_dir = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            content_dir: PathBuf::from("/tmp/test-docs"),
            extensions: vec!["mdx".to_string()],
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load(Some(&config_file)).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_relative_content_dir_resolves_against_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("guide-stepper.toml");
        std::fs::write(&config_file, "content_dir = \"content/docs\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.content_dir, temp_dir.path().join("content/docs"));
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("GUIDE_STEPPER_DOCS", "/custom/docs");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "content_dir = \"$GUIDE_STEPPER_DOCS/guides\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.content_dir, PathBuf::from("/custom/docs/guides"));

        unsafe {
            env::remove_var("GUIDE_STEPPER_DOCS");
        }
    }
}
