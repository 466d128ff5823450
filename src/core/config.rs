//! Config file support for `.sfdotenv.toml`
//!
//! # Overview
//!
//! Provides configuration file support allowing users to set CLI defaults
//! that persist across invocations. Configuration files are searched in:
//!
//! 1. Current directory (`.sfdotenv.toml` or `sfdotenv.toml`)
//! 2. Parent directories (recursively up to root)
//! 3. Home directory (`~/.sfdotenv.toml` or `~/sfdotenv.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [defaults]
//! env_file = ".env"
//! key_env = "SIGNALFORGE_DOTENV_KEY"
//! verbose = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration struct — just the CLI's defaults, unlike the
/// validate/scan/convert sections a general-purpose dotenv tool carries.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings the `run`/`encrypt`/`decrypt` subcommands fall back to
/// when not given explicitly on the command line.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Defaults {
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Name of the environment variable to read a passphrase from, used
    /// when neither `--key` nor `--key-env` is given on the command line.
    pub key_env: Option<String>,

    #[serde(default)]
    pub verbose: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            key_env: None,
            verbose: false,
        }
    }
}

fn default_env_file() -> String {
    ".env".to_string()
}

impl Config {
    /// Load config from file
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    /// Find config file by searching up the directory tree, then the home
    /// directory.
    pub fn find_config_file() -> Result<PathBuf> {
        let config_names = [".sfdotenv.toml", "sfdotenv.toml"];

        let mut current_dir = std::env::current_dir()?;

        loop {
            for name in &config_names {
                let path = current_dir.join(name);
                if path.exists() {
                    return Ok(path);
                }
            }

            if !current_dir.pop() {
                break;
            }
        }

        if let Some(home) = dirs::home_dir() {
            for name in &config_names {
                let path = home.join(name);
                if path.exists() {
                    return Ok(path);
                }
            }
        }

        Err(anyhow::anyhow!("No config file found"))
    }

    /// Merge with CLI arguments (CLI args take precedence)
    pub fn merge_with_args(&self, cli_verbose: bool) -> Self {
        let mut config = self.clone();
        if cli_verbose {
            config.defaults.verbose = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.env_file, ".env");
        assert!(!config.defaults.verbose);
        assert!(config.defaults.key_env.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let toml = r#"
[defaults]
env_file = "custom.env"
key_env = "MY_APP_KEY"
verbose = true
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.defaults.env_file, "custom.env");
        assert_eq!(config.defaults.key_env.as_deref(), Some("MY_APP_KEY"));
        assert!(config.defaults.verbose);
    }

    #[test]
    fn test_merge_with_args() {
        let config = Config::default();
        assert!(!config.defaults.verbose);

        let merged = config.merge_with_args(true);
        assert!(merged.defaults.verbose);
    }
}
