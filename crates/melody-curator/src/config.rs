use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Keys accepted by [`set_value`] and `config get`.
pub const VALID_KEYS: &[&str] = &["gemini_api_key", "model", "api_base_url", "timeout_secs"];

/// Environment variables consulted for the API key when neither the config
/// file nor `MELODY_GEMINI_API_KEY` provides one.
const FALLBACK_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Configuration for commute-melody.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (MELODY_* prefix)
/// 3. Config file (~/.config/commute-melody/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API key.
    ///
    /// Can be set via:
    /// - CLI: --api-key KEY
    /// - ENV: MELODY_GEMINI_API_KEY (or GEMINI_API_KEY / API_KEY)
    /// - Config: gemini_api_key = "..."
    pub gemini_api_key: Option<String>,

    /// Model used for generation.
    ///
    /// Default: gemini-3-flash-preview
    pub model: String,

    /// Base URL of the generative language API.
    pub api_base_url: String,

    /// HTTP timeout for the single generation round trip, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path` (if it exists) and environment
    /// variables with the MELODY_ prefix.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if path.exists() {
            let path_str = path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("melody");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        config.gemini_api_key = config
            .gemini_api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(fallback_api_key);

        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, api_key: Option<String>, model: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.gemini_api_key = Some(key);
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }

    /// Look up a single setting by key, for `config get`.
    ///
    /// The API key is masked.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "gemini_api_key" => self
                .gemini_api_key
                .as_deref()
                .map_or("<not set>", |_| "<set>")
                .to_string(),
            "model" => self.model.clone(),
            "api_base_url" => self.api_base_url.clone(),
            "timeout_secs" => self.timeout_secs.to_string(),
            _ => anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        };
        Ok(value)
    }
}

fn fallback_api_key() -> Option<String> {
    FALLBACK_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/commute-melody/config.toml
/// - macOS: ~/Library/Application Support/commute-melody/config.toml
/// - Windows: %APPDATA%\commute-melody\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("commute-melody")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Commute Melody Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (MELODY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Gemini API key used to request recommendations
#
# Create one at: https://aistudio.google.com/apikey
#
# Can also be set via:
# - CLI: commute-melody --api-key your-key-here recommend "신나는 팝"
# - Environment: MELODY_GEMINI_API_KEY=your-key-here (or GEMINI_API_KEY)
#gemini_api_key = "your-gemini-api-key-here"

# Model used for generation
#model = "gemini-3-flash-preview"

# Base URL of the generative language API
#api_base_url = "https://generativelanguage.googleapis.com/v1beta"

# HTTP timeout for a single request, in seconds
#timeout_secs = 60
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set a single key in the config file at `config_path`, keeping comments
/// and layout intact. Creates the file from the example if missing.
pub fn set_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    if !VALID_KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown config key: {}\n\nValid keys: {}",
            key,
            VALID_KEYS.join(", ")
        );
    }

    ensure_config_file_at(config_path)?;

    let contents = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse config file")?;

    if key == "timeout_secs" {
        let secs: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("timeout_secs must be a whole number, got {value:?}"))?;
        doc[key] = toml_edit::value(secs);
    } else {
        doc[key] = toml_edit::value(value);
    }

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_config_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from(&temp_dir.path().join("missing.toml"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "model = \"gemini-test\"\ntimeout_secs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_overrides_take_priority() {
        let config = Config::default()
            .with_overrides(Some("cli-key".to_string()), Some("cli-model".to_string()));
        assert_eq!(config.gemini_api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.model, "cli-model");

        let unchanged = Config::default().with_overrides(Some("  ".to_string()), None);
        assert!(unchanged.gemini_api_key.is_none());
        assert_eq!(unchanged.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_get_unknown_key() {
        assert!(Config::default().get("database_path").is_err());
        assert_eq!(Config::default().get("timeout_secs").unwrap(), "60");
    }

    #[test]
    fn test_ensure_config_file_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        assert!(ensure_config_file_at(&path).unwrap());
        assert!(!ensure_config_file_at(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), example_config());
    }

    #[test]
    fn test_set_value_preserves_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        set_value(&path, "model", "gemini-other").unwrap();
        set_value(&path, "timeout_secs", "15").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# Commute Melody Configuration File"));
        assert!(contents.contains("model = \"gemini-other\""));
        assert!(contents.contains("timeout_secs = 15"));

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-other");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_get_masks_api_key() {
        let config = Config::default().with_overrides(Some("secret-key".to_string()), None);
        assert_eq!(config.get("gemini_api_key").unwrap(), "<set>");
        assert_eq!(Config::default().get("gemini_api_key").unwrap(), "<not set>");
    }

    #[test]
    fn test_generated_file_sets_no_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        set_value(&path, "model", "gemini-other").unwrap();

        let doc = std::fs::read_to_string(&path)
            .unwrap()
            .parse::<toml_edit::DocumentMut>()
            .unwrap();
        assert!(doc.get("gemini_api_key").is_none());

        // Whatever the environment provides, the example placeholder never
        // becomes the effective key.
        let config = Config::load_from(&path).unwrap();
        assert_ne!(
            config.gemini_api_key.as_deref(),
            Some("your-gemini-api-key-here")
        );
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        assert!(set_value(&path, "database_path", "/tmp/x").is_err());
        assert!(set_value(&path, "timeout_secs", "soon").is_err());
    }
}
