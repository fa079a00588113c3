//! Configuration file support

use crate::composition::service::GeminiConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = ".lookbook.json";

/// Environment variables checked for the API key, in order
const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout for the hosted model
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefer the environment; a key stored here is never written back out
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

fn default_request_timeout() -> u64 {
    120_000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./lookbook-output")
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            request_timeout_ms: default_request_timeout(),
            output_dir: default_output_dir(),
            api_key: None,
        }
    }
}

impl ComposerConfig {
    /// Load from an explicit path, else the first config found, else defaults; then apply the environment
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        Self::load_with(explicit, &search_paths(), |var| std::env::var(var).ok())
    }

    fn load_with(
        explicit: Option<&Path>,
        search: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Option<PathBuf>)> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => first_existing(search),
        };

        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok((config, source))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ComposerConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Environment values win over the file; blank values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = API_KEY_VARS.iter().find_map(|var| non_empty(*var)) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("LOOKBOOK_MODEL") {
            self.model = model;
        }
        if let Some(base) = non_empty("LOOKBOOK_API_BASE") {
            self.api_base = base;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::InvalidConfig("model must not be empty".into()));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig("request_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

/// `./.lookbook.json`, then `~/.lookbook.json`
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    paths
}

fn first_existing(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter().find(|path| path.exists()).cloned()
}

/// First config file present in the default search locations
pub fn find_config() -> Option<PathBuf> {
    first_existing(&search_paths())
}
