use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MIN_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 100;

const MIN_AUTO_ADVANCE_MS: u64 = 200;
const MAX_AUTO_ADVANCE_MS: u64 = 10_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
    /// Question bank file. None means the bundled bank.
    #[serde(default)]
    pub bank_path: Option<String>,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_question_count() -> usize {
    10
}
fn default_auto_advance_ms() -> u64 {
    1200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            question_count: default_question_count(),
            auto_advance_ms: default_auto_advance_ms(),
            bank_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from stale or hand-edited config files.
    /// Call after deserialization and after CLI overrides.
    pub fn validate(&mut self) {
        self.question_count = self
            .question_count
            .clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
        self.auto_advance_ms = self
            .auto_advance_ms
            .clamp(MIN_AUTO_ADVANCE_MS, MAX_AUTO_ADVANCE_MS);
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}
