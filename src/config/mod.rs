use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Per external call, in seconds.
    pub timeout: u64,
    pub default_lang: String,
    pub allowed_domains: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 caption-resolver/{}",
                env!("CARGO_PKG_VERSION")
            ),
            timeout: 20,
            default_lang: "en".to_string(),
            allowed_domains: vec!["criticalrole.fandom.com".to_string()],
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if config.timeout == 0 {
            anyhow::bail!("timeout must be at least one second");
        }

        Ok(config)
    }
}
