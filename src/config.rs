use std::{fs, path::{Path, PathBuf}};

use anyhow::{self, Context};
use serde::{Serialize, Deserialize};

use crate::backend::cookie::{SameSite, DEFAULT_MAX_COOKIE_SIZE};

pub const DEFAULT_COOKIE_NAME: &str = "transactions";
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;
/// Browsers clamp cookie lifetimes to about this many days.
pub const MAX_EXPIRY_DAYS: i64 = 400;
pub const DEFAULT_JAR: &str = "tally-cookies.json";

/// Where and how the ledger cookie is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    /// Lifetime granted on every write
    pub expiry_days: i64,
    /// Largest accepted name + value length, in bytes
    pub max_size: usize,
    pub same_site: SameSite
}

impl Default for CookieConfig {
    fn default() -> Self {
        CookieConfig {
            name: DEFAULT_COOKIE_NAME.to_owned(),
            path: "/".to_owned(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            max_size: DEFAULT_MAX_COOKIE_SIZE,
            same_site: SameSite::Lax
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    pub cookie: CookieConfig,
    /// File holding the cookie jar
    pub jar: PathBuf
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig { cookie: CookieConfig::default(), jar: PathBuf::from(DEFAULT_JAR) }
    }
}

impl TrackerConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config: TrackerConfig = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        config.check()?;
        return Ok(config);
    }

    fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.cookie.name.trim().is_empty(), "cookie name must not be empty");
        anyhow::ensure!((1..=MAX_EXPIRY_DAYS).contains(&self.cookie.expiry_days),
            "cookie expiry_days must be between 1 and {}, got {}", MAX_EXPIRY_DAYS, self.cookie.expiry_days);
        anyhow::ensure!(self.cookie.max_size > 0, "cookie max_size must be positive");
        Ok(())
    }
}
