use crate::Result;
use crate::crawl::{CrawlOptions, ExhaustionPolicy};
use crate::search::SearchQuery;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeDelta, Utc};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "corpus.toml";

/// Longest push window accepted, roughly a century
pub const MAX_RECENCY_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of modules to collect
    #[serde(default = "default_target_count")]
    pub target_count: usize,

    /// Search language qualifier
    #[serde(default = "default_language")]
    pub language: String,

    /// Push window, in days, for both the search qualifier and the local eligibility check
    #[serde(default = "default_recency_days")]
    pub recency_days: u32,

    /// Optional popularity floor carried by every query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stars: Option<u64>,

    #[serde(default)]
    pub exhaustion_policy: ExhaustionPolicy,

    /// Delay before each query after the first
    #[serde(default = "default_page_delay", with = "humantime_serde")]
    pub page_delay: Duration,

    /// Bound on each individual query
    #[serde(default = "default_page_timeout", with = "humantime_serde")]
    pub page_timeout: Duration,

    #[serde(default = "default_max_restarts")]
    pub max_restarts: u32,
}

const fn default_target_count() -> usize {
    100
}

fn default_language() -> String {
    "go".to_string()
}

const fn default_recency_days() -> u32 {
    364
}

const fn default_page_delay() -> Duration {
    Duration::from_secs(1)
}

const fn default_page_timeout() -> Duration {
    Duration::from_secs(20)
}

const fn default_max_restarts() -> u32 {
    1000
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `corpus.toml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            bail!("target_count must be greater than zero");
        }

        if self.language.is_empty() || self.language.contains(char::is_whitespace) {
            bail!("language must be a single non-empty word, got '{}'", self.language);
        }

        if self.recency_days == 0 {
            bail!("recency_days must be greater than zero");
        }

        if self.recency_days > MAX_RECENCY_DAYS {
            bail!("recency_days must be at most {MAX_RECENCY_DAYS}, got {}", self.recency_days);
        }

        if self.page_timeout.is_zero() {
            bail!("page_timeout must be greater than zero");
        }

        Ok(())
    }

    /// Oldest default branch push that still counts as recent
    ///
    /// # Errors
    ///
    /// Returns an error if the push window reaches past the representable date range
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        TimeDelta::try_days(i64::from(self.recency_days))
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| app_err!("recency_days {} reaches past the earliest supported date", self.recency_days))
    }

    /// # Errors
    ///
    /// Returns an error if the cutoff cannot be computed
    pub fn search_query(&self, now: DateTime<Utc>) -> Result<SearchQuery> {
        Ok(SearchQuery::new(self.language.clone(), self.cutoff(now)?.date_naive(), self.min_stars))
    }

    /// # Errors
    ///
    /// Returns an error if the cutoff cannot be computed
    pub fn crawl_options(&self, now: DateTime<Utc>) -> Result<CrawlOptions> {
        Ok(CrawlOptions {
            target_count: self.target_count,
            cutoff: self.cutoff(now)?,
            exhaustion_policy: self.exhaustion_policy,
            page_delay: self.page_delay,
            page_timeout: self.page_timeout,
            max_restarts: self.max_restarts,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
