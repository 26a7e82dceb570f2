use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::generation::SamplingPolicy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; CLI flags override these per run.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub output_dir: PathBuf,
    pub output_base_name: String,
    pub output_suffix: String,
    /// Enables bounded rejection sampling when set.
    pub sampling_max_attempts: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            output_dir: PathBuf::from("."),
            output_base_name: "MathExercises".to_string(),
            output_suffix: String::new(),
            sampling_max_attempts: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: parse_optional(&lookup, "PORT")?.unwrap_or(defaults.port),
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            output_base_name: lookup("OUTPUT_BASE_NAME").unwrap_or(defaults.output_base_name),
            output_suffix: lookup("OUTPUT_SUFFIX").unwrap_or(defaults.output_suffix),
            sampling_max_attempts: parse_optional(&lookup, "SAMPLING_MAX_ATTEMPTS")?,
        })
    }

    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy::from_max_attempts(self.sampling_max_attempts)
    }
}

fn parse_optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}"))
        })
        .transpose()
}
