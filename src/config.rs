use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_DATA_DIR: &str = "center_directory_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: String, // sled directory
    /// Regenerate display numbers as 01..N whenever the list changes.
    pub renumber: bool,
    pub maps_api_key: Option<String>, // Only used for map embed URLs
    pub log_format: LogFormat,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            renumber: true,
            maps_api_key: None,
            log_format: LogFormat::Text,
            log_dir: None,
        }
    }
}

impl Config {
    /// Reads `.env` (if present) and the environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            data_dir: try_load("CENTER_DIRECTORY_DATA", DEFAULT_DATA_DIR),
            renumber: try_load("CENTER_DIRECTORY_RENUMBER", "true"),
            maps_api_key: optional("MAPS_API_KEY"),
            log_format: try_load("LOG_FORMAT", "text"),
            log_dir: optional("LOG_DIR"),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Falls back to `default` when the variable is missing or does not parse.
fn try_load<T: FromStr + Default>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default.parse().unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_try_load_falls_back_on_bad_values() {
        env::set_var("CENTER_DIRECTORY_TEST_RENUMBER", "maybe");
        let renumber: bool = try_load("CENTER_DIRECTORY_TEST_RENUMBER", "true");
        assert!(renumber);

        env::set_var("CENTER_DIRECTORY_TEST_RENUMBER", "false");
        let renumber: bool = try_load("CENTER_DIRECTORY_TEST_RENUMBER", "true");
        assert!(!renumber);

        let missing: String = try_load("CENTER_DIRECTORY_TEST_MISSING", "fallback");
        assert_eq!(missing, "fallback");

        // An unparsable default degrades to the type's default instead of panicking.
        env::set_var("CENTER_DIRECTORY_TEST_FORMAT", "yaml");
        let format: LogFormat = try_load("CENTER_DIRECTORY_TEST_FORMAT", "also-bad");
        assert_eq!(format, LogFormat::Text);
    }

    #[test]
    fn test_defaults_enable_renumbering() {
        let config = Config::default();
        assert!(config.renumber);
        assert_eq!(config.data_dir, DEFAULT_DATA_DIR);
        assert!(config.maps_api_key.is_none());
    }
}
