use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use tally_core::scoring::ScoringPolicy;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Which profile to act as; optional when only one profile exists
    #[serde(default)]
    pub username: Option<String>,
    /// Timezone used for new profiles
    #[serde(default = "detect_system_timezone")]
    pub default_timezone: String,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Scoring behavior configuration
#[derive(Deserialize, Debug, Default)]
pub struct ScoringConfig {
    /// "reputation" (bounded score with tiers) or "xp" (levels)
    #[serde(default)]
    pub policy: ScoringPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            username: None,
            default_timezone: detect_system_timezone(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("tally.toml"))
            .merge(Env::prefixed("TALLY_"))
            .extract()
    }
}

fn default_database_path() -> String {
    "tally.db".to_string()
}

/// Validates that a timezone string is a valid IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<chrono_tz::Tz, String> {
    timezone.parse().map_err(|_| {
        format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        )
    })
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    // Method 1: Check TZ environment variable
    if let Ok(tz) = std::env::var("TZ") {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    // Method 2: Try to read from /etc/timezone (Linux)
    #[cfg(target_os = "linux")]
    {
        if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
            let tz = tz.trim();
            if validate_timezone(tz).is_ok() {
                return tz.to_string();
            }
        }
    }

    // Method 3: Platform-neutral detection
    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    // Fallback to UTC
    "UTC".to_string()
}
