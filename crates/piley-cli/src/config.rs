use serde::Deserialize;
use figment::{Figment, providers::{Format, Toml, Env}};
use piley_core::timezone::validate_timezone;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// User's timezone (IANA format); days in statistics and reminder
    /// parsing follow it
    #[serde(default = "detect_system_timezone")]
    pub timezone: String,
    /// Default tracing filter, overridden by `PILEY_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            timezone: detect_system_timezone(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("piley.toml"))
            .merge(Env::prefixed("PILEY_"))
    }
}

fn default_database_path() -> String {
    "piley.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    // Method 1: Check TZ environment variable
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && validate_timezone(&tz).is_ok() {
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

    // Method 3: Ask the platform
    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    // Fallback to UTC
    "UTC".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, "piley.db");
        assert_eq!(config.log_level, "warn");
        assert!(validate_timezone(&config.timezone).is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = Figment::new()
            .merge(Toml::string("database_path = \"/tmp/other.db\"\ntimezone = \"Europe/Paris\""))
            .extract()
            .unwrap();
        assert_eq!(config.database_path, "/tmp/other.db");
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(config.log_level, "warn");
    }
}
