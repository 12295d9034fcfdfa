use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::navigator::scroll::MAX_SCROLL_DURATION_MS;
use crate::navigator::NavigatorConfig;

/// Longest idle time a session may be configured to survive: one week.
const MAX_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed or out-of-range values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Gap kept above a section heading after scroll-to-section.
    pub header_clearance_px: f64,
    pub scroll_duration_ms: u64,
    pub export_page_width_mm: f64,
    /// Sessions untouched for this long are dropped by the sweeper.
    pub session_ttl_secs: u64,
    pub session_sweep_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            header_clearance_px: parse_env("HEADER_CLEARANCE_PX", 80.0)?,
            scroll_duration_ms: parse_env("SCROLL_DURATION_MS", 450)?,
            export_page_width_mm: parse_env("EXPORT_PAGE_WIDTH_MM", 210.0)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 1800)?,
            session_sweep_secs: parse_env("SESSION_SWEEP_SECS", 60)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.header_clearance_px.is_finite() && self.header_clearance_px >= 0.0) {
            bail!(
                "HEADER_CLEARANCE_PX must be a non-negative number, got {}",
                self.header_clearance_px
            );
        }
        if self.scroll_duration_ms > MAX_SCROLL_DURATION_MS {
            bail!(
                "SCROLL_DURATION_MS must be at most {MAX_SCROLL_DURATION_MS}, got {}",
                self.scroll_duration_ms
            );
        }
        if !(self.export_page_width_mm.is_finite() && self.export_page_width_mm > 0.0) {
            bail!(
                "EXPORT_PAGE_WIDTH_MM must be a positive number, got {}",
                self.export_page_width_mm
            );
        }
        if !(1..=MAX_SESSION_TTL_SECS).contains(&self.session_ttl_secs) {
            bail!(
                "SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}, got {}",
                self.session_ttl_secs
            );
        }
        if self.session_sweep_secs == 0 {
            bail!("SESSION_SWEEP_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn navigator(&self) -> NavigatorConfig {
        NavigatorConfig {
            header_clearance: self.header_clearance_px,
            scroll_duration_ms: self.scroll_duration_ms,
            ..NavigatorConfig::default()
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            header_clearance_px: 80.0,
            scroll_duration_ms: 450,
            export_page_width_mm: 210.0,
            session_ttl_secs: 1800,
            session_sweep_secs: 60,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_config_carries_clearance() {
        let config = Config {
            header_clearance_px: 96.0,
            ..Config::default()
        };
        let nav = config.navigator();
        assert_eq!(nav.header_clearance, 96.0);
        assert_eq!(nav.observation.threshold, 0.5);
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let value: u16 = parse_env("RESUME_BUILDER_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_unusable_page_width_is_rejected() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = Config {
                export_page_width_mm: width,
                ..Config::default()
            };
            assert!(config.validate().is_err(), "accepted {width}");
        }
    }

    #[test]
    fn test_scroll_duration_is_bounded() {
        let config = Config {
            scroll_duration_ms: u64::MAX,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            scroll_duration_ms: MAX_SCROLL_DURATION_MS,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        let config = Config {
            session_ttl_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
