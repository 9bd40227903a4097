//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5001`).
    pub listen_addr: SocketAddr,

    /// Base URL of the owner-side service that serves approved applications
    /// and per-theater events. `None` makes theater aggregation read this
    /// process's own application and event stores.
    pub owner_service_url: Option<String>,

    /// Per-call timeout for owner-service requests, in seconds.
    pub owner_service_timeout_secs: u64,

    /// Whole-request timeout applied by the HTTP layer, in seconds.
    pub request_timeout_secs: u64,

    /// Enrich aggregated theaters with fields extracted from their
    /// registration documents.
    pub document_extraction_enabled: bool,

    /// Subject returned by the development token verifier.
    pub mock_auth_subject: String,

    /// Email returned by the development token verifier.
    pub mock_auth_email: Option<String>,

    /// Offset from UTC, in minutes, of the calendar used for "today" when
    /// validating event dates. Defaults to India Standard Time (+330).
    pub utc_offset_minutes: i32,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            owner_service_url: None,
            owner_service_timeout_secs: 10,
            request_timeout_secs: 30,
            document_extraction_enabled: false,
            mock_auth_subject: "did:mock:dev".to_string(),
            mock_auth_email: None,
            utc_offset_minutes: 330,
            log_format: LogFormat::Pretty,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let owner_service_url = parse_env_string("OWNER_SERVICE_URL")
            .map(|url| url.trim_end_matches('/').to_string());
        let owner_service_timeout_secs =
            parse_env("OWNER_SERVICE_TIMEOUT_SECS", defaults.owner_service_timeout_secs);
        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs);
        let document_extraction_enabled = parse_env_bool(
            "DOCUMENT_EXTRACTION_ENABLED",
            defaults.document_extraction_enabled,
        );
        let mock_auth_subject =
            parse_env_string("MOCK_AUTH_SUBJECT").unwrap_or(defaults.mock_auth_subject);
        let mock_auth_email = parse_env_string("MOCK_AUTH_EMAIL");
        let utc_offset_minutes = parse_env("UTC_OFFSET_MINUTES", defaults.utc_offset_minutes);
        let log_format = match parse_env_string("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            owner_service_url,
            owner_service_timeout_secs,
            request_timeout_secs,
            document_extraction_enabled,
            mock_auth_subject,
            mock_auth_email,
            utc_offset_minutes,
            log_format,
        })
    }

    /// Owner-service timeout as a [`Duration`].
    #[must_use]
    pub fn owner_service_timeout(&self) -> Duration {
        Duration::from_secs(self.owner_service_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Calendar offset for event dates. Out-of-range values fall back to UTC.
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or(Utc.fix())
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    parse_bool(std::env::var(key).ok().as_deref(), default)
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

/// Non-empty string variable.
fn parse_env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_is_case_insensitive() {
        assert!(parse_bool(Some("TRUE"), false));
        assert!(parse_bool(Some("True"), false));
        assert!(parse_bool(Some("1"), false));
        assert!(!parse_bool(Some("False"), true));
        assert!(!parse_bool(Some("0"), true));
        assert!(parse_bool(Some("maybe"), true));
        assert!(!parse_bool(None, false));
    }

    #[test]
    fn defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr.port(), 5001);
        assert_eq!(config.owner_service_timeout(), Duration::from_secs(10));
        assert!(config.owner_service_url.is_none());
        assert!(!config.document_extraction_enabled);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.utc_offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let config = GatewayConfig {
            utc_offset_minutes: 24 * 60,
            ..GatewayConfig::default()
        };
        assert_eq!(config.utc_offset().local_minus_utc(), 0);
    }
}
