use tournoi_core::availability::{DEFAULT_ENTRY_HOLD_MINS, MAX_ENTRY_HOLD_MINS};
use tournoi_core::otp::DEFAULT_OTP_EXPIRY_MINS;

use crate::auth::jwt::JwtConfig;
use crate::notifications::email::EmailConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of a band hold in minutes (default: `10`, at most one day).
    pub entry_hold_mins: i64,
    /// Lifetime of a one-time login code in minutes (default: `10`).
    pub otp_expiry_mins: i64,
    /// Public URL of the front end, linked from outgoing emails.
    pub external_url: String,
    /// Base URL of the FFTT player registry, without trailing slash.
    pub registry_url: String,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// SMTP settings; `None` disables outgoing email.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ENTRY_HOLD_MINS`      | `10`                       |
    /// | `OTP_EXPIRY_MINS`      | `10`                       |
    /// | `EXTERNAL_URL`         | `http://localhost:5173`    |
    /// | `FFTT_API_URL`         | `https://fftt.dafunker.com/v1` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let entry_hold_mins = parse_entry_hold_mins(
            &std::env::var("ENTRY_HOLD_MINS").unwrap_or_else(|_| DEFAULT_ENTRY_HOLD_MINS.to_string()),
        )
        .unwrap_or_else(|msg| panic!("{msg}"));

        let otp_expiry_mins: i64 = std::env::var("OTP_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_OTP_EXPIRY_MINS.to_string())
            .parse()
            .expect("OTP_EXPIRY_MINS must be a valid i64");

        let external_url = std::env::var("EXTERNAL_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let registry_url = std::env::var("FFTT_API_URL")
            .unwrap_or_else(|_| "https://fftt.dafunker.com/v1".into())
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            entry_hold_mins,
            otp_expiry_mins,
            external_url,
            registry_url,
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }

    /// How long a freshly issued hold blocks capacity.
    pub fn entry_hold(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.entry_hold_mins)
    }

    /// How long a one-time login code stays redeemable.
    pub fn otp_expiry(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.otp_expiry_mins)
    }
}

/// Parse `ENTRY_HOLD_MINS`, which must lie in `1..=MAX_ENTRY_HOLD_MINS`.
fn parse_entry_hold_mins(raw: &str) -> Result<i64, String> {
    let mins: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("ENTRY_HOLD_MINS must be a valid i64, got '{raw}'"))?;
    if !(1..=MAX_ENTRY_HOLD_MINS).contains(&mins) {
        return Err(format!(
            "ENTRY_HOLD_MINS must be between 1 and {MAX_ENTRY_HOLD_MINS}, got {mins}"
        ));
    }
    Ok(mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_minutes_within_bounds_parse() {
        assert_eq!(parse_entry_hold_mins("10"), Ok(10));
        assert_eq!(parse_entry_hold_mins(" 1 "), Ok(1));
        assert_eq!(
            parse_entry_hold_mins(&MAX_ENTRY_HOLD_MINS.to_string()),
            Ok(MAX_ENTRY_HOLD_MINS)
        );
    }

    #[test]
    fn hold_minutes_out_of_range_are_rejected() {
        assert!(parse_entry_hold_mins("0").is_err());
        assert!(parse_entry_hold_mins("-5").is_err());
        assert!(parse_entry_hold_mins(&(MAX_ENTRY_HOLD_MINS + 1).to_string()).is_err());
        // Would overflow the timestamp arithmetic if accepted.
        assert!(parse_entry_hold_mins(&i64::MAX.to_string()).is_err());
    }

    #[test]
    fn hold_minutes_must_be_numeric() {
        let err = parse_entry_hold_mins("ten").unwrap_err();
        assert!(err.contains("ENTRY_HOLD_MINS"));
    }
}
