use crate::notification::MailRouting;
use crate::notification::resend::DEFAULT_BASE_URL;
use actix_web::http::Uri;
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SENDER: &str = "onboarding@resend.dev";
const DEFAULT_RECIPIENT: &str = "informatics@aretion.co.uk";
const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required but not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parses a comma-separated origin list; `*` anywhere in it allows every origin.
    ///
    /// Every other entry must be a `scheme://host[:port]` origin.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            return Ok(CorsOrigins::Any);
        }

        if let Some(bad) = origins.iter().find(|origin| !is_origin(origin)) {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }
        Ok(CorsOrigins::List(origins))
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub sender: String,
    pub recipient: String,
    pub timeout: Duration,
}

impl EmailConfig {
    pub fn routing(&self) -> MailRouting {
        MailRouting {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
        }
    }
}

/// Service settings read from the environment.
///
/// ## Variables
/// - `MONGO_URL`, `DB_NAME`: required
/// - `CORS_ORIGINS`: comma-separated, default `*`
/// - `RESEND_API_KEY`: notifications are skipped when unset
/// - `RESEND_API_URL`, `SENDER_EMAIL`, `RECIPIENT_EMAIL`, `EMAIL_TIMEOUT_SECS`
/// - `HOST`, `PORT`: bind address, default `0.0.0.0:8001`
/// - `LOG_LEVEL`: fallback log filter when `RUST_LOG` is unset, default `info`
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_url: String,
    pub db_name: String,
    pub cors_origins: CorsOrigins,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub email: EmailConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = parse_number("PORT", lookup("PORT"), 8001u16)?;
        let timeout_secs = parse_number(
            "EMAIL_TIMEOUT_SECS",
            lookup("EMAIL_TIMEOUT_SECS"),
            DEFAULT_EMAIL_TIMEOUT_SECS,
        )?;

        Ok(Self {
            mongo_url: required("MONGO_URL")?,
            db_name: required("DB_NAME")?,
            cors_origins: CorsOrigins::parse(&or_default("CORS_ORIGINS", "*"))?,
            host: or_default("HOST", "0.0.0.0"),
            port,
            log_level: or_default("LOG_LEVEL", "info"),
            email: EmailConfig {
                api_key: lookup("RESEND_API_KEY").filter(|key| !key.is_empty()),
                api_url: or_default("RESEND_API_URL", DEFAULT_BASE_URL),
                sender: or_default("SENDER_EMAIL", DEFAULT_SENDER),
                recipient: or_default("RECIPIENT_EMAIL", DEFAULT_RECIPIENT),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn is_origin(origin: &str) -> bool {
    origin
        .parse::<Uri>()
        .is_ok_and(|uri| uri.scheme().is_some() && uri.authority().is_some())
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
