use axum::http::HeaderValue;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::calendar::filter::CalendarFilterKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub calendar_filter: CalendarFilterKind,
    /// Allowed CORS origin; any origin is allowed when unset.
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let calendar_filter = match std::env::var("CALENDAR_FILTER") {
            Ok(value) => value
                .parse::<CalendarFilterKind>()
                .map_err(|value| ConfigError::InvalidValue {
                    name: "CALENDAR_FILTER".to_string(),
                    value,
                })?,
            Err(_) => CalendarFilterKind::default(),
        };

        let cors_allowed_origin = match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(origin) => Some(HeaderValue::from_str(&origin).map_err(|_| {
                ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGIN".to_string(),
                    value: origin.clone(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            calendar_filter,
            cors_allowed_origin,
        })
    }
}
