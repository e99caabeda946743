//! Process configuration, read once at startup and injected where needed
//! rather than consulted through module-level globals.

use std::env;

use thiserror::Error;

pub type EnvResult<T> = core::result::Result<T, EnvErr>;

#[derive(Debug, Error)]
pub enum EnvErr {
    #[error("missing required environment variable '{0}'")]
    Missing(&'static str),

    #[error("malformed value for '{0}': {1}")]
    Malformed(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub server_api_port: u16,
    pub cron_secret: String,
    pub cors_allow_origins: String,
    pub otel_exporter_endpoint: String,
    pub api_service_name: String,
    pub api_tracer_name: String,
}

impl ServerConfig {
    pub fn from_env() -> EnvResult<Self> {
        dotenvy::dotenv().ok();

        let server_api_port = optional("SERVER_API_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| EnvErr::Malformed("SERVER_API_PORT", e.to_string()))?;

        Ok(Self {
            database_url: optional("DATABASE_URL", "sqlite::memory:"),
            server_api_port,
            cron_secret: required("CRON_SECRET")?,
            cors_allow_origins: optional("CORS_ALLOW_ORIGINS", "*"),
            otel_exporter_endpoint: optional(
                "OTEL_EXPORTER_OTLP_ENDPOINT",
                "http://localhost:4317",
            ),
            api_service_name: optional("API_SERVICE_NAME", "labubu-fan-api"),
            api_tracer_name: optional("API_TRACER_NAME", "labubu-fan-tracer"),
        })
    }
}

fn required(name: &'static str) -> EnvResult<String> {
    env::var(name).map_err(|_| EnvErr::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_required_var() {
        let err = required("LABUBU_FAN_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, EnvErr::Missing(_)));
    }

    #[test]
    fn test_optional_falls_back() {
        assert_eq!(optional("LABUBU_FAN_DOES_NOT_EXIST", "3000"), "3000");
    }
}
