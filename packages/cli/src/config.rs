use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub auth_secret_key: String,
    pub auth_audience: String,
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "5000".to_string());

        let port = port_str.parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let database_url = require_var("DATABASE_URL")?;
        let gemini_api_key = require_var("GEMINI_API_KEY")?;
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let auth_secret_key = require_var("AUTH_SECRET_KEY")?;
        let auth_audience =
            env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "https://api.taskgen.dev".to_string());

        Ok(Config {
            port,
            cors_origin,
            database_url,
            gemini_api_key,
            gemini_model,
            auth_secret_key,
            auth_audience,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_applies_defaults_and_requires_secrets() {
        // One test mutating the environment, run sequentially within it.
        env::remove_var("DATABASE_URL");
        env::set_var("GEMINI_API_KEY", "key");
        env::set_var("AUTH_SECRET_KEY", "secret");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar("DATABASE_URL"))
        ));

        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::remove_var("PORT");
        env::remove_var("GEMINI_MODEL");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.cors_origin, "http://localhost:3000");

        env::set_var("PORT", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::PortOutOfRange(0))
        ));
        env::remove_var("PORT");
    }
}
