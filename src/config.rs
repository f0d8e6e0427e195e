use crate::error::Result;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_SESSION_FILE: &str = ".hr_partner_session.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: get_env_or("API_BASE_URL", DEFAULT_API_BASE_URL),
            session_file: PathBuf::from(get_env_or("SESSION_FILE", DEFAULT_SESSION_FILE)),
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 60)?,
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e| {
            crate::error::Error::Config(format!("Invalid value for {}: {}", name, e))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_absent() {
        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("HTTP_TIMEOUT_SECS");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout_secs, 60);
    }
}
