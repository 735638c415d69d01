use std::env;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub max_upload_bytes: usize,
    pub log_requests: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            environment: "development".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_requests: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = match env::var("SERVER_PORT") {
            Ok(port) => port.parse().map_err(|_| "Invalid SERVER_PORT")?,
            Err(_) => defaults.server_port,
        };

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => parse_origins(&origins),
            Err(_) => defaults.allowed_origins,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(bytes) => bytes.parse().map_err(|_| "Invalid MAX_UPLOAD_BYTES")?,
            Err(_) => defaults.max_upload_bytes,
        };

        let log_requests = match env::var("LOG_REQUESTS") {
            Ok(flag) => parse_flag(&flag).ok_or("Invalid LOG_REQUESTS")?,
            Err(_) => defaults.log_requests,
        };

        Ok(Config {
            server_host,
            server_port,
            allowed_origins,
            environment,
            max_upload_bytes,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            ..Config::default()
        };
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://a.test, http://b.test,,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
