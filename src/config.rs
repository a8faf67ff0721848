use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

const HOST_VAR: &str = "CHART_ADVISOR_HOST";
const PORT_VAR: &str = "CHART_ADVISOR_PORT";
const MAX_ROWS_VAR: &str = "CHART_ADVISOR_MAX_ROWS";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Largest dataset accepted by the analysis endpoints.
    pub max_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            max_rows: 1_000_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Config::default();
        Ok(Config {
            host: env_or(HOST_VAR, defaults.host)?,
            port: env_or(PORT_VAR, defaults.port)?,
            max_rows: env_or(MAX_ROWS_VAR, defaults.max_rows)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}={}", name, raw)),
        Err(_) => Ok(default),
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::from_env()?;
    tracing::info!(
        "Loaded configuration: addr={}, max_rows={}",
        config.socket_addr(),
        config.max_rows
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_rows, 1_000_000);
    }

    #[test]
    fn unset_variable_falls_back() {
        let port: u16 = env_or("CHART_ADVISOR_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn malformed_variable_is_an_error() {
        std::env::set_var("CHART_ADVISOR_TEST_BAD_PORT", "not-a-port");
        let port: Result<u16> = env_or("CHART_ADVISOR_TEST_BAD_PORT", 8080);
        assert!(port.is_err());
    }
}
