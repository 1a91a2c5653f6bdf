//! Server configuration

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{BoardError, Result};

/// Default listening port
pub const DEFAULT_PORT: u16 = 3030;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(BoardError::Config(format!("unknown log format '{}'", other))),
        }
    }
}

/// Validated server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub addr: SocketAddr,
    /// Directory served at `/`
    pub static_root: PathBuf,
    /// Insert the demo message on startup
    pub seed: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Build a config from raw host, port and static root values.
    ///
    /// `~` in the static root is expanded.
    pub fn new(host: &str, port: u16, static_root: &str) -> Result<Self> {
        let ip: IpAddr = host
            .parse()
            .map_err(|e| BoardError::Config(format!("invalid host '{}': {}", host, e)))?;
        let static_root = PathBuf::from(shellexpand::tilde(static_root).as_ref());

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            static_root,
            seed: true,
            log_format: LogFormat::default(),
        })
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            static_root: PathBuf::from("."),
            seed: true,
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 3030);
        assert_eq!(config.static_root, PathBuf::from("."));
        assert!(config.seed);
    }

    #[test]
    fn test_new_validates_host() {
        let config = ServerConfig::new("127.0.0.1", 8080, "public").unwrap();
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 8080)));

        assert!(matches!(
            ServerConfig::new("not a host", 8080, "."),
            Err(BoardError::Config(_))
        ));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
