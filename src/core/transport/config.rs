//! Transport selection and listener settings.
//!
//! `MCP_TRANSPORT` picks `stdio`, `tcp` or `http`. The network transports
//! listen on `MCP_TCP_HOST`/`MCP_TCP_PORT` or `MCP_HTTP_HOST`/`MCP_HTTP_PORT`;
//! HTTP also reads `MCP_HTTP_PATH` and `MCP_HTTP_CORS`.

use std::fmt;
use tracing::warn;

use super::{TransportError, TransportResult};

/// Interface network transports bind to unless told otherwise.
pub const DEFAULT_HOST: &str = "127.0.0.1";

#[cfg(feature = "tcp")]
pub const DEFAULT_TCP_PORT: u16 = 3000;

#[cfg(feature = "http")]
pub const DEFAULT_HTTP_PORT: u16 = 8080;

#[cfg(feature = "http")]
pub const DEFAULT_RPC_PATH: &str = "/mcp";

/// Routes the HTTP transport serves besides the JSON-RPC endpoint.
#[cfg(feature = "http")]
const RESERVED_PATHS: [&str; 2] = ["/", "/health"];

/// Which transport serves the maps tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    /// Protocol on stdin/stdout, one client per process.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC over TCP, one rmcp session per connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");

/// Host and port a network transport binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddr {
    pub host: String,
    pub port: u16,
}

impl ListenAddr {
    /// Read `<prefix>_HOST` and `<prefix>_PORT`, keeping defaults for
    /// missing or unparseable values.
    #[cfg(any(feature = "tcp", feature = "http"))]
    fn from_lookup<F>(lookup: &F, prefix: &str, default_port: u16) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(&format!("{prefix}_HOST"))
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(&format!("{prefix}_PORT")) {
            None => default_port,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid {}_PORT '{}', using {}",
                    prefix, raw, default_port
                );
                default_port
            }),
        };

        Self { host, port }
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// TCP transport settings.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    pub listen: ListenAddr,
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            listen: ListenAddr {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_TCP_PORT,
            },
        }
    }
}

/// HTTP transport settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub listen: ListenAddr,

    /// Route of the JSON-RPC endpoint, always with a leading slash.
    pub rpc_path: String,

    /// Allow any origin, for browser-based clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: ListenAddr {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_HTTP_PORT,
            },
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            enable_cors: true,
        }
    }
}

/// `mcp`, `/mcp/` and ` /mcp ` all mount at `/mcp`.
#[cfg(feature = "http")]
fn normalize_rpc_path(raw: &str) -> String {
    format!("/{}", raw.trim().trim_matches('/'))
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            Self::Tcp(TcpConfig::default())
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }
    }
}

impl TransportConfig {
    /// Load transport settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load transport settings through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// An unknown transport name, or one whose feature is not compiled in,
    /// falls back to the default transport with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let requested = lookup("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match requested.as_str() {
            "" => Self::default(),
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig {
                listen: ListenAddr::from_lookup(&lookup, "MCP_TCP", DEFAULT_TCP_PORT),
            }),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig {
                listen: ListenAddr::from_lookup(&lookup, "MCP_HTTP", DEFAULT_HTTP_PORT),
                rpc_path: lookup("MCP_HTTP_PATH")
                    .map(|p| normalize_rpc_path(&p))
                    .unwrap_or_else(|| DEFAULT_RPC_PATH.to_string()),
                enable_cors: lookup("MCP_HTTP_CORS")
                    .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                    .unwrap_or(true),
            }),
            other => {
                let fallback = Self::default();
                warn!(
                    "Transport '{}' is unknown or not compiled in, using {}",
                    other,
                    fallback.description()
                );
                fallback
            }
        }
    }

    /// Reject settings the transport cannot start with.
    pub fn validate(&self) -> TransportResult<()> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(cfg) => {
                if !cfg.rpc_path.starts_with('/') {
                    return Err(TransportError::config(format!(
                        "RPC path must start with '/', got '{}'",
                        cfg.rpc_path
                    )));
                }
                if RESERVED_PATHS.contains(&cfg.rpc_path.as_str()) {
                    return Err(TransportError::config(format!(
                        "RPC path '{}' collides with a built-in route",
                        cfg.rpc_path
                    )));
                }
                Ok(())
            }
            #[allow(unreachable_patterns)]
            _ => Ok(()),
        }
    }

    /// Human-readable transport summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}", cfg.listen),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}{}", cfg.listen, cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_unset_or_unknown_is_stdio() {
        assert_eq!(TransportConfig::from_lookup(lookup_from(&[])), TransportConfig::Stdio);
        let config = TransportConfig::from_lookup(lookup_from(&[("MCP_TRANSPORT", "carrier-pigeon")]));
        assert_eq!(config, TransportConfig::Stdio);
        assert_eq!(config.description(), "STDIO (standard MCP mode)");
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_bad_port_keeps_default() {
        let config = TransportConfig::from_lookup(lookup_from(&[
            ("MCP_TRANSPORT", " TCP "),
            ("MCP_TCP_HOST", "0.0.0.0"),
            ("MCP_TCP_PORT", "not-a-port"),
        ]));
        assert_eq!(config.description(), "TCP on 0.0.0.0:3000");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_settings() {
        let config = TransportConfig::from_lookup(lookup_from(&[
            ("MCP_TRANSPORT", "http"),
            ("MCP_HTTP_PORT", "9090"),
            ("MCP_HTTP_PATH", "maps/rpc/"),
            ("MCP_HTTP_CORS", "false"),
        ]));
        let TransportConfig::Http(http) = &config else {
            panic!("expected HTTP transport, got {config:?}");
        };
        assert_eq!(http.rpc_path, "/maps/rpc");
        assert!(!http.enable_cors);
        assert_eq!(config.description(), "HTTP on 127.0.0.1:9090/maps/rpc");
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_rpc_path_cannot_shadow_health() {
        let config = TransportConfig::from_lookup(lookup_from(&[
            ("MCP_TRANSPORT", "http"),
            ("MCP_HTTP_PATH", "/health"),
        ]));
        assert!(matches!(config.validate(), Err(TransportError::ConfigError(_))));

        let config = TransportConfig::Http(HttpConfig {
            rpc_path: "/".to_string(),
            ..HttpConfig::default()
        });
        assert!(config.validate().is_err());
    }
}
