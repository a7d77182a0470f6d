//! Transports that carry MCP traffic to the maps server.
//!
//! - `stdio` (default): one client on stdin/stdout.
//! - `tcp`: line-delimited JSON-RPC, one rmcp session per connection.
//! - `http`: stateless JSON-RPC over POST plus `/health` and `/` info routes.
//!
//! Every transport serves the same `McpServer`, so all clients share one
//! upstream maps client. Which one runs is chosen by `MCP_TRANSPORT` among
//! those compiled in.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::{ListenAddr, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
