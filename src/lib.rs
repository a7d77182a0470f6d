//! Maps MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing Google Maps directions,
//! distance matrices, geocoding and place search as tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **maps**: Typed client for the Google Maps Web Services
//!   - **tools**: The six MCP tools and their routing
//!
//! # Example
//!
//! ```rust,no_run
//! use maps_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
