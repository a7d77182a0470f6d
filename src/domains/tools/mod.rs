//! Tools domain module.
//!
//! The six maps tools exposed to MCP clients. Each tool validates its
//! arguments, performs exactly one upstream call through [`MapsApi`] and
//! reduces the provider response to a compact record.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `MapsTool` trait every tool implements
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `MapsTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` using `with_route()`
//! 4. Register it in `registry.rs` for HTTP support
//!
//! [`MapsApi`]: crate::domains::maps::MapsApi

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
