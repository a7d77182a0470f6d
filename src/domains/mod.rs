//! Domains module containing business logic organized by bounded contexts.
//!
//! - **maps**: the upstream mapping provider (client seam, payloads, errors)
//! - **tools**: the MCP tools built on top of it

pub mod maps;
pub mod tools;
