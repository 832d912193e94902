//! MCP Protocol Implementation
//!
//! JSON-RPC 2.0 over stdio for the Model Context Protocol.

pub mod codec;
pub mod messages;
pub mod params;
pub mod stdio;
pub mod types;
