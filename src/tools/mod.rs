//! JustHydrate Tools module
//!
//! MCP tool implementations.

pub mod drinks;
pub mod status;
