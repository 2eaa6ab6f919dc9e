//! CLI library components for the `icsr` tool.

pub mod commands;
pub mod logging;
pub mod summary;
