//! CLI library components for the donor table tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
