//! Command line interface.

pub mod args;
pub mod commands;
pub mod render;
