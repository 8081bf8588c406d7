//! CLI support for the `kb` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
