//! Command-line interface components
//!
//! This module contains CLI-specific code for the manifest tool: argument
//! parsing and the command handler that ties flags and configuration to the
//! manifest pipeline.

pub mod args;
pub mod commands;

pub use args::{Cli, GlobalArgs, ManifestArgs};
pub use commands::{handle_generate, resolve_build_config};
