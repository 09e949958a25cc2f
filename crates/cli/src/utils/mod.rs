//! Shared helpers for CLI commands

pub mod config;
pub mod files;
