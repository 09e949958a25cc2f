//! CLI commands

pub mod completion;
pub mod export;
pub mod import;
pub mod new;
pub mod validate;
