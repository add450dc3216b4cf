//! Provider adapters and tool invocation for language-model pipelines.
//!
//! - [`providers`]: the [`Provider`](providers::base::Provider) trait and the OpenAI
//!   adapter that maps a [`Transcript`](models::Transcript) onto the backend's wire format.
//! - [`tools`]: the schema-first [`Tool`](tools::Tool) calling convention and the shell tool.
//! - [`loader`]: turns files into plain-text [`Document`](models::Document)s.
pub mod errors;
pub mod loader;
pub mod models;
pub mod providers;
pub mod tools;

pub use errors::{BackendError, Error, Result};

/// Version of the parley library, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
