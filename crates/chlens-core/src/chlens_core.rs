//! chlens Core - Shared types for the SQL text-analysis engines
//!
//! This crate provides the pieces every other chlens crate depends on:
//!
//! - `Value`, `Row`, `ColumnMeta`, `QueryResult` - the shape of a query response
//! - `ChlensError` - error type for the I/O edges (configuration, input decoding)
//! - `ChlensConfig` - the TOML configuration file model

pub mod config;
mod error;
mod types;

pub use config::{ChlensConfig, ExplainSettings, LoggingSettings};
pub use error::*;
pub use types::*;
