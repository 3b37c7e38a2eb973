//! chlens Query - Statement segmentation for SQL editor buffers
//!
//! This crate provides functionality for:
//! - Splitting a buffer into semicolon-terminated statements with source spans
//! - Resolving an editor cursor to the statement it belongs to

pub mod statements;

pub use statements::*;
