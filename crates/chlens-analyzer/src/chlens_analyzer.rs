//! chlens Analyzer - EXPLAIN output normalization
//!
//! This crate provides functionality for:
//! - Classifying the result of an EXPLAIN query as JSON or text
//! - Building one navigable plan tree from either shape
//! - Detecting the requested plan kind from the query text

pub mod explain;

pub use explain::*;
