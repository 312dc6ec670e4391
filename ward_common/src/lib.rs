//! WARD Common Library
//!
//! Shared types for the WARD render guard: error values, configuration
//! loading and logging sinks.
//!
//! # Module Structure
//!
//! - [`error`] - Error objects, component traces, ambient event inputs
//! - [`config`] - Configuration loading traits and types
//! - [`log`] - The `LogSink` seam and stock sinks
//! - [`consts`] - Log contexts, placeholders, default paths
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use ward_common::prelude::*;
//!
//! let sink = MemorySink::new();
//! sink.error("Error: boom", CONTEXT_COMPONENT_DID_CATCH);
//! assert_eq!(sink.len(), 1);
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod log;
pub mod prelude;
