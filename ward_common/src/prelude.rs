//! Prelude module for common re-exports.
//!
//! ```rust
//! use ward_common::prelude::*;
//! ```

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{AmbientEvent, ErrorDetail, ErrorInfo, ErrorObject, SourceLocation};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, GuardConfig, LogLevel, SharedConfig, WardConfig,
};

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::log::{LogRecord, LogSink, MemorySink, TracingSink};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{CONTEXT_COMPONENT_DID_CATCH, CONTEXT_GLOBAL_HANDLER};
