//! Workspace-wide constants.
//!
//! Single source of truth for log contexts, placeholders and default paths.

/// Log context for failures captured by a guard's lifecycle interceptor.
pub const CONTEXT_COMPONENT_DID_CATCH: &str = "componentDidCatch";

/// Log context for failures delivered through the global handler.
pub const CONTEXT_GLOBAL_HANDLER: &str = "window.onerror";

/// Prefix of one frame in a flattened component stack.
pub const COMPONENT_FRAME_PREFIX: &str = "\n    in ";

/// Error name given to panics.
pub const PANIC_ERROR_NAME: &str = "panic";

/// Message used when a panic payload is neither `&str` nor `String`.
pub const UNKNOWN_PANIC_MESSAGE: &str = "unknown panic";

/// Placeholder for a missing source location field.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Placeholder for a missing error name in global handler messages.
pub const MISSING_ERROR_NAME: &str = "<none>";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ward/ward.toml";
