//! Prelude module for common re-exports.
//!
//! ```rust
//! use ward::prelude::*;
//! ```

// ─── Tree & host ────────────────────────────────────────────────────
pub use crate::host::{HostError, Renderer};
pub use crate::tree::{Component, ErrorBoundary, FnComponent, HostNode, Node, RenderResult};

// ─── Guard ──────────────────────────────────────────────────────────
pub use crate::guard::{GuardOptions, GuardState, RenderGuard};
pub use crate::view::{DiagnosticView, FallbackProps, FallbackView, fallback_fn};

// ─── Global channel ─────────────────────────────────────────────────
pub use crate::global::{GlobalHandler, report_global_error};

// ─── Shared types ───────────────────────────────────────────────────
pub use ward_common::prelude::*;
