//! # WARD Render Guard
//!
//! Keeps a failing subtree of a component tree from taking the whole tree
//! down. Two failure channels are handled:
//!
//! - **render path**: a descendant's `render` returns `Err` or panics. The
//!   host delivers the failure to the nearest [`RenderGuard`], which records
//!   it, logs it with context `componentDidCatch`, and renders a fallback
//!   from then on.
//! - **ambient**: panics outside any render pass (other threads, timers)
//!   and failures reported by the host environment. They reach the
//!   process-wide [`GlobalHandler`], are logged with context
//!   `window.onerror`, and never change any guard's state.
//!
//! # Module Structure
//!
//! - [`tree`] - Node model and the host contract traits
//! - [`host`] - Renderer that resolves trees and routes failures
//! - [`guard`] - `RenderGuard`: state store, interceptor, render selector
//! - [`view`] - Fallback view trait and the built-in diagnostic view
//! - [`global`] - Handler slot and panic bridge
//! - [`scope`] - Thread-local render scope bookkeeping
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  render()   ┌──────────────────────────────────────┐
//! │   Renderer   │────────────►│ RenderGuard                          │
//! │   (host)     │             │  ┌────────────┐    ┌──────────────┐  │
//! │              │  did_catch  │  │ Interceptor│───►│  GuardState  │  │
//! │              │────────────►│  └─────┬──────┘    └──────┬───────┘  │
//! └──────────────┘             │        │ log              │ read     │
//!                              │        ▼                  ▼          │
//! panic / host report          │   ┌─────────┐      ┌──────────────┐  │
//!        │                     │   │ LogSink │◄──┐  │   Selector   │  │
//!        ▼                     │   └─────────┘   │  └──────────────┘  │
//! ┌──────────────┐   handle()  │                 │                    │
//! │ Handler slot │─────────────┼──► GlobalHandler┘                    │
//! └──────────────┘             └──────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ward::prelude::*;
//!
//! let sink = Arc::new(MemorySink::new());
//! let child = Node::component(FnComponent::new("Child", || {
//!     Err(ErrorObject::new("Error", "x"))
//! }));
//! let guard = RenderGuard::new(child, GuardOptions::new().sink(sink.clone()));
//!
//! let output = Renderer::new().mount(&Node::component(guard)).unwrap();
//! assert!(output.contains_text("Error-x-"));
//! assert_eq!(sink.with_context(CONTEXT_COMPONENT_DID_CATCH).len(), 1);
//! ```

#![warn(missing_docs)]

pub mod global;
pub mod guard;
pub mod host;
pub mod prelude;
pub mod scope;
pub mod tree;
pub mod view;

pub use crate::global::{GlobalHandler, report_global_error};
pub use crate::guard::{GuardOptions, GuardState, RenderGuard};
pub use crate::host::{HostError, Renderer};
pub use crate::tree::{Component, ErrorBoundary, FnComponent, HostNode, Node, RenderResult};
pub use crate::view::{DiagnosticView, FallbackProps, FallbackView, fallback_fn};
