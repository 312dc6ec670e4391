//! Render guard.
//!
//! A [`RenderGuard`] wraps a subtree. While its state is clear it renders
//! the subtree unchanged. When the host delivers a descendant failure to
//! [`ErrorBoundary::component_did_catch`], the guard
//!
//! 1. notifies the `on_error` observer, discarding anything it raises,
//! 2. moves its state to `Captured`,
//! 3. logs the failure with context `componentDidCatch`,
//!
//! and from then on renders a fallback instead of the subtree.
//!
//! Construction also installs the guard's [`GlobalHandler`] in the
//! process-wide slot (see [`crate::global`]).

pub mod options;
pub mod select;
pub mod state;

use std::cell::{Ref, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use ward_common::consts::CONTEXT_COMPONENT_DID_CATCH;
use ward_common::error::{AmbientEvent, ErrorDetail, ErrorInfo, ErrorObject, SourceLocation};

use crate::global::{self, GlobalHandler};
use crate::scope;
use crate::tree::{Component, ErrorBoundary, Node, RenderResult};

pub use options::{ErrorObserver, GuardOptions};
pub use select::select_render;
pub use state::GuardState;

/// Component name of every guard in component stacks.
pub const GUARD_COMPONENT_NAME: &str = "RenderGuard";

static NEXT_GUARD_ID: AtomicU64 = AtomicU64::new(1);

/// Guard around a subtree of the component tree.
pub struct RenderGuard {
    id: u64,
    children: Node,
    options: GuardOptions,
    state: RefCell<GuardState>,
    global_handler: Arc<GlobalHandler>,
}

impl RenderGuard {
    /// Wrap `children` and install this guard's global handler.
    pub fn new(children: Node, options: GuardOptions) -> Self {
        let id = NEXT_GUARD_ID.fetch_add(1, Ordering::Relaxed);
        let global_handler = Arc::new(GlobalHandler::new(
            id,
            Arc::clone(&options.sink),
            options.suppress_default_presentation,
        ));
        global::install(Arc::clone(&global_handler));
        global::ensure_panic_bridge();
        debug!(
            guard = id,
            development_mode = options.development_mode,
            "render guard constructed"
        );

        Self {
            id,
            children,
            options,
            state: RefCell::new(GuardState::Clear),
            global_handler,
        }
    }

    /// Process-unique id of this guard.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> Ref<'_, GuardState> {
        self.state.borrow()
    }

    /// True once a failure has been captured.
    pub fn has_error(&self) -> bool {
        self.state.borrow().has_error()
    }

    /// The wrapped subtree.
    pub fn children(&self) -> &Node {
        &self.children
    }

    /// Options the guard was built with.
    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// The handler this guard installed. It may since have been replaced in
    /// the global slot by a newer guard.
    pub fn global_handler(&self) -> &Arc<GlobalHandler> {
        &self.global_handler
    }

    /// Call this guard's global handler directly.
    pub fn handle_global_error(
        &self,
        event: &AmbientEvent,
        source: Option<&SourceLocation>,
        error: Option<&ErrorObject>,
    ) -> bool {
        self.global_handler.handle(event, source, error)
    }

    fn notify_observer(&self, detail: &ErrorDetail) {
        let Some(observer) = &self.options.on_error else {
            return;
        };
        if scope::isolate(|| observer(detail)).is_err() {
            debug!(guard = self.id, "on_error observer panicked; discarded");
        }
    }
}

impl Component for RenderGuard {
    fn name(&self) -> &str {
        GUARD_COMPONENT_NAME
    }

    fn render(&self) -> RenderResult {
        select_render(&self.state.borrow(), &self.children, &self.options)
    }

    fn as_boundary(&self) -> Option<&dyn ErrorBoundary> {
        Some(self)
    }
}

impl ErrorBoundary for RenderGuard {
    fn component_did_catch(&self, error: ErrorObject, error_info: Option<ErrorInfo>) {
        let detail = ErrorDetail::new(error, error_info);
        self.notify_observer(&detail);

        let message = format!(
            "Error: {}-Error Info: {}",
            detail.error().summary(),
            detail.component_stack()
        );
        if !self.state.borrow_mut().capture(detail) {
            debug!(guard = self.id, "failure after capture; first detail kept");
        }

        self.options.sink.error(&message, CONTEXT_COMPONENT_DID_CATCH);
    }
}
