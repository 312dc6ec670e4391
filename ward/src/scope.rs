//! Render scopes: thread-local bookkeeping shared by the host and the panic
//! bridge.
//!
//! Code running inside [`isolate`] is on a render path (a component's
//! `render`, or a guard's `on_error` observer). The panic bridge checks
//! [`in_render_scope`] to tell those panics apart from ambient ones: panics
//! inside a scope are not forwarded to the global handler; the bridge only
//! stashes their location and backtrace so the catching side can attach it
//! to the resulting [`ErrorObject`].

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};

use ward_common::error::ErrorObject;

thread_local! {
    static DEPTH: Cell<u32> = const { Cell::new(0) };
    static PENDING_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// A panic caught by [`isolate`].
pub struct CaughtPanic {
    /// Raw payload.
    pub payload: Box<dyn Any + Send>,
    /// Location and backtrace stashed by the panic bridge, if installed.
    pub trace: Option<String>,
}

impl CaughtPanic {
    /// Convert into an error object, using the trace as stack.
    pub fn into_error(self) -> ErrorObject {
        let error = ErrorObject::from_panic(self.payload.as_ref());
        match self.trace {
            Some(trace) => error.with_stack(trace),
            None => error,
        }
    }
}

/// RAII marker for "this thread is inside a render scope".
struct ScopeGuard;

impl ScopeGuard {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        ScopeGuard
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Run `f` inside a render scope, catching any panic it raises.
pub fn isolate<R>(f: impl FnOnce() -> R) -> Result<R, CaughtPanic> {
    let _scope = ScopeGuard::enter();
    PENDING_TRACE.with(|trace| trace.borrow_mut().take());
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| CaughtPanic {
        payload,
        trace: PENDING_TRACE.with(|trace| trace.borrow_mut().take()),
    })
}

/// True while the current thread runs inside [`isolate`].
pub fn in_render_scope() -> bool {
    DEPTH.with(|depth| depth.get() > 0)
}

/// Record the trace of a panic raised inside a render scope.
pub(crate) fn stash_trace(trace: String) {
    PENDING_TRACE.with(|pending| *pending.borrow_mut() = Some(trace));
}
