//! Process-wide handler for ambient failures.
//!
//! Render-path failures reach a guard through the host. Everything else
//! (panics on other threads, panics outside any render pass, failures the
//! host environment reports itself) goes through the single handler slot
//! managed here.
//!
//! # Lifecycle
//!
//! - Every [`RenderGuard`](crate::guard::RenderGuard) installs its own
//!   [`GlobalHandler`] at construction. The slot holds one handler: a later
//!   installation replaces the earlier one (last registered wins, no
//!   chaining). With several guards alive only the newest one logs ambient
//!   failures.
//! - The first installation also installs the panic bridge, a
//!   `std::panic` hook that wraps whatever hook was present before.
//! - [`uninstall`] empties the slot. Dropping a guard does not.
//!
//! The handler never touches any guard state.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::{self, PanicHookInfo};
use std::sync::{Arc, LazyLock, Once};

use parking_lot::RwLock;
use static_assertions::assert_impl_all;
use tracing::{debug, trace};
use ward_common::consts::{CONTEXT_GLOBAL_HANDLER, MISSING_ERROR_NAME, UNKNOWN_FIELD};
use ward_common::error::{AmbientEvent, ErrorObject, SourceLocation, panic_message};
use ward_common::log::LogSink;

use crate::scope;

/// Handler for ambient failures, owned by one guard instance.
pub struct GlobalHandler {
    owner: u64,
    sink: Arc<dyn LogSink>,
    suppress_default_presentation: bool,
}

impl GlobalHandler {
    /// Create a handler for the guard with id `owner`.
    pub fn new(owner: u64, sink: Arc<dyn LogSink>, suppress_default_presentation: bool) -> Self {
        Self {
            owner,
            sink,
            suppress_default_presentation,
        }
    }

    /// Id of the guard that created this handler.
    pub fn owner(&self) -> u64 {
        self.owner
    }

    /// Log an ambient failure.
    ///
    /// Returns `true` when the host environment should skip its default
    /// error presentation.
    pub fn handle(
        &self,
        event: &AmbientEvent,
        source: Option<&SourceLocation>,
        error: Option<&ErrorObject>,
    ) -> bool {
        let message = compose_message(event, source, error);
        self.sink.error(&message, CONTEXT_GLOBAL_HANDLER);
        self.suppress_default_presentation
    }
}

assert_impl_all!(GlobalHandler: Send, Sync);

/// Build the global handler's log message.
///
/// Missing location fields render as `unknown`; a missing error object
/// renders as `<none>` with empty message and stack.
pub fn compose_message(
    event: &AmbientEvent,
    source: Option<&SourceLocation>,
    error: Option<&ErrorObject>,
) -> String {
    let event = event.to_string().to_lowercase();
    let file = source
        .and_then(|s| s.file.as_deref())
        .unwrap_or(UNKNOWN_FIELD);
    let line = optional_field(source.and_then(|s| s.line));
    let column = optional_field(source.and_then(|s| s.column));
    let (name, message, stack) = match error {
        Some(error) => (
            error.name(),
            error.message(),
            error.stack().unwrap_or_default(),
        ),
        None => (MISSING_ERROR_NAME, "", ""),
    };

    format!(
        "Message: {event} - Source: {file} - Line: {line} - Column: {column} - Error Object: {name}-{message}-{stack}"
    )
}

fn optional_field(value: Option<u32>) -> String {
    value.map_or_else(|| UNKNOWN_FIELD.to_string(), |v| v.to_string())
}

// ─── Handler slot ───────────────────────────────────────────────────

static HANDLER_SLOT: LazyLock<RwLock<Option<Arc<GlobalHandler>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Install `handler` as the process-wide handler, returning the one it
/// replaced.
pub fn install(handler: Arc<GlobalHandler>) -> Option<Arc<GlobalHandler>> {
    let owner = handler.owner();
    let previous = HANDLER_SLOT.write().replace(handler);
    if let Some(previous) = &previous {
        debug!(
            guard = owner,
            replaced = previous.owner(),
            "global handler replaced"
        );
    }
    previous
}

/// Currently installed handler.
pub fn installed() -> Option<Arc<GlobalHandler>> {
    HANDLER_SLOT.read().clone()
}

/// Empty the slot, returning the handler that was installed.
pub fn uninstall() -> Option<Arc<GlobalHandler>> {
    HANDLER_SLOT.write().take()
}

/// Deliver an ambient failure to the installed handler.
///
/// Returns the handler's suppression signal, or `false` when no handler is
/// installed.
pub fn report_global_error(
    event: &AmbientEvent,
    source: Option<&SourceLocation>,
    error: Option<&ErrorObject>,
) -> bool {
    // Clone out of the lock: the sink may take its own time.
    match installed() {
        Some(handler) => handler.handle(event, source, error),
        None => false,
    }
}

// ─── Panic bridge ───────────────────────────────────────────────────

static PANIC_BRIDGE: Once = Once::new();

/// Install the panic bridge once per process.
///
/// Panics raised inside a render scope only leave their trace behind for
/// the host. All other panics are reported through
/// [`report_global_error`]; the previous hook runs when nothing is
/// installed or the handler does not suppress the default presentation.
pub fn ensure_panic_bridge() {
    PANIC_BRIDGE.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if scope::in_render_scope() {
                scope::stash_trace(panic_trace(info));
                return;
            }

            let event = AmbientEvent::Message(panic_message(info.payload()));
            let source = info.location().map(SourceLocation::from);
            let error = ErrorObject::from_panic(info.payload()).with_stack(panic_trace(info));

            if !report_global_error(&event, source.as_ref(), Some(&error)) {
                previous(info);
            }
        }));
        trace!("panic bridge installed");
    });
}

/// `at file:line:column`, followed by the backtrace when one was captured.
fn panic_trace(info: &PanicHookInfo<'_>) -> String {
    let mut out = match info.location() {
        Some(location) => format!("at {}", SourceLocation::from(location)),
        None => "at <unknown location>".to_string(),
    };
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        out.push('\n');
        out.push_str(&backtrace.to_string());
    }
    out
}
