//! Error values carried through the guard.
//!
//! Render-path failures and ambient failures are both normalised into an
//! [`ErrorObject`] (name, message, optional stack). Render-path failures
//! additionally carry an [`ErrorInfo`] describing the component chain that
//! was active when the failure was raised; the pair forms an
//! [`ErrorDetail`].
//!
//! `ErrorObject` deliberately does not implement `std::error::Error`, which
//! lets it offer a blanket `From<E: Error>` so component code can use `?`.

use std::any::Any;
use std::fmt;
use std::panic::Location;

use crate::consts::{COMPONENT_FRAME_PREFIX, PANIC_ERROR_NAME, UNKNOWN_PANIC_MESSAGE};

// ─── ErrorObject ────────────────────────────────────────────────────

/// Opaque error value: name, message and optional stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorObject {
    name: String,
    message: String,
    stack: Option<String>,
}

impl ErrorObject {
    /// Create an error with the given name and message and no stack.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack trace.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Build from a `std::error::Error`.
    ///
    /// The name is the short type name of `E`, the message its `Display`
    /// output, and the stack its `source()` chain (one `caused by:` line per
    /// cause), if any.
    pub fn from_std<E: std::error::Error>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        Self {
            name: short_type_name::<E>().to_string(),
            message: err.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }

    /// Build from a panic payload as returned by `catch_unwind`.
    ///
    /// `&str` and `String` payloads become the message; anything else is
    /// reported as an unknown panic.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self::new(PANIC_ERROR_NAME, panic_message(payload))
    }

    /// Error name (type or category).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stack trace, if one was captured.
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// `name-message-stack`, the compact form used in log messages and the
    /// diagnostic view. A missing stack renders as an empty segment.
    pub fn summary(&self) -> String {
        format!(
            "{}-{}-{}",
            self.name,
            self.message,
            self.stack.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl<E: std::error::Error> From<E> for ErrorObject {
    fn from(err: E) -> Self {
        Self::from_std(&err)
    }
}

/// Extract the message of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        UNKNOWN_PANIC_MESSAGE.to_string()
    }
}

/// Last path segment of a type name, with generic arguments stripped.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// ─── ErrorInfo ──────────────────────────────────────────────────────

/// Component chain active when a render-path failure was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    component_stack: String,
}

impl ErrorInfo {
    /// Build from component names, innermost (the failing component) first.
    ///
    /// Each frame is rendered as `"\n    in <Name>"`.
    pub fn from_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let component_stack = frames
            .into_iter()
            .map(|name| format!("{COMPONENT_FRAME_PREFIX}{}", name.as_ref()))
            .collect();
        Self { component_stack }
    }

    /// Flattened component stack.
    pub fn component_stack(&self) -> &str {
        &self.component_stack
    }

    /// Component names, innermost first.
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.component_stack
            .split(COMPONENT_FRAME_PREFIX)
            .filter(|frame| !frame.is_empty())
    }
}

// ─── ErrorDetail ────────────────────────────────────────────────────

/// A captured render-path failure. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    error: ErrorObject,
    error_info: Option<ErrorInfo>,
}

impl ErrorDetail {
    /// Pair an error with its component trace.
    pub fn new(error: ErrorObject, error_info: Option<ErrorInfo>) -> Self {
        Self { error, error_info }
    }

    /// The captured error.
    pub fn error(&self) -> &ErrorObject {
        &self.error
    }

    /// The component trace, if the host supplied one.
    pub fn error_info(&self) -> Option<&ErrorInfo> {
        self.error_info.as_ref()
    }

    /// Flattened component stack; empty when no trace was supplied.
    pub fn component_stack(&self) -> &str {
        self.error_info
            .as_ref()
            .map(ErrorInfo::component_stack)
            .unwrap_or_default()
    }
}

// ─── Ambient inputs ─────────────────────────────────────────────────

/// Event value delivered to the global handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientEvent {
    /// Plain message (panic payload, host-reported string).
    Message(String),
    /// Structured event reported by the host environment.
    Event {
        /// Event kind, e.g. `"TaskFailed"`.
        kind: String,
        /// Free-form detail.
        detail: String,
    },
}

impl fmt::Display for AmbientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Event { kind, detail } => write!(f, "{kind}: {detail}"),
        }
    }
}

impl From<&str> for AmbientEvent {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for AmbientEvent {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// Source location of an ambient failure. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file.
    pub file: Option<String>,
    /// 1-based line.
    pub line: Option<u32>,
    /// 1-based column.
    pub column: Option<u32>,
}

impl SourceLocation {
    /// Fully specified location.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            column: Some(column),
        }
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line, self.column) {
            (Some(file), Some(line), Some(column)) => write!(f, "{file}:{line}:{column}"),
            (Some(file), Some(line), None) => write!(f, "{file}:{line}"),
            (Some(file), None, _) => f.write_str(file),
            _ => f.write_str("<unknown location>"),
        }
    }
}
