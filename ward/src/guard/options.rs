//! Guard construction options.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use ward_common::config::GuardConfig;
use ward_common::error::ErrorDetail;
use ward_common::log::{LogSink, TracingSink};

use crate::view::{DiagnosticView, FallbackView};

/// Observer called with every captured failure.
pub type ErrorObserver = Box<dyn Fn(&ErrorDetail)>;

/// Options fixed at guard construction.
///
/// Defaults: [`DiagnosticView`] as fallback, production mode, no observer,
/// [`TracingSink`] as sink, default presentation suppressed.
pub struct GuardOptions {
    pub(crate) fallback_view: Rc<dyn FallbackView>,
    pub(crate) development_mode: bool,
    pub(crate) suppress_default_presentation: bool,
    pub(crate) on_error: Option<ErrorObserver>,
    pub(crate) sink: Arc<dyn LogSink>,
}

impl GuardOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::from_config(&GuardConfig::default())
    }

    /// Options seeded from the serializable config section.
    pub fn from_config(config: &GuardConfig) -> Self {
        Self {
            fallback_view: Rc::new(DiagnosticView),
            development_mode: config.development_mode,
            suppress_default_presentation: config.suppress_default_presentation,
            on_error: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// View rendered in production mode after a failure.
    pub fn fallback_view(mut self, view: impl FallbackView + 'static) -> Self {
        self.fallback_view = Rc::new(view);
        self
    }

    /// Render the diagnostic view instead of the fallback view.
    pub fn development_mode(mut self, enabled: bool) -> Self {
        self.development_mode = enabled;
        self
    }

    /// Suppression signal returned by this guard's global handler.
    pub fn suppress_default_presentation(mut self, enabled: bool) -> Self {
        self.suppress_default_presentation = enabled;
        self
    }

    /// Observer notified of each captured failure. Its panics are discarded.
    pub fn on_error(mut self, observer: impl Fn(&ErrorDetail) + 'static) -> Self {
        self.on_error = Some(Box::new(observer));
        self
    }

    /// Logging transport.
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Whether development mode is on.
    pub fn is_development_mode(&self) -> bool {
        self.development_mode
    }
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuardOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardOptions")
            .field("development_mode", &self.development_mode)
            .field(
                "suppress_default_presentation",
                &self.suppress_default_presentation,
            )
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}
