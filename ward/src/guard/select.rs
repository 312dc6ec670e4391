//! Render selector: what a guard renders on each pass.

use crate::tree::{Node, RenderResult};
use crate::view::{DiagnosticView, FallbackProps, FallbackView};

use super::options::GuardOptions;
use super::state::GuardState;

/// Pick the guard's output from its state and options.
///
/// - `Clear`: the children, unchanged.
/// - `Captured`, development mode: the diagnostic view with the full detail.
/// - `Captured`, production mode: the configured fallback view with only
///   the error and the flattened component stack.
pub fn select_render(state: &GuardState, children: &Node, options: &GuardOptions) -> RenderResult {
    let Some(detail) = state.error_detail() else {
        return Ok(children.clone());
    };

    if options.development_mode {
        return Ok(DiagnosticView.render_detail(detail));
    }

    options.fallback_view.render(&FallbackProps {
        error: detail.error(),
        component_stack: detail.component_stack(),
    })
}
