//! # Render Guard Integration Tests
//!
//! Mounts guarded trees through the host renderer and checks:
//!
//! - pass-through of healthy children
//! - capture of returned errors and panics, exactly once
//! - observer isolation
//! - development / production view selection
//! - nested guards and failing fallbacks

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use ward::guard::GUARD_COMPONENT_NAME;
use ward::prelude::*;

// ─── Helpers ────────────────────────────────────────────────────────

fn child_ok() -> Node {
    Node::component(FnComponent::new("Child", || Ok(Node::text("Child component"))))
}

fn child_error(message: &'static str) -> Node {
    Node::component(FnComponent::new("ComponentWithError", move || {
        Err(ErrorObject::new("Error", message))
    }))
}

/// A child that renders a marker before failing further down.
fn partial_child(message: &'static str) -> Node {
    Node::component(FnComponent::new("Partial", move || {
        Ok(Node::fragment([
            Node::text("partial output"),
            child_error(message),
        ]))
    }))
}

fn mount(guard: &Rc<RenderGuard>) -> HostNode {
    Renderer::new()
        .report_uncaught(false)
        .mount(&Node::shared(guard.clone()))
        .expect("guard should contain the failure")
}

fn counting_observer(calls: &Rc<Cell<u32>>) -> impl Fn(&ErrorDetail) + 'static {
    let calls = calls.clone();
    move |_| calls.set(calls.get() + 1)
}

// ─── Pass-through ───────────────────────────────────────────────────

#[test]
fn test_clear_guard_renders_children_unchanged() {
    let children = child_ok();
    let guard = RenderGuard::new(children.clone(), GuardOptions::new());

    assert_eq!(guard.render().unwrap(), children);
    assert!(!guard.has_error());
}

#[test]
fn test_clear_guard_output_matches_unguarded_output() {
    let children = Node::element("ul").with_children([
        Node::element("li").with_child(Node::text("one")),
        Node::element("li").with_child(child_ok()),
    ]);
    let guard = Rc::new(RenderGuard::new(children.clone(), GuardOptions::new()));

    let guarded = mount(&guard);
    let bare = Renderer::new().mount(&children).unwrap();

    assert_eq!(guarded, bare);
}

// ─── Capture ────────────────────────────────────────────────────────

#[test]
fn test_returned_error_is_captured_once_and_logged() {
    let sink = Arc::new(MemorySink::new());
    let calls = Rc::new(Cell::new(0));
    let guard = Rc::new(RenderGuard::new(
        child_error("x"),
        GuardOptions::new()
            .sink(sink.clone())
            .on_error(counting_observer(&calls)),
    ));

    let output = mount(&guard);

    assert!(guard.has_error());
    assert_eq!(calls.get(), 1);
    let records = sink.with_context(CONTEXT_COMPONENT_DID_CATCH);
    assert_eq!(records.len(), 1);
    assert!(records[0].message.contains("x"));
    assert!(records[0].message.starts_with("Error: Error-x-"));
    assert!(
        records[0]
            .message
            .ends_with("\n    in ComponentWithError\n    in RenderGuard")
    );
    assert!(!output.contains_text("Child component"));
}

#[test]
fn test_panic_during_render_is_captured() {
    let sink = Arc::new(MemorySink::new());
    let child = Node::component(FnComponent::new("ComponentWithRuntimeError", || {
        let items: Vec<u32> = Vec::new();
        Ok(Node::text(items[1].to_string()))
    }));
    let guard = Rc::new(RenderGuard::new(child, GuardOptions::new().sink(sink.clone())));

    mount(&guard);

    let state = guard.state();
    let detail = state.error_detail().expect("captured");
    assert_eq!(detail.error().name(), "panic");
    assert!(detail.error().message().contains("index out of bounds"));
    assert!(detail.error().stack().is_some_and(|s| s.starts_with("at ")));
    assert_eq!(sink.with_context(CONTEXT_COMPONENT_DID_CATCH).len(), 1);
}

#[test]
fn test_failing_subtree_output_is_absent_after_capture() {
    let guard = Rc::new(RenderGuard::new(
        Node::element("section").with_child(partial_child("late failure")),
        GuardOptions::new(),
    ));

    let output = mount(&guard);

    assert!(guard.has_error());
    assert!(!output.contains_text("partial output"));
    assert!(output.contains_text("late failure"));
}

#[test]
fn test_error_info_lists_chain_innermost_first() {
    let guard = Rc::new(RenderGuard::new(partial_child("deep"), GuardOptions::new()));

    mount(&guard);

    let state = guard.state();
    let info = state
        .error_detail()
        .and_then(ErrorDetail::error_info)
        .expect("host supplies error info");
    assert_eq!(
        info.frames().collect::<Vec<_>>(),
        ["ComponentWithError", "Partial", GUARD_COMPONENT_NAME]
    );
}

#[test]
fn test_remount_after_capture_keeps_first_detail() {
    let sink = Arc::new(MemorySink::new());
    let guard = Rc::new(RenderGuard::new(child_error("first"), GuardOptions::new().sink(sink.clone())));

    mount(&guard);
    mount(&guard);

    let state = guard.state();
    assert_eq!(state.error_detail().unwrap().error().message(), "first");
    // The second mount renders the fallback directly; nothing new to catch.
    assert_eq!(sink.with_context(CONTEXT_COMPONENT_DID_CATCH).len(), 1);
}

// ─── Observer isolation ─────────────────────────────────────────────

#[test]
fn test_observer_called_once_with_detail() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let log = seen.clone();
    let guard = Rc::new(RenderGuard::new(
        child_error("observed"),
        GuardOptions::new().on_error(move |detail| {
            log.borrow_mut().push(detail.error().message().to_string());
        }),
    ));

    mount(&guard);

    assert_eq!(*seen.borrow(), ["observed"]);
}

#[test]
fn test_panicking_observer_does_not_escape() {
    let sink = Arc::new(MemorySink::new());
    let guard = Rc::new(RenderGuard::new(
        child_error("x"),
        GuardOptions::new()
            .sink(sink.clone())
            .on_error(|_| panic!("observer failed")),
    ));

    let output = mount(&guard);

    assert!(guard.has_error());
    assert!(output.contains_text("Error-x-"));
    assert_eq!(sink.with_context(CONTEXT_COMPONENT_DID_CATCH).len(), 1);
}

// ─── View selection ─────────────────────────────────────────────────

#[test]
fn test_production_mode_renders_custom_fallback_with_props() {
    let props_seen: Rc<RefCell<Option<(String, String)>>> = Rc::default();
    let record = props_seen.clone();
    let guard = Rc::new(RenderGuard::new(
        child_error("y"),
        GuardOptions::new()
            .development_mode(false)
            .fallback_view(fallback_fn(move |props| {
                *record.borrow_mut() = Some((
                    props.error.message().to_string(),
                    props.component_stack.to_string(),
                ));
                Ok(Node::element("p").with_child(Node::text("F")))
            })),
    ));

    let output = mount(&guard);

    assert_eq!(output.text_content(), "F");
    let (message, stack) = props_seen.borrow().clone().expect("fallback rendered");
    assert_eq!(message, "y");
    assert_eq!(stack, "\n    in ComponentWithError\n    in RenderGuard");
}

#[test]
fn test_development_mode_renders_diagnostic_view() {
    let guard = Rc::new(RenderGuard::new(
        child_error("dev"),
        GuardOptions::new()
            .development_mode(true)
            .fallback_view(fallback_fn(|_| Ok(Node::text("F")))),
    ));

    let output = mount(&guard);

    assert!(output.contains_element("div", ("role", "alert")));
    assert!(output.contains_text("Error-dev-"));
    assert!(output.contains_text("in ComponentWithError"));
    assert_ne!(output.text_content(), "F");
}

#[test]
fn test_default_fallback_is_diagnostic_layout() {
    let guard = Rc::new(RenderGuard::new(child_error("plain"), GuardOptions::new()));

    let output = mount(&guard);

    assert!(output.contains_element("div", ("role", "alert")));
    assert!(output.contains_text("Error-plain-"));
}

#[test]
fn test_options_from_config_select_mode() {
    let config = WardConfig::from_toml(
        r#"
        [shared]
        service_name = "test"

        [guard]
        development_mode = true
        "#,
    )
    .unwrap();
    let guard = Rc::new(RenderGuard::new(
        child_error("cfg"),
        GuardOptions::from_config(&config.guard).fallback_view(fallback_fn(|_| Ok(Node::text("F")))),
    ));

    let output = mount(&guard);

    assert!(guard.options().is_development_mode());
    assert_ne!(output.text_content(), "F");
}

// ─── Nesting ────────────────────────────────────────────────────────

#[test]
fn test_nearest_guard_captures_and_outer_stays_clear() {
    let inner = Rc::new(RenderGuard::new(child_error("inner"), GuardOptions::new()));
    let outer = Rc::new(RenderGuard::new(
        Node::element("div").with_children([child_ok(), Node::shared(inner.clone())]),
        GuardOptions::new(),
    ));

    let output = mount(&outer);

    assert!(inner.has_error());
    assert!(!outer.has_error());
    assert!(output.contains_text("Child component"));
    assert!(output.contains_text("Error-inner-"));
}

#[test]
fn test_failing_fallback_escalates_to_outer_guard() {
    let outer_sink = Arc::new(MemorySink::new());
    let inner = Rc::new(RenderGuard::new(
        child_error("inner"),
        GuardOptions::new().fallback_view(fallback_fn(|_| {
            Err(ErrorObject::new("Error", "fallback broke"))
        })),
    ));
    let outer = Rc::new(RenderGuard::new(
        Node::shared(inner.clone()),
        GuardOptions::new()
            .sink(outer_sink.clone())
            .fallback_view(fallback_fn(|props| {
                Ok(Node::text(format!("outer: {}", props.error.message())))
            })),
    ));

    let output = mount(&outer);

    assert!(inner.has_error());
    assert!(outer.has_error());
    assert_eq!(output.text_content(), "outer: fallback broke");
    let records = outer_sink.with_context(CONTEXT_COMPONENT_DID_CATCH);
    assert_eq!(records.len(), 1);
    assert!(records[0].message.ends_with("\n    in RenderGuard\n    in RenderGuard"));
}

#[test]
fn test_failing_fallback_without_outer_guard_is_uncaught() {
    let guard = RenderGuard::new(
        child_error("inner"),
        GuardOptions::new().fallback_view(fallback_fn(|_| {
            Err(ErrorObject::new("Error", "fallback broke"))
        })),
    );

    let result = Renderer::new()
        .report_uncaught(false)
        .mount(&Node::component(guard));

    match result {
        Err(HostError::Uncaught { error, .. }) => assert_eq!(error.message(), "fallback broke"),
        Ok(output) => panic!("expected uncaught failure, got {output}"),
    }
}

// ─── Question-mark conversion ───────────────────────────────────────

#[test]
fn test_std_errors_convert_in_render() {
    let child = Node::component(FnComponent::new("Parser", || {
        let value: u32 = "not a number".parse()?;
        Ok(Node::text(value.to_string()))
    }));
    let guard = Rc::new(RenderGuard::new(child, GuardOptions::new()));

    mount(&guard);

    let state = guard.state();
    assert_eq!(state.error_detail().unwrap().error().name(), "ParseIntError");
}
