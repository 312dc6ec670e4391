//! # WARD Demo Binary
//!
//! Mounts a small component tree behind a render guard and prints the host
//! output. Each scenario exercises one failure path.
//!
//! # Usage
//!
//! ```bash
//! # A child that returns an error, production fallback
//! ward --scenario render-error
//!
//! # Same, with the diagnostic view
//! ward --scenario render-error --development
//!
//! # Panic on another thread, logged by the global handler
//! ward --scenario ambient -v
//!
//! # Config file and a JSON dump of every sink call
//! ward --config config/ward.toml --scenario panic --json
//! ```

#![deny(warnings)]

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ward::prelude::*;
use ward_common::consts::DEFAULT_CONFIG_PATH;

/// WARD - render guard demo
#[derive(Parser, Debug)]
#[command(name = "ward")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Mount a component tree behind a render guard and print the result")]
#[command(long_about = None)]
struct Args {
    /// Path to a TOML configuration file (`[shared]` and `[guard]` sections).
    /// Built-in defaults apply when the file does not exist.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Render the diagnostic view instead of the production fallback
    #[arg(short, long)]
    development: bool,

    /// Failure path to exercise
    #[arg(short, long, value_enum, default_value_t = Scenario::RenderError)]
    scenario: Scenario,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format and dump every sink call as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Nothing fails
    Clean,
    /// A child returns an error from render
    RenderError,
    /// A child panics during render
    Panic,
    /// A failure with an `on_error` observer attached
    Observer,
    /// An inner guard whose fallback fails; the outer guard takes over
    FallbackFailure,
    /// A panic on a worker thread, outside any render pass
    Ambient,
    /// A failing tree with no guard above the failure
    Uncaught,
}

/// Sink forwarding to `tracing` while keeping a copy of every call.
struct DemoSink {
    forward: TracingSink,
    memory: MemorySink,
}

impl LogSink for DemoSink {
    fn error(&self, message: &str, context: &str) {
        self.forward.error(message, context);
        self.memory.error(message, context);
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("ward: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match WardConfig::load(&args.config) {
        Ok(config) => {
            config.validate()?;
            Some(config)
        }
        Err(ConfigError::FileNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    setup_tracing(&args, config.as_ref().map(|c| c.shared.log_level))?;

    info!("WARD v{} starting...", env!("CARGO_PKG_VERSION"));
    match &config {
        Some(config) => info!(service = %config.shared.service_name, "configuration loaded"),
        None => info!("no config at {:?}, using defaults", args.config),
    }

    let mut guard_config = config.map(|c| c.guard).unwrap_or_default();
    if args.development {
        guard_config.development_mode = true;
    }

    let sink = Arc::new(DemoSink {
        forward: TracingSink,
        memory: MemorySink::new(),
    });

    let output = run_scenario(args.scenario, guard_config, &sink)?;
    if let Some(output) = output {
        println!("{output}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sink.memory.records())?);
    }

    info!(records = sink.memory.len(), "done");
    Ok(())
}

fn run_scenario(
    scenario: Scenario,
    config: GuardConfig,
    sink: &Arc<DemoSink>,
) -> Result<Option<HostNode>, Box<dyn std::error::Error>> {
    let options = || GuardOptions::from_config(&config).sink(sink.clone());
    let renderer = Renderer::new();

    let root = match scenario {
        Scenario::Clean => RenderGuard::new(page(child_ok()), options().fallback_view(apology())),
        Scenario::RenderError => {
            RenderGuard::new(page(child_error("x")), options().fallback_view(apology()))
        }
        Scenario::Panic => RenderGuard::new(page(child_panic()), options().fallback_view(apology())),
        Scenario::Observer => RenderGuard::new(
            page(child_error("observed")),
            options()
                .fallback_view(apology())
                .on_error(|detail| info!(error = %detail.error(), "on_error observer notified")),
        ),
        Scenario::FallbackFailure => {
            let inner = RenderGuard::new(
                child_error("inner"),
                options().fallback_view(fallback_fn(|_| {
                    Err(ErrorObject::new("Error", "fallback could not render"))
                })),
            );
            RenderGuard::new(page(Node::component(inner)), options().fallback_view(apology()))
        }
        Scenario::Ambient => {
            let guard = RenderGuard::new(page(child_ok()), options().fallback_view(apology()));
            let worker = thread::Builder::new()
                .name("ward-worker".into())
                .spawn(|| -> u8 { panic!("worker lost its connection") })?;
            if worker.join().is_err() {
                warn!("worker thread panicked");
            }
            info!(has_error = guard.has_error(), "guard state after ambient panic");
            guard
        }
        Scenario::Uncaught => {
            // Installs the global handler; the failing tree is mounted bare.
            let _guard = RenderGuard::new(Node::Empty, options());
            match renderer.mount(&page(child_error("nobody catches this"))) {
                Ok(output) => return Ok(Some(output)),
                Err(e) => {
                    warn!("{e}");
                    return Ok(None);
                }
            }
        }
    };

    let root = Rc::new(root);
    let output = renderer.mount(&Node::shared(root.clone()))?;
    info!(guard = root.id(), has_error = root.has_error(), "mounted");
    Ok(Some(output))
}

fn page(content: Node) -> Node {
    Node::element("main").with_children([
        Node::element("h1").with_child(Node::text("Dashboard")),
        content,
    ])
}

fn child_ok() -> Node {
    Node::component(FnComponent::new("Child", || Ok(Node::text("Child component"))))
}

fn child_error(message: &'static str) -> Node {
    Node::component(FnComponent::new("ComponentWithError", move || {
        Err(ErrorObject::new("Error", message))
    }))
}

fn child_panic() -> Node {
    Node::component(FnComponent::new("ComponentWithPanic", || {
        let rows: Vec<String> = Vec::new();
        Ok(Node::text(rows[0].clone()))
    }))
}

fn apology() -> impl FallbackView {
    fallback_fn(|props| {
        Ok(Node::element("div")
            .with_attr("class", "fallback")
            .with_child(Node::text(format!(
                "Sorry, this panel failed: {}",
                props.error.message()
            ))))
    })
}

/// Setup tracing subscriber based on CLI arguments and the config file.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) -> Result<(), Box<dyn std::error::Error>> {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured.unwrap_or_default()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.as_directive().parse()?);

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
