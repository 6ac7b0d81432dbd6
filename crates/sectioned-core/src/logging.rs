//! Tracing integration for Sectioned.
//!
//! Sectioned uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see events, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("sectioned::controller=debug")
//!     .init();
//! ```
//!
//! Levels used throughout the workspace:
//!
//! - `error`: programming errors (duplicate identifiers, missing models)
//! - `debug`: controller state transitions, queueing and commits
//! - `trace`: size cache hits and misses, solver runs

/// Span names used throughout Sectioned for tracing.
pub mod span_names {
    /// One executed controller action.
    pub const ACTION: &str = "sectioned::action";
    /// A host commit, from request to completion.
    pub const COMMIT: &str = "sectioned::commit";
    /// A distribution solver run.
    pub const SOLVE: &str = "sectioned::solve";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// List controller state machine and action queue.
    pub const CONTROLLER: &str = "sectioned::controller";
    /// Distribution solver and cell size controller.
    pub const LAYOUT: &str = "sectioned::layout";
    /// Size cache.
    pub const CACHE: &str = "sectioned::cache";
    /// Programming-error diagnostics.
    pub const DIAGNOSTICS: &str = "sectioned::diagnostics";
    /// Control-thread checks.
    pub const THREAD: &str = "sectioned::thread";
}

/// Performance span guard.
///
/// Enters a debug-level span under the `sectioned::perf` target for as long
/// as the guard lives. Names come from [`span_names`].
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "sectioned::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
