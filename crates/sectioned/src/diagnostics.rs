//! Programming-error diagnostics.
//!
//! Duplicate or empty identifiers, lookups of models that are not bound, and
//! size queries for unknown sections are programming errors. They never
//! surface as `Result`s from list operations. Instead they are reported here:
//! always logged at `error` level, and in [`DiagnosticsMode::Panic`] also
//! raised as a panic so they are loud during development.

use std::sync::atomic::{AtomicUsize, Ordering};

use sectioned_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::ListError;

/// What happens when a programming error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsMode {
    /// Log, then panic.
    Panic,
    /// Log and continue with the fallback behaviour.
    Log,
}

impl Default for DiagnosticsMode {
    /// `Panic` in debug builds, `Log` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Log
        }
    }
}

/// Reporter for programming errors.
#[derive(Debug, Default)]
pub struct Diagnostics {
    mode: DiagnosticsMode,
    reported: AtomicUsize,
}

impl Diagnostics {
    /// Create a reporter with the given mode.
    pub fn new(mode: DiagnosticsMode) -> Self {
        Self {
            mode,
            reported: AtomicUsize::new(0),
        }
    }

    /// The configured mode.
    #[inline]
    pub fn mode(&self) -> DiagnosticsMode {
        self.mode
    }

    /// Number of errors reported so far.
    #[inline]
    pub fn reported_count(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }

    /// Report a programming error.
    ///
    /// # Panics
    ///
    /// Panics in [`DiagnosticsMode::Panic`].
    #[track_caller]
    pub fn report(&self, error: &ListError) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        tracing::error!(target: targets::DIAGNOSTICS, %error, "programming error");
        if self.mode == DiagnosticsMode::Panic {
            panic!("sectioned: {error}");
        }
    }
}
