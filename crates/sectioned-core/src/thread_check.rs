//! Control-thread verification for list controllers.
//!
//! A list controller and the host view it drives are bound to a single
//! *control thread*: the thread that created the controller. Every public
//! operation verifies that it runs on that thread. The check is a
//! precondition, not a hint, so it stays active in release builds.
//!
//! ```
//! use sectioned_core::thread_check::ThreadAffinity;
//!
//! struct Counter {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self) {
//!         self.affinity.assert_same_thread_with_msg("Counter::bump");
//!         self.value.set(self.value.get() + 1);
//!     }
//! }
//!
//! let counter = Counter {
//!     affinity: ThreadAffinity::current(),
//!     value: std::cell::Cell::new(0),
//! };
//! counter.bump();
//! assert_eq!(counter.value.get(), 1);
//! ```

use std::thread::ThreadId;

use crate::logging::targets;

/// Records the thread an object was created on and verifies later accesses.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: std::thread::current().id(),
        }
    }

    /// The control thread.
    #[inline]
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Whether the caller runs on the control thread.
    #[inline]
    pub fn is_owner(&self) -> bool {
        self.owner == std::thread::current().id()
    }

    /// Panic unless the caller runs on the control thread.
    ///
    /// `operation` names the rejected call in the log event and panic message.
    #[inline]
    #[track_caller]
    pub fn assert_same_thread_with_msg(&self, operation: &str) {
        if !self.is_owner() {
            self.violation(operation);
        }
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn violation(&self, operation: &str) -> ! {
        let caller = std::thread::current();
        let caller_name = caller.name().unwrap_or("<unnamed>").to_owned();

        tracing::error!(
            target: targets::THREAD,
            operation,
            owner = ?self.owner,
            caller = ?caller.id(),
            "control thread violation"
        );

        panic!(
            "CONTROL THREAD VIOLATION: `{operation}` called on thread \"{caller_name}\" ({:?}), \
             but this list controller belongs to {:?}. Post the call to the control thread.",
            caller.id(),
            self.owner,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn test_owner_passes() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_owner());
        affinity.assert_same_thread_with_msg("update");
        assert_eq!(ThreadAffinity::default().owner(), affinity.owner());
    }

    #[test]
    fn test_other_thread_is_not_owner() {
        let affinity = ThreadAffinity::current();
        let foreign = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&foreign);
        std::thread::spawn(move || flag.store(!affinity.is_owner(), Ordering::SeqCst))
            .join()
            .unwrap();
        assert!(foreign.load(Ordering::SeqCst));
    }

    #[test]
    fn test_other_thread_panics_with_operation() {
        let affinity = ThreadAffinity::current();
        let payload = std::thread::spawn(move || affinity.assert_same_thread_with_msg("scroll"))
            .join()
            .unwrap_err();
        let message = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(message.contains("`scroll`"), "{message}");
    }
}
