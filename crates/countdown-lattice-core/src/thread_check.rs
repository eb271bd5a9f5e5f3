//! Thread affinity checks for widget code.
//!
//! Widgets are mutated only from the UI thread: click handlers, timer
//! callbacks and hover handlers are all dispatched by one event loop, so
//! widget state needs no internal locking. This module makes that contract
//! checkable.
//!
//! Widgets record a [`ThreadAffinity`] at construction and assert it on
//! every mutating operation:
//!
//! ```
//! use countdown_lattice_core::thread_check::ThreadAffinity;
//!
//! struct Counter {
//!     affinity: ThreadAffinity,
//!     value: u32,
//! }
//!
//! impl Counter {
//!     fn bump(&mut self) {
//!         self.affinity.debug_assert_same_thread();
//!         self.value += 1;
//!     }
//! }
//!
//! let mut counter = Counter { affinity: ThreadAffinity::current(), value: 0 };
//! counter.bump();
//! ```

use std::thread::ThreadId;

/// Records the thread an object was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The bound thread.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the bound thread, in all builds.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            self.panic_wrong_thread();
        }
    }

    /// Debug-only assertion that we are on the bound thread.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self) -> ! {
        let current = std::thread::current();
        panic!(
            "thread affinity violation: object created on {:?} accessed from \"{}\" {:?}",
            self.thread_id,
            current.name().unwrap_or("<unnamed>"),
            current.id(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_affinity_same_thread() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_same_thread());
        affinity.assert_same_thread();
        affinity.debug_assert_same_thread();
    }

    #[test]
    fn test_thread_affinity_other_thread() {
        let affinity = ThreadAffinity::current();
        let seen = std::thread::spawn(move || affinity.is_same_thread())
            .join()
            .unwrap();
        assert!(!seen);
    }

    #[test]
    fn test_thread_affinity_panics_on_wrong_thread() {
        let affinity = ThreadAffinity::current();
        let result = std::thread::spawn(move || affinity.assert_same_thread()).join();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_is_current() {
        assert_eq!(ThreadAffinity::default(), ThreadAffinity::current());
    }
}
