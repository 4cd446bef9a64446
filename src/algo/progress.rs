//! Progress callbacks for iterative algorithms.
//!
//! The smoothing functions call [`Progress::report`] once before every
//! iteration and once more when they finish, so a run of `n` iterations
//! reports `0, 1, ..., n` out of `n`.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use tessera::algo::Progress;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&calls);
//! let progress = Progress::new(move |_current, _total, _stage| {
//!     seen.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! progress.report(0, 2, "smoothing");
//! assert_eq!(calls.load(Ordering::Relaxed), 1);
//! ```

/// Callback receiving `(current, total, stage)` updates.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// A reporter that forwards updates to the `log` facade at debug level.
    pub fn logging() -> Self {
        Self::new(|current, total, stage| {
            log::debug!("{}: {}/{}", stage, current, total);
        })
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, stage: &str) {
        (self.callback)(current, total, stage);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
