//! Cancellation hooks for the unbounded generation loops.
//!
//! Safe-prime and key generation poll the hook once per candidate and stop
//! with [`VrfError::Cancelled`](crate::VrfError::Cancelled) when it fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancel for Never {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancels once the wall clock passes a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(pub Instant);

impl Deadline {
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }
}

impl Cancel for Deadline {
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.0
    }
}

impl Cancel for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Cancel + ?Sized> Cancel for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: Cancel + ?Sized> Cancel for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
