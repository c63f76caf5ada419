//! Transient toast notifications.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Maximum number of toasts kept; older ones are dropped first.
pub const MAX_TOASTS: usize = 5;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation succeeded.
    Success,
    /// Neutral information.
    Info,
    /// Operation failed.
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "ok",
            Self::Info => "info",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub kind: ToastKind,
    /// Message text.
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Bounded toast queue shared by the services and the views.
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Mutex<VecDeque<Toast>>,
}

impl Notifications {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a success toast.
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    /// Queues an informational toast.
    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    /// Queues an error toast.
    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    /// Most recent toast, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Toast> {
        self.lock().back().cloned()
    }

    /// Removes and returns every queued toast, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        self.lock().drain(..).collect()
    }

    /// Drops every queued toast.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut toasts = self.lock();
        while toasts.len() >= MAX_TOASTS {
            toasts.pop_front();
        }
        toasts.push_back(Toast { kind, message });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
