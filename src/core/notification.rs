//! # Notification Service
//!
//! Transient toasts with a three-step lifecycle:
//!
//! ```text
//!   show()            +10ms            duration / dismiss()       +300ms
//!     │── Entering ──────│── Visible ────────│── Leaving ──────────│ removed
//! ```
//!
//! A duration of zero disables auto-dismiss; the toast then stays until
//! dismissed explicitly.

use std::time::{Duration, Instant};

use super::texts::Notice;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);
/// Short duration used for success confirmations.
pub const SHORT_TOAST_DURATION: Duration = Duration::from_secs(2);
const ENTER_DELAY: Duration = Duration::from_millis(10);
const FADE_OUT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    shown_at: Instant,
    duration: Duration,
    leaving_since: Option<Instant>,
}

impl Toast {
    /// True once the entrance delay has passed and until a dismissal starts.
    pub fn is_visible(&self, now: Instant) -> bool {
        self.leaving_since.is_none() && now.saturating_duration_since(self.shown_at) >= ENTER_DELAY
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving_since.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: ToastKind, notice: Notice, duration: Duration, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        log::debug!("Toast {} ({:?}): {}", id, kind, notice.title);
        self.toasts.push(Toast {
            id,
            kind,
            title: notice.title.to_string(),
            message: notice.message.to_string(),
            shown_at: now,
            duration,
            leaving_since: None,
        });
        id
    }

    /// Start the fade-out of a toast (the close control).
    pub fn dismiss(&mut self, id: u64, now: Instant) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.leaving_since.get_or_insert(now);
        }
    }

    /// Dismiss the newest toast that is not already leaving.
    pub fn dismiss_latest(&mut self, now: Instant) -> Option<u64> {
        let toast = self.toasts.iter_mut().rev().find(|t| !t.is_leaving())?;
        toast.leaving_since = Some(now);
        Some(toast.id)
    }

    /// Advance auto-dismiss timers and drop toasts whose fade-out completed.
    pub fn tick(&mut self, now: Instant) {
        for toast in &mut self.toasts {
            if toast.leaving_since.is_none()
                && !toast.duration.is_zero()
                && now.saturating_duration_since(toast.shown_at) >= toast.duration
            {
                toast.leaving_since = Some(toast.shown_at + toast.duration);
            }
        }
        self.toasts.retain(|t| match t.leaving_since {
            Some(since) => now.saturating_duration_since(since) < FADE_OUT,
            None => true,
        });
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
