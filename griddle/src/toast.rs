//! Toast notifications.
//!
//! Toasts display temporary messages over the page, top-right. The host
//! pushes them (data-fetch failures, export results) and drives expiry
//! with its clock.

use std::time::{Duration, Instant};

use termcell::{truncate_to_width, Buffer, Rect, Style};

use crate::theme::Theme;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub duration: Duration,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Error)
    }

    fn with_level(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Queue of live toasts, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
    entries: Vec<(Toast, Instant)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast, now: Instant) {
        let expires = now + toast.duration;
        self.entries.push((toast, expires));
    }

    /// Drop expired toasts. Returns whether anything changed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(_, expires)| *expires > now);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Next expiry, for the host to size its poll timeout.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|(_, e)| *e).min()
    }

    /// Paint the queue into the top-right corner of `area`.
    pub fn paint(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        let max_width = (area.width / 2).clamp(20, 50);

        for (i, (toast, _)) in self.entries.iter().rev().enumerate() {
            let y = area.top() + i as u16;
            if y >= area.bottom() {
                break;
            }

            let accent = match toast.level {
                ToastLevel::Info => theme.info,
                ToastLevel::Success => theme.success,
                ToastLevel::Warning => theme.warning,
                ToastLevel::Error => theme.error,
            };

            let text = truncate_to_width(&toast.message, max_width as usize - 4);
            let width = (termcell::display_width(&text) + 4) as u16;
            let x = area.right().saturating_sub(width);
            let line = Rect::new(x, y, width, 1);

            buf.fill(line, accent.to_rgb(), theme.surface.to_rgb());
            let style = Style::new().bold();
            buf.put_str(
                x + 1,
                y,
                &format!("▌ {text}"),
                accent.to_rgb(),
                theme.surface.to_rgb(),
                style.text,
            );
        }
    }
}
