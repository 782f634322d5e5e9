// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message that dismisses itself once its timeout has elapsed.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
    pub timeout: Duration,
    pub shown_at: Instant,
}

impl Notification {
    pub fn success(text: impl Into<String>, timeout: Duration) -> Self {
        Self::new(NotificationKind::Success, "Success", text, timeout)
    }

    pub fn error(text: impl Into<String>, timeout: Duration) -> Self {
        Self::new(NotificationKind::Error, "Error", text, timeout)
    }

    fn new(kind: NotificationKind, title: &str, text: impl Into<String>, timeout: Duration) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            text: text.into(),
            timeout,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.timeout
    }
}
