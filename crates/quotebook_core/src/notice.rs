//! Transient user notifications that clear themselves after a TTL.
//!
//! # Responsibility
//! - Hold the one notice a host should currently display.
//!
//! # Invariants
//! - At most one notice is visible; posting replaces the previous one.
//! - A notice is never visible once its TTL has elapsed.

use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    posted_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            posted_at: Instant::now(),
            ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Single-slot notification region; a new notice replaces the previous one.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn post(&mut self, message: impl Into<String>) {
        self.current = Some(Notice::new(message, self.ttl));
    }

    /// Message still visible at `now`; expired notices are dropped.
    pub fn visible_at(&mut self, now: Instant) -> Option<&str> {
        if self
            .current
            .as_ref()
            .is_some_and(|notice| notice.is_expired_at(now))
        {
            self.current = None;
        }
        self.current.as_ref().map(Notice::message)
    }

    pub fn visible(&mut self) -> Option<&str> {
        self.visible_at(Instant::now())
    }
}
