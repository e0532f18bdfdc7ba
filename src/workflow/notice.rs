use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Instant,
}

/// Holds at most one self-dismissing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeBoard {
    current: Option<Notice>,
    display_for: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new(display_for: Duration) -> Self {
        Self {
            current: None,
            display_for,
        }
    }

    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    pub fn raise(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind,
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn raise_error(&mut self, message: impl Into<String>, now: Instant) {
        self.raise(NoticeKind::Error, message, now);
    }

    pub fn raise_info(&mut self, message: impl Into<String>, now: Instant) {
        self.raise(NoticeKind::Info, message, now);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn active(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| now.saturating_duration_since(notice.raised_at) < self.display_for)
    }

    /// Latest notice regardless of expiry.
    pub fn last(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_display_window() {
        let start = Instant::now();
        let mut board = NoticeBoard::default();
        board.raise_error("A communication error occurred", start);

        let shown = board
            .active(start + Duration::from_millis(4_999))
            .expect("still visible");
        assert_eq!(shown.kind, NoticeKind::Error);
        assert!(board.active(start + Duration::from_secs(5)).is_none());
        assert!(board.last().is_some());
    }

    #[test]
    fn newer_notice_restarts_the_window() {
        let start = Instant::now();
        let mut board = NoticeBoard::new(Duration::from_secs(5));
        board.raise_error("first", start);
        board.raise_info("second", start + Duration::from_secs(4));

        let shown = board
            .active(start + Duration::from_secs(8))
            .expect("second notice visible");
        assert_eq!(shown.message, "second");
    }

    #[test]
    fn clear_hides_immediately() {
        let now = Instant::now();
        let mut board = NoticeBoard::default();
        board.raise_error("boom", now);
        board.clear();
        assert!(board.active(now).is_none());
    }
}
