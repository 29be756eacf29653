/// Transient notices shown in the notice bar
use std::time::{Duration, Instant};

use crate::error::ApiError;

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Oldest notices are dropped beyond this
const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    /// `Error: <server message>` when the server explained itself, else `generic`
    pub fn from_api(err: &ApiError, generic: &str) -> Self {
        match err.server_message() {
            Some(message) => Self::error(format!("Error: {message}")),
            None => Self::error(generic),
        }
    }
}

/// The notices currently on screen, newest last
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<(Notice, Instant)>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn push_at(&mut self, notice: Notice, at: Instant) {
        self.items.push((notice, at));
        if self.items.len() > MAX_NOTICES {
            self.items.remove(0);
        }
    }

    /// Drop notices older than the TTL
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < NOTICE_TTL);
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter().map(|(notice, _)| notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_prefers_server_message() {
        let err = ApiError::Server { status: 401, message: Some("Credenciales inválidas".into()) };
        assert_eq!(Notice::from_api(&err, "generic").message, "Error: Credenciales inválidas");

        let err = ApiError::Transport("connection refused".into());
        let notice = Notice::from_api(&err, "Hubo un problema al subir las imágenes.");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Hubo un problema al subir las imágenes.");
    }

    #[test]
    fn test_expiry() {
        let start = Instant::now();
        let mut notices = Notices::default();
        notices.push_at(Notice::info("old"), start);
        notices.push_at(Notice::info("new"), start + Duration::from_secs(3));

        notices.expire(start + Duration::from_secs(4));
        assert_eq!(notices.iter().count(), 2);

        notices.expire(start + Duration::from_secs(6));
        let left: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(left, ["new"]);

        notices.expire(start + Duration::from_secs(9));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_cap_and_dismiss() {
        let mut notices = Notices::default();
        for i in 0..6 {
            notices.push(Notice::info(format!("n{i}")));
        }
        let shown: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(shown, ["n2", "n3", "n4", "n5"]);

        notices.dismiss(0);
        notices.dismiss(42);
        assert_eq!(notices.iter().next().unwrap().message, "n3");
    }
}
