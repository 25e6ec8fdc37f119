//! Transient, auto-dismissing user notifications.

use std::time::{Duration, Instant};

/// How long a notification stays visible unless dismissed earlier.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= NOTIFICATION_TTL
    }
}

/// Queue of live notifications, oldest first. Each entry expires on its own
/// clock and can be dismissed individually.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.push_at(message, kind, Instant::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        created: Instant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            message: message.into(),
            kind,
            created,
        });
        id
    }

    /// Remove one notification. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Drop every notification older than [`NOTIFICATION_TTL`] at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let start = Instant::now();
        let mut queue = Notifications::default();
        queue.push_at("saved", NotificationKind::Success, start);

        queue.expire(start + Duration::from_millis(2999));
        assert_eq!(queue.len(), 1);

        queue.expire(start + NOTIFICATION_TTL);
        assert!(queue.is_empty());
    }

    #[test]
    fn each_notification_has_its_own_clock() {
        let start = Instant::now();
        let mut queue = Notifications::default();
        queue.push_at("first", NotificationKind::Info, start);
        queue.push_at("second", NotificationKind::Info, start + Duration::from_secs(2));

        queue.expire(start + Duration::from_secs(3));
        let left: Vec<&str> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["second"]);
    }

    #[test]
    fn dismiss_removes_only_that_id() {
        let mut queue = Notifications::default();
        let a = queue.push("a", NotificationKind::Info);
        let b = queue.push("b", NotificationKind::Error);
        assert_ne!(a, b);

        queue.dismiss(a);
        queue.dismiss(999);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.latest().map(|n| n.id), Some(b));
    }
}
