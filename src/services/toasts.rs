use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip)]
    expires_at: Instant,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToastEvent {
    Added(Toast),
    Removed { id: Uuid },
}

/// Transient user-facing messages. Every push is kept until dismissed or
/// until its lifetime runs out; nothing is deduplicated or capped.
pub struct Toasts {
    ttl: Duration,
    active: Mutex<Vec<Toast>>,
    tx: broadcast::Sender<ToastEvent>,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Arc<Self> {
        let (tx, _) = broadcast::channel(64);
        Arc::new(Self {
            ttl,
            active: Mutex::new(Vec::new()),
            tx,
        })
    }

    pub fn info(self: &Arc<Self>, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Info, message.into())
    }

    pub fn success(self: &Arc<Self>, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(self: &Arc<Self>, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, message.into())
    }

    pub fn push(self: &Arc<Self>, kind: ToastKind, message: String) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message,
            expires_at: Instant::now() + self.ttl,
        };
        let id = toast.id;
        tracing::debug!(kind = kind.as_str(), message = %toast.message, "toast");

        if let Ok(mut active) = self.active.lock() {
            active.push(toast.clone());
        }
        // No subscribers is fine
        let _ = self.tx.send(ToastEvent::Added(toast));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let toasts: Weak<Self> = Arc::downgrade(self);
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                if let Some(toasts) = toasts.upgrade() {
                    toasts.dismiss(id);
                }
            });
        }

        id
    }

    /// Removes a toast early. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = match self.active.lock() {
            Ok(mut active) => {
                let before = active.len();
                active.retain(|t| t.id != id);
                active.len() != before
            }
            Err(_) => false,
        };
        if removed {
            let _ = self.tx.send(ToastEvent::Removed { id });
        }
        removed
    }

    /// Toasts still within their lifetime, oldest first. Expired ones whose
    /// timer has not fired yet are dropped here and announced as removed.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let (live, expired): (Vec<Toast>, Vec<Toast>) = match self.active.lock() {
            Ok(mut active) => {
                let (live, expired) = active.drain(..).partition(|t| t.expires_at > now);
                *active = live;
                (active.clone(), expired)
            }
            Err(_) => return Vec::new(),
        };
        for toast in expired {
            let _ = self.tx.send(ToastEvent::Removed { id: toast.id });
        }
        live
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_ttl() {
        let toasts = Toasts::new(Duration::from_secs(5));
        toasts.info("hello");
        assert_eq!(toasts.active().len(), 1);

        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert_eq!(toasts.active().len(), 1);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(toasts.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_stack_without_dedupe() {
        let toasts = Toasts::new(Duration::from_secs(5));
        toasts.error("same");
        toasts.error("same");
        toasts.success("other");
        let active = toasts.active();
        assert_eq!(active.len(), 3);
        assert_eq!(active[0].kind, ToastKind::Error);
        assert_eq!(active[2].message, "other");
    }

    #[tokio::test]
    async fn test_dismiss_broadcasts_removal() {
        let toasts = Toasts::new(Duration::from_secs(5));
        let mut rx = toasts.subscribe();
        let id = toasts.info("bye");

        assert!(matches!(rx.recv().await.unwrap(), ToastEvent::Added(t) if t.id == id));
        assert!(toasts.dismiss(id));
        assert!(!toasts.dismiss(id));
        assert!(matches!(rx.recv().await.unwrap(), ToastEvent::Removed { id: removed } if removed == id));
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn test_pruned_toast_is_announced_once() {
        // No runtime: no expiry timer, so only `active` can drop it.
        let toasts = Toasts::new(Duration::ZERO);
        let mut rx = toasts.subscribe();
        let id = toasts.error("gone");

        assert!(toasts.active().is_empty());
        assert!(toasts.active().is_empty());
        assert!(!toasts.dismiss(id));

        assert!(matches!(rx.try_recv().unwrap(), ToastEvent::Added(t) if t.id == id));
        assert!(matches!(rx.try_recv().unwrap(), ToastEvent::Removed { id: removed } if removed == id));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_json_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(ToastEvent::Removed { id }).unwrap();
        assert_eq!(json["event"], "removed");
        assert_eq!(json["id"], id.to_string());
    }
}
