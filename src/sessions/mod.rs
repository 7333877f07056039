//! Registry of live viewer sessions.
//!
//! Each connected WebSocket client is one session: the URL it is viewing plus
//! the sender half of its outbound message channel. The registry owns the set;
//! it is injected through `AppState` rather than living in a global.

pub mod dispatcher;
pub mod message;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use message::ServerMessage;

pub type SessionId = Uuid;
pub type ClientSender = mpsc::UnboundedSender<ServerMessage>;

pub struct Session {
    pub viewed_url: String,
    tx: ClientSender,
}

impl Session {
    /// Fire-and-forget push; a closed channel simply reports false.
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.tx.send(msg).is_ok()
    }
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    pub(crate) inner: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session viewing `viewed_url`. Returns the session id and
    /// the receiver half of its outbound channel; the connection handler drains
    /// the receiver into the socket.
    pub async fn register(
        &self,
        viewed_url: impl Into<String>,
    ) -> (SessionId, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        let session = Session {
            viewed_url: viewed_url.into(),
            tx,
        };
        self.inner.write().await.insert(id, session);
        (id, rx)
    }

    /// Remove a disconnected session. A later reconnect is a brand-new entry.
    pub async fn unregister(&self, id: &SessionId) {
        self.inner.write().await.remove(id);
    }

    /// Update the viewed URL when the client navigates without reconnecting.
    pub async fn visit(&self, id: &SessionId, url: impl Into<String>) {
        if let Some(session) = self.inner.write().await.get_mut(id) {
            session.viewed_url = url.into();
        }
    }

    /// Send a message to one specific session.
    pub async fn send_to(&self, id: &SessionId, msg: ServerMessage) -> bool {
        match self.inner.read().await.get(id) {
            Some(session) => session.send(msg),
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_visit_unregister_lifecycle() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);

        let (id, mut rx) = registry.register("/").await;
        assert_eq!(registry.len().await, 1);

        registry.visit(&id, "/seat-plan/1/2").await;
        let sessions = registry.inner.read().await;
        assert_eq!(sessions.get(&id).unwrap().viewed_url, "/seat-plan/1/2");
        drop(sessions);

        assert!(
            registry
                .send_to(&id, ServerMessage::update_text("#x", "hi"))
                .await
        );
        assert!(rx.try_recv().is_ok());

        registry.unregister(&id).await;
        assert!(registry.is_empty().await);
        assert!(
            !registry
                .send_to(&id, ServerMessage::update_text("#x", "gone"))
                .await
        );
    }

    #[tokio::test]
    async fn send_to_closed_channel_reports_false() {
        let registry = SessionRegistry::new();
        let (id, rx) = registry.register("/").await;
        drop(rx);
        assert!(
            !registry
                .send_to(&id, ServerMessage::update_text("#x", "hi"))
                .await
        );
    }
}
