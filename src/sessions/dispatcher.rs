//! Fan-out of state-change events to connected viewer sessions.
//!
//! Delivery is fire-and-forget: no acknowledgement, no retry, no ordering
//! guarantee across sessions. A session whose channel is closed is reaped by
//! its own disconnect handling, not here.

use tracing::debug;

use super::message::ServerMessage;
use super::{SessionId, SessionRegistry};

/// URL of the seat-map view that seat updates apply to.
pub const SEAT_MAP_URL: &str = "/";

/// A seat transitioned to occupied.
#[derive(Debug, Clone)]
pub struct SeatBooked {
    pub row: String,
    pub col: String,
}

impl SeatBooked {
    /// Selector for the anchor rendering this seat on the map.
    pub fn selector(&self) -> String {
        format!(
            r#".seat[data-row="{}"][data-col="{}"]"#,
            self.row, self.col
        )
    }

    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::update_attrs(self.selector(), &[("class", "seat occupied")])
    }
}

/// Notify every session viewing the seat map, except the originating session,
/// which receives its own tailored reply from the booking flow instead.
pub async fn broadcast(registry: &SessionRegistry, event: &SeatBooked, origin: Option<SessionId>) {
    let msg = event.to_message();
    let sessions = registry.inner.read().await;
    let mut sent = 0usize;
    for (id, session) in sessions.iter() {
        if Some(*id) == origin {
            continue;
        }
        if session.viewed_url != SEAT_MAP_URL {
            continue;
        }
        if session.send(msg.clone()) {
            sent += 1;
        }
    }
    debug!(row = %event.row, col = %event.col, sent, "broadcast seat update");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;

    fn booked(row: &str, col: &str) -> SeatBooked {
        SeatBooked {
            row: row.to_string(),
            col: col.to_string(),
        }
    }

    #[test]
    fn selector_targets_the_seat_anchor() {
        assert_eq!(
            booked("2", "3").selector(),
            r#".seat[data-row="2"][data-col="3"]"#
        );
    }

    #[tokio::test]
    async fn notifies_map_viewers_except_origin() {
        let registry = SessionRegistry::new();
        let (_viewer, mut viewer_rx) = registry.register(SEAT_MAP_URL).await;
        let (_elsewhere, mut elsewhere_rx) = registry.register("/seat-plan/1/2").await;
        let (origin, mut origin_rx) = registry.register(SEAT_MAP_URL).await;

        broadcast(&registry, &booked("1", "1"), Some(origin)).await;

        let msg = viewer_rx.try_recv().unwrap();
        assert_eq!(msg, booked("1", "1").to_message());
        assert_eq!(viewer_rx.try_recv(), Err(TryRecvError::Empty));

        assert_eq!(elsewhere_rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(origin_rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn without_origin_every_map_viewer_is_notified() {
        let registry = SessionRegistry::new();
        let (_a, mut a_rx) = registry.register(SEAT_MAP_URL).await;
        let (_b, mut b_rx) = registry.register(SEAT_MAP_URL).await;

        broadcast(&registry, &booked("3", "2"), None).await;

        assert!(a_rx.try_recv().is_ok());
        assert!(b_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn closed_channel_does_not_disturb_the_rest() {
        let registry = SessionRegistry::new();
        let (_dead, dead_rx) = registry.register(SEAT_MAP_URL).await;
        drop(dead_rx);
        let (_live, mut live_rx) = registry.register(SEAT_MAP_URL).await;

        broadcast(&registry, &booked("1", "1"), None).await;

        assert!(live_rx.try_recv().is_ok());
        // The dead session stays registered; its disconnect handler owns removal.
        assert_eq!(registry.len().await, 2);
    }
}
