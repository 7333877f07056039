//! The booking flow: validate, check the plan, append the record, fan out.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::render;
use crate::sessions::dispatcher::{self, SeatBooked};
use crate::sessions::message::ServerMessage;
use crate::sessions::SessionId;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookSeatForm {
    #[validate(custom(function = not_blank))]
    pub row: String,
    #[validate(custom(function = not_blank))]
    pub col: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug)]
pub enum BookingOutcome {
    /// The originating session was live and already received its reply.
    Live,
    /// Stateless caller; this confirmation fragment becomes the response body.
    Page(String),
}

/// Book one seat. The lookup-then-insert sequence takes no lock and no
/// transaction: two simultaneous bookings of the same seat both succeed and
/// leave two records, which the derived seat status absorbs.
///
/// Broadcast delivery is decoupled from the result: the caller gets a success
/// even if no other session could be notified.
pub async fn book(
    state: &AppState,
    form: BookSeatForm,
    origin: Option<SessionId>,
) -> Result<BookingOutcome, AppError> {
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let row = form.row.trim().to_string();
    let col = form.col.trim().to_string();

    if !state.seat_plan.contains(&row, &col) {
        return Err(AppError::SeatNotFound);
    }

    let booking = state.store.insert(&row, &col, Utc::now().naive_utc()).await?;
    let label = format!("{row}{col}");
    info!(booking_id = booking.id, seat = %label, "seat booked");

    let event = SeatBooked { row, col };
    dispatcher::broadcast(&state.sessions, &event, origin).await;

    match origin {
        Some(id) => {
            let reply = ServerMessage::batch(vec![
                ServerMessage::update_text(
                    "#book-seat-container",
                    format!("Booked seat {label} (successful)"),
                ),
                ServerMessage::append("body", render::redirect_node("/")),
            ]);
            // Best effort: an origin that disconnected mid-request just
            // misses its confirmation.
            state.sessions.send_to(&id, reply).await;
            Ok(BookingOutcome::Live)
        }
        None => Ok(BookingOutcome::Page(render::booking_confirmed(&label))),
    }
}
