use axum::{
    extract::State,
    response::Html,
    routing::post,
    Form, Router,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::render;
use crate::services::booking::{self, BookSeatForm, BookingOutcome};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seat-plan/book", post(create_booking))
}

// POST /seat-plan/book - stateless fallback when the socket is not connected
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BookSeatForm>,
) -> Result<Html<String>, AppError> {
    match booking::book(&state, form, None).await? {
        BookingOutcome::Page(fragment) => {
            Ok(Html(render::page("Booking confirmed", &fragment)))
        }
        // Not produced for stateless callers.
        BookingOutcome::Live => Ok(Html(String::new())),
    }
}
