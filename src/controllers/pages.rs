use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::render;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(seat_map))
        .route("/seat-plan/{row}/{col}", get(seat_page))
}

// GET /
async fn seat_map(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let booked = state.store.booked_coords().await?;
    let form = render::seat_form_hint();
    Ok(Html(render::seat_map_page(
        "Seat Plan",
        &state.seat_plan,
        &booked,
        &form,
    )))
}

// GET /seat-plan/{row}/{col} - the map plus the booking form for one seat
async fn seat_page(
    State(state): State<Arc<AppState>>,
    Path((row, col)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let booked = state.store.booked_coords().await?;

    if !state.seat_plan.contains(&row, &col) {
        // Unknown coordinate: show the map with the hint instead of a form.
        let form = render::seat_form_hint();
        return Ok(Html(render::seat_map_page(
            "Seat Plan",
            &state.seat_plan,
            &booked,
            &form,
        )));
    }

    let is_booked = state.store.is_booked(&row, &col).await?;
    let status = if is_booked { "occupied" } else { "available" };
    let title = format!("Seat {row}{col}: {status}");
    let form = render::seat_form(&row, &col, is_booked);
    Ok(Html(render::seat_map_page(
        &title,
        &state.seat_plan,
        &booked,
        &form,
    )))
}
