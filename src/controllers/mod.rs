pub mod bookings;
pub mod pages;
pub mod ws;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(pages::routes())
        .merge(bookings::routes())
        .merge(ws::routes())
}
