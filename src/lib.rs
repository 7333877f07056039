pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod render;
pub mod seat_plan;
pub mod services;
pub mod sessions;
pub mod store;

use std::sync::Arc;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn store::BookingStore>,
    pub sessions: sessions::SessionRegistry,
    pub seat_plan: seat_plan::SeatPlan,
}
