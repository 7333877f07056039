use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// One persisted booking fact. Rows are append-only: there is no update or
/// delete path, and "booked" is derived as "at least one record exists for
/// this coordinate".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: i64,
    pub row: String,
    pub col: String,
    pub book_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
