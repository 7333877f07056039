//! Persistence boundary for booking facts.
//!
//! The store is append-only. Seat status is never written anywhere; it is
//! derived by querying for record existence, so a double insert for the same
//! coordinate is a data anomaly rather than an error.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::database::Database;
use crate::models::Booking;

/// Canonical (row, col) pair as stored.
pub type Coord = (String, String);

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Append one booking record. No uniqueness check is made.
    async fn insert(
        &self,
        row: &str,
        col: &str,
        book_time: NaiveDateTime,
    ) -> Result<Booking, sqlx::Error>;

    /// Seat lookup: true iff at least one record matches both labels exactly.
    async fn is_booked(&self, row: &str, col: &str) -> Result<bool, sqlx::Error>;

    /// Every distinct booked coordinate, for painting the whole map at once.
    async fn booked_coords(&self) -> Result<HashSet<Coord>, sqlx::Error>;
}

pub struct PgBookingStore {
    db: Database,
}

impl PgBookingStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(
        &self,
        row: &str,
        col: &str,
        book_time: NaiveDateTime,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO booking ("row", col, book_time)
            VALUES ($1, $2, $3)
            RETURNING id, "row", col, book_time, created_at, updated_at
            "#,
        )
        .bind(row)
        .bind(col)
        .bind(book_time)
        .fetch_one(&self.db.pool)
        .await
    }

    async fn is_booked(&self, row: &str, col: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM booking WHERE "row" = $1 AND col = $2)"#,
        )
        .bind(row)
        .bind(col)
        .fetch_one(&self.db.pool)
        .await
    }

    async fn booked_coords(&self) -> Result<HashSet<Coord>, sqlx::Error> {
        let coords = sqlx::query_as::<_, Coord>(r#"SELECT DISTINCT "row", col FROM booking"#)
            .fetch_all(&self.db.pool)
            .await?;
        Ok(coords.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use tokio::sync::Mutex;

    /// In-memory store for exercising the booking flow without Postgres.
    #[derive(Default)]
    pub(crate) struct MemoryBookingStore {
        rows: Mutex<Vec<Booking>>,
    }

    impl MemoryBookingStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) async fn seed(&self, row: &str, col: &str) {
            let _ = self.insert(row, col, chrono::Utc::now().naive_utc()).await;
        }

        pub(crate) async fn count(&self) -> usize {
            self.rows.lock().await.len()
        }
    }

    #[async_trait]
    impl BookingStore for MemoryBookingStore {
        async fn insert(
            &self,
            row: &str,
            col: &str,
            book_time: NaiveDateTime,
        ) -> Result<Booking, sqlx::Error> {
            let mut rows = self.rows.lock().await;
            let booking = Booking {
                id: rows.len() as i64 + 1,
                row: row.to_string(),
                col: col.to_string(),
                book_time,
                created_at: book_time,
                updated_at: book_time,
            };
            rows.push(booking.clone());
            Ok(booking)
        }

        async fn is_booked(&self, row: &str, col: &str) -> Result<bool, sqlx::Error> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().any(|b| b.row == row && b.col == col))
        }

        async fn booked_coords(&self) -> Result<HashSet<Coord>, sqlx::Error> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().map(|b| (b.row.clone(), b.col.clone())).collect())
        }
    }

    #[tokio::test]
    async fn booked_coords_deduplicates_double_bookings() {
        let store = MemoryBookingStore::new();
        store.seed("1", "1").await;
        store.seed("1", "1").await;
        store.seed("2", "3").await;

        assert_eq!(store.count().await, 3);
        assert!(store.is_booked("1", "1").await.unwrap());
        assert_eq!(store.booked_coords().await.unwrap().len(), 2);
    }
}
