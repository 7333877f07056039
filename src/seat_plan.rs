//! The configured seating layout.
//!
//! The plan defines which coordinates exist at all; whether a seat is booked
//! is a separate question answered by the booking store.

/// Labelled grid of seats. Labels are strings so "A"/"12"/"1" all work.
#[derive(Debug, Clone)]
pub struct SeatPlan {
    pub rows: Vec<SeatRow>,
}

#[derive(Debug, Clone)]
pub struct SeatRow {
    pub label: String,
    pub cols: Vec<String>,
}

impl SeatPlan {
    /// The 3x3 demo plan, rows and columns labelled "1".."3".
    pub fn demo() -> Self {
        let rows = (1..=3)
            .map(|r| SeatRow {
                label: r.to_string(),
                cols: (1..=3).map(|c| c.to_string()).collect(),
            })
            .collect();
        SeatPlan { rows }
    }

    /// Whether the coordinate names a seat that exists in this plan.
    pub fn contains(&self, row: &str, col: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.label == row && r.cols.iter().any(|c| c == col))
    }
}

impl Default for SeatPlan {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_is_three_by_three() {
        let plan = SeatPlan::demo();
        assert_eq!(plan.rows.len(), 3);
        assert!(plan.rows.iter().all(|r| r.cols.len() == 3));
    }

    #[test]
    fn contains_known_and_unknown_coordinates() {
        let plan = SeatPlan::demo();
        assert!(plan.contains("1", "1"));
        assert!(plan.contains("3", "3"));
        assert!(!plan.contains("4", "1"));
        assert!(!plan.contains("1", "0"));
        assert!(!plan.contains("", ""));
    }
}
