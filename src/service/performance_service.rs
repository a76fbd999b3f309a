// service/performance_service.rs
use std::sync::Arc;
use std::time::Instant;

use crate::db::db::DBClient;

/// Observed latency of one unindexed and one indexed access path on the
/// users table. Purely observational.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QueryComparison {
    pub without_index_ms: u128,
    pub with_index_ms: u128,
    pub improvement: Option<f64>,
}

impl QueryComparison {
    pub fn new(without_index_ms: u128, with_index_ms: u128) -> Self {
        QueryComparison {
            without_index_ms,
            with_index_ms,
            improvement: speedup(without_index_ms, with_index_ms),
        }
    }

    pub fn improvement_label(&self) -> String {
        match self.improvement {
            Some(ratio) => format!("{}x", ratio),
            None => "no improvement".to_string(),
        }
    }
}

/// Ratio rounded to two decimals, or `None` when the unindexed path was
/// not slower (including a sub-millisecond indexed run of 0ms).
fn speedup(without_index_ms: u128, with_index_ms: u128) -> Option<f64> {
    if without_index_ms > with_index_ms && with_index_ms > 0 {
        let ratio = without_index_ms as f64 / with_index_ms as f64;
        Some((ratio * 100.0).round() / 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceService {
    db_client: Arc<DBClient>,
}

impl PerformanceService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Times a substring scan over the unindexed bio column against an
    /// equality lookup on the indexed role column.
    pub async fn compare_index_performance(&self) -> Result<QueryComparison, sqlx::Error> {
        let start = Instant::now();
        sqlx::query(
            r#"
            SELECT id FROM users
            WHERE bio ILIKE '%experienced%'
            ORDER BY created_at DESC
            LIMIT 100
            "#,
        )
        .fetch_all(&self.db_client.pool)
        .await?;
        let without_index_ms = start.elapsed().as_millis();

        let start = Instant::now();
        sqlx::query(
            r#"
            SELECT id FROM users
            WHERE role = 'freelancer'::user_role
            ORDER BY created_at DESC
            LIMIT 100
            "#,
        )
        .fetch_all(&self.db_client.pool)
        .await?;
        let with_index_ms = start.elapsed().as_millis();

        let comparison = QueryComparison::new(without_index_ms, with_index_ms);
        tracing::debug!(
            without_index_ms,
            with_index_ms,
            improvement = %comparison.improvement_label(),
            "index comparison finished"
        );

        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speedup_requires_a_slower_unindexed_path() {
        assert_eq!(speedup(100, 25), Some(4.0));
        assert_eq!(speedup(10, 3), Some(3.33));
        assert_eq!(speedup(5, 5), None);
        assert_eq!(speedup(3, 10), None);
        // sub-millisecond indexed run never divides by zero
        assert_eq!(speedup(10, 0), None);
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(QueryComparison::new(100, 25).improvement_label(), "4x");
        assert_eq!(
            QueryComparison::new(3, 10).improvement_label(),
            "no improvement"
        );
    }
}
