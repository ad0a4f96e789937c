use std::{sync::OnceLock, time::Instant};

use deadpool_postgres::Client;
use tokio_postgres::{types::ToSql, Error as PgError, Row};
use tracing::warn;

fn slow_query_threshold_ms() -> Option<u64> {
    static CACHE: OnceLock<Option<u64>> = OnceLock::new();

    *CACHE.get_or_init(|| {
        std::env::var("IM_DB_LOG_MIN_DURATION_MS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(|v| v.max(0) as u64)
            .filter(|v| *v > 0)
    })
}

fn maybe_log_slow_query(label: &str, started_at: Instant) {
    if let Some(threshold_ms) = slow_query_threshold_ms() {
        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        if elapsed_ms >= threshold_ms {
            warn!(query = label, elapsed_ms, "slow_query_detected");
        }
    }
}

/// Runs a cached prepared statement, logging it when it exceeds
/// `IM_DB_LOG_MIN_DURATION_MS`.
pub async fn timed_query(
    client: &Client,
    statement: &str,
    params: &[&(dyn ToSql + Sync)],
    label: &str,
) -> Result<Vec<Row>, PgError> {
    let started = Instant::now();
    let prepared = client.prepare_cached(statement).await?;
    let result = client.query(&prepared, params).await;
    maybe_log_slow_query(label, started);
    result
}
