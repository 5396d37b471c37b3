//! Search log: best-effort writes and the two statistics aggregations.

use crate::db::repositories::SearchLogRepository;
use crate::db::{ConnectionManager, StoreError};
use crate::models::{SearchGroup, SearchParams};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

/// Number of groups returned by each statistics query.
pub const STATS_LIMIT: u64 = 5;

#[async_trait(?Send)]
pub trait SearchLogService {
    /// Appends one search event. Returns `false` if it could not be stored; never fails.
    async fn record_search(&self, params: &SearchParams, results_count: usize) -> bool;

    /// Up to [`STATS_LIMIT`] distinct searches, most recent first.
    async fn recent_searches(&self) -> Result<Vec<SearchGroup>, StoreError>;

    /// Up to [`STATS_LIMIT`] distinct searches, most frequent first.
    async fn popular_searches(&self) -> Result<Vec<SearchGroup>, StoreError>;
}

pub struct SeaOrmSearchLogService {
    connections: ConnectionManager,
}

impl SeaOrmSearchLogService {
    #[must_use]
    pub const fn new(connections: ConnectionManager) -> Self {
        Self { connections }
    }
}

#[async_trait(?Send)]
impl SearchLogService for SeaOrmSearchLogService {
    async fn record_search(&self, params: &SearchParams, results_count: usize) -> bool {
        let document = match params.to_document() {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Failed to serialize search params");
                return false;
            }
        };
        // Fixed-width UTC timestamps sort chronologically as text.
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let search_type = params.search_type();
        let count = i32::try_from(results_count).unwrap_or(i32::MAX);

        let result = self
            .connections
            .scoped(async |conn| {
                SearchLogRepository::new(conn.clone())
                    .add(&timestamp, search_type.as_str(), &document, count)
                    .await
            })
            .await;

        match result {
            Ok(()) => {
                debug!(%search_type, params = %document, results_count, "Search logged");
                true
            }
            Err(e) => {
                warn!(error = %e, %search_type, "Failed to log search");
                false
            }
        }
    }

    async fn recent_searches(&self) -> Result<Vec<SearchGroup>, StoreError> {
        let rows = self
            .connections
            .scoped(async |conn| {
                SearchLogRepository::new(conn.clone())
                    .recent_groups(STATS_LIMIT)
                    .await
            })
            .await
            .inspect_err(|e| warn!(error = %e, "Recent searches aggregation failed"))?;

        Ok(rows.into_iter().map(into_group).collect())
    }

    async fn popular_searches(&self) -> Result<Vec<SearchGroup>, StoreError> {
        let rows = self
            .connections
            .scoped(async |conn| {
                SearchLogRepository::new(conn.clone())
                    .popular_groups(STATS_LIMIT)
                    .await
            })
            .await
            .inspect_err(|e| warn!(error = %e, "Popular searches aggregation failed"))?;

        Ok(rows.into_iter().map(into_group).collect())
    }
}

fn into_group(row: crate::db::repositories::SearchGroupRow) -> SearchGroup {
    SearchGroup::from_stored(&row.params, &row.search_type, row.last_searched, row.count)
}
