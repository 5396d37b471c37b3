use crate::entities::{prelude::*, search_log};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryOrder,
    QuerySelect, Set,
};

/// One group of search-log records sharing the same params document.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SearchGroupRow {
    pub params: String,
    pub search_type: String,
    pub last_searched: String,
    pub count: i64,
}

pub struct SearchLogRepository {
    conn: DatabaseConnection,
}

impl SearchLogRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        timestamp: &str,
        search_type: &str,
        params: &str,
        results_count: i32,
    ) -> Result<(), DbErr> {
        let active_model = search_log::ActiveModel {
            timestamp: Set(timestamp.to_string()),
            search_type: Set(search_type.to_string()),
            params: Set(params.to_string()),
            results_count: Set(results_count),
            ..Default::default()
        };

        SearchLog::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    /// Distinct params, most recently searched first.
    pub async fn recent_groups(&self, limit: u64) -> Result<Vec<SearchGroupRow>, DbErr> {
        Self::grouped()
            .order_by_desc(search_log::Column::Timestamp.max())
            .limit(limit)
            .into_model::<SearchGroupRow>()
            .all(&self.conn)
            .await
    }

    /// Distinct params, most searched first. Ties go to the more recent search.
    pub async fn popular_groups(&self, limit: u64) -> Result<Vec<SearchGroupRow>, DbErr> {
        Self::grouped()
            .order_by_desc(search_log::Column::Id.count())
            .order_by_desc(search_log::Column::Timestamp.max())
            .limit(limit)
            .into_model::<SearchGroupRow>()
            .all(&self.conn)
            .await
    }

    /// Records grouped by params. A params document always carries the same search type,
    /// so `MAX(search_type)` is the group's type.
    fn grouped() -> sea_orm::Select<SearchLog> {
        SearchLog::find()
            .select_only()
            .column(search_log::Column::Params)
            .column_as(search_log::Column::SearchType.max(), "search_type")
            .column_as(search_log::Column::Timestamp.max(), "last_searched")
            .column_as(search_log::Column::Id.count(), "count")
            .group_by(search_log::Column::Params)
    }
}
