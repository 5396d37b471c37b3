//! Catalog lookups, one scoped connection per call.

use crate::db::repositories::CatalogRepository;
use crate::db::{ConnectionManager, StoreError};
use crate::models::{Film, Genre, YearBounds};
use async_trait::async_trait;
use tracing::debug;

/// Read operations against the film catalog.
///
/// Every call opens and closes its own connection. A failed call returns the
/// [`StoreError`] so callers can tell "no matches" from "store unavailable".
#[async_trait(?Send)]
pub trait CatalogService {
    /// Case-insensitive substring match on the title, `limit` films from `offset`.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Film>, StoreError>;

    /// Exact genre name and release year within `year_from..=year_to`.
    async fn search_by_genre_and_years(
        &self,
        genre: &str,
        year_from: i32,
        year_to: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Film>, StoreError>;

    /// All genres ordered by name.
    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError>;

    /// Release year range across the whole catalog, `None` for an empty catalog.
    async fn year_bounds(&self) -> Result<Option<YearBounds>, StoreError>;
}

pub struct SeaOrmCatalogService {
    connections: ConnectionManager,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(connections: ConnectionManager) -> Self {
        Self { connections }
    }
}

#[async_trait(?Send)]
impl CatalogService for SeaOrmCatalogService {
    async fn search_by_keyword(
        &self,
        keyword: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Film>, StoreError> {
        debug!(keyword, offset, limit, "Searching films by keyword");
        self.connections
            .scoped(async |conn| {
                CatalogRepository::new(conn.clone())
                    .search_by_keyword(keyword, offset, limit)
                    .await
            })
            .await
    }

    async fn search_by_genre_and_years(
        &self,
        genre: &str,
        year_from: i32,
        year_to: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Film>, StoreError> {
        debug!(genre, year_from, year_to, offset, limit, "Searching films by genre and years");
        self.connections
            .scoped(async |conn| {
                CatalogRepository::new(conn.clone())
                    .search_by_genre_and_years(genre, year_from, year_to, offset, limit)
                    .await
            })
            .await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        self.connections
            .scoped(async |conn| CatalogRepository::new(conn.clone()).list_genres().await)
            .await
    }

    async fn year_bounds(&self) -> Result<Option<YearBounds>, StoreError> {
        self.connections
            .scoped(async |conn| CatalogRepository::new(conn.clone()).year_bounds().await)
            .await
    }
}
