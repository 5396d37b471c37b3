use super::Session;
use crate::cli::format::render_films;
use crate::db::StoreError;
use crate::models::{Film, SearchParams};
use crate::services::CatalogService;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// A film search that can be fetched page by page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmQuery {
    Keyword(String),
    GenreYears {
        genre: String,
        year_from: i32,
        year_to: i32,
    },
}

impl FilmQuery {
    pub async fn fetch(
        &self,
        catalog: &dyn CatalogService,
        pager: &Pager,
    ) -> Result<Vec<Film>, StoreError> {
        match self {
            Self::Keyword(keyword) => {
                catalog
                    .search_by_keyword(keyword, pager.offset(), pager.page_size())
                    .await
            }
            Self::GenreYears {
                genre,
                year_from,
                year_to,
            } => {
                catalog
                    .search_by_genre_and_years(
                        genre,
                        *year_from,
                        *year_to,
                        pager.offset(),
                        pager.page_size(),
                    )
                    .await
            }
        }
    }

    /// Parameters recorded in the search log.
    #[must_use]
    pub fn params(&self) -> SearchParams {
        match self {
            Self::Keyword(keyword) => SearchParams::Keyword {
                keyword: keyword.clone(),
            },
            Self::GenreYears {
                genre,
                year_from,
                year_to,
            } => SearchParams::GenreYears {
                genre: genre.clone(),
                year_from: *year_from,
                year_to: *year_to,
            },
        }
    }
}

/// Page position. The offset is always `page * page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: u64,
    page: u64,
}

impl Pager {
    /// # Panics
    ///
    /// Panics if `page_size` is zero; config validation rejects that earlier.
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self { page_size, page: 0 }
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page * self.page_size
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    /// A page shorter than the page size is the last one.
    #[must_use]
    pub const fn is_last(&self, fetched: usize) -> bool {
        (fetched as u64) < self.page_size
    }

    pub const fn advance(&mut self) {
        self.page += 1;
    }
}

/// Fetches, logs, and renders pages until the user goes back or results run out.
///
/// An empty first page (no matches or a store failure) offers a retry; an empty later
/// page ends the listing. Only pages with films are logged.
pub async fn page_through<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    query: &FilmQuery,
) -> anyhow::Result<()> {
    let mut pager = Pager::new(session.page_size);

    loop {
        let films = match query.fetch(session.catalog, &pager).await {
            Ok(films) => films,
            Err(e) => {
                warn!(error = %e, offset = pager.offset(), "Film search failed");
                writeln!(session.console, "❗ {e}")?;
                Vec::new()
            }
        };

        if films.is_empty() {
            if pager.is_first() {
                if session
                    .console
                    .confirm("Failed to load results. Try again? (yes/no): ")?
                {
                    continue;
                }
                return Ok(());
            }
            writeln!(session.console, "No more results found.")?;
            return Ok(());
        }

        if !session
            .search_log
            .record_search(&query.params(), films.len())
            .await
        {
            debug!("Search was not recorded in the log");
        }

        render_films(&mut session.console, &films)?;

        if pager.is_last(films.len()) {
            debug!(offset = pager.offset(), "Short page, end of results");
        }

        let answer = session.console.prompt(&format!(
            "\nShow next {} movies? (1 - yes, 2 - back to menu): ",
            pager.page_size()
        ))?;
        if answer == "1" {
            pager.advance();
        } else {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_multiples_of_page_size() {
        let mut pager = Pager::new(10);
        assert!(pager.is_first());
        assert_eq!(pager.offset(), 0);

        pager.advance();
        pager.advance();
        assert_eq!(pager.offset(), 20);
        assert!(!pager.is_first());
    }

    #[test]
    fn test_short_page_is_last() {
        let pager = Pager::new(10);
        assert!(pager.is_last(0));
        assert!(pager.is_last(3));
        assert!(!pager.is_last(10));
    }

    #[test]
    fn test_query_params() {
        let query = FilmQuery::GenreYears {
            genre: "Comedy".to_string(),
            year_from: 2000,
            year_to: 2000,
        };
        assert_eq!(
            query.params(),
            SearchParams::GenreYears {
                genre: "Comedy".to_string(),
                year_from: 2000,
                year_to: 2000,
            }
        );
    }
}
