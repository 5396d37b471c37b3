mod config;
mod genre;
mod keyword;
mod menu;
mod paging;
mod stats;

use crate::cli::console::Console;
use crate::services::{CatalogService, SearchLogService};

pub use config::{cmd_init, cmd_show_config};
pub use genre::cmd_genre_year_search;
pub use keyword::cmd_keyword_search;
pub use menu::cmd_interactive;
pub use paging::{FilmQuery, Pager};
pub use stats::cmd_statistics;

/// Everything an interactive command needs: the two stores, page size, and the console.
pub struct Session<'a, R, W> {
    pub catalog: &'a dyn CatalogService,
    pub search_log: &'a dyn SearchLogService,
    pub page_size: u64,
    pub console: Console<R, W>,
}

impl<'a, R, W> Session<'a, R, W> {
    pub const fn new(
        catalog: &'a dyn CatalogService,
        search_log: &'a dyn SearchLogService,
        page_size: u64,
        console: Console<R, W>,
    ) -> Self {
        Self {
            catalog,
            search_log,
            page_size,
            console,
        }
    }
}
