pub mod catalog;
pub use catalog::{CatalogService, SeaOrmCatalogService};

pub mod search_log;
pub use search_log::{STATS_LIMIT, SearchLogService, SeaOrmSearchLogService};
