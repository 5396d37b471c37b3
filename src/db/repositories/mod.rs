pub mod catalog;
pub mod search_log;

pub use catalog::CatalogRepository;
pub use search_log::{SearchGroupRow, SearchLogRepository};
