pub mod film;
pub mod search;

pub use film::{Film, Genre, YearBounds};
pub use search::{SearchGroup, SearchParams, SearchType};
