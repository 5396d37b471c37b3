/// One catalog film with its genre and cast flattened into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub title: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    /// Running time in minutes.
    pub length: Option<i32>,
    /// Actor names joined with `", "`.
    pub actors: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Earliest and latest release year in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}
