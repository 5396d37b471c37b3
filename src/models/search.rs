use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Label stored with every search-log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Keyword,
    GenreYears,
}

impl SearchType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::GenreYears => "genre_years",
        }
    }

    /// Parses a stored label. `genre&years` was written by older releases for the same event.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "keyword" => Some(Self::Keyword),
            "genre_years" | "genre&years" => Some(Self::GenreYears),
            _ => None,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a completed search, stored as a JSON document.
///
/// Field order is fixed by the variant definitions, so equal parameters always serialize
/// to the same text and group together in statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchParams {
    Keyword {
        keyword: String,
    },
    GenreYears {
        genre: String,
        year_from: i32,
        year_to: i32,
    },
}

impl SearchParams {
    #[must_use]
    pub const fn search_type(&self) -> SearchType {
        match self {
            Self::Keyword { .. } => SearchType::Keyword,
            Self::GenreYears { .. } => SearchType::GenreYears,
        }
    }

    pub fn to_document(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Placeholder for parameter fields a stored document does not have.
pub const UNKNOWN_FIELD: &str = "?";

/// One aggregated row of the search log: all records sharing the same params.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGroup {
    pub params: Map<String, Value>,
    pub search_type: String,
    pub last_searched: String,
    pub count: i64,
}

impl SearchGroup {
    /// Builds a group from the stored params document and label.
    ///
    /// Documents that are not JSON objects yield an empty parameter map, so every field
    /// renders as [`UNKNOWN_FIELD`].
    #[must_use]
    pub fn from_stored(params: &str, search_type: &str, last_searched: String, count: i64) -> Self {
        let params = match serde_json::from_str::<Value>(params) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let search_type = SearchType::from_label(search_type)
            .map_or_else(|| search_type.to_string(), |t| t.as_str().to_string());

        Self {
            params,
            search_type,
            last_searched,
            count,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<SearchType> {
        SearchType::from_label(&self.search_type)
    }

    /// Display value of one parameter, `?` when absent.
    #[must_use]
    pub fn param(&self, key: &str) -> String {
        match self.params.get(key) {
            None | Some(Value::Null) => UNKNOWN_FIELD.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
