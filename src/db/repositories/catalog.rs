use crate::entities::{category, film, film_actor, film_category, prelude::*};
use crate::models::{Film as FilmRecord, Genre, YearBounds};
use sea_orm::sea_query::{Alias, BinOper, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

/// Escape character used in keyword `LIKE` patterns.
const LIKE_ESCAPE: char = '!';

/// Read-only queries against the film catalog.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn backend(&self) -> DatabaseBackend {
        self.conn.get_database_backend()
    }

    /// Films whose title contains `keyword`, ignoring case. Genre and cast are optional.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FilmRecord>, DbErr> {
        let rows = keyword_query(self.backend(), keyword)
            .offset(offset)
            .limit(limit)
            .into_model::<FilmRow>()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(FilmRow::into_film).collect())
    }

    /// Films of exactly `genre` released in `year_from..=year_to`.
    pub async fn search_by_genre_and_years(
        &self,
        genre: &str,
        year_from: i32,
        year_to: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FilmRecord>, DbErr> {
        let rows = genre_years_query(self.backend(), genre, year_from, year_to)
            .offset(offset)
            .limit(limit)
            .into_model::<FilmRow>()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(FilmRow::into_film).collect())
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, DbErr> {
        let rows = genres_query(self.backend())
            .into_model::<GenreRow>()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Genre {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    /// `None` when the catalog has no film with a release year.
    pub async fn year_bounds(&self) -> Result<Option<YearBounds>, DbErr> {
        let row = year_bounds_query(self.backend())
            .into_model::<YearBoundsRow>()
            .one(&self.conn)
            .await?;

        Ok(row.and_then(|r| match (r.min_year, r.max_year) {
            (Some(min), Some(max)) => Some(YearBounds { min, max }),
            _ => None,
        }))
    }
}

fn keyword_query(backend: DatabaseBackend, keyword: &str) -> Select<Film> {
    film_select(backend)
        .join(JoinType::LeftJoin, film::Relation::FilmCategory.def())
        .join(JoinType::LeftJoin, film_category::Relation::Category.def())
        .join(JoinType::LeftJoin, film::Relation::FilmActor.def())
        .join(JoinType::LeftJoin, film_actor::Relation::Actor.def())
        .filter(title_matches(backend, keyword))
}

fn genre_years_query(
    backend: DatabaseBackend,
    genre: &str,
    year_from: i32,
    year_to: i32,
) -> Select<Film> {
    film_select(backend)
        .join(JoinType::InnerJoin, film::Relation::FilmCategory.def())
        .join(JoinType::InnerJoin, film_category::Relation::Category.def())
        .join(JoinType::LeftJoin, film::Relation::FilmActor.def())
        .join(JoinType::LeftJoin, film_actor::Relation::Actor.def())
        .filter(category::Column::Name.eq(genre))
        .filter(film::Column::ReleaseYear.between(year_from, year_to))
}

fn genres_query(backend: DatabaseBackend) -> Select<Category> {
    Category::find()
        .select_only()
        .column_as(
            as_signed(backend, Expr::col(category::Column::CategoryId).into()),
            "id",
        )
        .column(category::Column::Name)
        .order_by_asc(category::Column::Name)
}

fn year_bounds_query(backend: DatabaseBackend) -> Select<Film> {
    Film::find()
        .select_only()
        .column_as(
            as_signed(backend, film::Column::ReleaseYear.min()),
            "min_year",
        )
        .column_as(
            as_signed(backend, film::Column::ReleaseYear.max()),
            "max_year",
        )
}

/// One row per film; no ORDER BY, rows come back in the store's natural order.
fn film_select(backend: DatabaseBackend) -> Select<Film> {
    let column = |c: film::Column| -> SimpleExpr { Expr::col((film::Entity, c)).into() };

    Film::find()
        .select_only()
        .column(film::Column::Title)
        .column_as(as_signed(backend, column(film::Column::ReleaseYear)), "release_year")
        .column_as(as_signed(backend, column(film::Column::Length)), "length")
        .column(film::Column::Description)
        .column_as(
            Expr::col((category::Entity, category::Column::Name)).max(),
            "genre",
        )
        .column_as(actor_names(backend), "actors")
        .group_by(film::Column::FilmId)
}

/// MySQL reports `YEAR` and unsigned columns with types that do not decode as `i32`.
fn as_signed(backend: DatabaseBackend, expr: SimpleExpr) -> SimpleExpr {
    match backend {
        DatabaseBackend::MySql => expr.cast_as(Alias::new("SIGNED")),
        _ => expr,
    }
}

/// Distinct cast names of the grouped film, joined with `", "`.
fn actor_names(backend: DatabaseBackend) -> SimpleExpr {
    match backend {
        DatabaseBackend::MySql => Expr::cust(
            "GROUP_CONCAT(DISTINCT CONCAT(`actor`.`first_name`, ' ', `actor`.`last_name`) SEPARATOR ', ')",
        ),
        // SQLite allows DISTINCT only with the default "," separator. Each name is closed
        // with char(31) so only the separators get rewritten, not commas inside names.
        _ => Expr::cust(
            r#"REPLACE(REPLACE(GROUP_CONCAT(DISTINCT "actor"."first_name" || ' ' || "actor"."last_name" || char(31)), char(31) || ',', ', '), char(31), '')"#,
        ),
    }
}

/// Case-insensitive substring match on the film title.
///
/// SQLite folds case for ASCII only, so there every letter of the keyword becomes a
/// `GLOB` set of its case variants.
fn title_matches(backend: DatabaseBackend, keyword: &str) -> SimpleExpr {
    let title = Expr::col((film::Entity, film::Column::Title));

    match backend {
        DatabaseBackend::Sqlite => title.binary(BinOper::Custom("GLOB"), glob_pattern(keyword)),
        _ => Expr::expr(Func::lower(title))
            .like(LikeExpr::new(like_pattern(keyword)).escape(LIKE_ESCAPE)),
    }
}

/// `%keyword%`, lowercased, with `LIKE` metacharacters escaped.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `*keyword*` with each cased letter as `[lowerUPPER]` and `GLOB` metacharacters bracketed.
fn glob_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() * 4 + 2);
    pattern.push('*');
    for c in keyword.chars() {
        let mut variants = Vec::with_capacity(3);
        for variant in [single_char(c.to_lowercase()), single_char(c.to_uppercase()), Some(c)]
            .into_iter()
            .flatten()
        {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }

        if variants.len() > 1 || matches!(c, '*' | '?' | '[') {
            pattern.push('[');
            pattern.extend(variants);
            pattern.push(']');
        } else {
            pattern.push(c);
        }
    }
    pattern.push('*');
    pattern
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct FilmRow {
    title: String,
    release_year: Option<i32>,
    length: Option<i32>,
    description: Option<String>,
    genre: Option<String>,
    actors: Option<String>,
}

impl FilmRow {
    fn into_film(self) -> FilmRecord {
        FilmRecord {
            title: self.title,
            genre: self.genre,
            release_year: self.release_year,
            length: self.length,
            actors: self.actors.filter(|a| !a.is_empty()),
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct GenreRow {
    id: i32,
    name: String,
}

#[derive(Debug, Clone, FromQueryResult)]
struct YearBoundsRow {
    min_year: Option<i32>,
    max_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::QueryTrait;

    fn sql(query: Select<impl EntityTrait>, backend: DatabaseBackend) -> String {
        query.build(backend).to_string()
    }

    #[test]
    fn test_like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern("Love"), "%love%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100!%%");
        assert_eq!(like_pattern("a_b"), "%a!_b%");
        assert_eq!(like_pattern("wow!"), "%wow!!%");
    }

    #[test]
    fn test_glob_pattern_folds_every_letter() {
        assert_eq!(glob_pattern("Éc 1"), "*[éÉ][cC] 1*");
        assert_eq!(glob_pattern("ÉCLAIR"), glob_pattern("éclair"));
    }

    #[test]
    fn test_glob_pattern_brackets_metacharacters() {
        assert_eq!(glob_pattern("a*?["), "*[aA][*][?][[]*");
        assert_eq!(glob_pattern("100%_"), "*100%_*");
    }

    #[test]
    fn test_mysql_queries_cast_unsigned_and_year_columns() {
        let keyword = sql(keyword_query(DatabaseBackend::MySql, "love"), DatabaseBackend::MySql);
        assert!(keyword.contains("CAST(`film`.`release_year` AS SIGNED) AS `release_year`"));
        assert!(keyword.contains("CAST(`film`.`length` AS SIGNED) AS `length`"));
        assert!(keyword.contains("LOWER(`film`.`title`) LIKE '%love%' ESCAPE '!'"));
        assert!(keyword.contains("GROUP_CONCAT(DISTINCT CONCAT(`actor`.`first_name`"));
        assert!(keyword.contains("LEFT JOIN `category`"));
        assert!(keyword.contains("GROUP BY"));

        let genre = sql(
            genre_years_query(DatabaseBackend::MySql, "Comedy", 2000, 2005),
            DatabaseBackend::MySql,
        );
        assert!(genre.contains("CAST(`film`.`release_year` AS SIGNED)"));
        assert!(genre.contains("INNER JOIN `category`"));
        assert!(genre.contains("`category`.`name` = 'Comedy'"));
        assert!(genre.contains("`film`.`release_year` BETWEEN 2000 AND 2005"));

        let genres = sql(genres_query(DatabaseBackend::MySql), DatabaseBackend::MySql);
        assert!(genres.contains("CAST(`category_id` AS SIGNED) AS `id`"));

        let bounds = sql(year_bounds_query(DatabaseBackend::MySql), DatabaseBackend::MySql);
        assert!(bounds.contains("CAST(MIN(`film`.`release_year`) AS SIGNED) AS `min_year`"));
        assert!(bounds.contains("CAST(MAX(`film`.`release_year`) AS SIGNED) AS `max_year`"));
    }

    #[test]
    fn test_sqlite_queries_use_glob_and_plain_columns() {
        let keyword = sql(keyword_query(DatabaseBackend::Sqlite, "Éc"), DatabaseBackend::Sqlite);
        assert!(keyword.contains(r#""film"."title" GLOB '*[éÉ][cC]*'"#));
        assert!(keyword.contains("char(31)"));
        assert!(!keyword.contains("CAST("));
        assert!(!keyword.contains("LOWER("));
    }
}
