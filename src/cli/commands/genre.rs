use super::Session;
use super::paging::{FilmQuery, page_through};
use crate::models::{Genre, YearBounds};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
enum YearInputError {
    #[error("❗ Please enter a valid number for the year.")]
    NotANumber,

    #[error("❗ Year must be between {min} and {max}.")]
    OutOfBounds { min: i32, max: i32 },
}

/// Parses one year answer. An empty answer takes `default` when there is one.
fn parse_year(
    raw: &str,
    default: Option<i32>,
    bounds: YearBounds,
) -> Result<i32, YearInputError> {
    let year = match (raw.is_empty(), default) {
        (true, Some(default)) => default,
        _ => raw.parse().map_err(|_| YearInputError::NotANumber)?,
    };

    if bounds.contains(year) {
        Ok(year)
    } else {
        Err(YearInputError::OutOfBounds {
            min: bounds.min,
            max: bounds.max,
        })
    }
}

fn find_genre<'a>(genres: &'a [Genre], raw: &str) -> Result<&'a Genre, &'static str> {
    let id: i32 = raw.parse().map_err(|_| "❗ Genre must be a number.")?;
    genres
        .iter()
        .find(|g| g.id == id)
        .ok_or("❗ Invalid genre number. Please select a number from the list.")
}

pub async fn cmd_genre_year_search<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<()> {
    let Some((genres, bounds)) = load_reference_data(session).await? else {
        return Ok(());
    };

    writeln!(session.console, "\nAvailable genres:")?;
    for genre in &genres {
        writeln!(session.console, "{}. {}", genre.id, genre.name)?;
    }
    writeln!(
        session.console,
        "\nAvailable year range: {} - {}",
        bounds.min, bounds.max
    )?;

    let genre = loop {
        let raw = session.console.prompt("Enter genre number: ")?;
        match find_genre(&genres, &raw) {
            Ok(genre) => break genre.name.clone(),
            Err(message) => writeln!(session.console, "{message}")?,
        }
    };

    let (year_from, year_to) = prompt_years(session, bounds)?;

    page_through(
        session,
        &FilmQuery::GenreYears {
            genre,
            year_from,
            year_to,
        },
    )
    .await
}

/// Genre list and year bounds, retried on the user's request. `None` if the user gives up.
async fn load_reference_data<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<Option<(Vec<Genre>, YearBounds)>> {
    loop {
        let genres = session.catalog.list_genres().await;
        let bounds = session.catalog.year_bounds().await;

        match (genres, bounds) {
            (Ok(genres), Ok(Some(bounds))) if !genres.is_empty() => {
                return Ok(Some((genres, bounds)));
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to load genres or year range");
                writeln!(session.console, "❗ {e}")?;
            }
            _ => {}
        }

        if !session
            .console
            .confirm("Failed to load genres or years. Try again? (yes/no): ")?
        {
            return Ok(None);
        }
    }
}

fn prompt_years<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    bounds: YearBounds,
) -> anyhow::Result<(i32, i32)> {
    writeln!(session.console, "\n1 - By single year")?;
    writeln!(session.console, "2 - By a range (from and/or to)")?;

    loop {
        match session.console.prompt("Choose option (1 or 2): ")?.as_str() {
            "1" => return prompt_single_year(session, bounds),
            "2" => return prompt_year_range(session, bounds),
            _ => writeln!(session.console, "❗ Please enter 1 or 2.")?,
        }
    }
}

fn prompt_single_year<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    bounds: YearBounds,
) -> anyhow::Result<(i32, i32)> {
    loop {
        let raw = session.console.prompt("Enter year: ")?;
        match parse_year(&raw, None, bounds) {
            Ok(year) => return Ok((year, year)),
            Err(e) => writeln!(session.console, "{e}")?,
        }
    }
}

fn prompt_year_range<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    bounds: YearBounds,
) -> anyhow::Result<(i32, i32)> {
    loop {
        let raw = session
            .console
            .prompt(&format!("From year (press Enter to use {}): ", bounds.min))?;
        let year_from = match parse_year(&raw, Some(bounds.min), bounds) {
            Ok(year) => year,
            Err(e) => {
                writeln!(session.console, "{e}")?;
                continue;
            }
        };

        let raw = session
            .console
            .prompt(&format!("To year   (press Enter to use {}): ", bounds.max))?;
        let year_to = match parse_year(&raw, Some(bounds.max), bounds) {
            Ok(year) => year,
            Err(e) => {
                writeln!(session.console, "{e}")?;
                continue;
            }
        };

        if year_from > year_to {
            writeln!(
                session.console,
                "❗ 'From year' cannot be after 'To year'. Please enter valid range."
            )?;
            continue;
        }

        return Ok((year_from, year_to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: YearBounds = YearBounds {
        min: 2000,
        max: 2006,
    };

    #[test]
    fn test_parse_year_in_bounds() {
        assert_eq!(parse_year("2003", None, BOUNDS), Ok(2003));
        assert_eq!(parse_year("2000", None, BOUNDS), Ok(2000));
    }

    #[test]
    fn test_parse_year_rejects_out_of_bounds() {
        assert_eq!(
            parse_year("1999", None, BOUNDS),
            Err(YearInputError::OutOfBounds {
                min: 2000,
                max: 2006
            })
        );
    }

    #[test]
    fn test_parse_year_empty_uses_default() {
        assert_eq!(parse_year("", Some(2006), BOUNDS), Ok(2006));
        assert_eq!(parse_year("", None, BOUNDS), Err(YearInputError::NotANumber));
        assert_eq!(parse_year("abc", Some(2000), BOUNDS), Err(YearInputError::NotANumber));
    }

    #[test]
    fn test_find_genre() {
        let genres = vec![
            Genre {
                id: 1,
                name: "Action".to_string(),
            },
            Genre {
                id: 5,
                name: "Comedy".to_string(),
            },
        ];
        assert_eq!(find_genre(&genres, "5").unwrap().name, "Comedy");
        assert_eq!(find_genre(&genres, "x"), Err("❗ Genre must be a number."));
        assert!(find_genre(&genres, "2").is_err());
    }
}
