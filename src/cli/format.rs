//! Text rendering of films and search statistics.

use crate::models::{Film, SearchGroup, SearchType};
use chrono::{DateTime, Local, NaiveDateTime};
use std::borrow::Cow;
use std::io::{self, Write};

/// Descriptions longer than this many characters are cut and get `...` appended.
pub const DESCRIPTION_LIMIT: usize = 300;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes one block per film, or a single notice for an empty list.
///
/// A film that fails to render is reported in place and the rest are still written.
pub fn render_films(out: &mut impl Write, films: &[Film]) -> io::Result<()> {
    if films.is_empty() {
        return writeln!(out, "No movies found.");
    }

    for film in films {
        if let Err(e) = render_film(out, film) {
            writeln!(out, "Error displaying movie: {e}")?;
        }
    }

    Ok(())
}

fn render_film(out: &mut impl Write, film: &Film) -> io::Result<()> {
    let title = if film.title.trim().is_empty() {
        "UNKNOWN TITLE".to_string()
    } else {
        film.title.to_uppercase()
    };
    let genre = film.genre.as_deref().unwrap_or("Unknown Genre");
    let year = film
        .release_year
        .map_or_else(|| "Unknown Year".to_string(), |y| y.to_string());
    let duration = film
        .length
        .map_or_else(|| "Unknown Duration".to_string(), |l| format!("{l} min"));
    let actors = film
        .actors
        .as_deref()
        .map_or_else(|| "No actors listed".to_string(), title_case);
    let description = film
        .description
        .as_deref()
        .map_or(Cow::Borrowed("No description provided"), truncate_description);

    writeln!(out)?;
    writeln!(out, "🎬 {title}")?;
    writeln!(out, "📚 Genre: {genre}")?;
    writeln!(out, "📅 Release year: {year}")?;
    writeln!(out, "⏱️ Duration: {duration}")?;
    writeln!(out, "👥 Actors: {actors}")?;
    writeln!(out, "📝 Description: {description}")
}

/// First [`DESCRIPTION_LIMIT`] characters, with `...` only when something was cut.
#[must_use]
pub fn truncate_description(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
/// Any non-letter starts a new word, so `o'neil` becomes `O'Neil`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

pub fn render_recent(out: &mut impl Write, groups: &[SearchGroup]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📌 Last {} unique requests:", groups.len())?;
    if groups.is_empty() {
        return writeln!(out, "No searches recorded yet.");
    }

    for group in groups {
        writeln!(
            out,
            "📅 Date: {} | 🔍 Type: {:<12} | {}",
            display_timestamp(&group.last_searched),
            group.search_type,
            describe_params(group)
        )?;
    }
    Ok(())
}

pub fn render_popular(out: &mut impl Write, groups: &[SearchGroup]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "⭐ Top {} popular requests:", groups.len())?;
    if groups.is_empty() {
        return writeln!(out, "No searches recorded yet.");
    }

    for group in groups {
        writeln!(
            out,
            "🔍 Type: {:<12} | {} → {} requests",
            group.search_type,
            describe_params(group),
            group.count
        )?;
    }
    Ok(())
}

fn describe_params(group: &SearchGroup) -> String {
    if group.kind() == Some(SearchType::Keyword) {
        format!("🔑 Keyword: '{}'", group.param("keyword"))
    } else {
        format!(
            "🎬 Genre: {} ({}–{})",
            group.param("genre"),
            group.param("year_from"),
            group.param("year_to")
        )
    }
}

/// Local `YYYY-MM-DD HH:MM:SS`; unparseable values are shown as stored.
fn display_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}
