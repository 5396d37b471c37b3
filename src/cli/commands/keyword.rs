use super::Session;
use super::paging::{FilmQuery, page_through};
use std::io::{BufRead, Write};

pub async fn cmd_keyword_search<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<()> {
    let keyword = loop {
        let keyword = session.console.prompt("Enter keyword: ")?;
        if keyword.is_empty() {
            writeln!(
                session.console,
                "❗ Keyword cannot be empty. Please enter a keyword for search."
            )?;
            continue;
        }
        if is_numeric_keyword(&keyword) {
            writeln!(
                session.console,
                "ℹ️ Note: You've entered only numbers. Searching for movies with numbers in the title."
            )?;
        }
        break keyword;
    };

    page_through(session, &FilmQuery::Keyword(keyword)).await
}

/// Digits only, in any script.
fn is_numeric_keyword(keyword: &str) -> bool {
    keyword.chars().all(char::is_numeric)
}
