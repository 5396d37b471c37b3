use super::Session;
use crate::cli::format::{render_popular, render_recent};
use std::io::{BufRead, Write};

pub async fn cmd_statistics<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<()> {
    writeln!(session.console, "\nWhich statistics would you like to see?")?;
    writeln!(session.console, "1 — Last 5 unique requests")?;
    writeln!(session.console, "2 — Top 5 popular requests")?;

    match session.console.prompt("Enter number (1 or 2): ")?.as_str() {
        "1" => match session.search_log.recent_searches().await {
            Ok(groups) => render_recent(&mut session.console, &groups)?,
            Err(e) => writeln!(session.console, "Error retrieving recent requests: {e}")?,
        },
        "2" => match session.search_log.popular_searches().await {
            Ok(groups) => render_popular(&mut session.console, &groups)?,
            Err(e) => writeln!(session.console, "Error retrieving popular requests: {e}")?,
        },
        _ => writeln!(session.console, "Invalid input. Returning to menu.")?,
    }

    Ok(())
}
