use super::Session;
use super::{cmd_genre_year_search, cmd_keyword_search, cmd_statistics};
use crate::cli::console::is_input_closed;
use std::io::{BufRead, Write};
use tracing::{error, info};

/// Main menu loop. Returns when the user picks `0` or input ends.
pub async fn cmd_interactive<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<()> {
    info!("Interactive session started");

    loop {
        writeln!(session.console)?;
        writeln!(session.console, "1 - Search by keyword")?;
        writeln!(session.console, "2 - Search by genre and years")?;
        writeln!(session.console, "3 - Show statistics")?;
        writeln!(session.console, "0 - Exit")?;

        let choice = match session.console.prompt("Choose option: ") {
            Ok(choice) => choice,
            Err(e) if is_input_closed(&e) => break,
            Err(e) => return Err(e),
        };

        let result = match choice.as_str() {
            "1" => cmd_keyword_search(session).await,
            "2" => cmd_genre_year_search(session).await,
            "3" => match cmd_statistics(session).await {
                Err(e) if !is_input_closed(&e) => {
                    error!(error = %e, "Statistics failed");
                    writeln!(session.console, "Failed to load statistics: {e}")?;
                    Ok(())
                }
                other => other,
            },
            "0" => break,
            _ => {
                writeln!(session.console, "Invalid option. Please enter 1, 2, 3 or 0.")?;
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(e) if is_input_closed(&e) => break,
            Err(e) => return Err(e),
        }
    }

    info!("Interactive session finished");
    Ok(())
}
