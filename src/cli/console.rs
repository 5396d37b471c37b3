//! Line-oriented console used by the interactive commands.
//!
//! Generic over its input and output so commands can be driven by scripted input.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Input reached end of file; the interactive loop should stop.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` without a newline and reads one trimmed line.
    ///
    /// Bytes that are not valid UTF-8 come through as U+FFFD, so they fail validation
    /// like any other bad answer.
    pub fn prompt(&mut self, message: &str) -> anyhow::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Err(InputClosed.into());
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Yes/no question; only `yes` or `y` (any case) counts as yes.
    pub fn confirm(&mut self, message: &str) -> anyhow::Result<bool> {
        let answer = self.prompt(message)?.to_lowercase();
        Ok(matches!(answer.as_str(), "yes" | "y"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

#[must_use]
pub fn is_input_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InputClosed>().is_some()
}
