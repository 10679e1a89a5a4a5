//! # Input Module
//!
//! Collection of the player's menu choices.
//!
//! The game reads raw lines through a [`ChoiceSource`] and validates them
//! with [`parse_choice`]. Reading blocks until a line arrives; there is no
//! timeout since in-game time only advances on resolved actions.

pub mod commands;
pub mod scripted;

pub use commands::*;
pub use scripted::*;

use crate::CavernResult;
use std::io::BufRead;

/// A source of raw input lines.
pub trait ChoiceSource {
    /// Returns the next line, or `None` once the input is exhausted.
    fn next_line(&mut self) -> CavernResult<Option<String>>;
}

/// Line-based reader over any buffered input, typically stdin.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineInput<std::io::StdinLock<'static>> {
    /// Reads from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> ChoiceSource for LineInput<R> {
    fn next_line(&mut self) -> CavernResult<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_input_reads_until_eof() {
        let mut input = LineInput::new(Cursor::new("1\r\nabc\n2"));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("1"));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("abc"));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("2"));
        assert_eq!(input.next_line().unwrap(), None);
    }
}
