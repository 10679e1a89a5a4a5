//! # Command Parsing
//!
//! Validation of the numbered menu choice typed by the player.

use crate::{CavernError, CavernResult};

/// A validated menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// `0`: give up and end the session
    Quit,
    /// `1..=N`: resolve the encounter at this 1-based menu position
    Resolve(usize),
}

/// Parses one line of input against a menu of `option_count` encounters.
///
/// Surrounding whitespace is ignored; anything other than plain ASCII
/// digits naming `0..=option_count` is an [`CavernError::InvalidChoice`].
///
/// # Examples
///
/// ```
/// use cavern::{parse_choice, PlayerCommand};
///
/// assert_eq!(parse_choice("0", 2).unwrap(), PlayerCommand::Quit);
/// assert_eq!(parse_choice(" 2\n", 2).unwrap(), PlayerCommand::Resolve(2));
/// assert!(parse_choice("3", 2).is_err());
/// assert!(parse_choice("-1", 2).is_err());
/// ```
pub fn parse_choice(raw: &str, option_count: usize) -> CavernResult<PlayerCommand> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CavernError::InvalidChoice(format!(
            "`{}` is not a number",
            trimmed
        )));
    }

    let choice: usize = trimmed.parse().map_err(|_| {
        CavernError::InvalidChoice(format!("`{}` is out of range 0..={}", trimmed, option_count))
    })?;

    match choice {
        0 => Ok(PlayerCommand::Quit),
        k if k <= option_count => Ok(PlayerCommand::Resolve(k)),
        k => Err(CavernError::InvalidChoice(format!(
            "{} is out of range 0..={}",
            k, option_count
        ))),
    }
}
