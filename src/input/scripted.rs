//! # Scripted Input
//!
//! Replays menu choices from a text file, one per line.

use crate::input::ChoiceSource;
use crate::CavernResult;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Choice source backed by a prepared list of lines.
///
/// Blank lines and lines starting with `#` are skipped. Once the script
/// runs out the source reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    lines: VecDeque<String>,
}

impl ScriptedChoices {
    /// Loads a script file.
    pub fn from_file(path: impl AsRef<Path>) -> CavernResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let script = Self::from_script(&contents);
        log::debug!(
            "Loaded {} scripted choices from {}",
            script.remaining(),
            path.as_ref().display()
        );
        Ok(script)
    }

    /// Builds a script from text.
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::{ChoiceSource, ScriptedChoices};
    ///
    /// let mut script = ScriptedChoices::from_script("# opening\n1\n\n2\n");
    /// assert_eq!(script.next_line().unwrap().as_deref(), Some("1"));
    /// assert_eq!(script.next_line().unwrap().as_deref(), Some("2"));
    /// assert_eq!(script.next_line().unwrap(), None);
    /// ```
    pub fn from_script(contents: &str) -> Self {
        let lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Builds a script from individual choices.
    pub fn from_choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl ChoiceSource for ScriptedChoices {
    fn next_line(&mut self) -> CavernResult<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
