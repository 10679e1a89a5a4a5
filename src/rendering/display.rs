//! # Display Management
//!
//! Line-oriented console output with optional ANSI colors via crossterm.

use crate::rendering::{action_prefix, description_prefix, with_prefix, Presenter, StatusView};
use crate::{CavernResult, EncounterKind, GameEvent, GameStatus, SessionSummary};
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};

const NARRATIVE: Color = Color::Blue;
const SUCCESS: Color = Color::Green;
const FAILURE: Color = Color::Red;
const MENU: Color = Color::Yellow;
const LABEL: Color = Color::Cyan;

/// Presenter writing human-readable text to any writer.
pub struct ConsolePresenter<W> {
    out: W,
    colored: bool,
}

impl ConsolePresenter<io::Stdout> {
    /// Presenter on standard output.
    pub fn stdout(colored: bool) -> Self {
        Self::new(io::stdout(), colored)
    }
}

impl<W: Write> ConsolePresenter<W> {
    /// Creates a presenter over `out`.
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    /// Creates a presenter that never emits escape codes.
    pub fn plain(out: W) -> Self {
        Self::new(out, false)
    }

    /// Borrows the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str, color: Color) -> io::Result<()> {
        let painted = self.paint(text, color);
        writeln!(self.out, "{}", painted)
    }

    fn entry(&mut self, prefix: Option<&str>, label: &str, color: Color) -> io::Result<()> {
        let painted_label = self.paint(label, LABEL);
        let prefix = prefix.map(|p| self.paint(p, color));
        writeln!(self.out, "{}", with_prefix(prefix.as_deref(), &painted_label))
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn run_started(&mut self, run: u32) -> CavernResult<()> {
        writeln!(self.out, "\n---")?;
        if run > 1 {
            self.line(&format!("Run {} begins.", run), NARRATIVE)?;
        }
        self.line(
            "The hero stands at the mouth of the cave. It feels like they have been here before.",
            NARRATIVE,
        )?;
        self.line(
            "Clear out the monsters and open the hatch before the flood arrives!",
            NARRATIVE,
        )?;
        Ok(())
    }

    fn show_status(&mut self, status: &StatusView) -> CavernResult<()> {
        writeln!(self.out, "\n---")?;
        self.line(&format!("Location: {}", status.location), NARRATIVE)?;
        self.line(
            &format!(
                "Experience: {}   Time left: {} ({} seconds)",
                status.score,
                status.time_left_clock(),
                status.time_left
            ),
            NARRATIVE,
        )?;
        self.line(&format!("Time passed: {}", status.elapsed_clock()), NARRATIVE)?;
        Ok(())
    }

    fn describe_location(&mut self, encounters: &[String]) -> CavernResult<()> {
        self.line("Inside you see:", NARRATIVE)?;
        if encounters.is_empty() {
            self.line("  nothing at all.", NARRATIVE)?;
        }
        for label in encounters {
            let prefix = description_prefix(EncounterKind::classify(label));
            self.entry(prefix, label, NARRATIVE)?;
        }
        Ok(())
    }

    fn show_actions(&mut self, encounters: &[String]) -> CavernResult<()> {
        writeln!(self.out, "\n---")?;
        self.line("Choose an action:", MENU)?;
        for (index, label) in encounters.iter().enumerate() {
            let prefix = action_prefix(EncounterKind::classify(label))
                .map(|verb| format!("{}: {}", index + 1, verb))
                .unwrap_or_else(|| format!("{}:", index + 1));
            self.entry(Some(prefix.as_str()), label, MENU)?;
        }
        self.line("0: Give up and leave the game", MENU)?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    fn invalid_choice(&mut self, raw: &str) -> CavernResult<()> {
        self.line(&format!("Incorrect input `{}`! Try again.", raw.trim()), FAILURE)?;
        Ok(())
    }

    fn show_event(&mut self, event: &GameEvent) -> CavernResult<()> {
        match event {
            GameEvent::MonsterDefeated { label, reward, .. } => {
                let painted = self.paint(label, LABEL);
                let text = self.paint(&format!("(+{} experience)", reward), SUCCESS);
                let intro = self.paint("The hero slays", SUCCESS);
                writeln!(self.out, "{} {} {}", intro, painted, text)?;
            }
            GameEvent::LocationChanged { to, .. } => {
                let painted = self.paint(to, LABEL);
                let intro = self.paint("Moving on to", SUCCESS);
                writeln!(self.out, "{} {}", intro, painted)?;
            }
            GameEvent::Escaped { .. } => {
                self.line("The hero heaves at the hatch...", SUCCESS)?;
            }
            GameEvent::ExitLocked {
                score, required, ..
            } => {
                self.line("The hero heaves at the hatch...", SUCCESS)?;
                self.line(
                    &format!(
                        "It will not budge: {} experience is not enough, {} needed.",
                        score, required
                    ),
                    FAILURE,
                )?;
            }
            GameEvent::Inert { label } => {
                let painted = self.paint(label, LABEL);
                writeln!(self.out, "Nothing happens with {}.", painted)?;
            }
        }
        Ok(())
    }

    fn show_outcome(&mut self, status: GameStatus) -> CavernResult<()> {
        match status {
            GameStatus::DeadTimeUp => {
                writeln!(self.out, "\n---")?;
                self.line(
                    "Time is up. The water catches the hero before they reach the exit...",
                    FAILURE,
                )?;
            }
            GameStatus::DeadDeadlock => {
                writeln!(self.out, "\n---")?;
                self.line(
                    "A dead end. No monsters left and no way back... Death approaches.",
                    FAILURE,
                )?;
            }
            GameStatus::Won => {
                writeln!(self.out, "\n---")?;
                self.line(
                    "The hatch swings open and the hero climbs out of the cave. Victory!",
                    SUCCESS,
                )?;
            }
            GameStatus::Quit => {
                self.line("Game over!", FAILURE)?;
            }
            GameStatus::Running | GameStatus::AwaitingChoice => {}
        }
        Ok(())
    }

    fn session_ended(&mut self, summary: &SessionSummary) -> CavernResult<()> {
        let stats = &summary.statistics;
        self.line(
            &format!(
                "Runs: {}   Deaths: {}   Monsters slain: {}   Turns: {}",
                stats.runs_started,
                stats.deaths(),
                stats.monsters_defeated,
                stats.turns_played
            ),
            NARRATIVE,
        )?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut ConsolePresenter<Vec<u8>>) -> CavernResult<()>,
    {
        let mut presenter = ConsolePresenter::plain(Vec::new());
        f(&mut presenter).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_action_menu_is_numbered_with_quit() {
        let encounters = vec![
            "Mob_exp10_tm0".to_string(),
            "Location_1_tm1040".to_string(),
            "Old_Bones".to_string(),
        ];
        let output = render(|p| p.show_actions(&encounters));

        assert!(output.contains("1: Attack monster Mob_exp10_tm0"));
        assert!(output.contains("2: Go to location Location_1_tm1040"));
        assert!(output.contains("3: Old_Bones"));
        assert!(output.contains("0: Give up"));
    }

    #[test]
    fn test_status_block() {
        let view = StatusView {
            location: "Location_0_tm0".to_string(),
            score: 40,
            elapsed_time: rust_decimal::Decimal::from(61),
            time_left: rust_decimal::Decimal::from(39),
            run: 1,
        };
        let output = render(|p| p.show_status(&view));

        assert!(output.contains("Location: Location_0_tm0"));
        assert!(output.contains("Experience: 40"));
        assert!(output.contains("00:00:39"));
        assert!(output.contains("Time passed: 00:01:01"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let output = render(|p| p.show_outcome(GameStatus::Won));
        assert!(output.contains("Victory!"));
        assert!(!output.contains('\u{1b}'));
    }
}
