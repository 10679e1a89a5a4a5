//! # Encounter Parsing
//!
//! Turns encounter tokens such as `Mob_exp10_tm0`, `Location_B2_tm2000` or
//! `Hatch_tm159.098765432` into typed [`Encounter`] records.
//!
//! Parsing happens in two stages. [`EncounterKind::classify`] picks a kind
//! from ordered substring rules, then a kind-specific pattern extracts the
//! numeric parameters. A pattern may sit anywhere inside the label and
//! surrounding text is ignored, so `Hidden_Location_1_tm5` is a link
//! costing 5 seconds. Time literals must fit a [`Decimal`] exactly;
//! anything that would be rounded is rejected. Monster/Boss is checked before Location, which is
//! checked before Hatch, because a label may contain more than one marker.

use crate::{CavernError, CavernResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of encounter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    /// Regular monster, removed once defeated
    Monster,
    /// Boss monster, same rules as a regular monster
    Boss,
    /// Passage to another location
    LocationLink,
    /// The escape hatch
    Exit,
    /// Any token without a known marker; inert
    Decoration,
}

impl EncounterKind {
    /// Classifies a raw label by its markers without validating the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::EncounterKind;
    ///
    /// assert_eq!(EncounterKind::classify("Mob_exp10_tm0"), EncounterKind::Monster);
    /// assert_eq!(EncounterKind::classify("Boss_exp40_tm50"), EncounterKind::Boss);
    /// assert_eq!(EncounterKind::classify("Location_1_tm1040"), EncounterKind::LocationLink);
    /// assert_eq!(EncounterKind::classify("Hatch_tm159.098765432"), EncounterKind::Exit);
    /// assert_eq!(EncounterKind::classify("Stalactite"), EncounterKind::Decoration);
    /// ```
    pub fn classify(label: &str) -> Self {
        if label.contains("Mob") {
            EncounterKind::Monster
        } else if label.contains("Boss") {
            EncounterKind::Boss
        } else if label.contains("Location") {
            EncounterKind::LocationLink
        } else if label.contains("Hatch") {
            EncounterKind::Exit
        } else {
            EncounterKind::Decoration
        }
    }

    /// Whether resolving this kind consumes the encounter.
    pub fn is_consumable(self) -> bool {
        matches!(self, EncounterKind::Monster | EncounterKind::Boss)
    }
}

impl fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncounterKind::Monster => "monster",
            EncounterKind::Boss => "boss",
            EncounterKind::LocationLink => "location",
            EncounterKind::Exit => "exit",
            EncounterKind::Decoration => "decoration",
        };
        f.write_str(name)
    }
}

/// One interactable object at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Classified kind
    pub kind: EncounterKind,
    /// Original token, also the removal key
    pub label: String,
    /// Progress gained on defeat (monsters and bosses only)
    pub reward: Option<u64>,
    /// Time consumed when resolved
    pub cost: Decimal,
    /// Destination of a location link
    pub target_location: Option<String>,
}

impl Encounter {
    /// Parses a raw token into an encounter.
    ///
    /// Unknown tokens parse as an inert [`EncounterKind::Decoration`] with
    /// zero cost. A token whose marker is known but whose shape does not
    /// match the kind's pattern is a [`CavernError::MalformedEncounter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::{Encounter, EncounterKind};
    ///
    /// let mob = Encounter::parse("Mob_exp10_tm20").unwrap();
    /// assert_eq!(mob.kind, EncounterKind::Monster);
    /// assert_eq!(mob.reward, Some(10));
    /// assert_eq!(mob.cost.to_string(), "20");
    ///
    /// assert!(Encounter::parse("Hatch_tm12").is_err());
    /// ```
    pub fn parse(label: &str) -> CavernResult<Self> {
        let kind = EncounterKind::classify(label);
        match kind {
            EncounterKind::Monster | EncounterKind::Boss => parse_monster(label, kind),
            EncounterKind::LocationLink => parse_location(label),
            EncounterKind::Exit => parse_exit(label),
            EncounterKind::Decoration => Ok(Self {
                kind,
                label: label.to_string(),
                reward: None,
                cost: Decimal::ZERO,
                target_location: None,
            }),
        }
    }
}

impl FromStr for Encounter {
    type Err = CavernError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encounter::parse(s)
    }
}

fn malformed(label: &str, reason: impl Into<String>) -> CavernError {
    CavernError::MalformedEncounter {
        label: label.to_string(),
        reason: reason.into(),
    }
}

/// `<word>_exp<integer>_tm<number>`, found anywhere in the label.
///
/// The match starting furthest left wins. When one word holds several
/// `_exp` markers, the greedy name takes the last one that fits.
fn parse_monster(label: &str, kind: EncounterKind) -> CavernResult<Encounter> {
    let mut found: Option<(usize, &str, &str)> = None;
    for (exp_at, marker) in label.match_indices("_exp") {
        let Some(start) = word_start(label, exp_at) else {
            continue;
        };
        if found.is_some_and(|(best, _, _)| start > best) {
            break;
        }
        let (reward, rest) = split_digits(&label[exp_at + marker.len()..]);
        if reward.is_empty() {
            continue;
        }
        if let Some(time) = rest.strip_prefix("_tm").and_then(time_prefix) {
            found = Some((start, reward, time));
        }
    }

    let (_, reward_digits, time) = found
        .ok_or_else(|| malformed(label, "expected `<name>_exp<integer>_tm<seconds>`"))?;
    let reward = reward_digits
        .parse::<u64>()
        .map_err(|e| malformed(label, format!("experience out of range: {}", e)))?;

    Ok(Encounter {
        kind,
        label: label.to_string(),
        reward: Some(reward),
        cost: exact_time(label, time)?,
        target_location: None,
    })
}

/// `Location_[A-Z]?<digits>_tm<number>`, found anywhere in the label.
fn parse_location(label: &str) -> CavernResult<Encounter> {
    let time = label
        .match_indices("Location_")
        .find_map(|(at, marker)| {
            let body = &label[at + marker.len()..];
            let body = match body.chars().next() {
                Some(c) if c.is_ascii_uppercase() => &body[1..],
                _ => body,
            };
            let (id, rest) = split_digits(body);
            if id.is_empty() {
                return None;
            }
            rest.strip_prefix("_tm").and_then(time_prefix)
        })
        .ok_or_else(|| malformed(label, "expected `Location_<id>_tm<seconds>`"))?;

    Ok(Encounter {
        kind: EncounterKind::LocationLink,
        label: label.to_string(),
        reward: None,
        cost: exact_time(label, time)?,
        target_location: Some(label.to_string()),
    })
}

/// `Hatch_tm<digits>.<digits>`; the fractional part is mandatory.
fn parse_exit(label: &str) -> CavernResult<Encounter> {
    let time = label
        .match_indices("Hatch_tm")
        .find_map(|(at, marker)| {
            time_prefix(&label[at + marker.len()..]).filter(|time| time.contains('.'))
        })
        .ok_or_else(|| malformed(label, "expected `Hatch_tm<seconds>.<fraction>`"))?;

    Ok(Encounter {
        kind: EncounterKind::Exit,
        label: label.to_string(),
        reward: None,
        cost: exact_time(label, time)?,
        target_location: None,
    })
}

/// Longest `<digits>` or `<digits>.<digits>` prefix of `raw`.
fn time_prefix(raw: &str) -> Option<&str> {
    let (whole, rest) = split_digits(raw);
    if whole.is_empty() {
        return None;
    }
    let fraction = rest
        .strip_prefix('.')
        .map(|fraction| split_digits(fraction).0.len())
        .filter(|&digits| digits > 0)
        .map_or(0, |digits| digits + 1);
    Some(&raw[..whole.len() + fraction])
}

/// Rejects literals a [`Decimal`] cannot hold without rounding.
fn exact_time(label: &str, time: &str) -> CavernResult<Decimal> {
    Decimal::from_str_exact(time)
        .map_err(|e| malformed(label, format!("time `{}` is not representable: {}", time, e)))
}

/// Start of the run of word characters ending right before `end`.
fn word_start(label: &str, end: usize) -> Option<usize> {
    label[..end]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map(|(i, _)| i)
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_classify_order() {
        // Monster markers win over everything else
        assert_eq!(EncounterKind::classify("Mob_Location_Hatch"), EncounterKind::Monster);
        assert_eq!(EncounterKind::classify("Boss_Location"), EncounterKind::Boss);
        assert_eq!(EncounterKind::classify("Location_Hatch"), EncounterKind::LocationLink);
        assert_eq!(EncounterKind::classify("Hatch_tm1.0"), EncounterKind::Exit);
    }

    #[test]
    fn test_parse_monster() {
        let mob = Encounter::parse("Mob_exp10_tm0").unwrap();
        assert_eq!(mob.kind, EncounterKind::Monster);
        assert_eq!(mob.reward, Some(10));
        assert_eq!(mob.cost, Decimal::ZERO);
        assert_eq!(mob.target_location, None);
        assert_eq!(mob.label, "Mob_exp10_tm0");
    }

    #[test]
    fn test_parse_boss_with_decimal_time() {
        let boss = Encounter::parse("Boss_exp280_tm20.5").unwrap();
        assert_eq!(boss.kind, EncounterKind::Boss);
        assert_eq!(boss.reward, Some(280));
        assert_eq!(boss.cost, dec("20.5"));
    }

    #[test]
    fn test_parse_monster_with_compound_name() {
        let mob = Encounter::parse("Cave_Mob_exp40_tm50").unwrap();
        assert_eq!(mob.reward, Some(40));
        assert_eq!(mob.cost, dec("50"));
    }

    #[test]
    fn test_malformed_monster() {
        for label in [
            "Mob_tm10",
            "Mob_expX_tm10",
            "Mob_exp10",
            "Mob_exp10_tm",
            "Mob-_exp10_tm10",
            "Mob_exp99999999999999999999_tm1",
        ] {
            assert!(
                matches!(
                    Encounter::parse(label),
                    Err(CavernError::MalformedEncounter { .. })
                ),
                "{} should be malformed",
                label
            );
        }
    }

    #[test]
    fn test_monster_pattern_found_inside_label() {
        let mob = Encounter::parse("Mob-x_exp10_tm10").unwrap();
        assert_eq!(mob.kind, EncounterKind::Monster);
        assert_eq!(mob.reward, Some(10));
        assert_eq!(mob.cost, dec("10"));

        let mob = Encounter::parse("Mob_exp10_tm10_v2").unwrap();
        assert_eq!(mob.cost, dec("10"));
        assert_eq!(mob.label, "Mob_exp10_tm10_v2");

        // A dot without digits after it ends the number
        assert_eq!(Encounter::parse("Mob_exp10_tm1.").unwrap().cost, dec("1"));
        assert_eq!(Encounter::parse("Mob_exp10_tm1,000").unwrap().cost, dec("1"));
    }

    #[test]
    fn test_greedy_name_takes_last_marker_in_a_word() {
        let mob = Encounter::parse("Mob_exp1_tm1_exp2_tm2").unwrap();
        assert_eq!(mob.reward, Some(2));
        assert_eq!(mob.cost, dec("2"));

        let mob = Encounter::parse("Mob_exp1_tm1 Mob_exp2_tm2").unwrap();
        assert_eq!(mob.reward, Some(1));
        assert_eq!(mob.cost, dec("1"));
    }

    #[test]
    fn test_parse_location() {
        let link = Encounter::parse("Location_B2_tm2000").unwrap();
        assert_eq!(link.kind, EncounterKind::LocationLink);
        assert_eq!(link.cost, dec("2000"));
        assert_eq!(link.target_location.as_deref(), Some("Location_B2_tm2000"));

        let link = Encounter::parse("Location_0_tm0").unwrap();
        assert_eq!(link.cost, Decimal::ZERO);

        let link = Encounter::parse("Location_12_tm33.25").unwrap();
        assert_eq!(link.cost, dec("33.25"));
    }

    #[test]
    fn test_location_pattern_found_inside_label() {
        let link = Encounter::parse("Hidden_Location_1_tm5").unwrap();
        assert_eq!(link.kind, EncounterKind::LocationLink);
        assert_eq!(link.cost, dec("5"));
        assert_eq!(link.target_location.as_deref(), Some("Hidden_Location_1_tm5"));

        let link = Encounter::parse("Location_X_Location_3_tm7").unwrap();
        assert_eq!(link.cost, dec("7"));
    }

    #[test]
    fn test_malformed_location() {
        for label in ["Location_tm10", "Location_AB1_tm10", "Location_1", "Locations_1_tm5"] {
            assert!(Encounter::parse(label).is_err(), "{} should be malformed", label);
        }
    }

    #[test]
    fn test_parse_exit_requires_fraction() {
        let hatch = Encounter::parse("Hatch_tm159.098765432").unwrap();
        assert_eq!(hatch.kind, EncounterKind::Exit);
        assert_eq!(hatch.cost, dec("159.098765432"));
        assert_eq!(hatch.reward, None);

        assert!(Encounter::parse("Hatch_tm159").is_err());
        assert!(Encounter::parse("Hatch_tm.5").is_err());
    }

    #[test]
    fn test_hatch_ignores_trailing_text() {
        let hatch = Encounter::parse("Hatch_tm1.5x").unwrap();
        assert_eq!(hatch.kind, EncounterKind::Exit);
        assert_eq!(hatch.cost, dec("1.5"));
    }

    #[test]
    fn test_time_that_would_round_is_rejected() {
        for label in [
            "Mob_exp1_tm0.00000000000000000000000000001",
            "Hatch_tm1.00000000000000000000000000001",
            "Location_1_tm99999999999999999999999999999",
        ] {
            assert!(
                matches!(
                    Encounter::parse(label),
                    Err(CavernError::MalformedEncounter { .. })
                ),
                "{} should be rejected",
                label
            );
        }

        let mob = Encounter::parse("Mob_exp1_tm0.0000000000000000000000000001").unwrap();
        assert_eq!(mob.cost, dec("0.0000000000000000000000000001"));
    }

    #[test]
    fn test_decoration_is_inert() {
        let rock = Encounter::parse("Glowing_Mushrooms").unwrap();
        assert_eq!(rock.kind, EncounterKind::Decoration);
        assert_eq!(rock.cost, Decimal::ZERO);
        assert_eq!(rock.reward, None);
    }

    #[test]
    fn test_decimal_precision_preserved() {
        let hatch: Encounter = "Hatch_tm0.000000001".parse().unwrap();
        let mut total = Decimal::ZERO;
        for _ in 0..1_000 {
            total += hatch.cost;
        }
        assert_eq!(total, dec("0.000001"));
    }
}
