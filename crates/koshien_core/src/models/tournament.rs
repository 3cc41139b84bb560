//! Tournament bracket slice.
//!
//! The bracket keys matches as `{block}-R{round}-M{number}` with the final at
//! `F-R1-M1`. [`Tournament`] is the explicit slice of tournament state the
//! derivation functions receive; it replaces the ambient singleton the
//! original game kept.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::match_record::MatchRecord;
use super::team::TeamRecord;

/// Parsed bracket match identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchId {
    /// Bracket block ("A", "B", ... or "F" for the final).
    pub block: String,
    pub round: u32,
    pub number: u32,
}

impl MatchId {
    pub fn parse(id: &str) -> Option<Self> {
        let mut parts = id.split('-');
        let block = parts.next()?.to_string();
        let round = parts.next()?.strip_prefix('R')?.parse().ok()?;
        let number = parts.next()?.strip_prefix('M')?.parse().ok()?;
        // Rounds and match numbers are 1-based; zero would break the
        // feeder-pair arithmetic.
        if parts.next().is_some() || block.is_empty() || round == 0 || number == 0 {
            return None;
        }
        Some(MatchId { block, round, number })
    }

    pub fn is_final(&self) -> bool {
        self.block == "F"
    }

    /// The same-round match whose winner feeds the same next-round slot.
    pub fn feeder_pair(&self) -> MatchId {
        let number = if self.number % 2 == 1 { self.number + 1 } else { self.number - 1 };
        MatchId { block: self.block.clone(), round: self.round, number }
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-R{}-M{}", self.block, self.round, self.number)
    }
}

/// Immutable view of one tournament: its entrants, match table and per-team
/// records. Matches iterate in key order, which is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub matches: BTreeMap<String, MatchRecord>,
    #[serde(default)]
    pub team_records: HashMap<String, TeamRecord>,
}

impl Tournament {
    pub fn find_match(&self, id: &str) -> Option<&MatchRecord> {
        self.matches.get(id)
    }

    pub fn team_record(&self, team: &str) -> Option<&TeamRecord> {
        self.team_records.get(team)
    }

    /// Round number of the block final (log2 of the field size). A field of
    /// 16 teams plays rounds 1..=4 before the cross-block final.
    pub fn final_round(&self) -> u32 {
        let n = self.teams.len().max(2) as f64;
        n.log2().round() as u32
    }

    /// Japanese round name for a round within a block.
    pub fn round_name(&self, round: u32) -> String {
        let final_round = self.final_round();
        if round == final_round - 1 {
            "準決勝".to_string()
        } else if round == final_round.saturating_sub(2) {
            "準々決勝".to_string()
        } else {
            format!("{}回戦", round)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_id_parse_and_display() {
        let id = MatchId::parse("A-R2-M3").unwrap();
        assert_eq!(id.block, "A");
        assert_eq!(id.round, 2);
        assert_eq!(id.number, 3);
        assert_eq!(id.to_string(), "A-R2-M3");
        assert!(MatchId::parse("F-R1-M1").unwrap().is_final());
        assert_eq!(MatchId::parse("garbage"), None);
        assert_eq!(MatchId::parse("A-R2"), None);
    }

    #[test]
    fn zero_based_ids_are_rejected() {
        // M0/R0 would underflow the feeder-pair arithmetic.
        assert_eq!(MatchId::parse("A-R1-M0"), None);
        assert_eq!(MatchId::parse("A-R0-M1"), None);
        assert_eq!(MatchId::parse("A-R1-M1").unwrap().feeder_pair().number, 2);
    }

    #[test]
    fn feeder_pairs_are_adjacent() {
        let id = MatchId::parse("A-R1-M3").unwrap();
        assert_eq!(id.feeder_pair().number, 4);
        let id = MatchId::parse("A-R1-M4").unwrap();
        assert_eq!(id.feeder_pair().number, 3);
    }

    #[test]
    fn round_names() {
        let tournament = Tournament {
            teams: (0..16).map(|i| format!("t{i}")).collect(),
            ..Tournament::default()
        };
        assert_eq!(tournament.round_name(1), "1回戦");
        assert_eq!(tournament.round_name(2), "準々決勝");
        assert_eq!(tournament.round_name(3), "準決勝");
    }
}
