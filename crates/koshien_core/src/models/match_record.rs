//! Match record data structures.
//!
//! A [`MatchRecord`] is the completed box score of one game: final and
//! per-inning scores, both lineups with their per-inning at-bat codes, and
//! both pitching lines. It is built once, after the game is final, and is
//! read-only for the whole extraction pipeline.
//!
//! Two sources of truth coexist and may disagree on malformed input:
//! - `inning_runs` is authoritative for inning-level narrative (line score,
//!   comeback / walk-off detection),
//! - the per-at-bat codes are authoritative for play-level narrative.
//! The pipeline tolerates mismatches between the two and never cross-checks
//! them fatally.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which half of an inning a team bats in. The away team bats first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Away, Side::Home];

    pub fn opponent(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

/// Batting-order key. A substitute sorts immediately after the starter whose
/// slot they took over, so `3` < `3 (sub)` < `4`.
///
/// The derived `Ord` gives the lineup-sheet order; chronological order within
/// a half-inning additionally needs a rotation anchor, see
/// [`crate::engine::order::circular_cmp`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct OrderKey {
    pub slot: u8,
    #[serde(default)]
    pub substitute: bool,
}

impl OrderKey {
    pub fn starter(slot: u8) -> Self {
        OrderKey { slot, substitute: false }
    }

    pub fn sub_for(slot: u8) -> Self {
        OrderKey { slot, substitute: true }
    }

    /// Parses the box-score notation: `"7"` for a starter, `"7-sub"` for the
    /// player substituted into slot 7.
    pub fn parse(s: &str) -> Option<Self> {
        let (num, substitute) = match s.strip_suffix("-sub") {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        num.trim().parse::<u8>().ok().map(|slot| OrderKey { slot, substitute })
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.substitute {
            write!(f, "{}-sub", self.slot)
        } else {
            write!(f, "{}", self.slot)
        }
    }
}

/// How a substitute entered the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubKind {
    PinchHitter,
    PinchRunner,
    Pitcher,
    Defense,
}

impl SubKind {
    /// Japanese entry description used by substitution highlights.
    pub fn entry_text(self) -> &'static str {
        match self {
            SubKind::PinchHitter => "代打として登場",
            SubKind::PinchRunner => "代走として出場",
            SubKind::Pitcher => "リリーフとしてマウンドに上がった",
            SubKind::Defense => "守備固めで出場",
        }
    }

    /// Short label used in box-score listings ("代" column).
    pub fn short_label(self) -> &'static str {
        match self {
            SubKind::PinchHitter => "代打",
            SubKind::PinchRunner => "代走",
            SubKind::Pitcher => "投手",
            SubKind::Defense => "守備",
        }
    }
}

/// One lineup position: a player plus their at-bat codes for every inning.
///
/// `results` holds one entry per inning. An entry may be empty (no plate
/// appearance that inning) or carry several codes separated by `、` when the
/// order wrapped around within one half-inning. A code may end with a
/// `;`-separated baserunning tail, e.g. `"中安;田中 盗塁 二塁へ"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattingSlot {
    pub order: OrderKey,
    pub name: String,
    #[serde(default)]
    pub number: Option<u8>,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_kind: Option<SubKind>,
    #[serde(default)]
    pub results: Vec<String>,
}

impl BattingSlot {
    /// The raw result cell for an inning, `None` when empty or absent.
    pub fn result_cell(&self, inning: usize) -> Option<&str> {
        self.results.get(inning).map(|s| s.as_str()).filter(|s| !s.trim().is_empty())
    }

    /// At-bat code fragments recorded for this player in an inning.
    pub fn at_bats_in(&self, inning: usize) -> Vec<&str> {
        match self.result_cell(inning) {
            Some(cell) => split_at_bats(cell),
            None => Vec::new(),
        }
    }
}

/// Splits a result cell into individual at-bat codes. The final data format
/// uses `、`; older snapshots used `,`, which never appears inside a batting
/// code (only in baserunning tails, which are split off first).
pub fn split_at_bats(cell: &str) -> Vec<&str> {
    cell.split('、')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Splits one at-bat code into the batter part and the optional baserunning
/// tail (`"中安;田中 盗塁 二塁へ"` → `("中安", Some("田中 盗塁 二塁へ"))`).
pub fn split_runner_tail(code: &str) -> (&str, Option<&str>) {
    match code.split_once(';') {
        Some((bat, tail)) => (bat.trim(), Some(tail).map(str::trim).filter(|s| !s.is_empty())),
        None => (code.trim(), None),
    }
}

/// Win/loss decision charged to a pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Win,
    Loss,
    #[default]
    NoDecision,
}

/// One pitcher's line for the game. `innings` is fractional in thirds
/// (8.2 = 8 innings and two outs, box-score convention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherOuting {
    pub name: String,
    #[serde(default)]
    pub number: Option<u8>,
    pub innings: f32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub earned_runs: u32,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub walks: u32,
    #[serde(default)]
    pub decision: Decision,
}

/// Per-game batting totals for one player, stored with the match so that
/// single-game claims ("a 3-hit game") are checked against what actually
/// happened that day, not against season totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GameBattingStats {
    #[serde(default)]
    pub played: bool,
    #[serde(default)]
    pub at_bats: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub home_runs: u32,
}

/// One team's half of the box score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamBox {
    #[serde(default)]
    pub batting: Vec<BattingSlot>,
    #[serde(default)]
    pub pitching: Vec<PitcherOuting>,
    /// Runs per inning, index 0 = first inning.
    #[serde(default)]
    pub inning_runs: Vec<u32>,
    /// Keyed by player name.
    #[serde(default)]
    pub game_stats: HashMap<String, GameBattingStats>,
}

impl TeamBox {
    /// Lineup in lineup-sheet order (starters, each followed by their subs).
    /// Slots without a player name are dropped.
    pub fn sorted_lineup(&self) -> Vec<&BattingSlot> {
        let mut slots: Vec<&BattingSlot> =
            self.batting.iter().filter(|s| !s.name.is_empty()).collect();
        slots.sort_by_key(|s| s.order);
        slots
    }

    /// Starting nine only, in order.
    pub fn starters(&self) -> Vec<&BattingSlot> {
        self.sorted_lineup()
            .into_iter()
            .filter(|s| !s.order.substitute)
            .collect()
    }

    /// Hits in this box, counted from the at-bat codes (`安` or `塁打`).
    pub fn hit_count(&self) -> u32 {
        self.batting
            .iter()
            .flat_map(|slot| slot.results.iter())
            .flat_map(|cell| split_at_bats(cell))
            .map(|code| split_runner_tail(code).0)
            .filter(|bat| bat.contains('安') || bat.contains("塁打"))
            .count() as u32
    }

    /// Cumulative runs through `innings` innings (for "behind after 6" checks).
    pub fn runs_through(&self, innings: usize) -> u32 {
        self.inning_runs.iter().take(innings).sum()
    }
}

/// One completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub away_team: String,
    pub home_team: String,
    pub away_score: u32,
    pub home_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default)]
    pub away: TeamBox,
    #[serde(default)]
    pub home: TeamBox,
}

impl MatchRecord {
    pub fn team_box(&self, side: Side) -> &TeamBox {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away_team,
            Side::Home => &self.home_team,
        }
    }

    pub fn final_score(&self, side: Side) -> u32 {
        match side {
            Side::Away => self.away_score,
            Side::Home => self.home_score,
        }
    }

    /// The side a team name bats for. Unknown names resolve to the home side,
    /// matching the lenient winner handling of the extraction pipeline.
    pub fn side_of(&self, team: &str) -> Side {
        if team == self.away_team {
            Side::Away
        } else {
            Side::Home
        }
    }

    /// Number of innings played, taken from the line score. A record with no
    /// line score is treated as a regulation nine-inning game.
    pub fn innings_played(&self) -> usize {
        let n = self.away.inning_runs.len().max(self.home.inning_runs.len());
        if n == 0 {
            9
        } else {
            n
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_key_sorts_substitute_after_starter() {
        let mut keys = vec![OrderKey::starter(4), OrderKey::sub_for(3), OrderKey::starter(3)];
        keys.sort();
        assert_eq!(
            keys,
            vec![OrderKey::starter(3), OrderKey::sub_for(3), OrderKey::starter(4)]
        );
    }

    #[test]
    fn order_key_parse_roundtrip() {
        assert_eq!(OrderKey::parse("7"), Some(OrderKey::starter(7)));
        assert_eq!(OrderKey::parse("7-sub"), Some(OrderKey::sub_for(7)));
        assert_eq!(OrderKey::parse("x"), None);
        assert_eq!(OrderKey::sub_for(7).to_string(), "7-sub");
    }

    #[test]
    fn split_at_bats_handles_empty_and_multi() {
        assert_eq!(split_at_bats("中安、三振"), vec!["中安", "三振"]);
        assert_eq!(split_at_bats("左安"), vec!["左安"]);
        assert!(split_at_bats("").is_empty());
    }

    #[test]
    fn runner_tail_split() {
        assert_eq!(
            split_runner_tail("中安;田中 盗塁 二塁へ"),
            ("中安", Some("田中 盗塁 二塁へ"))
        );
        assert_eq!(split_runner_tail("三振"), ("三振", None));
        assert_eq!(split_runner_tail("三振;"), ("三振", None));
    }

    #[test]
    fn hit_count_sees_codes_not_cells() {
        let team = TeamBox {
            batting: vec![BattingSlot {
                order: OrderKey::starter(1),
                name: "田中".into(),
                number: Some(1),
                position: "中".into(),
                sub_kind: None,
                results: vec!["中安、左安".into(), "三振".into()],
            }],
            ..TeamBox::default()
        };
        assert_eq!(team.hit_count(), 2);
    }

    #[test]
    fn innings_default_to_regulation() {
        let record = MatchRecord {
            id: "A-R1-M1".into(),
            away_team: "a".into(),
            home_team: "b".into(),
            away_score: 0,
            home_score: 0,
            winner: None,
            away: TeamBox::default(),
            home: TeamBox::default(),
        };
        assert_eq!(record.innings_played(), 9);
    }
}
