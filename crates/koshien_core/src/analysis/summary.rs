//! Game-level story classification.
//!
//! Exactly zero or one summary fires per match, chosen by the first matching
//! rule: walk-off → comeback → pitcher's duel → slugfest → blowout. Line
//! scores are authoritative here; at-bat codes only contribute the hit
//! counts.

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStory {
    WalkOff,
    Comeback,
    PitchersDuel,
    Slugfest,
    Blowout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub story: GameStory,
    pub text: String,
}

/// Classifies the match as a whole. Returns `None` for an unremarkable game.
pub fn classify_game(record: &MatchRecord, winner_side: Side) -> Option<GameSummary> {
    let loser_side = winner_side.opponent();
    let winner_name = record.team_name(winner_side);
    let winner_score = record.final_score(winner_side);
    let loser_score = record.final_score(loser_side);
    let total_runs = winner_score + loser_score;
    let total_hits = record.away.hit_count() + record.home.hit_count();
    let innings = record.innings_played();

    if let Some(summary) = walk_off(record, winner_side, innings) {
        return Some(summary);
    }

    let winner_after_6 = record.team_box(winner_side).runs_through(6);
    let loser_after_6 = record.team_box(loser_side).runs_through(6);
    if innings >= 7 && winner_after_6 < loser_after_6 {
        return Some(GameSummary {
            story: GameStory::Comeback,
            text: format!("{winner_name}が終盤に試合をひっくり返す、劇的な逆転勝利となった"),
        });
    }
    if total_runs <= 5 && total_hits <= 12 {
        return Some(GameSummary {
            story: GameStory::PitchersDuel,
            text: "両チームの投手が好投し、1点を争う緊迫した投手戦となった".to_string(),
        });
    }
    if total_runs >= 13 && total_hits >= 20 {
        return Some(GameSummary {
            story: GameStory::Slugfest,
            text: format!(
                "両チーム合わせて{total_hits}安打{total_runs}得点が乱れ飛ぶ、壮絶な乱打戦となった"
            ),
        });
    }
    if winner_score.saturating_sub(loser_score) >= 7 {
        return Some(GameSummary {
            story: GameStory::Blowout,
            text: format!("{winner_name}が投打に圧倒し、一方的な試合展開で勝利を収めた"),
        });
    }
    None
}

/// Walk-off: the home team wins it in the bottom of the final inning, having
/// been level or behind before that inning's runs.
fn walk_off(record: &MatchRecord, winner_side: Side, innings: usize) -> Option<GameSummary> {
    if winner_side != Side::Home || innings < 9 {
        return None;
    }
    let last = innings - 1;
    let home_in_last = *record.home.inning_runs.get(last)?;
    if home_in_last == 0 {
        return None;
    }
    let away_total: u32 = record.away.inning_runs.iter().sum();
    let home_before = record.home.runs_through(last);
    let home_total = home_before + home_in_last;
    if home_before <= away_total && home_total > away_total {
        Some(GameSummary {
            story: GameStory::WalkOff,
            text: format!(
                "劇的なサヨナラ勝ちで、{}が熱戦に終止符を打った",
                record.team_name(Side::Home)
            ),
        })
    } else {
        None
    }
}
