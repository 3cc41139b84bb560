//! Team strength rank (A-E).
//!
//! Deterministic score from the static profile plus the team's most recent
//! tournament finish. Missing data degrades to rank E, never an error.

use serde::{Deserialize, Serialize};

use crate::models::{TeamProfile, TeamRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamRank {
    A,
    B,
    C,
    D,
    E,
}

impl TeamRank {
    /// Descriptive label used in prompts and team blurbs.
    pub fn label(self) -> &'static str {
        match self {
            TeamRank::A => "名門校",
            TeamRank::B => "強豪校",
            TeamRank::C => "中堅校",
            TeamRank::D => "発展途上のチーム",
            TeamRank::E => "挑戦者",
        }
    }
}

/// Bonus for the historical best finish. "準優勝" is checked before "優勝",
/// which it contains as a substring.
fn best_finish_bonus(best: &str) -> i32 {
    if best.contains("準優勝") {
        20
    } else if best.contains("優勝") {
        25
    } else if best.contains("ベスト4") {
        15
    } else if best.contains("ベスト8") {
        10
    } else if best.contains("出場") {
        10
    } else if best.contains("ベスト16") {
        5
    } else {
        0
    }
}

/// Weighted bonus from the previous tournament's finish place.
fn last_finish_bonus(place: u32) -> i32 {
    const WEIGHT: i32 = 3;
    let tier = match place {
        1 => 30,
        2 => 25,
        3..=4 => 20,
        5..=8 => 15,
        9..=16 => 5,
        64.. => -5,
        _ => 0,
    };
    tier * WEIGHT
}

/// Computes the team rank. `None` inputs are normal (unknown school, first
/// tournament) and simply contribute nothing; a fully unknown team is E.
pub fn team_rank(profile: Option<&TeamProfile>, record: Option<&TeamRecord>) -> TeamRank {
    let Some(profile) = profile else {
        return TeamRank::E;
    };

    let mut score = profile.deviation as i32;
    score += best_finish_bonus(&profile.best_finish);
    if profile.popular {
        score += 5;
    }
    if let Some(place) = record.and_then(|r| r.last_finish) {
        score += last_finish_bonus(place);
    }

    if score >= 85 {
        TeamRank::A
    } else if score >= 70 {
        TeamRank::B
    } else if score >= 55 {
        TeamRank::C
    } else if score >= 40 {
        TeamRank::D
    } else {
        TeamRank::E
    }
}
