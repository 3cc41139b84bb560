//! Tournament journey summaries and bracket navigation.
//!
//! The journey string seeds article prompts with the team's path so far and
//! its standout performers. Single-game feats (like a 3-hit game) are read
//! from the per-game stat snapshots stored on each match, never inferred
//! from season totals, so a cumulative line is not misattributed to one day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::analysis::rank::{team_rank, TeamRank};
use crate::models::{Decision, MatchId, TeamDirectory, Tournament};

/// Summarizes a team's run through the current tournament, excluding the
/// match identified by `current_match_id`.
pub fn journey_summary(team: &str, current_match_id: &str, tournament: &Tournament) -> String {
    let mut path: Vec<String> = Vec::new();
    let mut feats: BTreeSet<String> = BTreeSet::new();

    for (id, record) in &tournament.matches {
        if id == current_match_id {
            continue;
        }
        if record.away_team != team && record.home_team != team {
            continue;
        }
        let Some(winner) = record.winner.as_deref() else { continue };
        let side = record.side_of(team);
        let opponent = record.team_name(side.opponent());
        let round = MatchId::parse(id).map(|m| m.round).unwrap_or(1);

        if winner == team {
            path.push(format!("{}回戦 vs {}", round, opponent));
        }

        for pitcher in &record.team_box(side).pitching {
            if !pitcher.name.is_empty()
                && pitcher.decision == Decision::Win
                && pitcher.innings >= 6.0
            {
                feats.insert(format!("{}が{}回戦で好投", pitcher.name, round));
            }
        }
        for (player, stats) in &record.team_box(side).game_stats {
            if stats.hits >= 3 {
                feats.insert(format!("{}が{}回戦で猛打賞を記録", player, round));
            }
        }
    }

    if path.is_empty() {
        return "今大会初戦。".to_string();
    }

    // Season batting extremes over a meaningful sample.
    if let Some(record) = tournament.team_record(team) {
        for (player, totals) in &record.batting_totals {
            if totals.at_bats < 5 {
                continue;
            }
            match totals.average() {
                Some(avg) if avg >= 0.4 => {
                    feats.insert(format!("{player}が打率4割超えと絶好調"));
                }
                Some(avg) if avg <= 0.2 => {
                    feats.insert(format!("{player}が打率2割以下と不振"));
                }
                _ => {}
            }
        }
    }

    let mut summary = format!("ここまでの勝ち上がり: {}。", path.join(" → "));
    if !feats.is_empty() {
        summary.push_str(&format!(
            "今大会の主な活躍: {}。",
            feats.iter().cloned().collect::<Vec<_>>().join("、")
        ));
    }
    summary
}

/// A bracket slot that may or may not be decided yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OpponentSlot {
    Decided {
        name: String,
        rank: TeamRank,
    },
    /// The feeder match has not finished; its two candidates if known.
    Undecided {
        #[serde(skip_serializing_if = "Option::is_none")]
        candidates: Option<Vec<(String, TeamRank)>>,
    },
    /// The team just won the final.
    ChampionshipWon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextOpponent {
    pub round_name: String,
    pub opponent: OpponentSlot,
}

/// Finds the next opponent for the winner of `current_match_id`.
/// Returns `None` when the bracket position cannot be resolved.
pub fn next_opponent(
    team: &str,
    current_match_id: &str,
    tournament: &Tournament,
    directory: &TeamDirectory,
) -> Option<NextOpponent> {
    let current = MatchId::parse(current_match_id)?;
    if current.is_final() {
        return Some(NextOpponent {
            round_name: "大会終了".to_string(),
            opponent: OpponentSlot::ChampionshipWon,
        });
    }

    let final_round = tournament.final_round();
    let (next_id, round_name) = if current.round == final_round.saturating_sub(1) {
        (
            MatchId { block: "F".to_string(), round: 1, number: 1 },
            "決勝".to_string(),
        )
    } else if current.round < final_round.saturating_sub(1) {
        let next = MatchId {
            block: current.block.clone(),
            round: current.round + 1,
            number: current.number.div_ceil(2),
        };
        let name = tournament.round_name(current.round + 1);
        (next, name)
    } else {
        return None;
    };

    let rank_of = |name: &str| team_rank(directory.get(name), tournament.team_record(name));

    if let Some(next_match) = tournament.find_match(&next_id.to_string()) {
        let opponent_name = [&next_match.away_team, &next_match.home_team]
            .into_iter()
            .find(|name| !name.is_empty() && name.as_str() != team);
        if let Some(name) = opponent_name {
            return Some(NextOpponent {
                round_name,
                opponent: OpponentSlot::Decided { name: name.clone(), rank: rank_of(name) },
            });
        }
    }

    // Opponent not decided: report the feeder match's candidates if that
    // match is already set up.
    let feeder = current.feeder_pair();
    let candidates = tournament.find_match(&feeder.to_string()).and_then(|m| {
        if m.away_team.is_empty() || m.home_team.is_empty() {
            None
        } else {
            Some(vec![
                (m.away_team.clone(), rank_of(&m.away_team)),
                (m.home_team.clone(), rank_of(&m.home_team)),
            ])
        }
    });
    Some(NextOpponent { round_name, opponent: OpponentSlot::Undecided { candidates } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameBattingStats, MatchRecord, PitcherOuting, TeamBox};

    fn won_match(id: &str, team: &str, opponent: &str) -> MatchRecord {
        MatchRecord {
            id: id.to_string(),
            away_team: team.to_string(),
            home_team: opponent.to_string(),
            away_score: 3,
            home_score: 1,
            winner: Some(team.to_string()),
            away: TeamBox::default(),
            home: TeamBox::default(),
        }
    }

    fn tournament_with(matches: Vec<MatchRecord>) -> Tournament {
        Tournament {
            teams: (0..16).map(|i| format!("t{i}")).collect(),
            matches: matches.into_iter().map(|m| (m.id.clone(), m)).collect(),
            team_records: Default::default(),
        }
    }

    #[test]
    fn first_game_has_fixed_placeholder() {
        let t = tournament_with(vec![]);
        assert_eq!(journey_summary("無名高", "A-R1-M1", &t), "今大会初戦。");
    }

    #[test]
    fn path_joins_rounds_and_skips_current_match() {
        let t = tournament_with(vec![
            won_match("A-R1-M1", "波高", "甲高"),
            won_match("A-R2-M1", "波高", "乙高"),
            won_match("A-R3-M1", "波高", "丙高"),
        ]);
        let summary = journey_summary("波高", "A-R3-M1", &t);
        assert_eq!(summary, "ここまでの勝ち上がり: 1回戦 vs 甲高 → 2回戦 vs 乙高。");
    }

    #[test]
    fn feats_come_from_per_game_snapshots() {
        let mut m = won_match("A-R1-M1", "波高", "甲高");
        m.away.pitching.push(PitcherOuting {
            name: "剛田".into(),
            number: None,
            innings: 7.0,
            runs: 1,
            earned_runs: 1,
            strikeouts: 8,
            walks: 2,
            decision: Decision::Win,
        });
        m.away.game_stats.insert(
            "俊足".into(),
            GameBattingStats { played: true, at_bats: 4, hits: 3, rbi: 1, home_runs: 0 },
        );
        let mut t = tournament_with(vec![m]);
        // Season totals alone (3 hits over many games) must NOT produce a
        // 猛打賞 claim; the per-game snapshot above is what counts.
        t.team_records.entry("波高".into()).or_default().batting_totals.insert(
            "散発".into(),
            crate::models::PlayerBattingTotals { at_bats: 15, hits: 3, ..Default::default() },
        );
        let summary = journey_summary("波高", "A-R2-M1", &t);
        assert!(summary.contains("剛田が1回戦で好投"));
        assert!(summary.contains("俊足が1回戦で猛打賞を記録"));
        assert!(!summary.contains("散発が1回戦で猛打賞"));
        // .200 on 15 at-bats does flag the slump note.
        assert!(summary.contains("散発が打率2割以下と不振"));
    }

    #[test]
    fn next_opponent_decided_and_named_rounds() {
        // 16 teams: block rounds 1..=4, so R3 is the semifinal and R3
        // winners go to the final.
        let mut next = won_match("A-R2-M1", "波高", "乙高");
        next.away_team = "波高".into();
        next.home_team = "強豪".into();
        next.winner = None;
        let t = tournament_with(vec![next]);
        let n = next_opponent("波高", "A-R1-M1", &t, TeamDirectory::builtin()).unwrap();
        assert_eq!(n.round_name, "準々決勝");
        match n.opponent {
            OpponentSlot::Decided { name, rank } => {
                assert_eq!(name, "強豪");
                assert_eq!(rank, TeamRank::E);
            }
            other => panic!("expected decided opponent, got {other:?}"),
        }
    }

    #[test]
    fn undecided_opponent_reports_feeder_candidates() {
        let feeder = won_match("A-R1-M2", "甲高", "乙高");
        let t = tournament_with(vec![feeder]);
        let n = next_opponent("波高", "A-R1-M1", &t, TeamDirectory::builtin()).unwrap();
        assert_eq!(n.round_name, "準々決勝");
        match n.opponent {
            OpponentSlot::Undecided { candidates: Some(c) } => {
                assert_eq!(c[0].0, "甲高");
                assert_eq!(c[1].0, "乙高");
            }
            other => panic!("expected feeder candidates, got {other:?}"),
        }
    }

    #[test]
    fn zero_numbered_match_id_resolves_to_nothing() {
        // A tournament keyed with a 0-based id must degrade, not panic in
        // the feeder-pair arithmetic.
        let mut stray = won_match("A-R1-M0", "波高", "甲高");
        stray.winner = None;
        let t = tournament_with(vec![stray]);
        assert!(next_opponent("波高", "A-R1-M0", &t, TeamDirectory::builtin()).is_none());
    }

    #[test]
    fn semifinal_leads_to_the_final_and_final_ends_it() {
        let t = tournament_with(vec![]);
        let n = next_opponent("波高", "A-R3-M1", &t, TeamDirectory::builtin()).unwrap();
        assert_eq!(n.round_name, "決勝");
        let n = next_opponent("波高", "F-R1-M1", &t, TeamDirectory::builtin()).unwrap();
        assert!(matches!(n.opponent, OpponentSlot::ChampionshipWon));
    }
}
