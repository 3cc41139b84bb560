//! Highlight extraction.
//!
//! Walks the full match in true plate-appearance order across both lineups
//! (substitutes and wrapped batting orders included), tags scoring plays as
//! first-score / go-ahead / insurance runs, lifts baserunning sub-events,
//! then runs the whole-match passes (tough loss, pinch-hit impact, pitching
//! feats, relay) and prepends the single game-level summary.
//!
//! Everything here is best-effort: unrecognized codes and missing lineups
//! are skipped, never fatal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::analysis::summary::{classify_game, GameStory};
use crate::engine::half_inning::BatterIndices;
use crate::engine::order::sort_circular;
use crate::engine::play::{translate, PlayKind, PlayOutcome};
use crate::models::{split_runner_tail, BattingSlot, Decision, MatchRecord, Side, SubKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    GameSummary,
    WalkOff,
    FirstScore,
    GoAhead,
    InsuranceRun,
    Baserunning,
    SubstitutionImpact,
    PitchingFeat,
    ToughLoss,
    RelaySummary,
}

/// One derived highlight. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inning: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub category: HighlightCategory,
    pub text: String,
}

/// Extraction output: the highlight list plus every player named in one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightReport {
    pub highlights: Vec<Highlight>,
    pub key_players: BTreeSet<String>,
}

impl HighlightReport {
    fn push(&mut self, highlight: Highlight) {
        if let Some(player) = &highlight.player {
            self.key_players.insert(player.clone());
        }
        self.highlights.push(highlight);
    }
}

fn player_info(slot: &BattingSlot) -> String {
    if slot.order.substitute {
        format!("{}(交代)", slot.name)
    } else {
        format!("{}({}番)", slot.name, slot.order.slot)
    }
}

/// Japanese sentence for a scoring batting play. `event` is 先制 / 逆転 /
/// 追加点. Returns `None` for unrecognized outcomes.
fn describe_batting_play(outcome: &PlayOutcome, player: &str, event: &str) -> Option<String> {
    let rbi_text = if outcome.rbi > 1 {
        format!("{}点", outcome.rbi)
    } else {
        String::new()
    };
    let text = match outcome.kind {
        PlayKind::HomeRun => format!("{player}が{event}となる{rbi_text}本塁打を放った"),
        PlayKind::Triple => format!("{player}が{event}となる{rbi_text}三塁打を放った"),
        PlayKind::Double => format!("{player}が{event}となる{rbi_text}二塁打を放った"),
        PlayKind::Single => format!("{player}が{event}となる{rbi_text}タイムリーヒットを放った"),
        PlayKind::SacFly => {
            format!("{player}が犠牲フライで{event}となる{}点を挙げた", outcome.rbi)
        }
        PlayKind::GroundOutRbi => {
            format!("{player}の内野ゴロの間に{event}となる{}点を挙げた", outcome.rbi)
        }
        PlayKind::ErrorRbi => {
            format!("相手エラーの間に{event}となる{}点を記録した", outcome.rbi)
        }
        PlayKind::Walk => format!("{player}が押し出しとなる四球を選んだ"),
        _ => return None,
    };
    Some(text)
}

/// Baserunning sub-event sentence, `None` when unparseable.
fn describe_runner_play(fragment: &str) -> Option<(String, String)> {
    let mut parts = fragment.split_whitespace();
    let runner = parts.next()?.to_string();
    let action = parts.next()?;
    let detail = parts.collect::<Vec<_>>().join(" ");

    let text = if action == "盗塁" {
        format!("{runner}が盗塁を成功させ{detail}！")
    } else if action == "タッチアップ" {
        format!("{runner}がタッチアップから{detail}！")
    } else if action == "生還" || (action == "進塁" && detail.contains("生還")) {
        format!("{runner}が好走塁でホームイン！")
    } else if action.contains('死') || action.contains("アウト") {
        format!("{runner}が走塁ミスでアウトになった")
    } else if action == "進塁" {
        format!("{runner}が進塁し{detail}。")
    } else {
        return None;
    };
    Some((runner, text))
}

struct RunningScore {
    away: u32,
    home: u32,
}

impl RunningScore {
    fn get(&self, side: Side) -> u32 {
        match side {
            Side::Away => self.away,
            Side::Home => self.home,
        }
    }

    fn add(&mut self, side: Side, runs: u32) {
        match side {
            Side::Away => self.away += runs,
            Side::Home => self.home += runs,
        }
    }
}

/// Extracts the full highlight report for a finished match.
pub fn extract_highlights(record: &MatchRecord, winner: &str) -> HighlightReport {
    let mut report = HighlightReport::default();
    // No box-score detail at all: nothing to narrate.
    if record.away.batting.is_empty()
        && record.home.batting.is_empty()
        && record.away.pitching.is_empty()
        && record.home.pitching.is_empty()
    {
        return report;
    }
    let winner_side = record.side_of(winner);
    let innings = record.innings_played();

    chronological_pass(record, winner_side, innings, &mut report);
    tough_loss_pass(record, winner_side, &mut report);
    substitution_pass(record, innings, &mut report);
    pitching_feat_pass(record, &mut report);
    relay_pass(record, &mut report);

    if let Some(summary) = classify_game(record, winner_side) {
        let category = match summary.story {
            GameStory::WalkOff => HighlightCategory::WalkOff,
            _ => HighlightCategory::GameSummary,
        };
        report.highlights.insert(
            0,
            Highlight { inning: None, team: None, player: None, category, text: summary.text },
        );
    }

    report
}

/// Step 1: every plate appearance of the game in true time order.
fn chronological_pass(
    record: &MatchRecord,
    winner_side: Side,
    innings: usize,
    report: &mut HighlightReport,
) {
    let mut score = RunningScore { away: 0, home: 0 };
    let mut has_scored = false;
    let mut go_ahead_done = false;
    let mut indices = BatterIndices::default();

    for inning in 0..innings {
        for side in Side::BOTH {
            let team_box = record.team_box(side);
            let lineup = team_box.sorted_lineup();
            if lineup.is_empty() {
                continue;
            }

            // Collect every plate appearance across the whole order:
            // substitutions let non-adjacent slots bat in one half-inning.
            let mut plays: Vec<(&BattingSlot, &str)> = Vec::new();
            for &slot in &lineup {
                for code in slot.at_bats_in(inning) {
                    plays.push((slot, code));
                }
            }
            if plays.is_empty() {
                continue;
            }

            // Restore time order around the recorded leadoff slot.
            let anchor = lineup[indices.get(side) % lineup.len()].order;
            sort_circular(&mut plays, anchor, |(slot, _)| slot.order);

            let team_name = record.team_name(side).to_string();
            for (slot, code) in &plays {
                let (bat_code, runner_tail) = split_runner_tail(code);
                if !bat_code.is_empty() {
                    batting_highlight(
                        record,
                        side,
                        winner_side,
                        inning,
                        slot,
                        bat_code,
                        &mut score,
                        &mut has_scored,
                        &mut go_ahead_done,
                        report,
                    );
                }
                if let Some(tail) = runner_tail {
                    for fragment in tail.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        match describe_runner_play(fragment) {
                            Some((runner, text)) => report.push(Highlight {
                                inning: Some(inning as u32 + 1),
                                team: Some(team_name.clone()),
                                player: Some(runner),
                                category: HighlightCategory::Baserunning,
                                text,
                            }),
                            None => debug!(fragment, "unparseable baserunning event, skipped"),
                        }
                    }
                }
            }

            // Anchor the next inning one past the last appearance.
            let last_order = plays.last().map(|(slot, _)| slot.order);
            if let Some(last_order) = last_order {
                if let Some(pos) = lineup.iter().position(|s| s.order == last_order) {
                    indices.set(side, (pos + 1) % lineup.len());
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn batting_highlight(
    record: &MatchRecord,
    side: Side,
    winner_side: Side,
    inning: usize,
    slot: &BattingSlot,
    bat_code: &str,
    score: &mut RunningScore,
    has_scored: &mut bool,
    go_ahead_done: &mut bool,
    report: &mut HighlightReport,
) {
    let outcome = translate(bat_code);
    if outcome.kind == PlayKind::Other {
        debug!(code = bat_code, "unrecognized at-bat code, skipped");
        return;
    }
    if !outcome.is_scoring() {
        return;
    }

    let before = score.get(side);
    score.add(side, outcome.rbi);
    let after = score.get(side);
    let opponent = score.get(side.opponent());

    let (category, event) = if !*has_scored {
        *has_scored = true;
        (HighlightCategory::FirstScore, "先制")
    } else if side == winner_side && !*go_ahead_done && before <= opponent && after > opponent {
        *go_ahead_done = true;
        (HighlightCategory::GoAhead, "逆転")
    } else {
        (HighlightCategory::InsuranceRun, "追加点")
    };

    if let Some(text) = describe_batting_play(&outcome, &player_info(slot), event) {
        report.push(Highlight {
            inning: Some(inning as u32 + 1),
            team: Some(record.team_name(side).to_string()),
            player: Some(slot.name.clone()),
            category,
            text,
        });
    }
}

/// A lone losing pitcher who went at least eight with two or fewer earned
/// runs deserved better.
fn tough_loss_pass(record: &MatchRecord, winner_side: Side, report: &mut HighlightReport) {
    let loser_side = winner_side.opponent();
    let pitchers = &record.team_box(loser_side).pitching;
    if pitchers.len() != 1 {
        return;
    }
    let ace = &pitchers[0];
    if ace.decision == Decision::Loss && ace.innings >= 8.0 && ace.earned_runs <= 2 {
        report.push(Highlight {
            inning: None,
            team: Some(record.team_name(loser_side).to_string()),
            player: Some(ace.name.clone()),
            category: HighlightCategory::ToughLoss,
            text: format!(
                "{}投手は{}回を{}失点と好投したが、打線の援護に恵まれなかった",
                ace.name, ace.innings, ace.earned_runs
            ),
        });
    }
}

/// Pinch hitters who delivered on their first recorded plate appearance, and
/// relief pitchers entering the game.
fn substitution_pass(record: &MatchRecord, innings: usize, report: &mut HighlightReport) {
    for side in Side::BOTH {
        let team_name = record.team_name(side).to_string();
        for slot in &record.team_box(side).batting {
            let Some(kind) = slot.sub_kind else { continue };
            let Some((inning, first_code)) = (0..innings)
                .find_map(|i| slot.at_bats_in(i).first().map(|code| (i, *code)))
            else {
                continue;
            };

            let (bat_code, _) = split_runner_tail(first_code);
            if kind == SubKind::PinchHitter && translate(bat_code).kind.is_hit() {
                report.push(Highlight {
                    inning: Some(inning as u32 + 1),
                    team: Some(team_name.clone()),
                    player: Some(slot.name.clone()),
                    category: HighlightCategory::SubstitutionImpact,
                    text: format!("{}し、起用に応えるヒットを放った", kind.entry_text()),
                });
            }
            if kind == SubKind::Pitcher {
                report.push(Highlight {
                    inning: Some(inning as u32 + 1),
                    team: Some(team_name.clone()),
                    player: Some(slot.name.clone()),
                    category: HighlightCategory::SubstitutionImpact,
                    text: kind.entry_text().to_string(),
                });
            }
        }
    }
}

/// Complete-game shutouts and double-digit strikeout games. Both may fire
/// for the same pitcher.
fn pitching_feat_pass(record: &MatchRecord, report: &mut HighlightReport) {
    for side in Side::BOTH {
        let team_name = record.team_name(side).to_string();
        for pitcher in &record.team_box(side).pitching {
            if pitcher.name.is_empty() {
                continue;
            }
            if pitcher.decision == Decision::Win && pitcher.runs == 0 && pitcher.innings >= 7.0 {
                report.push(Highlight {
                    inning: None,
                    team: Some(team_name.clone()),
                    player: Some(pitcher.name.clone()),
                    category: HighlightCategory::PitchingFeat,
                    text: "圧巻の投球で完封勝利".to_string(),
                });
            }
            if pitcher.strikeouts >= 10 {
                report.push(Highlight {
                    inning: None,
                    team: Some(team_name.clone()),
                    player: Some(pitcher.name.clone()),
                    category: HighlightCategory::PitchingFeat,
                    text: format!("{}奪三振の快投", pitcher.strikeouts),
                });
            }
        }
    }
}

/// One summary line per team that used more than one pitcher.
fn relay_pass(record: &MatchRecord, report: &mut HighlightReport) {
    for side in Side::BOTH {
        let pitchers = &record.team_box(side).pitching;
        if pitchers.len() > 1 {
            let legs: Vec<String> = pitchers
                .iter()
                .map(|p| format!("{}({}回)", p.name, p.innings))
                .collect();
            report.push(Highlight {
                inning: None,
                team: Some(record.team_name(side).to_string()),
                player: None,
                category: HighlightCategory::RelaySummary,
                text: format!("投手リレーは {} だった", legs.join(" → ")),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderKey, PitcherOuting, TeamBox};

    fn slot(order: OrderKey, name: &str, results: Vec<&str>) -> BattingSlot {
        BattingSlot {
            order,
            name: name.to_string(),
            number: None,
            position: "内".to_string(),
            sub_kind: None,
            results: results.into_iter().map(String::from).collect(),
        }
    }

    fn pitcher(name: &str, innings: f32, runs: u32, er: u32, k: u32, decision: Decision) -> PitcherOuting {
        PitcherOuting {
            name: name.to_string(),
            number: None,
            innings,
            runs,
            earned_runs: er,
            strikeouts: k,
            walks: 0,
            decision,
        }
    }

    fn record(away: TeamBox, home: TeamBox, away_score: u32, home_score: u32) -> MatchRecord {
        MatchRecord {
            id: "A-R1-M1".into(),
            away_team: "先攻高".into(),
            home_team: "後攻高".into(),
            away_score,
            home_score,
            winner: None,
            away,
            home,
        }
    }

    fn categories<'a>(
        report: &'a HighlightReport,
        category: HighlightCategory,
    ) -> Vec<&'a Highlight> {
        report.highlights.iter().filter(|h| h.category == category).collect()
    }

    #[test]
    fn first_score_is_unique_per_match() {
        let away = TeamBox {
            batting: vec![
                slot(OrderKey::starter(1), "青木", vec!["中安1点", "本塁打"]),
                slot(OrderKey::starter(2), "石田", vec!["", "左安1点"]),
            ],
            inning_runs: vec![1, 3],
            ..TeamBox::default()
        };
        let home = TeamBox {
            batting: vec![slot(OrderKey::starter(1), "上野", vec!["二塁打1点", ""])],
            inning_runs: vec![1, 0],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, home, 4, 1), "先攻高");
        assert_eq!(categories(&report, HighlightCategory::FirstScore).len(), 1);
        assert_eq!(
            categories(&report, HighlightCategory::FirstScore)[0].player.as_deref(),
            Some("青木")
        );
        assert!(report.key_players.contains("青木"));
        assert!(report.key_players.contains("上野"));
    }

    #[test]
    fn wrapped_order_is_chronological_not_numeric() {
        // Inning 1 ends with the six-hole hitter; inning 2 is batted by
        // 7, 8, 9, then 1 after the wrap, all scoring. The highlight
        // sequence must preserve that order.
        let mut batting: Vec<BattingSlot> = (1..=9)
            .map(|i| slot(OrderKey::starter(i), &format!("選手{i}"), vec!["", ""]))
            .collect();
        for s in batting.iter_mut().take(6) {
            s.results[0] = "三振".to_string();
        }
        batting[6].results[1] = "中安1点".to_string();
        batting[7].results[1] = "二塁打1点".to_string();
        batting[8].results[1] = "本塁打2点".to_string();
        batting[0].results[1] = "左安1点".to_string();

        let away = TeamBox { batting, inning_runs: vec![0, 5], ..TeamBox::default() };
        let report = extract_highlights(&record(away, TeamBox::default(), 5, 0), "先攻高");

        let scorers: Vec<&str> = report
            .highlights
            .iter()
            .filter(|h| h.inning == Some(2))
            .filter_map(|h| h.player.as_deref())
            .collect();
        assert_eq!(scorers, vec!["選手7", "選手8", "選手9", "選手1"]);
    }

    #[test]
    fn go_ahead_fires_once_for_the_winner() {
        // Away scores first, home answers with a two-run go-ahead play,
        // then adds more: exactly one go-ahead record.
        let away = TeamBox {
            batting: vec![slot(OrderKey::starter(1), "青木", vec!["中安1点", "", ""])],
            inning_runs: vec![1, 0, 0],
            ..TeamBox::default()
        };
        let home = TeamBox {
            batting: vec![
                slot(OrderKey::starter(4), "大谷", vec!["", "本塁打2点", "二塁打1点"]),
            ],
            inning_runs: vec![0, 2, 1],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, home, 1, 3), "後攻高");
        let go_ahead = categories(&report, HighlightCategory::GoAhead);
        assert_eq!(go_ahead.len(), 1);
        assert_eq!(go_ahead[0].player.as_deref(), Some("大谷"));
        assert!(go_ahead[0].text.contains("逆転"));
        assert_eq!(categories(&report, HighlightCategory::InsuranceRun).len(), 1);
    }

    #[test]
    fn baserunning_tail_becomes_its_own_highlight() {
        let away = TeamBox {
            batting: vec![slot(
                OrderKey::starter(1),
                "青木",
                vec!["中安;青木 盗塁 二塁へ"],
            )],
            inning_runs: vec![0],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, TeamBox::default(), 0, 1), "後攻高");
        let runs = categories(&report, HighlightCategory::Baserunning);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "青木が盗塁を成功させ二塁へ！");
        assert!(report.key_players.contains("青木"));
    }

    #[test]
    fn tough_loss_for_a_lone_quality_loser() {
        let home = TeamBox {
            pitching: vec![pitcher("松井", 8.0, 2, 1, 7, Decision::Loss)],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(TeamBox::default(), home, 1, 0), "先攻高");
        let tough = categories(&report, HighlightCategory::ToughLoss);
        assert_eq!(tough.len(), 1);
        assert_eq!(tough[0].player.as_deref(), Some("松井"));

        // Two pitchers on the losing side: no tough-loss record.
        let home = TeamBox {
            pitching: vec![
                pitcher("松井", 8.0, 2, 1, 7, Decision::Loss),
                pitcher("二番手", 1.0, 0, 0, 1, Decision::NoDecision),
            ],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(TeamBox::default(), home, 1, 0), "先攻高");
        assert!(categories(&report, HighlightCategory::ToughLoss).is_empty());
    }

    #[test]
    fn pinch_hit_and_relief_entries() {
        let mut ph = slot(OrderKey::sub_for(5), "切り札", vec!["", "", "左安"]);
        ph.sub_kind = Some(SubKind::PinchHitter);
        let mut reliever = slot(OrderKey::sub_for(9), "火消し", vec!["", "", "", "三振"]);
        reliever.sub_kind = Some(SubKind::Pitcher);
        let away = TeamBox {
            batting: vec![ph, reliever],
            inning_runs: vec![0, 0, 0, 0],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, TeamBox::default(), 0, 1), "後攻高");
        let subs = categories(&report, HighlightCategory::SubstitutionImpact);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].inning, Some(3));
        assert!(subs[0].text.contains("代打"));
        assert_eq!(subs[1].inning, Some(4));

        // A pinch hitter who struck out earns nothing.
        let mut ph = slot(OrderKey::sub_for(5), "空振り", vec!["三振"]);
        ph.sub_kind = Some(SubKind::PinchHitter);
        let away = TeamBox { batting: vec![ph], inning_runs: vec![0], ..TeamBox::default() };
        let report = extract_highlights(&record(away, TeamBox::default(), 0, 1), "後攻高");
        assert!(categories(&report, HighlightCategory::SubstitutionImpact).is_empty());
    }

    #[test]
    fn shutout_and_strikeout_feats_both_fire() {
        let away = TeamBox {
            pitching: vec![pitcher("剛腕", 9.0, 0, 0, 14, Decision::Win)],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, TeamBox::default(), 1, 0), "先攻高");
        let feats = categories(&report, HighlightCategory::PitchingFeat);
        assert_eq!(feats.len(), 2);
        assert!(feats.iter().any(|h| h.text.contains("完封")));
        assert!(feats.iter().any(|h| h.text.contains("14奪三振")));
    }

    #[test]
    fn relay_lists_pitchers_in_usage_order() {
        let home = TeamBox {
            pitching: vec![
                pitcher("先発", 6.0, 2, 2, 5, Decision::NoDecision),
                pitcher("抑え", 3.0, 0, 0, 4, Decision::Win),
            ],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(TeamBox::default(), home, 2, 3), "後攻高");
        let relay = categories(&report, HighlightCategory::RelaySummary);
        assert_eq!(relay.len(), 1);
        assert_eq!(relay[0].text, "投手リレーは 先発(6回) → 抑え(3回) だった");
    }

    #[test]
    fn at_most_one_summary_and_it_leads() {
        // Blowout: margin of nine.
        let away = TeamBox {
            batting: vec![slot(OrderKey::starter(1), "青木", vec!["本塁打3点"])],
            inning_runs: vec![9],
            ..TeamBox::default()
        };
        let report = extract_highlights(&record(away, TeamBox::default(), 9, 0), "先攻高");
        let summaries: Vec<_> = report
            .highlights
            .iter()
            .filter(|h| {
                matches!(
                    h.category,
                    HighlightCategory::GameSummary | HighlightCategory::WalkOff
                )
            })
            .collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(report.highlights[0].category, HighlightCategory::GameSummary);

        // A quiet game produces no summary at all.
        let away = TeamBox {
            batting: vec![slot(OrderKey::starter(1), "青木", vec!["中安1点"])],
            inning_runs: vec![1; 6],
            ..TeamBox::default()
        };
        let home = TeamBox { inning_runs: vec![0, 1, 1, 1, 0, 0], ..TeamBox::default() };
        let report = extract_highlights(&record(away, home, 6, 3), "先攻高");
        assert!(report
            .highlights
            .iter()
            .all(|h| !matches!(h.category, HighlightCategory::GameSummary | HighlightCategory::WalkOff)));
    }

    #[test]
    fn empty_record_is_harmless() {
        let report =
            extract_highlights(&record(TeamBox::default(), TeamBox::default(), 0, 0), "後攻高");
        assert!(report.highlights.is_empty());
        assert!(report.key_players.is_empty());
    }
}
