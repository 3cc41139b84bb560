//! Half-inning base/out replay.
//!
//! Replays one team's half-inning from its per-inning at-bat codes: a state
//! machine over `(outs, three bases)` driven by the play translator. The
//! next-batter index is threaded through [`BatterIndices`] so batting-order
//! continuity survives across innings (the ninth batter ending inning 3
//! means inning 4 leads off with batter one).
//!
//! Runner advancement is deliberately simplified: runners advance at least
//! as many bases as the batter, third always scores on any safe ball or a
//! sacrifice fly, and a runner on second scores on a single. This is league
//! policy for the narrative engine, not a claim about real defense.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::play::{translate, PlayKind};
use crate::models::{split_runner_tail, BattingSlot, Side};

/// Next-batter index per team, carried across innings within one game.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatterIndices {
    pub away: usize,
    pub home: usize,
}

impl BatterIndices {
    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::Away => self.away,
            Side::Home => self.home,
        }
    }

    pub fn set(&mut self, side: Side, index: usize) {
        match side {
            Side::Away => self.away = index,
            Side::Home => self.home = index,
        }
    }
}

/// One narrated plate appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateAppearance {
    /// Batter line, e.g. `1番 佐藤: ヒット`.
    pub text: String,
    pub outs_after: u8,
    /// Occupied bases after the play, e.g. `ランナー1塁, 3塁`.
    pub runners_after: String,
    /// Runs that crossed the plate on this play per the base simulation.
    pub runs_scored: u32,
}

/// Result of replaying one half-inning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalfInningOutcome {
    pub plays: Vec<PlateAppearance>,
    pub runs: u32,
    pub outs: u8,
    /// Index into the sorted lineup of the next inning's leadoff batter.
    pub next_batter: usize,
    /// Three outs were recorded; `false` means the data ran out first
    /// (partial inning, or the game ended with the winning run in).
    pub complete: bool,
}

impl HalfInningOutcome {
    /// Batter lines only, one per plate appearance.
    pub fn narration(&self) -> Vec<String> {
        self.plays.iter().map(|p| p.text.clone()).collect()
    }
}

fn batter_line(slot: &BattingSlot, label: &str) -> String {
    if slot.order.substitute {
        format!("{}番(交代) {}: {}", slot.order.slot, slot.name, label)
    } else {
        format!("{}番 {}: {}", slot.order.slot, slot.name, label)
    }
}

fn runners_text(bases: &[Option<String>; 3]) -> String {
    let names = ["1塁", "2塁", "3塁"];
    let occupied: Vec<&str> = bases
        .iter()
        .zip(names)
        .filter_map(|(base, name)| base.as_ref().map(|_| name))
        .collect();
    if occupied.is_empty() {
        "ランナーなし".to_string()
    } else {
        format!("ランナー{}", occupied.join(", "))
    }
}

/// Replays one half-inning.
///
/// `lineup` must be in lineup-sheet order (see [`crate::models::TeamBox::sorted_lineup`]).
/// `start` is the index of the scheduled leadoff batter; the returned
/// `next_batter` feeds the same team's next half-inning.
///
/// Termination is guaranteed: the loop ends at three outs, when the next
/// scheduled batter has no recorded at-bat left for this inning, or at a
/// hard bound of three trips through the order (malformed data guard).
pub fn simulate(lineup: &[&BattingSlot], inning: usize, start: usize) -> HalfInningOutcome {
    let mut outcome = HalfInningOutcome { next_batter: start, ..HalfInningOutcome::default() };
    if lineup.is_empty() {
        return outcome;
    }

    let max_appearances = lineup.len() * 3;
    let mut consumed = vec![0usize; lineup.len()];
    let mut bases: [Option<String>; 3] = [None, None, None];
    let mut idx = start % lineup.len();

    while outcome.outs < 3 {
        if outcome.plays.len() >= max_appearances {
            warn!(inning, appearances = outcome.plays.len(), "half-inning bound hit, truncating");
            break;
        }

        let batter = lineup[idx];
        let codes = batter.at_bats_in(inning);
        let turn = consumed[idx];
        if turn >= codes.len() {
            // End of data: the inning ended before reaching this batter.
            break;
        }
        consumed[idx] += 1;
        let (bat_code, _) = split_runner_tail(codes[turn]);
        if bat_code.is_empty() {
            // Runner-only fragment; nothing to narrate for the batter.
            idx = (idx + 1) % lineup.len();
            continue;
        }

        let play = translate(bat_code);
        if play.kind == PlayKind::Other {
            debug!(code = bat_code, "unrecognized at-bat code, narrated as-is");
        }

        outcome.outs = (outcome.outs + u8::from(play.is_out) + play.extra_outs).min(3);

        let mut runs_in_play = 0u32;
        // No advancement once the third out is in (a run never scores on an
        // inning-ending play in this model).
        if outcome.outs < 3 {
            let mut next: [Option<String>; 3] = [None, None, None];
            // Third: home on any safe ball or a sac fly.
            if let Some(runner) = bases[2].take() {
                if play.bases >= 1 || play.kind == PlayKind::SacFly {
                    runs_in_play += 1;
                } else {
                    next[2] = Some(runner);
                }
            }
            // Second: home on any hit (league policy incl. singles), third on
            // other one-base events and sacrifices.
            if let Some(runner) = bases[1].take() {
                if play.bases >= 2 || (play.kind.is_hit() && play.bases >= 1) {
                    runs_in_play += 1;
                } else if play.bases == 1 || play.kind == PlayKind::SacBunt {
                    next[2] = Some(runner);
                } else {
                    next[1] = Some(runner);
                }
            }
            // First: forced station-to-station with the batter.
            if let Some(runner) = bases[0].take() {
                if play.bases >= 3 {
                    runs_in_play += 1;
                } else if play.bases == 2 {
                    next[2] = Some(runner);
                } else if play.bases == 1 || play.kind == PlayKind::SacBunt {
                    next[1] = Some(runner);
                } else {
                    next[0] = Some(runner);
                }
            }
            match play.bases {
                1..=3 if !play.is_out => next[play.bases as usize - 1] = Some(batter.name.clone()),
                4 => runs_in_play += 1,
                _ => {}
            }
            bases = next;
        }

        outcome.runs += runs_in_play;
        outcome.plays.push(PlateAppearance {
            text: batter_line(batter, play.label),
            outs_after: outcome.outs,
            runners_after: runners_text(&bases),
            runs_scored: runs_in_play,
        });

        idx = (idx + 1) % lineup.len();
    }

    outcome.next_batter = idx;
    outcome.complete = outcome.outs >= 3;
    outcome
}
