//! Whole-game play-by-play text.
//!
//! Drives the half-inning simulator across both teams and every inning,
//! threading the per-team next-batter index, and renders the Japanese
//! play-by-play transcript that seeds article generation. From the ninth
//! inning on, a bottom half is skipped when the home team already leads
//! (the game is over), and a bottom half that ends short of three outs
//! with the home team ahead is narrated as a walk-off.

use crate::engine::half_inning::{simulate, BatterIndices, HalfInningOutcome};
use crate::models::{MatchRecord, Side};

fn render_half(out: &mut String, outcome: &HalfInningOutcome) {
    for play in &outcome.plays {
        out.push_str(&play.text);
        out.push('\n');
        if play.outs_after >= 3 {
            out.push_str("  → 3アウト\n");
        } else {
            out.push_str(&format!("  → {}アウト, {}\n", play.outs_after, play.runners_after));
        }
    }
    if !outcome.complete {
        out.push_str(&format!("({}アウトでイニング終了)\n", outcome.outs));
    }
    out.push_str("チェンジ\n");
}

/// Renders the full game transcript. Never fails; a record with no lineup
/// data yields a fixed placeholder.
pub fn play_by_play_text(record: &MatchRecord) -> String {
    if record.away.batting.is_empty() && record.home.batting.is_empty() {
        return "詳細な試合データがありません。".to_string();
    }

    let innings = record.innings_played();
    let away_lineup = record.away.sorted_lineup();
    let home_lineup = record.home.sorted_lineup();
    let mut indices = BatterIndices::default();
    let mut text = String::new();

    for inning in 0..innings {
        text.push_str(&format!("\n【{}回表】{}の攻撃\n", inning + 1, record.away_team));
        let top = simulate(&away_lineup, inning, indices.get(Side::Away));
        indices.set(Side::Away, top.next_batter);
        render_half(&mut text, &top);

        // From the ninth on, the bottom half is not played when the home
        // team already leads. The home line score only covers the bottoms
        // already played, so compare through `inning`, not `inning + 1`.
        let away_so_far = record.away.runs_through(inning + 1);
        if inning >= 8 && record.home.runs_through(inning) > away_so_far {
            break;
        }

        text.push_str(&format!("\n【{}回裏】{}の攻撃\n", inning + 1, record.home_team));
        let bottom = simulate(&home_lineup, inning, indices.get(Side::Home));
        indices.set(Side::Home, bottom.next_batter);
        render_half(&mut text, &bottom);

        // Bottom half cut short with the home team in front: walk-off.
        let home_so_far = record.home.runs_through(inning + 1);
        if inning + 1 == innings && inning >= 8 && !bottom.complete && home_so_far > away_so_far {
            text.push_str(&format!("{}がサヨナラ勝ち！\n", record.home_team));
            break;
        }
    }

    text.push_str("\n--- 試合終了 ---\n");
    text
}
