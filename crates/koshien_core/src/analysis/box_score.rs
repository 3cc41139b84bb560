//! Box-score text rendering for narrative prompts.
//!
//! Jersey-numbered batting lines for everyone who appeared, in lineup order,
//! followed by each team's pitching lines; plus per-player season summary
//! lines. Pure formatting over data that is already derived.

use crate::models::{MatchRecord, Side, TeamRecord};

fn number_tag(number: Option<u8>) -> String {
    match number {
        Some(n) => format!("[#{n}] "),
        None => String::new(),
    }
}

fn team_section(record: &MatchRecord, side: Side, winner: &str) -> String {
    let team_box = record.team_box(side);
    let team_name = record.team_name(side);
    let role = if team_name == winner { "勝者" } else { "敗者" };
    let mut out = format!("\n**{team_name} ({role})**\n");

    for slot in team_box.sorted_lineup() {
        let Some(stats) = team_box.game_stats.get(&slot.name).filter(|s| s.played) else {
            continue;
        };
        let order_display = if slot.order.substitute {
            let label = slot.sub_kind.map(|k| k.short_label()).unwrap_or("代");
            format!("  - {label}")
        } else {
            format!("{}.", slot.order.slot)
        };
        let mut line = format!(
            "{} {}{} ({}): {}打数{}安打 {}打点",
            order_display,
            number_tag(slot.number),
            slot.name,
            slot.position,
            stats.at_bats,
            stats.hits,
            stats.rbi
        );
        if stats.home_runs > 0 {
            line.push_str(&format!(" {}本塁打", stats.home_runs));
        }
        out.push_str(&line);
        out.push('\n');
    }

    for pitcher in &team_box.pitching {
        if pitcher.name.is_empty() {
            continue;
        }
        // Jersey numbers for pitchers come from their batting entry when the
        // outing itself has none.
        let number = pitcher.number.or_else(|| {
            team_box
                .batting
                .iter()
                .find(|slot| slot.name == pitcher.name)
                .and_then(|slot| slot.number)
        });
        out.push_str(&format!(
            "- 投手: {}{} ({}回 {}失点 {}奪三振 {}四死球)\n",
            number_tag(number),
            pitcher.name,
            pitcher.innings,
            pitcher.runs,
            pitcher.strikeouts,
            pitcher.walks
        ));
    }
    out
}

/// Full two-team box-score text. A record with no per-game stats yields a
/// fixed placeholder.
pub fn box_score_text(record: &MatchRecord, winner: &str) -> String {
    if record.away.game_stats.is_empty() && record.home.game_stats.is_empty() {
        return "詳細な個人成績データはありません。".to_string();
    }
    format!(
        "{}{}",
        team_section(record, Side::Away, winner),
        team_section(record, Side::Home, winner)
    )
}

/// One-line season summary for a player, e.g.
/// `姫川: 打率.500, 3本塁打, 10打点 / 2勝0敗, 防御率1.50, 21奪三振`.
/// `None` when the player has no recorded totals.
pub fn player_season_summary(player: &str, team_record: &TeamRecord) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(batting) = team_record.batting_totals.get(player) {
        if let Some(avg) = batting.average() {
            parts.push(format!(
                "打率{}, {}本塁打, {}打点",
                format_average(avg),
                batting.home_runs,
                batting.rbi
            ));
        }
    }
    if let Some(pitching) = team_record.pitching_totals.get(player) {
        if pitching.innings > 0.0 {
            parts.push(format!(
                "{}勝{}敗, 防御率{:.2}, {}奪三振",
                pitching.wins,
                pitching.losses,
                pitching.era().unwrap_or(0.0),
                pitching.strikeouts
            ));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("{player}: {}", parts.join(" / ")))
    }
}

/// Batting averages print without the leading zero (.333 style).
fn format_average(avg: f64) -> String {
    let s = format!("{avg:.3}");
    s.strip_prefix('0').unwrap_or(&s).to_string()
}
