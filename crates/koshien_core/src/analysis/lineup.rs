//! Starting-lineup change analysis.
//!
//! Diffs a team's current starters against the starters stored from its
//! previous game and renders a short Japanese note (capped at three changes
//! so the prompt stays focused). Missing comparison data degrades to fixed
//! strings, never an error.

use std::collections::HashMap;

use crate::models::{MatchRecord, OrderKey, TeamRecord};

/// Summarizes how the starting lineup changed since the previous game.
pub fn lineup_changes(team: &str, record: &MatchRecord, team_record: Option<&TeamRecord>) -> String {
    let Some(previous) = team_record.map(|r| &r.previous_starters).filter(|p| !p.is_empty())
    else {
        return "今大会初戦のため、比較なし。".to_string();
    };

    let side = record.side_of(team);
    let current = record.team_box(side).starters();
    if current.is_empty() {
        return "比較データなし。".to_string();
    }

    let prev_by_name: HashMap<&str, OrderKey> =
        previous.iter().map(|s| (s.name.as_str(), s.order)).collect();
    let curr_names: HashMap<&str, OrderKey> =
        current.iter().map(|s| (s.name.as_str(), s.order)).collect();

    let mut changes: Vec<String> = Vec::new();
    for starter in previous {
        if !curr_names.contains_key(starter.name.as_str()) {
            changes.push(format!("{}番の{}がスタメン落ち", starter.order.slot, starter.name));
        }
    }
    for slot in &current {
        match prev_by_name.get(slot.name.as_str()) {
            None => {
                changes.push(format!("{}番に{}が新しくスタメン入り", slot.order.slot, slot.name));
            }
            Some(prev_order) if *prev_order != slot.order => {
                changes.push(format!(
                    "{}が{}番から{}番に打順変更",
                    slot.name, prev_order.slot, slot.order.slot
                ));
            }
            _ => {}
        }
    }

    if changes.is_empty() {
        "前試合からスタメン変更なし。".to_string()
    } else {
        let shown: Vec<String> = changes.into_iter().take(3).collect();
        format!("主な変更点: {}。", shown.join("、"))
    }
}
