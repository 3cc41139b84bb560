//! Play translator: one at-bat code → one structured outcome.
//!
//! At-bat codes are Japanese box-score shorthand ("左安", "本塁打2点",
//! "三振"...). The markers are not mutually exclusive substrings ("犠飛"
//! contains "飛", "三塁打" contains "三", "準優勝" problems exist elsewhere
//! too), so classification runs in one fixed priority order. Unrecognized
//! codes map to [`PlayKind::Other`] and never panic.

use serde::{Deserialize, Serialize};

/// Closed set of at-bat outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    HomeRun,
    Triple,
    Double,
    Single,
    /// Run scores, batter is out (sacrifice fly).
    SacFly,
    /// Sacrifice bunt mishandled, batter reaches.
    SacBuntError,
    /// Groundout with a run scoring on the play.
    GroundOutRbi,
    /// Error or fielder's choice with a run scoring on the play.
    ErrorRbi,
    SacBunt,
    Walk,
    HitByPitch,
    Error,
    FieldersChoice,
    Strikeout,
    DoublePlay,
    GroundOut,
    FlyOut,
    LineOut,
    /// Unrecognized code; no out, no advance. Callers skip it gracefully.
    Other,
}

impl PlayKind {
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            PlayKind::Single | PlayKind::Double | PlayKind::Triple | PlayKind::HomeRun
        )
    }
}

/// Structured translation of one at-bat code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub kind: PlayKind,
    /// The batter is retired on the play.
    pub is_out: bool,
    /// Bases the batter reaches (4 = home run). 0 when out or unrecognized.
    pub bases: u8,
    /// Outs beyond the batter (double play = 1).
    pub extra_outs: u8,
    /// Runs credited to the play from the `N点` annotation. Home runs floor
    /// at 1 (the batter's own run); sac flies and RBI groundouts/errors
    /// floor at 1 as well.
    pub rbi: u32,
    /// Short Japanese description for narration.
    pub label: &'static str,
}

impl PlayOutcome {
    fn new(kind: PlayKind, is_out: bool, bases: u8, label: &'static str) -> Self {
        PlayOutcome { kind, is_out, bases, extra_outs: 0, rbi: 0, label }
    }

    /// The play scores at least one run per its own annotation.
    pub fn is_scoring(&self) -> bool {
        self.rbi > 0
    }
}

/// Parses the embedded `N点` RBI annotation ("本塁打3点" → Some(3)).
/// A bare `点` with no digits counts as one run.
fn parse_rbi(code: &str) -> Option<u32> {
    let idx = code.find('点')?;
    let digits: String = code[..idx]
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    Some(digits.parse().unwrap_or(1))
}

/// Translates one at-bat code fragment. Pure, total, never panics.
///
/// Priority order matters: a code can carry both a hit marker and a
/// run-scored marker, and several markers are substrings of longer ones.
pub fn translate(code: &str) -> PlayOutcome {
    let s = code.trim();
    let rbi = parse_rbi(s);
    let scored = rbi.is_some();

    let mut outcome = if s.contains("本塁打") || s.to_lowercase().contains("hr") {
        PlayOutcome::new(PlayKind::HomeRun, false, 4, "ホームラン")
    } else if s.contains("三塁打") {
        PlayOutcome::new(PlayKind::Triple, false, 3, "三塁打")
    } else if s.contains("二塁打") {
        PlayOutcome::new(PlayKind::Double, false, 2, "二塁打")
    } else if s.contains('安') {
        PlayOutcome::new(PlayKind::Single, false, 1, "ヒット")
    } else if s.contains("犠飛") {
        PlayOutcome::new(PlayKind::SacFly, true, 0, "犠牲フライ")
    } else if s.contains("犠失") {
        PlayOutcome::new(PlayKind::SacBuntError, false, 1, "犠打エラー")
    } else if s.contains("ゴロ") && scored {
        PlayOutcome::new(PlayKind::GroundOutRbi, true, 0, "内野ゴロ(得点)")
    } else if (s.contains("エラー") || s.contains('失') || s.contains("野選")) && scored {
        PlayOutcome::new(PlayKind::ErrorRbi, false, 1, "エラー(得点)")
    } else if s.contains("犠打") {
        PlayOutcome::new(PlayKind::SacBunt, true, 0, "犠牲バント")
    } else if s.contains("四球") {
        PlayOutcome::new(PlayKind::Walk, false, 1, "四球")
    } else if s.contains("死球") {
        PlayOutcome::new(PlayKind::HitByPitch, false, 1, "死球")
    } else if s.contains("エラー") {
        PlayOutcome::new(PlayKind::Error, false, 1, "エラー")
    } else if s.contains("野選") {
        PlayOutcome::new(PlayKind::FieldersChoice, false, 1, "野選")
    } else if s.contains("三振") {
        PlayOutcome::new(PlayKind::Strikeout, true, 0, "三振")
    } else if s.contains("併殺") {
        let mut o = PlayOutcome::new(PlayKind::DoublePlay, true, 0, "併殺打");
        o.extra_outs = 1;
        o
    } else if s.contains("ゴロ") {
        PlayOutcome::new(PlayKind::GroundOut, true, 0, "ゴロ")
    } else if s.contains('飛') {
        PlayOutcome::new(PlayKind::FlyOut, true, 0, "フライ")
    } else if s.contains('直') {
        PlayOutcome::new(PlayKind::LineOut, true, 0, "ライナー")
    } else {
        PlayOutcome::new(PlayKind::Other, false, 0, "その他")
    };

    outcome.rbi = match outcome.kind {
        PlayKind::HomeRun => rbi.unwrap_or(0).max(1),
        // These score a run by definition even without an annotation.
        PlayKind::SacFly | PlayKind::GroundOutRbi | PlayKind::ErrorRbi => rbi.unwrap_or(1).max(1),
        _ => rbi.unwrap_or(0),
    };
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hit_hierarchy_before_substrings() {
        // "本塁打" must win over its "塁打" substring cousins and the
        // run marker; "三塁打" must not classify as a strikeout.
        assert_eq!(translate("本塁打3点").kind, PlayKind::HomeRun);
        assert_eq!(translate("三塁打").kind, PlayKind::Triple);
        assert_eq!(translate("二塁打2点").kind, PlayKind::Double);
        assert_eq!(translate("左安").kind, PlayKind::Single);
    }

    #[test]
    fn home_run_floors_rbi_at_one() {
        let solo = translate("本塁打");
        assert_eq!(solo.rbi, 1);
        assert_eq!(solo.bases, 4);
        assert!(!solo.is_out);
        assert_eq!(translate("本塁打3点").rbi, 3);
    }

    #[test]
    fn sac_fly_scores_and_is_out() {
        let sf = translate("犠飛");
        assert_eq!(sf.kind, PlayKind::SacFly);
        assert!(sf.is_out);
        assert_eq!(sf.rbi, 1);
        // Must not fall through to the bare fly-out branch.
        assert_ne!(sf.kind, PlayKind::FlyOut);
    }

    #[test]
    fn scoring_groundout_and_error() {
        assert_eq!(translate("遊ゴロ1点").kind, PlayKind::GroundOutRbi);
        assert_eq!(translate("遊ゴロ").kind, PlayKind::GroundOut);
        assert_eq!(translate("エラー1点").kind, PlayKind::ErrorRbi);
        assert_eq!(translate("エラー").kind, PlayKind::Error);
    }

    #[test]
    fn outs_and_double_play() {
        let dp = translate("併殺");
        assert!(dp.is_out);
        assert_eq!(dp.extra_outs, 1);
        assert!(translate("三振").is_out);
        assert!(translate("中飛").is_out);
        assert!(translate("二直").is_out);
    }

    #[test]
    fn walk_and_hbp_are_distinct() {
        assert_eq!(translate("四球").kind, PlayKind::Walk);
        assert_eq!(translate("死球").kind, PlayKind::HitByPitch);
    }

    #[test]
    fn unrecognized_is_other_not_panic() {
        let o = translate("謎の記号");
        assert_eq!(o.kind, PlayKind::Other);
        assert!(!o.is_out);
        assert_eq!(o.bases, 0);
    }

    #[test]
    fn rbi_parse_variants() {
        assert_eq!(parse_rbi("中安2点"), Some(2));
        assert_eq!(parse_rbi("押し出し点"), Some(1));
        assert_eq!(parse_rbi("中安"), None);
        assert_eq!(parse_rbi("本塁打12点"), Some(12));
    }

    proptest! {
        #[test]
        fn translate_is_total(code in ".{0,24}") {
            let _ = translate(&code);
        }

        #[test]
        fn home_run_marker_always_four_bases(prefix in "[ぁ-ん]{0,3}", rbi in 0u32..5) {
            let code = if rbi > 0 {
                format!("{prefix}本塁打{rbi}点")
            } else {
                format!("{prefix}本塁打")
            };
            let o = translate(&code);
            prop_assert_eq!(o.bases, 4);
            prop_assert!(!o.is_out);
        }
    }
}
