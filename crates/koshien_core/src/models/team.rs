//! Team metadata and season records.
//!
//! [`TeamProfile`] is static scouting data (strength rating, historical best
//! finish, popularity). [`TeamRecord`] is the evolving tournament record for
//! one team. Both are passed into derivation functions explicitly; nothing in
//! this crate reads ambient tournament state.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::match_record::OrderKey;

/// Static scouting profile for one school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// Base strength rating (偏差値-style, roughly 40-75).
    pub deviation: u32,
    /// Historical best finish, free text ("優勝", "ベスト4", "初出場" ...).
    #[serde(default)]
    pub best_finish: String,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub description: String,
}

/// Per-player season batting totals within the current tournament.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerBattingTotals {
    #[serde(default)]
    pub at_bats: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub rbi: u32,
}

impl PlayerBattingTotals {
    pub fn average(&self) -> Option<f64> {
        if self.at_bats == 0 {
            None
        } else {
            Some(self.hits as f64 / self.at_bats as f64)
        }
    }
}

/// Per-player season pitching totals within the current tournament.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerPitchingTotals {
    /// Innings pitched, fractional in thirds.
    #[serde(default)]
    pub innings: f32,
    #[serde(default)]
    pub earned_runs: u32,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl PlayerPitchingTotals {
    pub fn era(&self) -> Option<f64> {
        if self.innings <= 0.0 {
            None
        } else {
            Some(self.earned_runs as f64 * 9.0 / self.innings as f64)
        }
    }
}

/// A starter reference from a previous game, for lineup-change analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterRef {
    pub order: OrderKey,
    pub name: String,
}

/// One team's record within the current tournament (and its last finish in
/// the previous one).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Final placing in the previous tournament (1 = champion).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_finish: Option<u32>,
    #[serde(default)]
    pub batting_totals: HashMap<String, PlayerBattingTotals>,
    #[serde(default)]
    pub pitching_totals: HashMap<String, PlayerPitchingTotals>,
    /// Starting lineup of the team's previous game, if any.
    #[serde(default)]
    pub previous_starters: Vec<StarterRef>,
}

/// Lookup table of team profiles. Missing teams are a normal condition and
/// degrade to defaults downstream (rank E, placeholder descriptions).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamDirectory {
    profiles: HashMap<String, TeamProfile>,
}

impl TeamDirectory {
    pub fn from_profiles(profiles: Vec<TeamProfile>) -> Self {
        TeamDirectory {
            profiles: profiles.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    pub fn get(&self, team: &str) -> Option<&TeamProfile> {
        self.profiles.get(team)
    }

    /// Built-in directory of the stock schools shipped with the game.
    pub fn builtin() -> &'static TeamDirectory {
        &BUILTIN_DIRECTORY
    }
}

static BUILTIN_DIRECTORY: Lazy<TeamDirectory> = Lazy::new(|| {
    fn profile(
        name: &str,
        region: &str,
        deviation: u32,
        best_finish: &str,
        popular: bool,
        description: &str,
    ) -> TeamProfile {
        TeamProfile {
            name: name.to_string(),
            region: region.to_string(),
            deviation,
            best_finish: best_finish.to_string(),
            popular,
            description: description.to_string(),
        }
    }

    TeamDirectory::from_profiles(vec![
        profile("横浜白凰", "神奈川", 72, "優勝", true, "全国屈指の名門。分厚い選手層と勝負強さが武器"),
        profile("大阪桜風", "大阪", 70, "準優勝", true, "強力打線が看板の近畿の雄"),
        profile("仙台青葉", "宮城", 63, "ベスト4", false, "東北の堅守速攻。接戦に強い"),
        profile("熊本火の国", "熊本", 61, "ベスト8", false, "エースを軸にした伝統の守りの野球"),
        profile("広島厳島", "広島", 58, "ベスト16", false, "機動力で相手をかき回す走る野球"),
        profile("金沢兼六", "石川", 55, "出場", false, "北信越の古豪。公立ながら毎年上位を窺う"),
        profile("札幌雪嶺", "北海道", 52, "出場", false, "寒冷地のハンデを室内練習で覆す努力型"),
        profile("高知黒潮", "高知", 60, "ベスト4", true, "荒削りだが当たれば飛ぶ、豪快な打撃のチーム"),
        profile("松本岳南", "長野", 48, "初出場", false, "初出場の県立校。勢いに乗ると怖い"),
        profile("那覇海風", "沖縄", 57, "ベスト8", true, "南国育ちの強肩強打。応援の熱さは随一"),
    ])
});
