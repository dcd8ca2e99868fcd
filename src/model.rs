use serde::{Deserialize, Serialize};

/// One completed game from the team's schedule, newest-first in collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub date: String,
    pub matchup: String,
    pub is_home: bool,
    pub result: GameResult,
    pub points: u32,
    pub plus_minus: i32,
    pub opponent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn from_wl(raw: &str) -> Option<Self> {
        match raw.trim() {
            "W" => Some(GameResult::Win),
            "L" => Some(GameResult::Loss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::Win => "W",
            GameResult::Loss => "L",
        }
    }
}

/// One player's row from a single box score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxScoreLine {
    pub player_id: u32,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub fg3_made: u32,
    pub fg3_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub turnovers: u32,
    /// Raw minutes string as the box score reports it (e.g. "32:14").
    pub minutes: String,
}

/// A player's line for one game, joined with game context and derived
/// shooting percentages. Recomputed per query, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerGameLine {
    pub game_id: String,
    pub date: String,
    pub matchup: String,
    pub result: Option<GameResult>,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub fg3_made: u32,
    pub fg3_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub turnovers: u32,
    pub minutes: String,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

impl PlayerGameLine {
    /// Percentages derived from the counting stats; a zero denominator
    /// yields 0.0 rather than NaN.
    pub fn with_derived_pcts(mut self) -> Self {
        self.fg_pct = shooting_pct(self.fg_made, self.fg_attempted);
        self.fg3_pct = shooting_pct(self.fg3_made, self.fg3_attempted);
        self.ft_pct = shooting_pct(self.ft_made, self.ft_attempted);
        self
    }
}

fn shooting_pct(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    let pct = made as f64 / attempted as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotType {
    TwoPoint,
    ThreePoint,
}

impl ShotType {
    /// The API reports e.g. "2PT Field Goal" / "3PT Field Goal".
    pub fn from_label(raw: &str) -> Self {
        if raw.contains("3PT") {
            ShotType::ThreePoint
        } else {
            ShotType::TwoPoint
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::TwoPoint => "2PT",
            ShotType::ThreePoint => "3PT",
        }
    }
}

/// A single field-goal attempt with court coordinates and zone label.
/// Player/team attribution is present on team and league pulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotEvent {
    pub loc_x: i32,
    pub loc_y: i32,
    pub shot_made: bool,
    pub shot_type: ShotType,
    pub shot_zone: String,
    pub shot_distance: u32,
    pub game_id: String,
    pub game_date: Option<String>,
    pub player_id: Option<u32>,
    pub player_name: Option<String>,
    pub team_id: Option<u32>,
    pub team_abbr: Option<String>,
}

impl ShotEvent {
    /// Point value produced by this attempt: 3 for a made three, 2 for a
    /// made two, 0 for a miss.
    pub fn points(&self) -> u32 {
        if !self.shot_made {
            return 0;
        }
        match self.shot_type {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
        }
    }
}

/// Countable metrics of a `PlayerGameLine` the aggregators can be pointed
/// at. The typed stand-in for column-name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    FgPct,
    Fg3Pct,
}

impl StatKey {
    pub fn value(&self, line: &PlayerGameLine) -> f64 {
        match self {
            StatKey::Points => line.points as f64,
            StatKey::Rebounds => line.rebounds as f64,
            StatKey::Assists => line.assists as f64,
            StatKey::Steals => line.steals as f64,
            StatKey::Blocks => line.blocks as f64,
            StatKey::Turnovers => line.turnovers as f64,
            StatKey::FgPct => line.fg_pct,
            StatKey::Fg3Pct => line.fg3_pct,
        }
    }

    /// Stable column name used in derived outputs and exports.
    pub fn column(&self) -> &'static str {
        match self {
            StatKey::Points => "points",
            StatKey::Rebounds => "rebounds",
            StatKey::Assists => "assists",
            StatKey::Steals => "steals",
            StatKey::Blocks => "blocks",
            StatKey::Turnovers => "turnovers",
            StatKey::FgPct => "fg_pct",
            StatKey::Fg3Pct => "fg3_pct",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "points" | "pts" => Some(StatKey::Points),
            "rebounds" | "reb" => Some(StatKey::Rebounds),
            "assists" | "ast" => Some(StatKey::Assists),
            "steals" | "stl" => Some(StatKey::Steals),
            "blocks" | "blk" => Some(StatKey::Blocks),
            "turnovers" | "tov" => Some(StatKey::Turnovers),
            "fg_pct" => Some(StatKey::FgPct),
            "fg3_pct" => Some(StatKey::Fg3Pct),
            _ => None,
        }
    }
}
