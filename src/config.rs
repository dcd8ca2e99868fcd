use std::path::PathBuf;
use std::time::Duration;

/// Chicago Bulls franchise id on stats.nba.com.
pub const BULLS_TEAM_ID: u32 = 1_610_612_741;
pub const BULLS_ABBR: &str = "CHI";

const DEFAULT_SEASON: &str = "2025-26";
const DEFAULT_LAST_SEASON: &str = "2024-25";

// Floor keeps accidental `API_DELAY_MS=0` from hammering the stats API.
const DEFAULT_API_DELAY_MS: u64 = 600;
const MIN_API_DELAY_MS: u64 = 100;

#[derive(Debug, Clone, Copy)]
pub struct NbaTeam {
    pub abbr: &'static str,
    pub id: u32,
    pub name: &'static str,
}

/// All 30 franchises, keyed by the abbreviations the shot-chart rows carry.
pub const NBA_TEAMS: &[NbaTeam] = &[
    NbaTeam { abbr: "ATL", id: 1_610_612_737, name: "Atlanta Hawks" },
    NbaTeam { abbr: "BOS", id: 1_610_612_738, name: "Boston Celtics" },
    NbaTeam { abbr: "BKN", id: 1_610_612_751, name: "Brooklyn Nets" },
    NbaTeam { abbr: "CHA", id: 1_610_612_766, name: "Charlotte Hornets" },
    NbaTeam { abbr: "CHI", id: 1_610_612_741, name: "Chicago Bulls" },
    NbaTeam { abbr: "CLE", id: 1_610_612_739, name: "Cleveland Cavaliers" },
    NbaTeam { abbr: "DAL", id: 1_610_612_742, name: "Dallas Mavericks" },
    NbaTeam { abbr: "DEN", id: 1_610_612_743, name: "Denver Nuggets" },
    NbaTeam { abbr: "DET", id: 1_610_612_765, name: "Detroit Pistons" },
    NbaTeam { abbr: "GSW", id: 1_610_612_744, name: "Golden State Warriors" },
    NbaTeam { abbr: "HOU", id: 1_610_612_745, name: "Houston Rockets" },
    NbaTeam { abbr: "IND", id: 1_610_612_754, name: "Indiana Pacers" },
    NbaTeam { abbr: "LAC", id: 1_610_612_746, name: "LA Clippers" },
    NbaTeam { abbr: "LAL", id: 1_610_612_747, name: "Los Angeles Lakers" },
    NbaTeam { abbr: "MEM", id: 1_610_612_763, name: "Memphis Grizzlies" },
    NbaTeam { abbr: "MIA", id: 1_610_612_748, name: "Miami Heat" },
    NbaTeam { abbr: "MIL", id: 1_610_612_749, name: "Milwaukee Bucks" },
    NbaTeam { abbr: "MIN", id: 1_610_612_750, name: "Minnesota Timberwolves" },
    NbaTeam { abbr: "NOP", id: 1_610_612_740, name: "New Orleans Pelicans" },
    NbaTeam { abbr: "NYK", id: 1_610_612_752, name: "New York Knicks" },
    NbaTeam { abbr: "OKC", id: 1_610_612_760, name: "Oklahoma City Thunder" },
    NbaTeam { abbr: "ORL", id: 1_610_612_753, name: "Orlando Magic" },
    NbaTeam { abbr: "PHI", id: 1_610_612_755, name: "Philadelphia 76ers" },
    NbaTeam { abbr: "PHX", id: 1_610_612_756, name: "Phoenix Suns" },
    NbaTeam { abbr: "POR", id: 1_610_612_757, name: "Portland Trail Blazers" },
    NbaTeam { abbr: "SAC", id: 1_610_612_758, name: "Sacramento Kings" },
    NbaTeam { abbr: "SAS", id: 1_610_612_759, name: "San Antonio Spurs" },
    NbaTeam { abbr: "TOR", id: 1_610_612_761, name: "Toronto Raptors" },
    NbaTeam { abbr: "UTA", id: 1_610_612_762, name: "Utah Jazz" },
    NbaTeam { abbr: "WAS", id: 1_610_612_764, name: "Washington Wizards" },
];

pub fn team_by_abbr(abbr: &str) -> Option<&'static NbaTeam> {
    NBA_TEAMS
        .iter()
        .find(|t| t.abbr.eq_ignore_ascii_case(abbr.trim()))
}

pub fn current_season() -> String {
    season_env("BULLS_SEASON", DEFAULT_SEASON)
}

pub fn last_season() -> String {
    season_env("BULLS_LAST_SEASON", DEFAULT_LAST_SEASON)
}

fn season_env(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Pause inserted before every stats API network hit.
pub fn api_delay() -> Duration {
    let ms = std::env::var("API_DELAY_MS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_API_DELAY_MS)
        .max(MIN_API_DELAY_MS);
    Duration::from_millis(ms)
}

pub fn output_dir() -> PathBuf {
    match std::env::var("BULLS_OUTPUT_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_table_covers_thirty_franchises() {
        assert_eq!(NBA_TEAMS.len(), 30);
        let bulls = team_by_abbr("chi").expect("bulls should resolve");
        assert_eq!(bulls.id, BULLS_TEAM_ID);
        assert!(team_by_abbr("XXX").is_none());
    }
}
