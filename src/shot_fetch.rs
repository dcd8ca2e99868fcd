use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::{self, NbaTeam};
use crate::model::{ShotEvent, ShotType};
use crate::stats_api::{cell_i64, cell_str, cell_u64, fetch_stats_json, result_table};

const SHOT_CHART_ENDPOINT: &str = "shotchartdetail";
const SHOT_CHART_SET: &str = "Shot_Chart_Detail";

/// Shot chart for one player. Failures collapse to an empty list with a
/// stderr note, mirroring the box-score boundary.
pub fn collect_player_shots(
    player_id: u32,
    team_id: u32,
    season: &str,
    last_n_games: Option<u32>,
) -> Vec<ShotEvent> {
    match fetch_shot_chart(team_id, player_id, season, last_n_games) {
        Ok(shots) => shots,
        Err(err) => {
            eprintln!("warn: shot chart for player {player_id}: {err}");
            Vec::new()
        }
    }
}

/// Shot chart for a whole team (player id 0 asks for every player).
pub fn collect_team_shots(team_id: u32, season: &str, last_n_games: Option<u32>) -> Vec<ShotEvent> {
    match fetch_shot_chart(team_id, 0, season, last_n_games) {
        Ok(shots) => shots,
        Err(err) => {
            eprintln!("warn: shot chart for team {team_id}: {err}");
            Vec::new()
        }
    }
}

/// Shot charts across the league, one sequential request per team with the
/// configured delay between calls. Per-team failures are skipped.
pub fn collect_league_shots(season: &str, teams: Option<&[&str]>) -> Vec<ShotEvent> {
    let roster: Vec<&'static NbaTeam> = match teams {
        Some(abbrs) => abbrs
            .iter()
            .filter_map(|abbr| {
                let team = config::team_by_abbr(abbr);
                if team.is_none() {
                    eprintln!("warn: unknown team abbreviation '{abbr}', skipping");
                }
                team
            })
            .collect(),
        None => config::NBA_TEAMS.iter().collect(),
    };

    let total = roster.len();
    let mut all_shots: Vec<ShotEvent> = Vec::new();
    for (i, team) in roster.iter().enumerate() {
        eprintln!("[{}/{}] fetching {}...", i + 1, total, team.name);
        let mut shots = collect_team_shots(team.id, season, None);
        if shots.is_empty() {
            continue;
        }
        for shot in &mut shots {
            shot.team_id = Some(team.id);
            shot.team_abbr = Some(team.abbr.to_string());
        }
        eprintln!("    -> {} shots", shots.len());
        all_shots.extend(shots);
    }
    all_shots
}

fn fetch_shot_chart(
    team_id: u32,
    player_id: u32,
    season: &str,
    last_n_games: Option<u32>,
) -> Result<Vec<ShotEvent>> {
    let last_n = last_n_games.unwrap_or(0).to_string();
    let v = fetch_stats_json(
        SHOT_CHART_ENDPOINT,
        &[
            ("TeamID", &team_id.to_string()),
            ("PlayerID", &player_id.to_string()),
            ("Season", season),
            ("SeasonType", "Regular Season"),
            ("LastNGames", &last_n),
            ("ContextMeasure", "FGA"),
            ("LeagueID", "00"),
            ("Month", "0"),
            ("OpponentTeamID", "0"),
            ("Period", "0"),
        ],
    )
    .context("shot chart request failed")?;
    Ok(parse_shot_chart_value(&v))
}

pub fn parse_shot_chart_json(raw: &str) -> Result<Vec<ShotEvent>> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid shot chart json")?;
    Ok(parse_shot_chart_value(&v))
}

fn parse_shot_chart_value(v: &Value) -> Vec<ShotEvent> {
    let Some(table) = result_table(v, SHOT_CHART_SET) else {
        return Vec::new();
    };

    let loc_x = table.col("LOC_X");
    let loc_y = table.col("LOC_Y");
    let made_flag = table.col("SHOT_MADE_FLAG");
    let shot_type = table.col("SHOT_TYPE");
    let shot_zone = table.col("SHOT_ZONE_BASIC");
    let shot_distance = table.col("SHOT_DISTANCE");
    let game_id = table.col("GAME_ID");
    let game_date = table.col("GAME_DATE");
    let player_id = table.col("PLAYER_ID");
    let player_name = table.col("PLAYER_NAME");
    let team_id = table.col("TEAM_ID");

    let mut shots: Vec<ShotEvent> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let Some(id) = cell_str(row, game_id) else { continue };
        let Some(zone) = cell_str(row, shot_zone) else { continue };
        let type_label = cell_str(row, shot_type).unwrap_or_default();
        shots.push(ShotEvent {
            loc_x: cell_i64(row, loc_x).unwrap_or(0) as i32,
            loc_y: cell_i64(row, loc_y).unwrap_or(0) as i32,
            shot_made: cell_u64(row, made_flag).unwrap_or(0) == 1,
            shot_type: ShotType::from_label(&type_label),
            shot_zone: zone,
            shot_distance: cell_u64(row, shot_distance).unwrap_or(0) as u32,
            game_id: id,
            game_date: cell_str(row, game_date),
            player_id: cell_u64(row, player_id).map(|n| n as u32).filter(|n| *n != 0),
            player_name: cell_str(row, player_name).filter(|s| !s.is_empty()),
            team_id: cell_u64(row, team_id).map(|n| n as u32).filter(|n| *n != 0),
            team_abbr: None,
        });
    }
    shots
}
