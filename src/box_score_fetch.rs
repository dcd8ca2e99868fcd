use anyhow::{Context, Result};
use serde_json::Value;

use crate::config;
use crate::games_fetch::collect_games;
use crate::model::{BoxScoreLine, PlayerGameLine};
use crate::stats_api::fetch_stats_json;

const BOX_SCORE_ENDPOINT: &str = "boxscoretraditionalv3";

/// Box score rows for one team in one game. Fetch or parse failures are
/// reported on stderr and collapse to an empty list, so downstream
/// aggregation only ever sees valid rows or no rows.
pub fn collect_box_score(game_id: &str, team_id: u32) -> Vec<BoxScoreLine> {
    match fetch_box_score(game_id, team_id) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("warn: box score {game_id}: {err}");
            Vec::new()
        }
    }
}

pub fn fetch_box_score(game_id: &str, team_id: u32) -> Result<Vec<BoxScoreLine>> {
    let v = fetch_stats_json(
        BOX_SCORE_ENDPOINT,
        &[
            ("GameID", game_id),
            ("StartPeriod", "0"),
            ("EndPeriod", "0"),
            ("StartRange", "0"),
            ("EndRange", "0"),
            ("RangeType", "0"),
        ],
    )
    .with_context(|| format!("box score request failed: {game_id}"))?;
    Ok(parse_box_score_value(&v, team_id))
}

pub fn parse_box_score_json(raw: &str, team_id: u32) -> Result<Vec<BoxScoreLine>> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid box score json")?;
    Ok(parse_box_score_value(&v, team_id))
}

fn parse_box_score_value(v: &Value, team_id: u32) -> Vec<BoxScoreLine> {
    let Some(box_score) = v.get("boxScoreTraditional") else {
        return Vec::new();
    };

    for side in ["homeTeam", "awayTeam"] {
        let Some(team) = box_score.get(side) else { continue };
        let side_team_id = team.get("teamId").and_then(|x| x.as_u64()).unwrap_or(0) as u32;
        if side_team_id != team_id {
            continue;
        }
        let Some(players) = team.get("players").and_then(|x| x.as_array()) else {
            continue;
        };
        return players.iter().filter_map(parse_player_row).collect();
    }
    Vec::new()
}

fn parse_player_row(v: &Value) -> Option<BoxScoreLine> {
    let player_id = v.get("personId")?.as_u64()? as u32;
    let first_name = str_field(v, "firstName");
    let last_name = str_field(v, "familyName");
    let name = format!("{first_name} {last_name}").trim().to_string();

    let stats = v.get("statistics")?;
    Some(BoxScoreLine {
        player_id,
        name,
        first_name,
        last_name,
        points: stat_u32(stats, "points"),
        rebounds: stat_u32(stats, "reboundsTotal"),
        assists: stat_u32(stats, "assists"),
        steals: stat_u32(stats, "steals"),
        blocks: stat_u32(stats, "blocks"),
        fg_made: stat_u32(stats, "fieldGoalsMade"),
        fg_attempted: stat_u32(stats, "fieldGoalsAttempted"),
        fg3_made: stat_u32(stats, "threePointersMade"),
        fg3_attempted: stat_u32(stats, "threePointersAttempted"),
        ft_made: stat_u32(stats, "freeThrowsMade"),
        ft_attempted: stat_u32(stats, "freeThrowsAttempted"),
        turnovers: stat_u32(stats, "turnovers"),
        minutes: str_field(stats, "minutes"),
    })
}

fn str_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string()
}

fn stat_u32(stats: &Value, key: &str) -> u32 {
    stats
        .get(key)
        .and_then(|x| x.as_f64())
        .filter(|f| *f >= 0.0)
        .map(|f| f.round() as u32)
        .unwrap_or(0)
}

/// One player's game log, newest first, joined from recent box scores.
/// Fetches double the requested count to absorb games the player sat out;
/// games that fail to fetch are skipped rather than aborting the log.
pub fn collect_player_games(
    player_name: &str,
    last_n: usize,
    season: &str,
) -> Result<Vec<PlayerGameLine>> {
    let games = collect_games(config::BULLS_TEAM_ID, season, Some(last_n * 2))?;

    let mut lines: Vec<PlayerGameLine> = Vec::new();
    for game in &games {
        let box_lines = collect_box_score(&game.game_id, config::BULLS_TEAM_ID);
        let Some(row) = box_lines
            .iter()
            .find(|line| line.name.eq_ignore_ascii_case(player_name.trim()))
        else {
            continue;
        };

        lines.push(
            PlayerGameLine {
                game_id: game.game_id.clone(),
                date: game.date.clone(),
                matchup: game.matchup.clone(),
                result: Some(game.result),
                points: row.points,
                rebounds: row.rebounds,
                assists: row.assists,
                steals: row.steals,
                blocks: row.blocks,
                fg_made: row.fg_made,
                fg_attempted: row.fg_attempted,
                fg3_made: row.fg3_made,
                fg3_attempted: row.fg3_attempted,
                ft_made: row.ft_made,
                ft_attempted: row.ft_attempted,
                turnovers: row.turnovers,
                minutes: row.minutes.clone(),
                ..PlayerGameLine::default()
            }
            .with_derived_pcts(),
        );

        if lines.len() >= last_n {
            break;
        }
    }
    Ok(lines)
}
