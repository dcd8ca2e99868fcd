use anyhow::{Context, Result};

use crate::config;
use crate::model::{GameRecord, GameResult};
use crate::stats_api::{cell_i64, cell_str, cell_u64, fetch_stats_json, result_table};

const GAME_FINDER_ENDPOINT: &str = "leaguegamefinder";
const GAME_FINDER_SET: &str = "LeagueGameFinderResults";

/// Completed games for one team in one season, newest first.
pub fn collect_games(team_id: u32, season: &str, last_n: Option<usize>) -> Result<Vec<GameRecord>> {
    let v = fetch_stats_json(
        GAME_FINDER_ENDPOINT,
        &[
            ("TeamIDNullable", &team_id.to_string()),
            ("SeasonNullable", season),
            ("SeasonTypeNullable", "Regular Season"),
        ],
    )
    .context("game finder request failed")?;

    let mut games = parse_game_finder_value(&v);
    if let Some(n) = last_n {
        games.truncate(n);
    }
    Ok(games)
}

/// The most recent completed game for the configured team.
pub fn latest_game() -> Result<GameRecord> {
    let season = config::current_season();
    let games = collect_games(config::BULLS_TEAM_ID, &season, Some(1))?;
    games
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no games found for season {season}"))
}

pub fn parse_game_finder_json(raw: &str) -> Result<Vec<GameRecord>> {
    let v: serde_json::Value =
        serde_json::from_str(raw.trim()).context("invalid game finder json")?;
    Ok(parse_game_finder_value(&v))
}

fn parse_game_finder_value(v: &serde_json::Value) -> Vec<GameRecord> {
    let Some(table) = result_table(v, GAME_FINDER_SET) else {
        return Vec::new();
    };

    let game_id = table.col("GAME_ID");
    let game_date = table.col("GAME_DATE");
    let matchup = table.col("MATCHUP");
    let wl = table.col("WL");
    let pts = table.col("PTS");
    let plus_minus = table.col("PLUS_MINUS");

    let mut games: Vec<GameRecord> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let Some(id) = cell_str(row, game_id) else { continue };
        let Some(date) = cell_str(row, game_date) else { continue };
        // Games without a W/L are still in progress; skip them.
        let Some(result) = cell_str(row, wl).as_deref().and_then(GameResult::from_wl) else {
            continue;
        };
        let matchup = cell_str(row, matchup).unwrap_or_default();
        let (is_home, opponent) = split_matchup(&matchup);
        games.push(GameRecord {
            game_id: id,
            date,
            is_home,
            opponent,
            matchup,
            result,
            points: cell_u64(row, pts).unwrap_or(0) as u32,
            plus_minus: cell_i64(row, plus_minus).unwrap_or(0) as i32,
        });
    }

    // ISO dates, so plain string ordering is chronological; newest first.
    games.sort_by(|a, b| b.date.cmp(&a.date).then(b.game_id.cmp(&a.game_id)));
    games
}

/// Matchups read "CHI vs. BOS" at home and "CHI @ BOS" on the road.
fn split_matchup(matchup: &str) -> (bool, String) {
    if let Some((_, opp)) = matchup.split_once("vs.") {
        return (true, opp.trim().to_string());
    }
    if let Some((_, opp)) = matchup.split_once('@') {
        return (false, opp.trim().to_string());
    }
    (false, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matchup_splits_home_and_away() {
        assert_eq!(split_matchup("CHI vs. BOS"), (true, "BOS".to_string()));
        assert_eq!(split_matchup("CHI @ LAL"), (false, "LAL".to_string()));
        assert_eq!(split_matchup(""), (false, String::new()));
    }
}
