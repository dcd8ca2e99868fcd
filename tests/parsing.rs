use std::fs;
use std::path::PathBuf;

use bulls_analytics::box_score_fetch::parse_box_score_json;
use bulls_analytics::games_fetch::parse_game_finder_json;
use bulls_analytics::model::{GameResult, ShotType};
use bulls_analytics::shot_fetch::parse_shot_chart_json;

const BULLS_TEAM_ID: u32 = 1_610_612_741;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn game_finder_rows_parse_newest_first() {
    let raw = read_fixture("game_finder.json");
    let games = parse_game_finder_json(&raw).expect("fixture should parse");

    // The in-progress row (null WL) is dropped; the rest sort newest first.
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].game_id, "0022500101");
    assert_eq!(games[0].date, "2025-11-01");
    assert_eq!(games[1].date, "2025-10-31");
    assert_eq!(games[2].date, "2025-10-29");
}

#[test]
fn game_finder_rows_carry_matchup_context() {
    let raw = read_fixture("game_finder.json");
    let games = parse_game_finder_json(&raw).expect("fixture should parse");

    let home_win = &games[0];
    assert!(home_win.is_home);
    assert_eq!(home_win.opponent, "BOS");
    assert_eq!(home_win.result, GameResult::Win);
    assert_eq!(home_win.points, 112);
    assert_eq!(home_win.plus_minus, 7);

    let road_loss = &games[2];
    assert!(!road_loss.is_home);
    assert_eq!(road_loss.opponent, "LAL");
    assert_eq!(road_loss.result, GameResult::Loss);
    assert_eq!(road_loss.plus_minus, -9);
}

#[test]
fn game_finder_without_result_set_is_empty() {
    let games = parse_game_finder_json(r#"{"resultSets": []}"#).expect("should parse");
    assert!(games.is_empty());
}

#[test]
fn game_finder_malformed_json_is_an_error() {
    assert!(parse_game_finder_json("not json").is_err());
}

#[test]
fn box_score_selects_requested_team_side() {
    let raw = read_fixture("box_score_v3.json");

    let bulls = parse_box_score_json(&raw, BULLS_TEAM_ID).expect("fixture should parse");
    assert_eq!(bulls.len(), 2);
    assert_eq!(bulls[0].name, "Coby White");
    assert_eq!(bulls[0].points, 28);
    assert_eq!(bulls[0].fg_attempted, 18);
    assert_eq!(bulls[0].fg3_made, 4);
    assert_eq!(bulls[0].minutes, "34:12");
    assert_eq!(bulls[1].name, "Matas Buzelis");
    assert_eq!(bulls[1].rebounds, 8);
    assert_eq!(bulls[1].blocks, 2);

    let celtics = parse_box_score_json(&raw, 1_610_612_738).expect("fixture should parse");
    assert_eq!(celtics.len(), 1);
    assert_eq!(celtics[0].name, "Jayson Tatum");
}

#[test]
fn box_score_for_absent_team_is_empty() {
    let raw = read_fixture("box_score_v3.json");
    let rows = parse_box_score_json(&raw, 1_610_612_747).expect("fixture should parse");
    assert!(rows.is_empty());
}

#[test]
fn shot_chart_rows_parse_with_zone_and_type() {
    let raw = read_fixture("shot_chart.json");
    let shots = parse_shot_chart_json(&raw).expect("fixture should parse");
    assert_eq!(shots.len(), 4);

    let layup = &shots[0];
    assert!(layup.shot_made);
    assert_eq!(layup.shot_type, ShotType::TwoPoint);
    assert_eq!(layup.shot_zone, "Restricted Area");
    assert_eq!(layup.shot_distance, 1);
    assert_eq!(layup.loc_x, -4);
    assert_eq!(layup.loc_y, 8);
    assert_eq!(layup.points(), 2);

    let pullup = &shots[1];
    assert_eq!(pullup.shot_type, ShotType::ThreePoint);
    assert_eq!(pullup.points(), 3);
    assert_eq!(pullup.player_id, Some(1630596));
    assert_eq!(pullup.player_name.as_deref(), Some("Coby White"));
    assert_eq!(pullup.team_id, Some(BULLS_TEAM_ID));

    let miss = &shots[2];
    assert!(!miss.shot_made);
    assert_eq!(miss.points(), 0);

    let heave = &shots[3];
    assert_eq!(heave.shot_zone, "Backcourt");
    assert_eq!(heave.game_id, "0022500088");
}

#[test]
fn shot_chart_without_detail_set_is_empty() {
    let shots = parse_shot_chart_json(r#"{"resultSets": []}"#).expect("should parse");
    assert!(shots.is_empty());
}
