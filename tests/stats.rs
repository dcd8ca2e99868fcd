use bulls_analytics::model::{BoxScoreLine, PlayerGameLine, StatKey};
use bulls_analytics::stats::{
    consistency_score, efficiency_metrics, game_efficiency, roster_efficiency, rolling_averages,
    scoring_trend, season_averages, top_performers, vs_average, ConsistencyCategory,
    TrendDirection,
};

fn line_with_points(points: u32) -> PlayerGameLine {
    PlayerGameLine {
        game_id: format!("g{points}"),
        points,
        ..PlayerGameLine::default()
    }
}

fn lines_with_points(points: &[u32]) -> Vec<PlayerGameLine> {
    points.iter().copied().map(line_with_points).collect()
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
}

#[test]
fn season_averages_of_example_log() {
    let lines = lines_with_points(&[10, 20, 30]);
    let avgs = season_averages(&lines).expect("non-empty log");
    assert_eq!(avgs.games, 3);
    approx(avgs.points, 20.0);
}

#[test]
fn season_average_of_constant_column_is_that_constant() {
    let mut lines = lines_with_points(&[17, 17, 17, 17]);
    for line in &mut lines {
        line.rebounds = 6;
    }
    let avgs = season_averages(&lines).expect("non-empty log");
    approx(avgs.points, 17.0);
    approx(avgs.rebounds, 6.0);
}

#[test]
fn season_averages_empty_log_is_none() {
    assert!(season_averages(&[]).is_none());
}

#[test]
fn vs_average_reports_signed_deltas() {
    let lines = lines_with_points(&[20, 20, 20]);
    let avgs = season_averages(&lines).unwrap();
    let mut game = line_with_points(28);
    game.rebounds = 5;
    game.assists = 7;
    let diff = vs_average(&game, &avgs);
    approx(diff.points, 8.0);
    approx(diff.rebounds, 5.0);
    approx(diff.assists, 7.0);
}

#[test]
fn scoring_trend_detects_upward_form() {
    // Newest-first: recent five average 26, previous five average 14.
    let lines = lines_with_points(&[30, 28, 26, 24, 22, 18, 16, 14, 12, 10]);
    let trend = scoring_trend(&lines, StatKey::Points).expect("non-empty log");
    assert_eq!(trend.direction, TrendDirection::Up);
    approx(trend.recent_avg, 26.0);
    approx(trend.average, 20.0);
    approx(trend.high, 30.0);
    approx(trend.low, 10.0);
    approx(trend.last_game, 30.0);
}

#[test]
fn scoring_trend_detects_downward_form() {
    let lines = lines_with_points(&[10, 12, 14, 16, 18, 22, 24, 26, 28, 30]);
    let trend = scoring_trend(&lines, StatKey::Points).unwrap();
    assert_eq!(trend.direction, TrendDirection::Down);
}

#[test]
fn scoring_trend_flat_form_is_stable() {
    let lines = lines_with_points(&[20, 21, 19, 20, 21, 20, 19, 21, 20, 19]);
    let trend = scoring_trend(&lines, StatKey::Points).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
}

#[test]
fn scoring_trend_short_log_degrades_gracefully() {
    // Previous window is empty, so the recent mean is its own baseline.
    let lines = lines_with_points(&[20, 22, 24]);
    let trend = scoring_trend(&lines, StatKey::Points).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
    approx(trend.average, 22.0);
    approx(trend.last_game, 20.0);
}

#[test]
fn scoring_trend_empty_log_is_none() {
    assert!(scoring_trend(&[], StatKey::Points).is_none());
}

#[test]
fn rolling_average_reverses_windows_and_reverses_back() {
    // Newest-first [30, 20, 10]; chronologically [10, 20, 30], rolled by 2
    // that is [10, 15, 25], restored to newest-first [25, 15, 10].
    let lines = lines_with_points(&[30, 20, 10]);
    let rolled = rolling_averages(&lines, &[StatKey::Points], &[2]);
    let column = rolled.get("points_roll_2").expect("derived column");
    assert_eq!(column, &vec![25.0, 15.0, 10.0]);
}

#[test]
fn rolling_average_window_one_is_identity() {
    let lines = lines_with_points(&[7, 19, 4, 31]);
    let rolled = rolling_averages(&lines, &[StatKey::Points], &[1]);
    assert_eq!(rolled["points_roll_1"], vec![7.0, 19.0, 4.0, 31.0]);
}

#[test]
fn rolling_average_default_column_set() {
    let lines = lines_with_points(&[10, 20, 30, 40, 50]);
    let rolled = rolling_averages(
        &lines,
        bulls_analytics::stats::DEFAULT_ROLLING_KEYS,
        bulls_analytics::stats::DEFAULT_ROLLING_WINDOWS,
    );
    assert!(rolled.contains_key("points_roll_3"));
    assert!(rolled.contains_key("points_roll_5"));
    assert!(rolled.contains_key("rebounds_roll_3"));
    assert!(rolled.contains_key("assists_roll_10"));
}

#[test]
fn rolling_average_empty_log_is_empty() {
    let rolled = rolling_averages(&[], &[StatKey::Points], &[3]);
    assert!(rolled.is_empty());
}

#[test]
fn consistency_categorizes_steady_and_volatile_scorers() {
    let steady = lines_with_points(&[20, 21, 20, 19, 20]);
    let result = consistency_score(&steady, &[StatKey::Points]);
    assert_eq!(result["points"].category, ConsistencyCategory::VeryConsistent);

    let volatile = lines_with_points(&[5, 40, 8, 35, 10]);
    let result = consistency_score(&volatile, &[StatKey::Points]);
    assert_eq!(result["points"].category, ConsistencyCategory::Volatile);
    assert!(result["points"].cv > 50.0);
}

#[test]
fn consistency_zero_mean_has_zero_cv() {
    let lines = lines_with_points(&[0, 0, 0, 0, 0]);
    let result = consistency_score(&lines, &[StatKey::Blocks]);
    approx(result["blocks"].cv, 0.0);
}

#[test]
fn consistency_empty_log_is_empty() {
    assert!(consistency_score(&[], &[StatKey::Points]).is_empty());
}

#[test]
fn efficiency_metrics_match_reference_formulas() {
    let line = PlayerGameLine {
        points: 30,
        fg_attempted: 20,
        ft_attempted: 4,
        fg_made: 12,
        fg3_made: 2,
        ..PlayerGameLine::default()
    };
    let eff = efficiency_metrics(std::slice::from_ref(&line)).expect("non-empty log");
    approx(eff.ts_pct, 30.0 / (2.0 * (20.0 + 0.44 * 4.0)) * 100.0);
    approx(eff.efg_pct, (12.0 + 0.5 * 2.0) / 20.0 * 100.0);
    assert_eq!(eff.games, 1);
}

#[test]
fn efficiency_metrics_all_zero_input_is_zero_not_nan() {
    let line = PlayerGameLine::default();
    let eff = efficiency_metrics(std::slice::from_ref(&line)).unwrap();
    assert_eq!(eff.ts_pct, 0.0);
    assert_eq!(eff.efg_pct, 0.0);
}

#[test]
fn efficiency_metrics_empty_log_is_none() {
    assert!(efficiency_metrics(&[]).is_none());
}

#[test]
fn game_efficiency_computes_per_game_rows() {
    let lines = vec![
        PlayerGameLine {
            game_id: "g1".to_string(),
            points: 20,
            fg_attempted: 15,
            ft_attempted: 4,
            fg_made: 8,
            fg3_made: 2,
            ..PlayerGameLine::default()
        },
        PlayerGameLine {
            game_id: "g2".to_string(),
            points: 30,
            fg_attempted: 20,
            ft_attempted: 5,
            fg_made: 12,
            fg3_made: 3,
            ..PlayerGameLine::default()
        },
    ];
    let rows = game_efficiency(&lines);
    assert_eq!(rows.len(), 2);
    approx(rows[0].ts_pct, 20.0 / (2.0 * (15.0 + 0.44 * 4.0)) * 100.0);
    assert_eq!(rows[0].game_id, "g1");
}

#[test]
fn game_efficiency_empty_log_is_empty() {
    assert!(game_efficiency(&[]).is_empty());
}

fn box_line(id: u32, name: &str, points: u32, rebounds: u32, assists: u32) -> BoxScoreLine {
    BoxScoreLine {
        player_id: id,
        name: name.to_string(),
        points,
        rebounds,
        assists,
        ..BoxScoreLine::default()
    }
}

#[test]
fn top_performers_sort_by_points_then_assists_then_rebounds() {
    let box_score = vec![
        box_line(1, "Player A", 10, 5, 3),
        box_line(2, "Player B", 30, 5, 3),
        box_line(3, "Player C", 20, 5, 3),
        box_line(4, "Player D", 20, 5, 6),
    ];
    let performers = top_performers(&box_score);
    assert_eq!(performers[0].name, "Player B");
    // Equal points: higher assists first.
    assert_eq!(performers[1].name, "Player D");
    assert_eq!(performers[2].name, "Player C");
    assert_eq!(performers[3].name, "Player A");
}

#[test]
fn top_performers_empty_box_is_empty() {
    assert!(top_performers(&[]).is_empty());
}

#[test]
fn roster_efficiency_filters_and_sorts_by_volume() {
    let mut heavy = box_line(1, "Volume Guy", 25, 4, 3);
    heavy.fg_attempted = 20;
    heavy.ft_attempted = 5;
    let mut medium = box_line(2, "Second Option", 14, 6, 2);
    medium.fg_attempted = 10;
    let mut light = box_line(3, "Bench Piece", 4, 1, 1);
    light.fg_attempted = 3;

    let boxes = vec![
        vec![heavy.clone(), medium.clone(), light.clone()],
        vec![heavy, medium, light],
    ];
    let roster = roster_efficiency(&boxes, 5.0);

    assert_eq!(roster.len(), 2, "below-threshold shooters are dropped");
    assert_eq!(roster[0].name, "Volume Guy");
    assert_eq!(roster[0].games, 2);
    assert_eq!(roster[0].fga_per_game, 20.0);
    // TS over totals: 50 pts / (2 * (40 + 0.44 * 10)) = 56.3%.
    assert_eq!(roster[0].ts_pct, 56.3);
    assert_eq!(roster[1].name, "Second Option");
}

#[test]
fn aggregators_are_idempotent_over_unchanged_input() {
    let lines = lines_with_points(&[12, 25, 18, 31, 9, 22, 27]);
    assert_eq!(season_averages(&lines), season_averages(&lines));
    assert_eq!(
        rolling_averages(&lines, &[StatKey::Points], &[3]),
        rolling_averages(&lines, &[StatKey::Points], &[3])
    );
    assert_eq!(
        consistency_score(&lines, &[StatKey::Points]),
        consistency_score(&lines, &[StatKey::Points])
    );
}
