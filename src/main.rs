use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use bulls_analytics::box_score_fetch::{collect_box_score, collect_player_games};
use bulls_analytics::config;
use bulls_analytics::export::export_player_report;
use bulls_analytics::games_fetch::{collect_games, latest_game};
use bulls_analytics::model::{PlayerGameLine, StatKey};
use bulls_analytics::sample_feed;
use bulls_analytics::shot_fetch::{collect_league_shots, collect_player_shots, collect_team_shots};
use bulls_analytics::stats::{self, DEFAULT_ROLLING_KEYS, DEFAULT_ROLLING_WINDOWS};
use bulls_analytics::zones;

const SAMPLE_SEED: u64 = 17;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("latest");

    match command {
        "latest" => cmd_latest(),
        "games" => cmd_games(arg_usize(&args, 2, 10)),
        "player" => match args.get(2) {
            Some(name) => cmd_player(name, arg_usize(&args, 3, 20)),
            None => usage(),
        },
        "trend" => match args.get(2) {
            Some(name) => cmd_trend(name, args.get(3).map(String::as_str)),
            None => usage(),
        },
        "shots" => match args.get(2).and_then(|raw| raw.parse::<u32>().ok()) {
            Some(player_id) => cmd_shots(player_id),
            None => usage(),
        },
        "zones" => cmd_zones(),
        "league" => cmd_league(),
        "roster" => cmd_roster(),
        "export" => match args.get(2) {
            Some(name) => cmd_export(name, args.get(3).map(PathBuf::from)),
            None => usage(),
        },
        _ => usage(),
    }
}

fn usage() -> Result<()> {
    eprintln!("usage: bulls <command>");
    eprintln!("  latest                  most recent game and its top performers");
    eprintln!("  games [n]               last n games (default 10)");
    eprintln!("  player <name> [n]       game log and season summary");
    eprintln!("  trend <name> [metric]   recent-form trend for one stat");
    eprintln!("  shots <player_id>       shot-zone efficiency for one player");
    eprintln!("  zones                   team shot-zone leaders");
    eprintln!("  league                  league zone value ranking and shot mix");
    eprintln!("  roster                  roster volume and true shooting");
    eprintln!("  export <name> [path]    write a player season workbook");
    eprintln!();
    eprintln!("set BULLS_OFFLINE=1 to run the analysis commands on sample data");
    Ok(())
}

fn offline() -> bool {
    std::env::var("BULLS_OFFLINE")
        .map(|val| {
            let v = val.trim().to_ascii_lowercase();
            v == "1" || v == "true"
        })
        .unwrap_or(false)
}

fn arg_usize(args: &[String], idx: usize, default: usize) -> usize {
    args.get(idx)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(default)
}

fn player_lines(name: &str, last_n: usize) -> Result<Vec<PlayerGameLine>> {
    if offline() {
        return Ok(sample_feed::sample_player_games(last_n, SAMPLE_SEED));
    }
    collect_player_games(name, last_n, &config::current_season())
}

fn cmd_latest() -> Result<()> {
    let game = latest_game()?;
    let venue = if game.is_home { "vs." } else { "@" };
    println!(
        "{} | {} {} {} | {} ({:+})",
        game.date,
        config::BULLS_ABBR,
        venue,
        game.opponent,
        game.result.as_str(),
        game.plus_minus
    );
    println!("score: {}", game.points);

    let box_score = collect_box_score(&game.game_id, config::BULLS_TEAM_ID);
    let performers = stats::top_performers(&box_score);
    if performers.is_empty() {
        println!("box score unavailable");
        return Ok(());
    }
    println!();
    println!("{:<24} {:>4} {:>4} {:>4} {:>7}", "player", "pts", "reb", "ast", "fg");
    for line in performers.iter().take(8) {
        println!(
            "{:<24} {:>4} {:>4} {:>4} {:>3}-{:<3}",
            line.name, line.points, line.rebounds, line.assists, line.fg_made, line.fg_attempted
        );
    }
    Ok(())
}

fn cmd_games(last_n: usize) -> Result<()> {
    let games = collect_games(config::BULLS_TEAM_ID, &config::current_season(), Some(last_n))?;
    if games.is_empty() {
        println!("no games found");
        return Ok(());
    }
    println!("{:<12} {:<16} {:>3} {:>4} {:>5}", "date", "matchup", "w/l", "pts", "+/-");
    for game in &games {
        println!(
            "{:<12} {:<16} {:>3} {:>4} {:>+5}",
            game.date,
            game.matchup,
            game.result.as_str(),
            game.points,
            game.plus_minus
        );
    }
    Ok(())
}

fn cmd_player(name: &str, last_n: usize) -> Result<()> {
    let lines = player_lines(name, last_n)?;
    let Some(avgs) = stats::season_averages(&lines) else {
        println!("no games found for {name}");
        return Ok(());
    };

    println!("{name}, last {} games", avgs.games);
    println!(
        "{:.1} pts / {:.1} reb / {:.1} ast / {:.1} stl / {:.1} blk",
        avgs.points, avgs.rebounds, avgs.assists, avgs.steals, avgs.blocks
    );
    println!("shooting: {:.1} FG% / {:.1} 3P%", avgs.fg_pct, avgs.fg3_pct);
    if let Some(eff) = stats::efficiency_metrics(&lines) {
        println!("efficiency: {:.1} TS% / {:.1} eFG%", eff.ts_pct, eff.efg_pct);
    }

    let consistency = stats::consistency_score(&lines, DEFAULT_ROLLING_KEYS);
    let mut stats_sorted: Vec<&String> = consistency.keys().collect();
    stats_sorted.sort();
    println!();
    println!("{:<10} {:>6} {:>6} {:>6}  category", "stat", "mean", "std", "cv");
    for stat in stats_sorted {
        let entry = &consistency[stat];
        println!(
            "{:<10} {:>6.1} {:>6.2} {:>6.1}  {}",
            stat,
            entry.mean,
            entry.std,
            entry.cv,
            entry.category.as_str()
        );
    }

    println!();
    println!("{:<12} {:>4} {:>4} {:>4}  roll5(pts)", "date", "pts", "reb", "ast");
    let rolling = stats::rolling_averages(&lines, DEFAULT_ROLLING_KEYS, DEFAULT_ROLLING_WINDOWS);
    let roll5 = rolling.get("points_roll_5");
    for (i, line) in lines.iter().enumerate() {
        let roll = roll5.and_then(|values| values.get(i)).copied().unwrap_or(0.0);
        println!(
            "{:<12} {:>4} {:>4} {:>4}  {:>6.1}",
            line.date, line.points, line.rebounds, line.assists, roll
        );
    }
    Ok(())
}

fn cmd_trend(name: &str, metric: Option<&str>) -> Result<()> {
    let key = metric
        .and_then(StatKey::from_name)
        .unwrap_or(StatKey::Points);
    let lines = player_lines(name, 10)?;
    let Some(trend) = stats::scoring_trend(&lines, key) else {
        println!("no games found for {name}");
        return Ok(());
    };
    println!(
        "{name} {} trend: {} (recent {:.1} vs season {:.1}, high {:.0}, low {:.0}, last {:.0})",
        key.column(),
        trend.direction.as_str(),
        trend.recent_avg,
        trend.average,
        trend.high,
        trend.low,
        trend.last_game
    );
    Ok(())
}

fn cmd_shots(player_id: u32) -> Result<()> {
    let shots = if offline() {
        sample_feed::sample_team_shots(300, SAMPLE_SEED)
    } else {
        collect_player_shots(player_id, config::BULLS_TEAM_ID, &config::current_season(), None)
    };
    let Some(breakdown) = zones::points_per_shot_by_zone(&shots, true) else {
        println!("no shots found for player {player_id}");
        return Ok(());
    };

    println!("{:<24} {:>6} {:>6} {:>6}", "zone", "pps", "shots", "fg%");
    let mut zone_rows: Vec<_> = breakdown.by_zone.iter().collect();
    zone_rows.sort_by(|a, b| b.1.pps.total_cmp(&a.1.pps));
    for (zone, summary) in zone_rows {
        println!(
            "{:<24} {:>6.3} {:>6} {:>5.1}%",
            zone, summary.pps, summary.total_shots, summary.fg_pct
        );
    }
    println!(
        "{:<24} {:>6.3} {:>6} {:>5.1}%",
        "overall",
        breakdown.overall.pps,
        breakdown.overall.total_shots,
        breakdown.overall.fg_pct
    );
    Ok(())
}

fn cmd_zones() -> Result<()> {
    let shots = if offline() {
        sample_feed::sample_team_shots(600, SAMPLE_SEED)
    } else {
        collect_team_shots(config::BULLS_TEAM_ID, &config::current_season(), None)
    };
    if shots.is_empty() {
        println!("no team shots found");
        return Ok(());
    }

    let min_shots = std::env::var("ZONE_MIN_SHOTS")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(10);
    let leaders = zones::zone_leaders(&shots, min_shots);
    if leaders.is_empty() {
        println!("no player cleared {min_shots} shots in any zone");
        return Ok(());
    }
    println!("{:<24} {:<24} {:>6} {:>6}", "zone", "leader", "ppg", "shots");
    for leader in &leaders {
        println!(
            "{:<24} {:<24} {:>6.2} {:>6}",
            leader.zone, leader.player_name, leader.points_per_game, leader.shots
        );
    }
    Ok(())
}

fn cmd_league() -> Result<()> {
    let shots = if offline() {
        sample_feed::sample_league_shots(200, SAMPLE_SEED)
    } else {
        collect_league_shots(&config::last_season(), None)
    };
    if shots.is_empty() {
        println!("no league shots found");
        return Ok(());
    }

    println!("zone value ranking");
    println!("{:<4} {:<24} {:>6} {:>8}", "rank", "zone", "pps", "shots");
    for row in zones::zone_value_ranking(&shots) {
        println!("{:<4} {:<24} {:>6.3} {:>8}", row.rank, row.zone, row.pps, row.total_shots);
    }

    println!();
    println!("high-value shot mix");
    println!("{:<4} {:<5} {:>7} {:>7} {:>7} {:>8}", "rank", "team", "hv%", "ra%", "3pt%", "shots");
    for row in zones::high_value_zone_usage(&shots, None, true) {
        println!(
            "{:<4} {:<5} {:>6.1} {:>6.1} {:>6.1} {:>8}",
            row.rank,
            row.team_abbr,
            row.high_value_pct,
            row.restricted_area_pct,
            row.three_point_pct,
            row.total_shots
        );
    }

    println!();
    println!("{} vs league by zone", config::BULLS_ABBR);
    println!("{:<24} {:>8} {:>8} {:>7}", "zone", "team", "league", "diff");
    for row in zones::team_zone_comparison(&shots, config::BULLS_ABBR) {
        match (row.team_pps, row.pps_diff) {
            (Some(team_pps), Some(diff)) => println!(
                "{:<24} {:>8.3} {:>8.3} {:>+7.3}",
                row.zone, team_pps, row.league_pps, diff
            ),
            _ => println!("{:<24} {:>8} {:>8.3} {:>7}", row.zone, "-", row.league_pps, "-"),
        }
    }
    Ok(())
}

fn cmd_roster() -> Result<()> {
    if offline() {
        println!("roster needs box scores; not available offline");
        return Ok(());
    }
    let games = collect_games(config::BULLS_TEAM_ID, &config::current_season(), Some(10))?;
    let boxes: Vec<_> = games
        .iter()
        .map(|g| collect_box_score(&g.game_id, config::BULLS_TEAM_ID))
        .collect();
    let min_fga = std::env::var("ROSTER_MIN_FGA")
        .ok()
        .and_then(|val| val.parse::<f64>().ok())
        .unwrap_or(5.0);

    let roster = stats::roster_efficiency(&boxes, min_fga);
    if roster.is_empty() {
        println!("no players above {min_fga:.1} FGA per game");
        return Ok(());
    }
    println!("{:<24} {:>6} {:>8} {:>6}", "player", "ts%", "fga/g", "games");
    for row in &roster {
        println!(
            "{:<24} {:>6.1} {:>8.1} {:>6}",
            row.name, row.ts_pct, row.fga_per_game, row.games
        );
    }
    Ok(())
}

fn cmd_export(name: &str, path: Option<PathBuf>) -> Result<()> {
    let lines = player_lines(name, 20)?;
    if lines.is_empty() {
        println!("no games found for {name}");
        return Ok(());
    }

    let shots = if offline() {
        sample_feed::sample_team_shots(300, SAMPLE_SEED)
    } else {
        match resolve_player_id(name, &lines) {
            Some(player_id) => {
                collect_player_shots(player_id, config::BULLS_TEAM_ID, &config::current_season(), None)
            }
            None => Vec::new(),
        }
    };

    let path = match path {
        Some(p) => p,
        None => {
            let dir = config::output_dir();
            fs::create_dir_all(&dir)?;
            dir.join(format!("{}_report.xlsx", slugify(name)))
        }
    };

    let report = export_player_report(&path, name, &lines, &shots)?;
    println!(
        "wrote {}: {} games, {} rolling columns, {} zone rows",
        path.display(),
        report.games,
        report.rolling_columns,
        report.zone_rows
    );
    Ok(())
}

/// The game-finder rows don't carry player ids, so look the player up in
/// the most recent box score we already know they appeared in.
fn resolve_player_id(name: &str, lines: &[PlayerGameLine]) -> Option<u32> {
    let game_id = &lines.first()?.game_id;
    collect_box_score(game_id, config::BULLS_TEAM_ID)
        .iter()
        .find(|line| line.name.eq_ignore_ascii_case(name.trim()))
        .map(|line| line.player_id)
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
