use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config;
use crate::model::{GameResult, PlayerGameLine, ShotEvent, ShotType};

// (zone, is_three, make probability) roughly matching league shot diets.
const ZONE_MIX: &[(&str, bool, f64)] = &[
    ("Restricted Area", false, 0.63),
    ("Restricted Area", false, 0.63),
    ("In The Paint (Non-RA)", false, 0.43),
    ("Mid-Range", false, 0.41),
    ("Above the Break 3", true, 0.35),
    ("Above the Break 3", true, 0.35),
    ("Left Corner 3", true, 0.38),
    ("Right Corner 3", true, 0.38),
];

const SAMPLE_PLAYERS: &[(u32, &str)] = &[
    (101, "Alec Rowan"),
    (102, "Deshawn Carter"),
    (103, "Milos Petrak"),
    (104, "Trey Okafor"),
    (105, "Jalen Whitfield"),
];

/// Synthetic game log, newest first, with internally consistent scoring
/// lines (points reconcile with the generated shooting splits).
pub fn sample_player_games(games: usize, seed: u64) -> Vec<PlayerGameLine> {
    let mut rng = StdRng::seed_from_u64(seed);
    let today = Utc::now().date_naive();

    (0..games)
        .map(|i| {
            let date = today - Duration::days(2 * i as i64);
            let fg_attempted = rng.gen_range(10..=22_u32);
            let fg_made = rng.gen_range(3..=fg_attempted.min(12));
            let fg3_attempted = rng.gen_range(2..=8_u32).min(fg_attempted);
            let fg3_made = rng.gen_range(0..=fg3_attempted.min(fg_made));
            let ft_attempted = rng.gen_range(0..=8_u32);
            let ft_made = rng.gen_range(0..=ft_attempted);
            let points = 2 * (fg_made - fg3_made) + 3 * fg3_made + ft_made;

            let opponent = sample_opponent(&mut rng);
            let is_home = rng.gen_bool(0.5);
            let matchup = if is_home {
                format!("{} vs. {}", config::BULLS_ABBR, opponent)
            } else {
                format!("{} @ {}", config::BULLS_ABBR, opponent)
            };

            PlayerGameLine {
                game_id: format!("00225{:05}", 90_000 - i),
                date: date.format("%Y-%m-%d").to_string(),
                matchup,
                result: Some(if rng.gen_bool(0.5) { GameResult::Win } else { GameResult::Loss }),
                points,
                rebounds: rng.gen_range(1..=11),
                assists: rng.gen_range(1..=9),
                steals: rng.gen_range(0..=3),
                blocks: rng.gen_range(0..=2),
                fg_made,
                fg_attempted,
                fg3_made,
                fg3_attempted,
                ft_made,
                ft_attempted,
                turnovers: rng.gen_range(0..=5),
                minutes: format!("{}:{:02}", rng.gen_range(24..=38), rng.gen_range(0..60)),
                ..PlayerGameLine::default()
            }
            .with_derived_pcts()
        })
        .collect()
}

/// Synthetic team shot chart with player attribution, spread over a handful
/// of games.
pub fn sample_team_shots(shots: usize, seed: u64) -> Vec<ShotEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..shots).map(|_| sample_shot(&mut rng, None)).collect()
}

/// Synthetic league shot charts, `per_team` attempts per franchise.
pub fn sample_league_shots(per_team: usize, seed: u64) -> Vec<ShotEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(per_team * config::NBA_TEAMS.len());
    for team in config::NBA_TEAMS {
        for _ in 0..per_team {
            out.push(sample_shot(&mut rng, Some(team)));
        }
    }
    out
}

fn sample_shot(rng: &mut StdRng, team: Option<&'static config::NbaTeam>) -> ShotEvent {
    let (zone, is_three, make_prob) = ZONE_MIX[rng.gen_range(0..ZONE_MIX.len())];
    let (player_id, player_name) = SAMPLE_PLAYERS[rng.gen_range(0..SAMPLE_PLAYERS.len())];
    let distance = if is_three {
        rng.gen_range(22..=30)
    } else if zone == "Restricted Area" {
        rng.gen_range(0..=4)
    } else {
        rng.gen_range(4..=20)
    };

    ShotEvent {
        loc_x: rng.gen_range(-250..=250),
        loc_y: rng.gen_range(-40..=400),
        shot_made: rng.gen_bool(make_prob),
        shot_type: if is_three { ShotType::ThreePoint } else { ShotType::TwoPoint },
        shot_zone: zone.to_string(),
        shot_distance: distance,
        game_id: format!("00225{:05}", 90_000 - rng.gen_range(0..10)),
        game_date: None,
        player_id: Some(player_id),
        player_name: Some(player_name.to_string()),
        team_id: team.map(|t| t.id),
        team_abbr: team.map(|t| t.abbr.to_string()),
    }
}

fn sample_opponent(rng: &mut StdRng) -> &'static str {
    loop {
        let team = config::NBA_TEAMS[rng.gen_range(0..config::NBA_TEAMS.len())];
        if team.abbr != config::BULLS_ABBR {
            return team.abbr;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_games_reconcile_points_with_splits() {
        for line in sample_player_games(25, 7) {
            let expected =
                2 * (line.fg_made - line.fg3_made) + 3 * line.fg3_made + line.ft_made;
            assert_eq!(line.points, expected);
            assert!(line.fg3_made <= line.fg_made);
            assert!(line.fg_made <= line.fg_attempted);
        }
    }

    #[test]
    fn sample_feed_is_deterministic_per_seed() {
        let a = sample_player_games(10, 42);
        let b = sample_player_games(10, 42);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.points, y.points);
            assert_eq!(x.matchup, y.matchup);
        }
    }
}
