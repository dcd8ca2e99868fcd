use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bulls_analytics::games_fetch::parse_game_finder_json;
use bulls_analytics::model::StatKey;
use bulls_analytics::sample_feed::{sample_league_shots, sample_player_games};
use bulls_analytics::shot_fetch::parse_shot_chart_json;
use bulls_analytics::stats::{
    consistency_score, rolling_averages, DEFAULT_ROLLING_KEYS, DEFAULT_ROLLING_WINDOWS,
};
use bulls_analytics::zones::{high_value_zone_usage, zone_leaders, zone_value_ranking};

fn bench_rolling_averages(c: &mut Criterion) {
    let lines = sample_player_games(82, 11);
    c.bench_function("rolling_averages", |b| {
        b.iter(|| {
            let rolled = rolling_averages(
                black_box(&lines),
                DEFAULT_ROLLING_KEYS,
                DEFAULT_ROLLING_WINDOWS,
            );
            black_box(rolled.len());
        })
    });
}

fn bench_consistency_score(c: &mut Criterion) {
    let lines = sample_player_games(82, 11);
    let keys = [StatKey::Points, StatKey::Rebounds, StatKey::Assists];
    c.bench_function("consistency_score", |b| {
        b.iter(|| {
            let scores = consistency_score(black_box(&lines), black_box(&keys));
            black_box(scores.len());
        })
    });
}

fn bench_zone_value_ranking(c: &mut Criterion) {
    let shots = sample_league_shots(2_000, 11);
    c.bench_function("zone_value_ranking", |b| {
        b.iter(|| {
            let rows = zone_value_ranking(black_box(&shots));
            black_box(rows.len());
        })
    });
}

fn bench_high_value_zone_usage(c: &mut Criterion) {
    let shots = sample_league_shots(2_000, 11);
    c.bench_function("high_value_zone_usage", |b| {
        b.iter(|| {
            let rows = high_value_zone_usage(black_box(&shots), None, true);
            black_box(rows.len());
        })
    });
}

fn bench_zone_leaders(c: &mut Criterion) {
    let shots = sample_league_shots(2_000, 11);
    c.bench_function("zone_leaders", |b| {
        b.iter(|| {
            let leaders = zone_leaders(black_box(&shots), 10);
            black_box(leaders.len());
        })
    });
}

fn bench_game_finder_parse(c: &mut Criterion) {
    c.bench_function("game_finder_parse", |b| {
        b.iter(|| {
            let games = parse_game_finder_json(black_box(GAME_FINDER_JSON)).unwrap();
            black_box(games.len());
        })
    });
}

fn bench_shot_chart_parse(c: &mut Criterion) {
    c.bench_function("shot_chart_parse", |b| {
        b.iter(|| {
            let shots = parse_shot_chart_json(black_box(SHOT_CHART_JSON)).unwrap();
            black_box(shots.len());
        })
    });
}

criterion_group!(
    perf,
    bench_rolling_averages,
    bench_consistency_score,
    bench_zone_value_ranking,
    bench_high_value_zone_usage,
    bench_zone_leaders,
    bench_game_finder_parse,
    bench_shot_chart_parse
);
criterion_main!(perf);

static GAME_FINDER_JSON: &str = include_str!("../tests/fixtures/game_finder.json");
static SHOT_CHART_JSON: &str = include_str!("../tests/fixtures/shot_chart.json");
