use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{BoxScoreLine, PlayerGameLine, StatKey};

/// Per-stat means across a game log. Absent entirely when the log is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAverages {
    pub games: usize,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
}

pub fn season_averages(lines: &[PlayerGameLine]) -> Option<SeasonAverages> {
    if lines.is_empty() {
        return None;
    }
    Some(SeasonAverages {
        games: lines.len(),
        points: mean_of(lines, StatKey::Points),
        rebounds: mean_of(lines, StatKey::Rebounds),
        assists: mean_of(lines, StatKey::Assists),
        steals: mean_of(lines, StatKey::Steals),
        blocks: mean_of(lines, StatKey::Blocks),
        fg_pct: mean_of(lines, StatKey::FgPct),
        fg3_pct: mean_of(lines, StatKey::Fg3Pct),
    })
}

fn mean_of(lines: &[PlayerGameLine], key: StatKey) -> f64 {
    mean(&lines.iter().map(|l| key.value(l)).collect::<Vec<_>>())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VsAverage {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

/// How one game compares to the season baseline (positive = above average).
pub fn vs_average(line: &PlayerGameLine, averages: &SeasonAverages) -> VsAverage {
    VsAverage {
        points: line.points as f64 - averages.points,
        rebounds: line.rebounds as f64 - averages.rebounds,
        assists: line.assists as f64 - averages.assists,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub direction: TrendDirection,
    pub average: f64,
    pub recent_avg: f64,
    pub high: f64,
    pub low: f64,
    pub last_game: f64,
}

/// Trend over a newest-first game log: the mean of the most recent five
/// games against the mean of the five before them. With fewer than ten
/// games the previous window shrinks to whatever remains, and an empty
/// previous window falls back to the recent mean as its own baseline.
pub fn scoring_trend(lines: &[PlayerGameLine], key: StatKey) -> Option<TrendReport> {
    if lines.is_empty() {
        return None;
    }
    let values: Vec<f64> = lines.iter().map(|l| key.value(l)).collect();
    let average = mean(&values);

    let recent = &values[..values.len().min(5)];
    let previous = if values.len() >= 10 {
        &values[5..10]
    } else {
        &values[recent.len()..]
    };

    let recent_avg = mean(recent);
    let previous_avg = if previous.is_empty() {
        recent_avg
    } else {
        mean(previous)
    };

    let direction = if recent_avg > previous_avg * 1.1 {
        TrendDirection::Up
    } else if recent_avg < previous_avg * 0.9 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Some(TrendReport {
        direction,
        average,
        recent_avg,
        high: values.iter().copied().fold(f64::MIN, f64::max),
        low: values.iter().copied().fold(f64::MAX, f64::min),
        last_game: values[0],
    })
}

pub const DEFAULT_ROLLING_KEYS: &[StatKey] = &[StatKey::Points, StatKey::Rebounds, StatKey::Assists];
pub const DEFAULT_ROLLING_WINDOWS: &[usize] = &[3, 5, 10];

/// Trailing means over the game log, one derived column per (stat, window)
/// pair, named `{column}_roll_{n}` and aligned with the input rows.
///
/// The stored rows are newest-first but "trailing" is chronological, so we
/// reorder to oldest-first, window, and restore the original order.
pub fn rolling_averages(
    lines: &[PlayerGameLine],
    keys: &[StatKey],
    windows: &[usize],
) -> HashMap<String, Vec<f64>> {
    let mut out: HashMap<String, Vec<f64>> = HashMap::new();
    if lines.is_empty() {
        return out;
    }
    for key in keys {
        let values: Vec<f64> = lines.iter().map(|l| key.value(l)).collect();
        let chrono = chronological(&values);
        for window in windows {
            if *window == 0 {
                continue;
            }
            let mut rolled = trailing_means(&chrono, *window);
            rolled.reverse();
            out.insert(format!("{}_roll_{}", key.column(), window), rolled);
        }
    }
    out
}

/// Newest-first to oldest-first (and back, since it is its own inverse).
fn chronological(values: &[f64]) -> Vec<f64> {
    values.iter().rev().copied().collect()
}

/// Trailing mean with partial leading windows (an element's window covers
/// itself and up to `window - 1` predecessors).
fn trailing_means(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        let n = (i + 1).min(window);
        out.push(sum / n as f64);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyCategory {
    VeryConsistent,
    Consistent,
    Moderate,
    Volatile,
}

impl ConsistencyCategory {
    /// Category by coefficient of variation. The boundaries are closed on
    /// the high side: exactly 20 is consistent, exactly 50 is volatile.
    pub fn from_cv(cv: f64) -> Self {
        if cv < 20.0 {
            ConsistencyCategory::VeryConsistent
        } else if cv < 35.0 {
            ConsistencyCategory::Consistent
        } else if cv < 50.0 {
            ConsistencyCategory::Moderate
        } else {
            ConsistencyCategory::Volatile
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyCategory::VeryConsistent => "very_consistent",
            ConsistencyCategory::Consistent => "consistent",
            ConsistencyCategory::Moderate => "moderate",
            ConsistencyCategory::Volatile => "volatile",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyEntry {
    pub mean: f64,
    pub std: f64,
    pub cv: f64,
    pub category: ConsistencyCategory,
    pub high: f64,
    pub low: f64,
}

/// Night-to-night volatility per stat: mean, sample standard deviation, and
/// CV = std / mean x 100 (defined as 0 when the mean is 0).
pub fn consistency_score(
    lines: &[PlayerGameLine],
    keys: &[StatKey],
) -> HashMap<String, ConsistencyEntry> {
    let mut out = HashMap::new();
    if lines.is_empty() {
        return out;
    }
    for key in keys {
        let values: Vec<f64> = lines.iter().map(|l| key.value(l)).collect();
        let mean = mean(&values);
        let std = sample_std(&values, mean);
        let cv = if mean.abs() < f64::EPSILON {
            0.0
        } else {
            std / mean * 100.0
        };
        out.insert(
            key.column().to_string(),
            ConsistencyEntry {
                mean,
                std,
                cv,
                category: ConsistencyCategory::from_cv(cv),
                high: values.iter().copied().fold(f64::MIN, f64::max),
                low: values.iter().copied().fold(f64::MAX, f64::min),
            },
        );
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    pub ts_pct: f64,
    pub efg_pct: f64,
    pub games: usize,
}

/// True shooting and effective field-goal percentage over summed totals.
/// TS% = PTS / (2 x (FGA + 0.44 x FTA)); eFG% = (FGM + 0.5 x 3PM) / FGA.
pub fn efficiency_metrics(lines: &[PlayerGameLine]) -> Option<EfficiencyMetrics> {
    if lines.is_empty() {
        return None;
    }
    let points: u32 = lines.iter().map(|l| l.points).sum();
    let fga: u32 = lines.iter().map(|l| l.fg_attempted).sum();
    let fta: u32 = lines.iter().map(|l| l.ft_attempted).sum();
    let fgm: u32 = lines.iter().map(|l| l.fg_made).sum();
    let fg3m: u32 = lines.iter().map(|l| l.fg3_made).sum();

    Some(EfficiencyMetrics {
        ts_pct: true_shooting_pct(points, fga, fta),
        efg_pct: effective_fg_pct(fgm, fg3m, fga),
        games: lines.len(),
    })
}

fn true_shooting_pct(points: u32, fga: u32, fta: u32) -> f64 {
    let tsa = fga as f64 + 0.44 * fta as f64;
    if tsa <= 0.0 {
        return 0.0;
    }
    points as f64 / (2.0 * tsa) * 100.0
}

fn effective_fg_pct(fgm: u32, fg3m: u32, fga: u32) -> f64 {
    if fga == 0 {
        return 0.0;
    }
    (fgm as f64 + 0.5 * fg3m as f64) / fga as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameEfficiencyRow {
    pub game_id: String,
    pub date: String,
    pub ts_pct: f64,
    pub efg_pct: f64,
}

/// Per-game TS%/eFG%, aligned with the input rows.
pub fn game_efficiency(lines: &[PlayerGameLine]) -> Vec<GameEfficiencyRow> {
    lines
        .iter()
        .map(|l| GameEfficiencyRow {
            game_id: l.game_id.clone(),
            date: l.date.clone(),
            ts_pct: true_shooting_pct(l.points, l.fg_attempted, l.ft_attempted),
            efg_pct: effective_fg_pct(l.fg_made, l.fg3_made, l.fg_attempted),
        })
        .collect()
}

/// Box-score rows ranked by points, then assists, then rebounds.
pub fn top_performers(box_score: &[BoxScoreLine]) -> Vec<BoxScoreLine> {
    let mut performers: Vec<BoxScoreLine> = box_score.to_vec();
    performers.sort_by(|a, b| {
        (b.points, b.assists, b.rebounds).cmp(&(a.points, a.assists, a.rebounds))
    });
    performers
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEfficiencyRow {
    pub player_id: u32,
    pub name: String,
    pub ts_pct: f64,
    pub fga_per_game: f64,
    pub games: usize,
}

/// Volume and shooting efficiency per player, accumulated across a set of
/// box scores. Players under the FGA-per-game floor are dropped; output is
/// sorted by volume, highest first.
pub fn roster_efficiency(boxes: &[Vec<BoxScoreLine>], min_fga: f64) -> Vec<RosterEfficiencyRow> {
    struct Acc {
        player_id: u32,
        name: String,
        games: usize,
        points: u32,
        fga: u32,
        fta: u32,
    }

    let mut order: Vec<Acc> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for box_score in boxes {
        for row in box_score {
            let idx = *index.entry(row.player_id).or_insert_with(|| {
                order.push(Acc {
                    player_id: row.player_id,
                    name: row.name.clone(),
                    games: 0,
                    points: 0,
                    fga: 0,
                    fta: 0,
                });
                order.len() - 1
            });
            let acc = &mut order[idx];
            acc.games += 1;
            acc.points += row.points;
            acc.fga += row.fg_attempted;
            acc.fta += row.ft_attempted;
        }
    }

    let mut out: Vec<RosterEfficiencyRow> = order
        .into_iter()
        .filter(|acc| acc.games > 0)
        .filter_map(|acc| {
            let fga_per_game = acc.fga as f64 / acc.games as f64;
            if fga_per_game < min_fga {
                return None;
            }
            Some(RosterEfficiencyRow {
                player_id: acc.player_id,
                name: acc.name,
                ts_pct: round1(true_shooting_pct(acc.points, acc.fga, acc.fta)),
                fga_per_game: round1(fga_per_game),
                games: acc.games,
            })
        })
        .collect();
    out.sort_by(|a, b| b.fga_per_game.total_cmp(&a.fga_per_game));
    out
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let var = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    var.sqrt()
}
