use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ShotEvent;

/// Heaves from beyond half court; noise for value analysis, so excluded by
/// default everywhere a caller doesn't say otherwise.
pub const BACKCOURT_ZONE: &str = "Backcourt";

pub const RESTRICTED_AREA_ZONE: &str = "Restricted Area";

pub const THREE_POINT_ZONES: &[&str] = &["Above the Break 3", "Left Corner 3", "Right Corner 3"];

/// The analytics-era shot diet: rim plus threes.
pub const HIGH_VALUE_ZONES: &[&str] = &[
    "Restricted Area",
    "Above the Break 3",
    "Left Corner 3",
    "Right Corner 3",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpsSummary {
    pub pps: f64,
    pub total_points: u32,
    pub total_shots: usize,
    pub fg_pct: f64,
}

/// Points per shot over a set of attempts: 3 for a made three, 2 for a made
/// two, 0 for a miss, divided by attempt count. `None` when nothing
/// survives filtering.
pub fn points_per_shot(shots: &[ShotEvent], exclude_backcourt: bool) -> Option<PpsSummary> {
    let kept: Vec<&ShotEvent> = filter_backcourt(shots, exclude_backcourt);
    summarize(&kept)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZonePpsBreakdown {
    pub overall: PpsSummary,
    pub by_zone: HashMap<String, PpsSummary>,
}

pub fn points_per_shot_by_zone(
    shots: &[ShotEvent],
    exclude_backcourt: bool,
) -> Option<ZonePpsBreakdown> {
    let kept = filter_backcourt(shots, exclude_backcourt);
    let overall = summarize(&kept)?;

    let mut zones: HashMap<String, Vec<&ShotEvent>> = HashMap::new();
    for shot in &kept {
        zones.entry(shot.shot_zone.clone()).or_default().push(shot);
    }
    let by_zone = zones
        .into_iter()
        .filter_map(|(zone, zone_shots)| summarize(&zone_shots).map(|s| (zone, s)))
        .collect();

    Some(ZonePpsBreakdown { overall, by_zone })
}

fn filter_backcourt(shots: &[ShotEvent], exclude_backcourt: bool) -> Vec<&ShotEvent> {
    shots
        .iter()
        .filter(|s| !exclude_backcourt || s.shot_zone != BACKCOURT_ZONE)
        .collect()
}

fn summarize(shots: &[&ShotEvent]) -> Option<PpsSummary> {
    if shots.is_empty() {
        return None;
    }
    let total_shots = shots.len();
    let total_points: u32 = shots.iter().map(|s| s.points()).sum();
    let makes = shots.iter().filter(|s| s.shot_made).count();
    Some(PpsSummary {
        pps: total_points as f64 / total_shots as f64,
        total_points,
        total_shots,
        fg_pct: makes as f64 / total_shots as f64 * 100.0,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLeader {
    pub zone: String,
    pub player_id: u32,
    pub player_name: String,
    pub points_per_game: f64,
    pub zone_points: u32,
    pub games: usize,
    pub shots: usize,
}

/// Per zone, the player producing the most points per game from that zone,
/// among players with at least `min_shots` attributed attempts there.
/// Points per game divides zone points by the count of distinct games in
/// which the player attempted a shot from the zone. A tie goes to the
/// player encountered first in row order. Shots without player attribution
/// are skipped. Output is sorted by zone label.
pub fn zone_leaders(shots: &[ShotEvent], min_shots: usize) -> Vec<ZoneLeader> {
    struct Acc {
        zone: String,
        player_id: u32,
        player_name: String,
        shots: usize,
        points: u32,
        game_ids: Vec<String>,
    }

    // First-appearance order keeps the tie-break deterministic.
    let mut order: Vec<Acc> = Vec::new();
    let mut index: HashMap<(String, u32), usize> = HashMap::new();

    for shot in shots {
        if shot.shot_zone == BACKCOURT_ZONE {
            continue;
        }
        let Some(player_id) = shot.player_id else { continue };
        let key = (shot.shot_zone.clone(), player_id);
        let idx = *index.entry(key).or_insert_with(|| {
            order.push(Acc {
                zone: shot.shot_zone.clone(),
                player_id,
                player_name: shot.player_name.clone().unwrap_or_default(),
                shots: 0,
                points: 0,
                game_ids: Vec::new(),
            });
            order.len() - 1
        });
        let acc = &mut order[idx];
        acc.shots += 1;
        acc.points += shot.points();
        if !acc.game_ids.contains(&shot.game_id) {
            acc.game_ids.push(shot.game_id.clone());
        }
    }

    let mut leaders: HashMap<String, ZoneLeader> = HashMap::new();
    for acc in &order {
        if acc.shots < min_shots || acc.game_ids.is_empty() {
            continue;
        }
        let ppg = acc.points as f64 / acc.game_ids.len() as f64;
        let replace = leaders
            .get(&acc.zone)
            .map(|cur| ppg > cur.points_per_game)
            .unwrap_or(true);
        if replace {
            leaders.insert(
                acc.zone.clone(),
                ZoneLeader {
                    zone: acc.zone.clone(),
                    player_id: acc.player_id,
                    player_name: acc.player_name.clone(),
                    points_per_game: ppg,
                    zone_points: acc.points,
                    games: acc.game_ids.len(),
                    shots: acc.shots,
                },
            );
        }
    }

    let mut out: Vec<ZoneLeader> = leaders.into_values().collect();
    out.sort_by(|a, b| a.zone.cmp(&b.zone));
    out
}

/// PPS per zone across whatever shots are supplied (typically the whole
/// league). Backcourt excluded by default at call sites.
pub fn league_pps_by_zone(
    shots: &[ShotEvent],
    exclude_backcourt: bool,
) -> HashMap<String, PpsSummary> {
    points_per_shot_by_zone(shots, exclude_backcourt)
        .map(|b| b.by_zone)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneValueRow {
    pub rank: usize,
    pub zone: String,
    pub pps: f64,
    pub total_points: u32,
    pub total_shots: usize,
    pub fg_pct: f64,
}

/// Zones ranked by points per shot, best first, 1-based ranks.
pub fn zone_value_ranking(shots: &[ShotEvent]) -> Vec<ZoneValueRow> {
    let mut rows: Vec<ZoneValueRow> = league_pps_by_zone(shots, true)
        .into_iter()
        .map(|(zone, s)| ZoneValueRow {
            rank: 0,
            zone,
            pps: s.pps,
            total_points: s.total_points,
            total_shots: s.total_shots,
            fg_pct: s.fg_pct,
        })
        .collect();
    rows.sort_by(|a, b| b.pps.total_cmp(&a.pps).then_with(|| a.zone.cmp(&b.zone)));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamZoneUsageRow {
    pub team_abbr: String,
    pub high_value_pct: f64,
    pub restricted_area_pct: f64,
    pub three_point_pct: f64,
    pub low_value_pct: f64,
    pub total_shots: usize,
    pub rank: usize,
}

/// Each team's shot mix: share of attempts from high-value zones
/// (restricted area + threes by default, overridable), ranked descending.
/// Shots without team attribution are skipped; if none carry a team the
/// result is empty.
pub fn high_value_zone_usage(
    shots: &[ShotEvent],
    high_value_zones: Option<&[&str]>,
    exclude_backcourt: bool,
) -> Vec<TeamZoneUsageRow> {
    let high_value = high_value_zones.unwrap_or(HIGH_VALUE_ZONES);

    struct Acc {
        team_abbr: String,
        total: usize,
        high: usize,
        restricted: usize,
        threes: usize,
    }

    let mut order: Vec<Acc> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for shot in shots {
        if exclude_backcourt && shot.shot_zone == BACKCOURT_ZONE {
            continue;
        }
        let Some(abbr) = shot.team_abbr.as_deref() else { continue };
        let idx = *index.entry(abbr.to_string()).or_insert_with(|| {
            order.push(Acc {
                team_abbr: abbr.to_string(),
                total: 0,
                high: 0,
                restricted: 0,
                threes: 0,
            });
            order.len() - 1
        });
        let acc = &mut order[idx];
        acc.total += 1;
        let zone = shot.shot_zone.as_str();
        if high_value.contains(&zone) {
            acc.high += 1;
        }
        if zone == RESTRICTED_AREA_ZONE {
            acc.restricted += 1;
        }
        if THREE_POINT_ZONES.contains(&zone) {
            acc.threes += 1;
        }
    }

    let mut rows: Vec<TeamZoneUsageRow> = order
        .into_iter()
        .filter(|acc| acc.total > 0)
        .map(|acc| {
            let high_value_pct = pct(acc.high, acc.total);
            TeamZoneUsageRow {
                team_abbr: acc.team_abbr,
                high_value_pct,
                restricted_area_pct: pct(acc.restricted, acc.total),
                three_point_pct: pct(acc.threes, acc.total),
                low_value_pct: 100.0 - high_value_pct,
                total_shots: acc.total,
                rank: 0,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.high_value_pct.total_cmp(&a.high_value_pct));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneComparisonRow {
    pub zone: String,
    pub team_pps: Option<f64>,
    pub league_pps: f64,
    pub pps_diff: Option<f64>,
    pub team_shots: usize,
    pub league_shots: usize,
}

/// One team's per-zone PPS against the league, ordered by league PPS
/// descending. Zones the team never shot from keep `None` on the team side.
pub fn team_zone_comparison(league_shots: &[ShotEvent], team_abbr: &str) -> Vec<ZoneComparisonRow> {
    let league = league_pps_by_zone(league_shots, true);
    if league.is_empty() {
        return Vec::new();
    }

    let team_shots: Vec<ShotEvent> = league_shots
        .iter()
        .filter(|s| {
            s.team_abbr
                .as_deref()
                .is_some_and(|abbr| abbr.eq_ignore_ascii_case(team_abbr))
        })
        .cloned()
        .collect();
    let team = league_pps_by_zone(&team_shots, true);

    let mut rows: Vec<ZoneComparisonRow> = league
        .into_iter()
        .map(|(zone, league_summary)| {
            let team_summary = team.get(&zone);
            ZoneComparisonRow {
                team_pps: team_summary.map(|s| s.pps),
                pps_diff: team_summary.map(|s| s.pps - league_summary.pps),
                team_shots: team_summary.map(|s| s.total_shots).unwrap_or(0),
                league_pps: league_summary.pps,
                league_shots: league_summary.total_shots,
                zone,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.league_pps.total_cmp(&a.league_pps).then_with(|| a.zone.cmp(&b.zone)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShotType;

    fn shot(zone: &str, made: bool, three: bool) -> ShotEvent {
        ShotEvent {
            loc_x: 0,
            loc_y: 0,
            shot_made: made,
            shot_type: if three { ShotType::ThreePoint } else { ShotType::TwoPoint },
            shot_zone: zone.to_string(),
            shot_distance: 0,
            game_id: "g1".to_string(),
            game_date: None,
            player_id: None,
            player_name: None,
            team_id: None,
            team_abbr: None,
        }
    }

    #[test]
    fn summarize_counts_points_and_fg_pct() {
        let shots = vec![
            shot(RESTRICTED_AREA_ZONE, true, false),
            shot("Above the Break 3", true, true),
            shot("Mid-Range", false, false),
            shot("Mid-Range", false, false),
        ];
        let s = points_per_shot(&shots, true).expect("non-empty shots");
        assert_eq!(s.total_points, 5);
        assert_eq!(s.total_shots, 4);
        assert_eq!(s.fg_pct, 50.0);
    }

    #[test]
    fn backcourt_filter_is_a_toggle() {
        let shots = vec![
            shot(RESTRICTED_AREA_ZONE, true, false),
            shot(BACKCOURT_ZONE, true, true),
        ];
        assert_eq!(points_per_shot(&shots, true).unwrap().total_shots, 1);
        assert_eq!(points_per_shot(&shots, false).unwrap().total_shots, 2);
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(points_per_shot(&[], true).is_none());
        assert!(points_per_shot_by_zone(&[], true).is_none());
    }
}
