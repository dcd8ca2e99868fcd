use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::model::{PlayerGameLine, ShotEvent};
use crate::stats::{self, DEFAULT_ROLLING_KEYS, DEFAULT_ROLLING_WINDOWS};
use crate::zones;

pub struct ExportReport {
    pub games: usize,
    pub rolling_columns: usize,
    pub consistency_rows: usize,
    pub zone_rows: usize,
}

/// Write one player's season workbook: raw game log plus every derived
/// table. Pure formatting; callers supply already-fetched rows.
pub fn export_player_report(
    path: &Path,
    player: &str,
    lines: &[PlayerGameLine],
    shots: &[ShotEvent],
) -> Result<ExportReport> {
    let mut games_rows = vec![vec![
        "Game ID".to_string(),
        "Date".to_string(),
        "Matchup".to_string(),
        "Result".to_string(),
        "PTS".to_string(),
        "REB".to_string(),
        "AST".to_string(),
        "STL".to_string(),
        "BLK".to_string(),
        "FGM".to_string(),
        "FGA".to_string(),
        "3PM".to_string(),
        "3PA".to_string(),
        "FTM".to_string(),
        "FTA".to_string(),
        "TOV".to_string(),
        "MIN".to_string(),
        "FG%".to_string(),
        "3P%".to_string(),
        "FT%".to_string(),
    ]];
    for line in lines {
        games_rows.push(game_row(line));
    }

    let mut averages_rows = vec![vec!["Stat".to_string(), "Value".to_string()]];
    if let Some(avgs) = stats::season_averages(lines) {
        averages_rows.push(vec!["Games".to_string(), avgs.games.to_string()]);
        averages_rows.push(vec!["Points".to_string(), format!("{:.1}", avgs.points)]);
        averages_rows.push(vec!["Rebounds".to_string(), format!("{:.1}", avgs.rebounds)]);
        averages_rows.push(vec!["Assists".to_string(), format!("{:.1}", avgs.assists)]);
        averages_rows.push(vec!["Steals".to_string(), format!("{:.1}", avgs.steals)]);
        averages_rows.push(vec!["Blocks".to_string(), format!("{:.1}", avgs.blocks)]);
        averages_rows.push(vec!["FG%".to_string(), format!("{:.1}", avgs.fg_pct)]);
        averages_rows.push(vec!["3P%".to_string(), format!("{:.1}", avgs.fg3_pct)]);
    }
    if let Some(eff) = stats::efficiency_metrics(lines) {
        averages_rows.push(vec!["TS%".to_string(), format!("{:.1}", eff.ts_pct)]);
        averages_rows.push(vec!["eFG%".to_string(), format!("{:.1}", eff.efg_pct)]);
    }

    let rolling = stats::rolling_averages(lines, DEFAULT_ROLLING_KEYS, DEFAULT_ROLLING_WINDOWS);
    let mut rolling_columns: Vec<&String> = rolling.keys().collect();
    rolling_columns.sort();
    let mut rolling_rows = Vec::with_capacity(lines.len() + 1);
    {
        let mut header = vec!["Game ID".to_string(), "Date".to_string()];
        header.extend(rolling_columns.iter().map(|c| (*c).clone()));
        rolling_rows.push(header);
    }
    for (i, line) in lines.iter().enumerate() {
        let mut row = vec![line.game_id.clone(), line.date.clone()];
        for column in &rolling_columns {
            let value = rolling
                .get(*column)
                .and_then(|values| values.get(i))
                .copied()
                .unwrap_or(0.0);
            row.push(format!("{value:.2}"));
        }
        rolling_rows.push(row);
    }

    let consistency = stats::consistency_score(lines, DEFAULT_ROLLING_KEYS);
    let mut consistency_rows = vec![vec![
        "Stat".to_string(),
        "Mean".to_string(),
        "Std".to_string(),
        "CV".to_string(),
        "Category".to_string(),
        "High".to_string(),
        "Low".to_string(),
    ]];
    let mut consistency_stats: Vec<&String> = consistency.keys().collect();
    consistency_stats.sort();
    for stat in consistency_stats {
        let entry = &consistency[stat];
        consistency_rows.push(vec![
            stat.clone(),
            format!("{:.2}", entry.mean),
            format!("{:.2}", entry.std),
            format!("{:.1}", entry.cv),
            entry.category.as_str().to_string(),
            format!("{:.0}", entry.high),
            format!("{:.0}", entry.low),
        ]);
    }

    let mut zone_rows = vec![vec![
        "Zone".to_string(),
        "PPS".to_string(),
        "Points".to_string(),
        "Shots".to_string(),
        "FG%".to_string(),
    ]];
    if let Some(breakdown) = zones::points_per_shot_by_zone(shots, true) {
        let mut zone_names: Vec<&String> = breakdown.by_zone.keys().collect();
        zone_names.sort();
        for zone in zone_names {
            let summary = &breakdown.by_zone[zone];
            zone_rows.push(vec![
                zone.clone(),
                format!("{:.3}", summary.pps),
                summary.total_points.to_string(),
                summary.total_shots.to_string(),
                format!("{:.1}", summary.fg_pct),
            ]);
        }
        zone_rows.push(vec![
            "Overall".to_string(),
            format!("{:.3}", breakdown.overall.pps),
            breakdown.overall.total_points.to_string(),
            breakdown.overall.total_shots.to_string(),
            format!("{:.1}", breakdown.overall.fg_pct),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Games")?;
        write_rows(sheet, &games_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Averages")?;
        write_rows(sheet, &averages_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rolling")?;
        write_rows(sheet, &rolling_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Consistency")?;
        write_rows(sheet, &consistency_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Zones")?;
        write_rows(sheet, &zone_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing {} workbook to {}", player, path.display()))?;

    Ok(ExportReport {
        games: games_rows.len().saturating_sub(1),
        rolling_columns: rolling_columns.len(),
        consistency_rows: consistency_rows.len().saturating_sub(1),
        zone_rows: zone_rows.len().saturating_sub(1),
    })
}

fn game_row(line: &PlayerGameLine) -> Vec<String> {
    vec![
        line.game_id.clone(),
        line.date.clone(),
        line.matchup.clone(),
        line.result.map(|r| r.as_str().to_string()).unwrap_or_default(),
        line.points.to_string(),
        line.rebounds.to_string(),
        line.assists.to_string(),
        line.steals.to_string(),
        line.blocks.to_string(),
        line.fg_made.to_string(),
        line.fg_attempted.to_string(),
        line.fg3_made.to_string(),
        line.fg3_attempted.to_string(),
        line.ft_made.to_string(),
        line.ft_attempted.to_string(),
        line.turnovers.to_string(),
        line.minutes.clone(),
        format!("{:.1}", line.fg_pct),
        format!("{:.1}", line.fg3_pct),
        format!("{:.1}", line.ft_pct),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
