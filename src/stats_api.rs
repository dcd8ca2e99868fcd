use std::thread;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config;
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;

const STATS_BASE: &str = "https://stats.nba.com/stats";

const DEFAULT_CACHE_SECS: u64 = 300;

/// Header set stats.nba.com requires before it will answer at all.
pub const STATS_HEADERS: &[(&str, &str)] = &[
    ("User-Agent", "Mozilla/5.0"),
    ("Referer", "https://www.nba.com/"),
    ("Origin", "https://www.nba.com"),
    ("Accept", "application/json"),
    ("x-nba-stats-origin", "stats"),
    ("x-nba-stats-token", "true"),
];

/// Throttled, cached GET against a stats endpoint. The fixed delay runs
/// before every call, matching the original tool's flat rate limiting.
pub fn fetch_stats_json(endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
    thread::sleep(config::api_delay());

    let client = http_client()?;
    let url = build_url(endpoint, params);
    let body = fetch_json_cached(client, &url, STATS_HEADERS, cache_secs())
        .with_context(|| format!("stats request failed: {endpoint}"))?;
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty stats response: {endpoint}"));
    }
    serde_json::from_str(trimmed).with_context(|| format!("invalid stats json: {endpoint}"))
}

fn cache_secs() -> u64 {
    std::env::var("STATS_CACHE_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_CACHE_SECS)
}

fn build_url(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{STATS_BASE}/{endpoint}");
    for (i, (key, value)) in params.iter().enumerate() {
        let sep = if i == 0 { '?' } else { '&' };
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(&encode_query_value(value));
    }
    url
}

// Only spaces show up in the values we send (season types, measure names).
fn encode_query_value(value: &str) -> String {
    value.replace(' ', "+")
}

/// One `resultSets` table decoded into header names plus raw rows.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn col(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pull a named table out of a stats payload. Some endpoints use
/// `resultSets`, a few older ones `resultSet`; handle both.
pub fn result_table(v: &Value, name: &str) -> Option<ResultTable> {
    let sets = v
        .get("resultSets")
        .and_then(|x| x.as_array())
        .map(|arr| arr.iter().collect::<Vec<_>>())
        .or_else(|| v.get("resultSet").map(|single| vec![single]))?;

    for set in sets {
        let set_name = set.get("name").and_then(|x| x.as_str()).unwrap_or_default();
        if !set_name.eq_ignore_ascii_case(name) {
            continue;
        }
        let headers = set
            .get("headers")?
            .as_array()?
            .iter()
            .filter_map(|h| h.as_str())
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        let rows = set
            .get("rowSet")?
            .as_array()?
            .iter()
            .filter_map(|row| row.as_array().cloned())
            .collect::<Vec<_>>();
        return Some(ResultTable { headers, rows });
    }
    None
}

pub fn cell_str(row: &[Value], idx: Option<usize>) -> Option<String> {
    let cell = row.get(idx?)?;
    cell.as_str().map(|s| s.to_string())
}

pub fn cell_u64(row: &[Value], idx: Option<usize>) -> Option<u64> {
    let cell = row.get(idx?)?;
    if let Some(n) = cell.as_u64() {
        return Some(n);
    }
    // Counting stats occasionally arrive as floats or strings.
    if let Some(f) = cell.as_f64() {
        if f >= 0.0 {
            return Some(f.round() as u64);
        }
    }
    cell.as_str().and_then(|s| s.trim().parse::<u64>().ok())
}

pub fn cell_i64(row: &[Value], idx: Option<usize>) -> Option<i64> {
    let cell = row.get(idx?)?;
    if let Some(n) = cell.as_i64() {
        return Some(n);
    }
    if let Some(f) = cell.as_f64() {
        return Some(f.round() as i64);
    }
    cell.as_str().and_then(|s| s.trim().parse::<i64>().ok())
}
