//! Bulls analytics toolkit: pull games, box scores and shot charts from the
//! public stats API, then compute season, rolling and shot-zone metrics over
//! them. Fetching is thin and rate limited; every aggregate is a pure
//! function of already-fetched rows.

pub mod box_score_fetch;
pub mod config;
pub mod export;
pub mod games_fetch;
pub mod http_cache;
pub mod http_client;
pub mod model;
pub mod sample_feed;
pub mod shot_fetch;
pub mod stats;
pub mod stats_api;
pub mod zones;
