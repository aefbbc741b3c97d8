//! CollegeFootballData.com API integration.
//!
//! One GET request per (endpoint, year) pair, authenticated with a bearer
//! token and serialized through a courtesy rate limit. The [`sweep`] module
//! accumulates per-year pages into whole-range polars tables.

pub mod client;
pub mod sweep;
pub mod types;

pub use client::CfbdClient;
pub use sweep::{SweepReport, sweep_elo, sweep_games, sweep_lines};
pub use types::{EloRating, Game, GameLines, ProviderLine};
