//! Season sweeps: one request per (endpoint, year), accumulated into one table.
//!
//! Per-page HTTP failures are soft. The sweep warns, counts the page as
//! skipped, and continues; gaps propagate silently into smaller downstream
//! tables, so the skipped count is surfaced in the report. Only a sweep in
//! which every page failed is an error.

use crate::error::{DataError, Result};
use indicatif::ProgressBar;
use polars::prelude::*;

use super::client::CfbdClient;
use super::types::{EloRating, Game, GameLines};

/// Outcome of a season sweep over one endpoint.
#[derive(Debug)]
pub struct SweepReport {
    /// All fetched pages, concatenated into one table
    pub frame: DataFrame,
    /// Number of (endpoint, year) pages fetched successfully
    pub pages_fetched: usize,
    /// Number of pages skipped after an HTTP failure
    pub pages_skipped: usize,
}

fn warn_skip(progress: Option<&ProgressBar>, endpoint: &str, year: i32, err: &DataError) {
    let msg = format!("Warning: Failed to fetch {} for {}: {}", endpoint, year, err);
    match progress {
        Some(pb) => pb.suspend(|| eprintln!("{}", msg)),
        None => eprintln!("{}", msg),
    }
}

/// Sweep `/games` across an inclusive year range.
pub async fn sweep_games(
    client: &CfbdClient,
    years: std::ops::RangeInclusive<i32>,
    progress: Option<&ProgressBar>,
) -> Result<SweepReport> {
    let pages = years.clone().count();
    let mut games: Vec<Game> = Vec::new();
    let mut skipped = 0;

    for year in years {
        match client.games(year).await {
            Ok(mut page) => games.append(&mut page),
            Err(e) => {
                warn_skip(progress, "/games", year, &e);
                skipped += 1;
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    if skipped == pages {
        return Err(DataError::NoData {
            endpoint: "/games".to_string(),
            pages,
        });
    }

    Ok(SweepReport {
        frame: games_frame(&games)?,
        pages_fetched: pages - skipped,
        pages_skipped: skipped,
    })
}

/// Sweep `/ratings/elo` across an inclusive year range.
///
/// Each record is stamped with the year it was requested under, since the
/// response itself carries no reliable year column.
pub async fn sweep_elo(
    client: &CfbdClient,
    years: std::ops::RangeInclusive<i32>,
    progress: Option<&ProgressBar>,
) -> Result<SweepReport> {
    let pages = years.clone().count();
    let mut ratings: Vec<(i32, EloRating)> = Vec::new();
    let mut skipped = 0;

    for year in years {
        match client.elo(year).await {
            Ok(page) => ratings.extend(page.into_iter().map(|r| (year, r))),
            Err(e) => {
                warn_skip(progress, "/ratings/elo", year, &e);
                skipped += 1;
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    if skipped == pages {
        return Err(DataError::NoData {
            endpoint: "/ratings/elo".to_string(),
            pages,
        });
    }

    Ok(SweepReport {
        frame: elo_frame(&ratings)?,
        pages_fetched: pages - skipped,
        pages_skipped: skipped,
    })
}

/// Sweep `/lines` across an inclusive year range.
pub async fn sweep_lines(
    client: &CfbdClient,
    years: std::ops::RangeInclusive<i32>,
    progress: Option<&ProgressBar>,
) -> Result<SweepReport> {
    let pages = years.clone().count();
    let mut lines: Vec<GameLines> = Vec::new();
    let mut skipped = 0;

    for year in years {
        match client.lines(year).await {
            Ok(mut page) => lines.append(&mut page),
            Err(e) => {
                warn_skip(progress, "/lines", year, &e);
                skipped += 1;
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    if skipped == pages {
        return Err(DataError::NoData {
            endpoint: "/lines".to_string(),
            pages,
        });
    }

    Ok(SweepReport {
        frame: lines_frame(&lines)?,
        pages_fetched: pages - skipped,
        pages_skipped: skipped,
    })
}

/// Build the raw games table.
///
/// A null venue id means "no home venue"; it is normalized to the 0
/// sentinel here so the neutral-site rule downstream is a plain equality.
pub fn games_frame(games: &[Game]) -> Result<DataFrame> {
    let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
    let seasons: Vec<i32> = games.iter().map(|g| g.season).collect();
    let weeks: Vec<i32> = games.iter().map(|g| g.week).collect();
    let season_types: Vec<Option<String>> = games.iter().map(|g| g.season_type.clone()).collect();
    let start_dates: Vec<Option<String>> = games.iter().map(|g| g.start_date.clone()).collect();
    let home_teams: Vec<String> = games.iter().map(|g| g.home_team.clone()).collect();
    let home_confs: Vec<Option<String>> =
        games.iter().map(|g| g.home_conference.clone()).collect();
    let home_points: Vec<Option<i32>> = games.iter().map(|g| g.home_points).collect();
    let away_teams: Vec<String> = games.iter().map(|g| g.away_team.clone()).collect();
    let away_confs: Vec<Option<String>> =
        games.iter().map(|g| g.away_conference.clone()).collect();
    let away_points: Vec<Option<i32>> = games.iter().map(|g| g.away_points).collect();
    let venue_ids: Vec<i64> = games.iter().map(|g| g.venue_id.unwrap_or(0)).collect();
    let attendance: Vec<Option<i64>> = games.iter().map(|g| g.attendance).collect();

    let df = DataFrame::new(vec![
        Series::new("id".into(), ids).into(),
        Series::new("season".into(), seasons).into(),
        Series::new("week".into(), weeks).into(),
        Series::new("season_type".into(), season_types).into(),
        Series::new("start_date".into(), start_dates).into(),
        Series::new("home_team".into(), home_teams).into(),
        Series::new("home_conference".into(), home_confs).into(),
        Series::new("home_points".into(), home_points).into(),
        Series::new("away_team".into(), away_teams).into(),
        Series::new("away_conference".into(), away_confs).into(),
        Series::new("away_points".into(), away_points).into(),
        Series::new("venue_id".into(), venue_ids).into(),
        Series::new("attendance".into(), attendance).into(),
    ])?;

    Ok(df)
}

/// Build the raw Elo table from year-stamped rating records.
pub fn elo_frame(ratings: &[(i32, EloRating)]) -> Result<DataFrame> {
    let teams: Vec<String> = ratings.iter().map(|(_, r)| r.team.clone()).collect();
    let conferences: Vec<Option<String>> =
        ratings.iter().map(|(_, r)| r.conference.clone()).collect();
    let elos: Vec<f64> = ratings.iter().map(|(_, r)| r.elo).collect();
    let years: Vec<i32> = ratings.iter().map(|(y, _)| *y).collect();

    let df = DataFrame::new(vec![
        Series::new("team".into(), teams).into(),
        Series::new("conference".into(), conferences).into(),
        Series::new("elo".into(), elos).into(),
        Series::new("year".into(), years).into(),
    ])?;

    Ok(df)
}

/// Build the raw betting-lines table, one row per (game, provider).
pub fn lines_frame(games: &[GameLines]) -> Result<DataFrame> {
    let mut ids: Vec<i64> = Vec::new();
    let mut seasons: Vec<i32> = Vec::new();
    let mut weeks: Vec<i32> = Vec::new();
    let mut home_teams: Vec<String> = Vec::new();
    let mut away_teams: Vec<String> = Vec::new();
    let mut providers: Vec<String> = Vec::new();
    let mut spreads: Vec<Option<f64>> = Vec::new();
    let mut over_unders: Vec<Option<f64>> = Vec::new();
    let mut home_moneylines: Vec<Option<i32>> = Vec::new();
    let mut away_moneylines: Vec<Option<i32>> = Vec::new();

    for game in games {
        for line in &game.lines {
            ids.push(game.id);
            seasons.push(game.season);
            weeks.push(game.week);
            home_teams.push(game.home_team.clone());
            away_teams.push(game.away_team.clone());
            providers.push(line.provider.clone());
            spreads.push(line.spread);
            over_unders.push(line.over_under);
            home_moneylines.push(line.home_moneyline);
            away_moneylines.push(line.away_moneyline);
        }
    }

    let df = DataFrame::new(vec![
        Series::new("id".into(), ids).into(),
        Series::new("season".into(), seasons).into(),
        Series::new("week".into(), weeks).into(),
        Series::new("home_team".into(), home_teams).into(),
        Series::new("away_team".into(), away_teams).into(),
        Series::new("provider".into(), providers).into(),
        Series::new("spread".into(), spreads).into(),
        Series::new("over_under".into(), over_unders).into(),
        Series::new("home_moneyline".into(), home_moneylines).into(),
        Series::new("away_moneyline".into(), away_moneylines).into(),
    ])?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::super::types::ProviderLine;
    use super::*;

    fn game(id: i64, season: i32, venue_id: Option<i64>) -> Game {
        Game {
            id,
            season,
            week: 1,
            season_type: Some("regular".to_string()),
            start_date: None,
            home_team: "Home".to_string(),
            home_conference: None,
            home_points: Some(21),
            away_team: "Away".to_string(),
            away_conference: None,
            away_points: Some(14),
            venue_id,
            attendance: None,
        }
    }

    #[test]
    fn test_games_frame_columns() {
        let df = games_frame(&[game(1, 2020, Some(55))]).unwrap();
        assert_eq!(df.height(), 1);
        assert!(df.column("home_team").is_ok());
        assert!(df.column("venue_id").is_ok());
        assert_eq!(df.width(), 13);
    }

    #[test]
    fn test_games_frame_null_venue_becomes_sentinel() {
        let df = games_frame(&[game(1, 2020, None), game(2, 2020, Some(7))]).unwrap();
        let venues: Vec<i64> = df
            .column("venue_id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(venues, vec![0, 7]);
    }

    #[test]
    fn test_elo_frame_stamps_year() {
        let ratings = vec![
            (
                2019,
                EloRating {
                    team: "Clemson".to_string(),
                    conference: Some("ACC".to_string()),
                    elo: 2200.0,
                },
            ),
            (
                2020,
                EloRating {
                    team: "Clemson".to_string(),
                    conference: Some("ACC".to_string()),
                    elo: 2150.0,
                },
            ),
        ];
        let df = elo_frame(&ratings).unwrap();
        let years: Vec<i32> = df
            .column("year")
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(years, vec![2019, 2020]);
    }

    #[test]
    fn test_lines_frame_flattens_providers() {
        let games = vec![GameLines {
            id: 9,
            season: 2021,
            week: 4,
            home_team: "Baylor".to_string(),
            away_team: "Iowa State".to_string(),
            lines: vec![
                ProviderLine {
                    provider: "DraftKings".to_string(),
                    spread: Some(-2.5),
                    over_under: Some(47.0),
                    home_moneyline: None,
                    away_moneyline: None,
                },
                ProviderLine {
                    provider: "Bovada".to_string(),
                    spread: Some(-3.0),
                    over_under: None,
                    home_moneyline: Some(-150),
                    away_moneyline: Some(130),
                },
            ],
        }];
        let df = lines_frame(&games).unwrap();
        assert_eq!(df.height(), 2);
        let providers: Vec<&str> = df
            .column("provider")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(providers, vec!["DraftKings", "Bovada"]);
    }

    #[test]
    fn test_empty_sweep_frames_keep_schema() {
        let df = games_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 13);

        let df = elo_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }
}
