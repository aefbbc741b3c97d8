//! Wire types for the CFBD endpoints used by the pipeline.
//!
//! Field names mirror the API's camelCase JSON. Nullable fields stay
//! `Option` here; any normalization happens when the sweep builds tables.

use serde::Deserialize;

/// A game record from `/games`.
///
/// Scores are `Option` because future and cancelled games come back with
/// null point totals; the feature builder drops those rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// CFBD game identifier
    pub id: i64,
    /// Season year
    pub season: i32,
    /// Week of the season
    pub week: i32,
    /// Season type (e.g. "regular", "postseason")
    #[serde(default)]
    pub season_type: Option<String>,
    /// Kickoff timestamp as reported by the API
    #[serde(default)]
    pub start_date: Option<String>,
    /// Home team name
    pub home_team: String,
    /// Home team conference
    #[serde(default)]
    pub home_conference: Option<String>,
    /// Home points scored, null until the game completes
    #[serde(default)]
    pub home_points: Option<i32>,
    /// Away team name
    pub away_team: String,
    /// Away team conference
    #[serde(default)]
    pub away_conference: Option<String>,
    /// Away points scored, null until the game completes
    #[serde(default)]
    pub away_points: Option<i32>,
    /// Venue identifier, null for games with no home venue
    #[serde(default)]
    pub venue_id: Option<i64>,
    /// Reported attendance
    #[serde(default)]
    pub attendance: Option<i64>,
}

/// A team rating record from `/ratings/elo`.
///
/// The response does not carry a reliable year column; the sweep stamps
/// each record with the year it requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EloRating {
    /// Team name
    pub team: String,
    /// Team conference
    #[serde(default)]
    pub conference: Option<String>,
    /// Elo rating
    pub elo: f64,
}

/// A game's betting lines from `/lines`, one entry per bookmaker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLines {
    /// CFBD game identifier
    pub id: i64,
    /// Season year
    pub season: i32,
    /// Week of the season
    pub week: i32,
    /// Home team name
    pub home_team: String,
    /// Away team name
    pub away_team: String,
    /// Per-provider lines for this game
    #[serde(default)]
    pub lines: Vec<ProviderLine>,
}

/// A single bookmaker's line for a game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLine {
    /// Bookmaker name
    pub provider: String,
    /// Point spread relative to the home team
    #[serde(default)]
    pub spread: Option<f64>,
    /// Over/under total
    #[serde(default)]
    pub over_under: Option<f64>,
    /// Home moneyline
    #[serde(default)]
    pub home_moneyline: Option<i32>,
    /// Away moneyline
    #[serde(default)]
    pub away_moneyline: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_deserializes_camel_case() {
        let json = r#"{
            "id": 401520145,
            "season": 2023,
            "week": 1,
            "seasonType": "regular",
            "startDate": "2023-09-02T19:30:00.000Z",
            "homeTeam": "Georgia",
            "homeConference": "SEC",
            "homePoints": 48,
            "awayTeam": "UT Martin",
            "awayConference": "UAC",
            "awayPoints": 7,
            "venueId": 743,
            "attendance": 92746
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 401520145);
        assert_eq!(game.home_team, "Georgia");
        assert_eq!(game.home_points, Some(48));
        assert_eq!(game.away_points, Some(7));
        assert_eq!(game.venue_id, Some(743));
    }

    #[test]
    fn test_game_with_null_score_and_venue() {
        let json = r#"{
            "id": 1,
            "season": 2023,
            "week": 14,
            "homeTeam": "Army",
            "awayTeam": "Navy",
            "homePoints": null,
            "awayPoints": null,
            "venueId": null
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.home_points, None);
        assert_eq!(game.away_points, None);
        assert_eq!(game.venue_id, None);
    }

    #[test]
    fn test_elo_rating_deserializes() {
        let json = r#"{"team": "Alabama", "conference": "SEC", "elo": 2089.0}"#;
        let rating: EloRating = serde_json::from_str(json).unwrap();
        assert_eq!(rating.team, "Alabama");
        assert_eq!(rating.elo, 2089.0);
    }

    #[test]
    fn test_game_lines_flatten_shape() {
        let json = r#"{
            "id": 2,
            "season": 2022,
            "week": 3,
            "homeTeam": "Ohio State",
            "awayTeam": "Toledo",
            "lines": [
                {"provider": "DraftKings", "spread": -31.5, "overUnder": 59.5},
                {"provider": "Bovada", "spread": -31.0, "overUnder": 60.0,
                 "homeMoneyline": -10000, "awayMoneyline": 2500}
            ]
        }"#;

        let game: GameLines = serde_json::from_str(json).unwrap();
        assert_eq!(game.lines.len(), 2);
        assert_eq!(game.lines[0].provider, "DraftKings");
        assert_eq!(game.lines[0].home_moneyline, None);
        assert_eq!(game.lines[1].away_moneyline, Some(2500));
    }

    #[test]
    fn test_game_lines_missing_lines_array() {
        let json = r#"{"id": 3, "season": 2022, "week": 1,
                       "homeTeam": "Rice", "awayTeam": "Houston"}"#;
        let game: GameLines = serde_json::from_str(json).unwrap();
        assert!(game.lines.is_empty());
    }
}
