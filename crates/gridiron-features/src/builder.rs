//! The feature join: games + season Elo ratings → one modeling table.
//!
//! The pipeline is a fixed sequence of lazy operations: project the games
//! table to its essential columns, drop games without a final score, label
//! home wins, attach each side's rating through two left joins keyed on
//! (team, season), derive the differential columns, and drop rows whose
//! rating vector is incomplete.
//!
//! The joins are deliberately left joins: every game row survives both
//! join steps even when one side's rating is missing, and incomplete rows
//! are only removed by the final null-rating filter.

use crate::error::{FeatureError, Result};
use polars::prelude::*;

/// Venue id sentinel meaning "no home venue".
///
/// The upstream fetch normalizes a null venue to this value, so a plain
/// equality test marks neutral-site games.
pub const NEUTRAL_VENUE_SENTINEL: i64 = 0;

/// Columns the games table is projected down to before joining.
pub const GAME_COLUMNS: [&str; 8] = [
    "id",
    "season",
    "week",
    "home_team",
    "away_team",
    "home_points",
    "away_points",
    "venue_id",
];

/// Columns required of the Elo ratings table.
pub const ELO_COLUMNS: [&str; 3] = ["team", "elo", "year"];

/// The two predictor columns the model trains on.
pub const FEATURE_COLUMNS: [&str; 2] = ["elo_diff", "is_neutral"];

/// The regression target column.
pub const TARGET_COLUMN: &str = "score_diff";

fn ensure_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    for &column in columns {
        if df.column(column).is_err() {
            return Err(FeatureError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Project games to the fixed column set, drop score-less rows, label wins.
fn clean_games(games: &DataFrame) -> LazyFrame {
    games
        .clone()
        .lazy()
        .select(GAME_COLUMNS.map(col))
        .filter(
            col("home_points")
                .is_not_null()
                .and(col("away_points").is_not_null()),
        )
        .with_column(
            col("home_points")
                .gt(col("away_points"))
                .cast(DataType::Int32)
                .alias("home_win"),
        )
}

/// Re-key the Elo table for a one-sided join.
///
/// The ratings table has one row per (team, year); aligning `year` to the
/// games table's `season` key and renaming `team`/`elo` per side lets the
/// same source table join once for the home side and once for the away
/// side.
fn rekey_elo(elo: &DataFrame, team_as: &str, elo_as: &str) -> LazyFrame {
    elo.clone().lazy().select([
        col("team").alias(team_as),
        col("year").alias("season"),
        col("elo").alias(elo_as),
    ])
}

/// Build the unified feature table.
///
/// # Errors
/// Returns [`FeatureError::MissingColumn`] when an input table lacks one
/// of the columns the join needs; the check runs before any join executes.
///
/// # Guarantees
/// The output rows are a subset of the input games rows, each with a
/// complete feature vector: no null rating, rating differential, or label.
pub fn build_features(games: &DataFrame, elo: &DataFrame) -> Result<DataFrame> {
    ensure_columns(games, "games", &GAME_COLUMNS)?;
    ensure_columns(elo, "elo", &ELO_COLUMNS)?;

    let home_elo = rekey_elo(elo, "home_team", "home_elo");
    let away_elo = rekey_elo(elo, "away_team", "away_elo");

    let features = clean_games(games)
        .join(
            home_elo,
            [col("home_team"), col("season")],
            [col("home_team"), col("season")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            away_elo,
            [col("away_team"), col("season")],
            [col("away_team"), col("season")],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns([
            (col("home_elo") - col("away_elo")).alias("elo_diff"),
            (col("home_points") - col("away_points")).alias("score_diff"),
            col("venue_id")
                .eq(lit(NEUTRAL_VENUE_SENTINEL))
                .cast(DataType::Int32)
                .alias("is_neutral"),
        ])
        .filter(
            col("home_elo")
                .is_not_null()
                .and(col("away_elo").is_not_null()),
        )
        .collect()?;

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn games_fixture() -> DataFrame {
        df!(
            "id" => [1i64, 2, 3, 4],
            "season" => [2022i32, 2022, 2022, 2022],
            "week" => [1i32, 1, 2, 2],
            "home_team" => ["Georgia", "Michigan", "Georgia", "Rice"],
            "away_team" => ["Oregon", "Colorado", "Michigan", "Texas"],
            "home_points" => [Some(49i32), Some(17), None, Some(10)],
            "away_points" => [Some(3i32), Some(17), None, Some(37)],
            "venue_id" => [0i64, 210, 37, 451],
        )
        .unwrap()
    }

    fn elo_fixture() -> DataFrame {
        df!(
            "team" => ["Georgia", "Oregon", "Michigan", "Colorado", "Texas"],
            "conference" => ["SEC", "Pac-12", "Big Ten", "Pac-12", "Big 12"],
            "elo" => [2180.0, 1905.0, 2120.0, 1555.0, 1980.0],
            "year" => [2022i32, 2022, 2022, 2022, 2022],
        )
        .unwrap()
    }

    #[test]
    fn test_scoreless_games_are_dropped() {
        let features = build_features(&games_fixture(), &elo_fixture()).unwrap();
        let ids: Vec<i64> = features
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        // Game 3 has no score; game 4's home side (Rice) has no rating
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[case(49, 3, 1)]
    #[case(17, 17, 0)]
    #[case(14, 20, 0)]
    fn test_home_win_label(#[case] home: i32, #[case] away: i32, #[case] expected: i32) {
        let games = df!(
            "id" => [1i64],
            "season" => [2022i32],
            "week" => [1i32],
            "home_team" => ["Georgia"],
            "away_team" => ["Oregon"],
            "home_points" => [home],
            "away_points" => [away],
            "venue_id" => [0i64],
        )
        .unwrap();

        let features = build_features(&games, &elo_fixture()).unwrap();
        let label = features
            .column("home_win")
            .unwrap()
            .i32()
            .unwrap()
            .get(0)
            .unwrap();
        assert_eq!(label, expected);
    }

    #[test]
    fn test_differential_arithmetic() {
        let features = build_features(&games_fixture(), &elo_fixture()).unwrap();

        let home_elo: Vec<f64> = features
            .column("home_elo")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let away_elo: Vec<f64> = features
            .column("away_elo")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let elo_diff: Vec<f64> = features
            .column("elo_diff")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        for i in 0..features.height() {
            assert_eq!(elo_diff[i], home_elo[i] - away_elo[i]);
        }

        let score_diff: Vec<i32> = features
            .column("score_diff")
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(score_diff, vec![46, 0]);
    }

    #[test]
    fn test_neutral_site_sentinel() {
        let features = build_features(&games_fixture(), &elo_fixture()).unwrap();
        let neutral: Vec<i32> = features
            .column("is_neutral")
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        // Game 1 is at venue 0 (neutral), game 2 at a real venue
        assert_eq!(neutral, vec![1, 0]);
    }

    #[test]
    fn test_rows_with_missing_rating_are_dropped() {
        let features = build_features(&games_fixture(), &elo_fixture()).unwrap();
        // Rice has no Elo row, so game 4 must not survive
        assert_eq!(features.column("home_elo").unwrap().null_count(), 0);
        assert_eq!(features.column("away_elo").unwrap().null_count(), 0);
        assert_eq!(features.column("home_win").unwrap().null_count(), 0);
    }

    #[test]
    fn test_empty_elo_table_yields_empty_output() {
        let elo = df!(
            "team" => Vec::<String>::new(),
            "conference" => Vec::<String>::new(),
            "elo" => Vec::<f64>::new(),
            "year" => Vec::<i32>::new(),
        )
        .unwrap();

        let features = build_features(&games_fixture(), &elo).unwrap();
        assert_eq!(features.height(), 0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let games = games_fixture().drop("venue_id").unwrap();
        let result = build_features(&games, &elo_fixture());
        assert!(matches!(
            result,
            Err(FeatureError::MissingColumn { ref column, .. }) if column == "venue_id"
        ));
    }

    #[test]
    fn test_output_column_set() {
        let features = build_features(&games_fixture(), &elo_fixture()).unwrap();
        for column in [
            "id",
            "season",
            "week",
            "home_team",
            "away_team",
            "home_points",
            "away_points",
            "venue_id",
            "home_win",
            "home_elo",
            "away_elo",
            "elo_diff",
            "score_diff",
            "is_neutral",
        ] {
            assert!(features.column(column).is_ok(), "missing {}", column);
        }
        assert_eq!(features.width(), 14);
    }
}
