//! Prediction: persisted model + upcoming matchups → results table.

use crate::error::{ModelError, Result};
use crate::gbm::GradientBoostedRegressor;
use crate::train::design_matrix;
use gridiron_features::FEATURE_COLUMNS;
use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Baseline points each side starts from before the differential split.
///
/// Predicted totals always sum to twice this value.
pub const BASELINE_POINTS: f64 = 28.0;

/// One scored matchup.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Prediction {
    /// Home team name
    pub home_team: String,
    /// Away team name
    pub away_team: String,
    /// Elo rating differential fed to the model
    pub elo_diff: f64,
    /// Neutral-site indicator fed to the model
    pub is_neutral: i64,
    /// Predicted home-minus-away score differential
    pub pred_score_diff: f64,
    /// Predicted home points
    pub pred_home_points: f64,
    /// Predicted away points
    pub pred_away_points: f64,
    /// Predicted winner
    pub predicted_winner: String,
}

fn team_column<'a>(matchups: &'a DataFrame, column: &str) -> Result<&'a StringChunked> {
    let series = matchups
        .column(column)
        .map_err(|_| ModelError::MissingColumn {
            table: "matchups".to_string(),
            column: column.to_string(),
        })?;
    Ok(series.str()?)
}

/// Score every matchup row.
///
/// The matchups table must contain both team names and both feature
/// columns; a missing column is fatal for the whole run — there is no
/// per-row skip.
///
/// The winner comes from a strict `> 0` test on the predicted
/// differential, so an exactly-zero prediction resolves to the away team.
pub fn predict_matchups(
    model: &GradientBoostedRegressor,
    matchups: &DataFrame,
) -> Result<Vec<Prediction>> {
    let home_teams = team_column(matchups, "home_team")?;
    let away_teams = team_column(matchups, "away_team")?;
    let x = design_matrix(matchups, "matchups", &FEATURE_COLUMNS)?;
    let diffs = model.predict(&x);

    let mut predictions = Vec::with_capacity(matchups.height());
    for i in 0..matchups.height() {
        let home_team = home_teams
            .get(i)
            .ok_or_else(|| ModelError::NullValue {
                column: "home_team".to_string(),
                row: i,
            })?
            .to_string();
        let away_team = away_teams
            .get(i)
            .ok_or_else(|| ModelError::NullValue {
                column: "away_team".to_string(),
                row: i,
            })?
            .to_string();

        let diff = diffs[i];
        let predicted_winner = if diff > 0.0 {
            home_team.clone()
        } else {
            away_team.clone()
        };

        predictions.push(Prediction {
            home_team,
            away_team,
            elo_diff: x[[i, 0]],
            is_neutral: x[[i, 1]] as i64,
            pred_score_diff: diff,
            pred_home_points: BASELINE_POINTS + diff / 2.0,
            pred_away_points: BASELINE_POINTS - diff / 2.0,
            predicted_winner,
        });
    }

    Ok(predictions)
}

/// Write the full augmented prediction table as CSV.
pub fn write_predictions(predictions: &[Prediction], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for prediction in predictions {
        writer.serialize(prediction)?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the prediction summary table.
pub fn print_summary(predictions: &[Prediction]) {
    println!(
        "{:<22} {:<22} {:<22} {:>10} {:>10} {:>10}",
        "home_team", "away_team", "predicted_winner", "diff", "home_pts", "away_pts"
    );
    for p in predictions {
        println!(
            "{:<22} {:<22} {:<22} {:>10.1} {:>10.1} {:>10.1}",
            p.home_team,
            p.away_team,
            p.predicted_winner,
            p.pred_score_diff,
            p.pred_home_points,
            p.pred_away_points
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbm::GbmConfig;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rstest::rstest;

    /// A model fit on symmetric data so the sign of elo_diff drives the
    /// sign of the prediction, and a zero input predicts exactly zero.
    fn sign_model() -> GradientBoostedRegressor {
        let x = array![[300.0, 0.0], [-300.0, 0.0], [150.0, 0.0], [-150.0, 0.0]];
        let y = array![20.0, -20.0, 10.0, -10.0];
        GradientBoostedRegressor::fit(&x, &y, GbmConfig::default()).unwrap()
    }

    /// A model whose every prediction is exactly zero.
    fn zero_model() -> GradientBoostedRegressor {
        let x = array![[100.0, 0.0], [-100.0, 0.0]];
        let y = array![0.0, 0.0];
        GradientBoostedRegressor::fit(&x, &y, GbmConfig::default()).unwrap()
    }

    fn matchups(elo_diff: f64) -> DataFrame {
        df!(
            "home_team" => ["Washington"],
            "away_team" => ["Oregon"],
            "elo_diff" => [elo_diff],
            "is_neutral" => [0i32],
        )
        .unwrap()
    }

    #[rstest]
    #[case(300.0, "Washington")]
    #[case(-300.0, "Oregon")]
    fn test_winner_follows_sign(#[case] elo_diff: f64, #[case] expected: &str) {
        let predictions = predict_matchups(&sign_model(), &matchups(elo_diff)).unwrap();
        assert_eq!(predictions[0].predicted_winner, expected);
    }

    #[test]
    fn test_zero_differential_resolves_to_away_team() {
        let predictions = predict_matchups(&zero_model(), &matchups(50.0)).unwrap();
        assert_eq!(predictions[0].pred_score_diff, 0.0);
        assert_eq!(predictions[0].predicted_winner, "Oregon");
    }

    #[test]
    fn test_predicted_points_sum_to_double_baseline() {
        let predictions = predict_matchups(&sign_model(), &matchups(300.0)).unwrap();
        let p = &predictions[0];
        assert_abs_diff_eq!(
            p.pred_home_points + p.pred_away_points,
            2.0 * BASELINE_POINTS,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            p.pred_home_points - p.pred_away_points,
            p.pred_score_diff,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_missing_feature_column_is_fatal() {
        let bad = matchups(100.0).drop("is_neutral").unwrap();
        let result = predict_matchups(&sign_model(), &bad);
        assert!(matches!(
            result,
            Err(ModelError::MissingColumn { ref column, .. }) if column == "is_neutral"
        ));
    }

    #[test]
    fn test_missing_team_column_is_fatal() {
        let bad = matchups(100.0).drop("away_team").unwrap();
        let result = predict_matchups(&sign_model(), &bad);
        assert!(matches!(
            result,
            Err(ModelError::MissingColumn { ref column, .. }) if column == "away_team"
        ));
    }

    #[test]
    fn test_write_predictions_emits_header_and_rows() {
        let predictions = predict_matchups(&sign_model(), &matchups(150.0)).unwrap();

        let dir = std::env::temp_dir().join("gridiron_predict_test");
        let path = dir.join("predictions.csv");
        write_predictions(&predictions, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "home_team,away_team,elo_diff,is_neutral,pred_score_diff,pred_home_points,pred_away_points,predicted_winner"
        );
        assert!(lines.next().unwrap().starts_with("Washington,Oregon,"));

        fs::remove_dir_all(dir).ok();
    }
}
