//! Multi-factor product efficiency scoring.
//!
//! A product's efficiency score blends three sub-scores on a 0–100 scale:
//! profit margin, turnover rate and volume-normalized profit. Each sub-score
//! is clamped at the upper bound only; a loss-making product legitimately
//! drives a sub-score (and the final score) negative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Product;

/// Length of the turnover window in days. `30 / days_to_sell` yields the
/// number of turns per window.
pub const TURNOVER_WINDOW_DAYS: f64 = 30.0;

const MARGIN_SCALE: f64 = 2.0;
const TURNOVER_SCALE: f64 = 25.0;
const VOLUME_SCALE: f64 = 1000.0;
const SUB_SCORE_CEILING: f64 = 100.0;

/// Scoring failures for inputs that would otherwise divide by a non-positive
/// number and silently produce NaN or Infinity.
///
/// These are pure-computation failures: identical input fails identically, so
/// there is nothing to retry. Callers surface them per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreError {
    /// The bounding volume (`height × width × length`) is not positive.
    #[error("product bounding volume must be positive")]
    InvalidGeometry,
    /// `days_to_sell` is not positive, so no turnover rate can be derived.
    #[error("days_to_sell must be positive")]
    InvalidTurnover,
    /// `purchase_price` is not positive, so the margin is undefined.
    #[error("purchase_price must be positive")]
    InvalidPrice,
}

/// Weights for blending the three sub-scores into the final score.
///
/// The defaults reproduce the stock blend; overriding them changes how
/// products rank but not how the sub-scores themselves are computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringWeights {
    pub margin: f64,
    pub turnover: f64,
    pub volume: f64,
}

impl ScoringWeights {
    pub const DEFAULT_MARGIN: f64 = 0.4;
    pub const DEFAULT_TURNOVER: f64 = 0.3;
    pub const DEFAULT_VOLUME: f64 = 0.3;

    /// Creates a builder for custom weights.
    pub fn builder() -> ScoringWeightsBuilder {
        ScoringWeightsBuilder::default()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
            turnover: Self::DEFAULT_TURNOVER,
            volume: Self::DEFAULT_VOLUME,
        }
    }
}

/// Builder for [`ScoringWeights`].
#[derive(Clone, Debug, Default)]
pub struct ScoringWeightsBuilder {
    weights: ScoringWeights,
}

impl ScoringWeightsBuilder {
    /// Sets the profit-margin weight.
    pub fn margin(mut self, weight: f64) -> Self {
        self.weights.margin = weight;
        self
    }

    /// Sets the turnover-rate weight.
    pub fn turnover(mut self, weight: f64) -> Self {
        self.weights.turnover = weight;
        self
    }

    /// Sets the volume-efficiency weight.
    pub fn volume(mut self, weight: f64) -> Self {
        self.weights.volume = weight;
        self
    }

    /// Builds the final weights.
    pub fn build(self) -> ScoringWeights {
        self.weights
    }
}

/// The three sub-scores, rounded to the nearest integer for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub margin_score: i64,
    pub turnover_score: i64,
    pub volume_score: i64,
}

/// Efficiency score plus the financial figures it was derived from.
///
/// All figures are per unit; quantity is applied by the aggregator, not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i64,
    pub profit: f64,
    pub profit_margin_pct: f64,
    pub turnover_rate: f64,
    pub volume_efficiency: f64,
    pub volume: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores a product with the stock blend weights.
///
/// # Examples
/// ```
/// use stowplan::model::Product;
/// use stowplan::score::score;
///
/// let product = Product {
///     id: "p-1".into(),
///     name: "Desk lamp".into(),
///     height: 1.0,
///     width: 1.0,
///     length: 1.0,
///     weight: 1.0,
///     purchase_price: 100.0,
///     resale_price: 150.0,
///     days_to_sell: 10.0,
///     quantity: 1,
///     container_id: None,
/// };
/// let result = score(&product).unwrap();
/// assert_eq!(result.score, 93);
/// assert_eq!(result.profit, 50.0);
/// ```
pub fn score(product: &Product) -> Result<ScoreResult, ScoreError> {
    score_with_weights(product, &ScoringWeights::default())
}

/// Scores a product with explicit blend weights.
pub fn score_with_weights(
    product: &Product,
    weights: &ScoringWeights,
) -> Result<ScoreResult, ScoreError> {
    if product.purchase_price <= 0.0 {
        return Err(ScoreError::InvalidPrice);
    }
    if product.days_to_sell <= 0.0 {
        return Err(ScoreError::InvalidTurnover);
    }
    let volume = product.volume();
    if volume <= 0.0 {
        return Err(ScoreError::InvalidGeometry);
    }

    let profit = product.unit_profit();
    let profit_margin_pct = profit / product.purchase_price * 100.0;
    let turnover_rate = TURNOVER_WINDOW_DAYS / product.days_to_sell;
    let volume_efficiency = profit / volume;

    // Ceiling only; no floor clamp.
    let margin_score = (profit_margin_pct * MARGIN_SCALE).min(SUB_SCORE_CEILING);
    let turnover_score = (turnover_rate * TURNOVER_SCALE).min(SUB_SCORE_CEILING);
    let volume_score = (volume_efficiency * VOLUME_SCALE).min(SUB_SCORE_CEILING);

    // The blend consumes the unrounded sub-scores; the breakdown reports them
    // rounded.
    let blended = weights.margin * margin_score
        + weights.turnover * turnover_score
        + weights.volume * volume_score;

    Ok(ScoreResult {
        score: blended.round() as i64,
        profit,
        profit_margin_pct,
        turnover_rate,
        volume_efficiency,
        volume,
        breakdown: ScoreBreakdown {
            margin_score: margin_score.round() as i64,
            turnover_score: turnover_score.round() as i64,
            volume_score: volume_score.round() as i64,
        },
    })
}
