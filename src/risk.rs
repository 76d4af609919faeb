//! Advisory risk classification for products.
//!
//! A qualitative overlay on top of the efficiency score, meant for display
//! next to it. Four independent risk factors contribute fixed point values;
//! the total maps onto a three-level classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Product;
use crate::score::{ScoreError, score};

const SLOW_TURNOVER_DAYS: f64 = 30.0;
const LOW_MARGIN_PCT: f64 = 20.0;
const HIGH_INVESTMENT_PRICE: f64 = 1000.0;
const LOW_EFFICIENCY_SCORE: i64 = 40;

const SLOW_TURNOVER_POINTS: u32 = 30;
const LOW_MARGIN_POINTS: u32 = 25;
const HIGH_INVESTMENT_POINTS: u32 = 20;
const LOW_EFFICIENCY_POINTS: u32 = 25;

const HIGH_THRESHOLD: u32 = 70;
const MEDIUM_THRESHOLD: u32 = 40;

/// Qualitative risk level derived from the accumulated risk points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// The individual conditions that contributed risk points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub slow_turnover: bool,
    pub low_margin: bool,
    pub high_investment: bool,
    pub low_efficiency: bool,
}

/// Risk classification for one product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub level: RiskLevel,
    pub risk_score: u32,
    pub factors: RiskFactors,
}

/// Classifies a product's risk.
///
/// Builds on [`score`], so the same inputs that fail scoring fail here.
pub fn assess(product: &Product) -> Result<RiskResult, ScoreError> {
    let scored = score(product)?;

    let factors = RiskFactors {
        slow_turnover: product.days_to_sell > SLOW_TURNOVER_DAYS,
        low_margin: scored.profit_margin_pct < LOW_MARGIN_PCT,
        high_investment: product.purchase_price > HIGH_INVESTMENT_PRICE,
        low_efficiency: scored.score < LOW_EFFICIENCY_SCORE,
    };

    let mut risk_score = 0;
    if factors.slow_turnover {
        risk_score += SLOW_TURNOVER_POINTS;
    }
    if factors.low_margin {
        risk_score += LOW_MARGIN_POINTS;
    }
    if factors.high_investment {
        risk_score += HIGH_INVESTMENT_POINTS;
    }
    if factors.low_efficiency {
        risk_score += LOW_EFFICIENCY_POINTS;
    }

    let level = if risk_score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if risk_score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Ok(RiskResult {
        level,
        risk_score,
        factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "test product".to_string(),
            height: 1.0,
            width: 1.0,
            length: 1.0,
            weight: 1.0,
            purchase_price: 100.0,
            resale_price: 150.0,
            days_to_sell: 10.0,
            quantity: 1,
            container_id: None,
        }
    }

    #[test]
    fn healthy_product_is_low_risk() {
        // Fast turnover, 50% margin, cheap, score 93.
        let result = assess(&product()).unwrap();
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.level, RiskLevel::Low);
        assert!(!result.factors.slow_turnover);
        assert!(!result.factors.low_margin);
        assert!(!result.factors.high_investment);
        assert!(!result.factors.low_efficiency);
    }

    #[test]
    fn all_factors_accumulate_to_high_risk() {
        let mut p = product();
        p.purchase_price = 1500.0;
        p.resale_price = 1600.0; // margin ~6.7%
        p.days_to_sell = 40.0;
        p.height = 100.0;
        p.width = 10.0;
        p.length = 10.0; // volume 10000, volume score 10

        let result = assess(&p).unwrap();
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.level, RiskLevel::High);
        assert!(result.factors.slow_turnover);
        assert!(result.factors.low_margin);
        assert!(result.factors.high_investment);
        assert!(result.factors.low_efficiency);
    }

    #[test]
    fn two_mild_factors_land_in_medium() {
        let mut p = product();
        p.purchase_price = 2000.0;
        p.resale_price = 3000.0; // 50% margin, no low-margin flag
        p.days_to_sell = 31.0; // just over the turnover boundary

        let result = assess(&p).unwrap();
        // slow turnover (30) + high investment (20)
        assert_eq!(result.risk_score, 50);
        assert_eq!(result.level, RiskLevel::Medium);
        assert!(!result.factors.low_efficiency);
    }

    #[test]
    fn boundary_days_to_sell_is_not_slow() {
        let mut p = product();
        p.days_to_sell = 30.0; // strictly greater required
        let result = assess(&p).unwrap();
        assert!(!result.factors.slow_turnover);
    }

    #[test]
    fn scoring_failures_propagate() {
        let mut p = product();
        p.days_to_sell = 0.0;
        assert_eq!(assess(&p), Err(ScoreError::InvalidTurnover));
    }

    #[test]
    fn level_displays_lowercase() {
        assert_eq!(RiskLevel::High.to_string(), "high");
        assert_eq!(
            serde_json::to_value(RiskLevel::Medium).unwrap(),
            serde_json::json!("medium")
        );
    }
}
