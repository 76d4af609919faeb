//! Shipment-level aggregation of scores and utilization.
//!
//! One pass over the products rolls the per-entity figures into summary
//! metrics for display. A scoring failure for one product never aborts the
//! rest of the shipment: the failure is recorded next to the metrics and the
//! pass continues.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::capacity::{UtilizationResult, utilization};
use crate::model::{Container, Product};
use crate::score::{ScoreError, score};

/// A product whose scoring failed during aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreFailure {
    pub product_id: String,
    pub error: ScoreError,
}

/// Summary metrics for one shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentMetrics {
    pub total_profit: f64,
    pub total_value: f64,
    pub total_volume: f64,
    pub total_weight: f64,
    pub total_product_units: u64,
    pub total_containers: usize,
    pub average_score: i64,
    pub overall_volume_utilization_pct: i64,
    pub overall_weight_utilization_pct: i64,
    pub profit_margin_pct: f64,
    pub container_metrics: Vec<UtilizationResult>,
    pub unassigned_count: usize,
    pub score_errors: Vec<ScoreFailure>,
}

/// Aggregates scores and utilization across a shipment's snapshot.
///
/// Raw totals (profit, value, volume, weight, unit count) cover every
/// product. Products that fail to score are excluded from the quantity-
/// weighted average score and listed in `score_errors` instead. A product
/// whose `container_id` references no container in the list counts as
/// unassigned.
pub fn aggregate(containers: &[Container], products: &[Product]) -> ShipmentMetrics {
    let known_ids: HashSet<&str> = containers.iter().map(|c| c.id.as_str()).collect();

    let mut total_profit = 0.0;
    let mut total_value = 0.0;
    let mut total_volume = 0.0;
    let mut total_weight = 0.0;
    let mut total_product_units: u64 = 0;
    let mut score_weighted_sum = 0.0;
    let mut scored_units: u64 = 0;
    let mut unassigned_count = 0;
    let mut score_errors = Vec::new();

    for product in products {
        let units = u64::from(product.quantity);
        total_product_units += units;
        total_profit += product.total_profit();
        total_value += product.total_value();
        total_volume += product.total_volume();
        total_weight += product.total_weight();

        match product.container_id.as_deref() {
            Some(id) if known_ids.contains(id) => {}
            _ => unassigned_count += 1,
        }

        match score(product) {
            Ok(result) => {
                score_weighted_sum += result.score as f64 * product.quantity_f64();
                scored_units += units;
            }
            Err(error) => {
                warn!(product_id = %product.id, %error, "product skipped in score average");
                score_errors.push(ScoreFailure {
                    product_id: product.id.clone(),
                    error,
                });
            }
        }
    }

    let average_score = if scored_units > 0 {
        (score_weighted_sum / scored_units as f64).round() as i64
    } else {
        0
    };

    let container_metrics: Vec<UtilizationResult> = containers
        .iter()
        .map(|container| utilization(container, products))
        .collect();
    let total_container_volume: f64 = containers.iter().map(Container::volume).sum();
    let total_container_weight_capacity: f64 =
        containers.iter().map(|c| c.weight_limit).sum();

    // Markup-style margin: profit over cost basis, not over resale value.
    let cost_basis = total_value - total_profit;
    let profit_margin_pct = if cost_basis != 0.0 {
        total_profit / cost_basis * 100.0
    } else {
        0.0
    };

    ShipmentMetrics {
        total_profit,
        total_value,
        total_volume,
        total_weight,
        total_product_units,
        total_containers: containers.len(),
        average_score,
        overall_volume_utilization_pct: overall_pct(total_volume, total_container_volume),
        overall_weight_utilization_pct: overall_pct(total_weight, total_container_weight_capacity),
        profit_margin_pct,
        container_metrics,
        unassigned_count,
        score_errors,
    }
}

fn overall_pct(used: f64, capacity: f64) -> i64 {
    if capacity > 0.0 {
        (used / capacity * 100.0).round() as i64
    } else {
        0
    }
}
