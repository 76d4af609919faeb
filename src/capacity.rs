//! Per-container capacity utilization.
//!
//! Usage and capacity statistics for one container against the full product
//! list of its shipment. Misconfigured capacity (a non-positive volume or
//! weight limit) is a data-quality concern the display layer should show as
//! "over capacity", so this module clamps instead of failing.

use serde::{Deserialize, Serialize};

use crate::model::{Container, Product};

/// Usage and capacity statistics for one container.
///
/// `remaining_volume` and `remaining_weight` go negative when the container is
/// overpacked; callers rely on the sign, so they are never clamped to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilizationResult {
    pub container_volume: f64,
    pub used_volume: f64,
    pub used_weight: f64,
    pub volume_utilization_pct: i64,
    pub weight_utilization_pct: i64,
    pub total_value: f64,
    pub total_profit: f64,
    pub product_count: usize,
    pub remaining_volume: f64,
    pub remaining_weight: f64,
    pub is_overweight: bool,
    pub is_overvolume: bool,
}

/// Computes usage and capacity statistics for a container.
///
/// Products count toward a container when their persisted `container_id`
/// matches; a dangling reference matches no container and therefore counts
/// nowhere. Per-unit figures are multiplied by quantity.
pub fn utilization(container: &Container, products: &[Product]) -> UtilizationResult {
    let container_volume = container.volume();

    let mut used_volume = 0.0;
    let mut used_weight = 0.0;
    let mut total_value = 0.0;
    let mut total_profit = 0.0;
    let mut product_count = 0;

    for product in products.iter().filter(|p| p.is_assigned_to(&container.id)) {
        used_volume += product.total_volume();
        used_weight += product.total_weight();
        total_value += product.total_value();
        total_profit += product.total_profit();
        product_count += 1;
    }

    UtilizationResult {
        container_volume,
        used_volume,
        used_weight,
        volume_utilization_pct: utilization_pct(used_volume, container_volume),
        weight_utilization_pct: utilization_pct(used_weight, container.weight_limit),
        total_value,
        total_profit,
        product_count,
        remaining_volume: container_volume - used_volume,
        remaining_weight: container.weight_limit - used_weight,
        // One comparison covers both the regular over-capacity case and any
        // usage against a non-positive capacity.
        is_overweight: used_weight > container.weight_limit,
        is_overvolume: used_volume > container_volume,
    }
}

/// Used capacity as a rounded percentage of total capacity.
///
/// A non-positive capacity is treated as exhausted rather than divided by:
/// 100 if anything uses it, else 0.
fn utilization_pct(used: f64, capacity: f64) -> i64 {
    if capacity <= 0.0 {
        if used > 0.0 { 100 } else { 0 }
    } else {
        (used / capacity * 100.0).round() as i64
    }
}
