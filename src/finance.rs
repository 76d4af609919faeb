//! Auxiliary financial formulas.
//!
//! Single-purpose derived calculations over the same snapshot entities the
//! scorer consumes. None of these participate in the core scoring, planning
//! or aggregation contracts; they exist for advisory display.

use crate::model::{Container, Product};
use crate::score::{ScoreError, TURNOVER_WINDOW_DAYS};

/// Return on investment: unit profit over unit cost, as a percentage.
pub fn roi_pct(product: &Product) -> Result<f64, ScoreError> {
    if product.purchase_price <= 0.0 {
        return Err(ScoreError::InvalidPrice);
    }
    Ok(product.unit_profit() / product.purchase_price * 100.0)
}

/// Units that must sell to cover a fixed cost, rounded up.
///
/// `None` when the unit profit is not positive — no number of sales breaks
/// even on a loss-maker.
pub fn break_even_units(product: &Product, fixed_costs: f64) -> Option<f64> {
    let unit_profit = product.unit_profit();
    if unit_profit <= 0.0 {
        return None;
    }
    Some((fixed_costs / unit_profit).ceil())
}

/// Quantity-weighted mean turnover rate across products.
///
/// Products without a positive `days_to_sell` are left out of the mean;
/// 0 when nothing qualifies.
pub fn weighted_turnover_rate(products: &[Product]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut units = 0.0;
    for product in products.iter().filter(|p| p.days_to_sell > 0.0) {
        weighted_sum += TURNOVER_WINDOW_DAYS / product.days_to_sell * product.quantity_f64();
        units += product.quantity_f64();
    }
    if units > 0.0 { weighted_sum / units } else { 0.0 }
}

/// Units expected to move within one turnover window.
pub fn inventory_velocity(product: &Product) -> Result<f64, ScoreError> {
    if product.days_to_sell <= 0.0 {
        return Err(ScoreError::InvalidTurnover);
    }
    Ok(product.quantity_f64() * TURNOVER_WINDOW_DAYS / product.days_to_sell)
}

/// Share of a container's volume the product's units would occupy.
///
/// `None` when the container volume is not positive.
pub fn space_efficiency_ratio(product: &Product, container: &Container) -> Option<f64> {
    let container_volume = container.volume();
    if container_volume <= 0.0 {
        return None;
    }
    Some(product.total_volume() / container_volume)
}

/// Unit profit per unit of weight. `None` when the weight is not positive.
pub fn profit_density(product: &Product) -> Option<f64> {
    if product.weight <= 0.0 {
        return None;
    }
    Some(product.unit_profit() / product.weight)
}
