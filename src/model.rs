//! Snapshot entities for the scoring and assignment engine.
//!
//! This module defines the plain records the engine consumes:
//! - `Product`: a candidate item with dimensions, prices and sell-through time
//! - `Container`: a shipping container with a bounding volume and weight limit
//! - `Shipment`: the owning aggregate of both collections
//!
//! Entities arrive as snapshots from the persistence collaborator and are never
//! mutated by the engine. Everything derived from them (volume, profit, scores,
//! utilization) is recomputed on every call, so results can never go stale.

use serde::{Deserialize, Serialize};

use crate::metrics::{ShipmentMetrics, aggregate};
use crate::planner::{AssignmentRecord, plan};

fn default_quantity() -> u32 {
    1
}

/// A product candidate for shipping.
///
/// Dimensions share one length unit and define a rectangular bounding volume;
/// `purchase_price` and `resale_price` share one currency. `container_id` is
/// `None` while the product is unassigned. A snapshot without a `quantity`
/// field deserializes with a quantity of 1.
///
/// # Examples
/// ```
/// use stowplan::model::Product;
///
/// let snapshot = r#"{
///     "id": "p-1", "name": "Lamp",
///     "height": 2.0, "width": 2.0, "length": 2.0, "weight": 1.5,
///     "purchase_price": 40.0, "resale_price": 60.0, "days_to_sell": 12.0
/// }"#;
/// let product: Product = serde_json::from_str(snapshot).unwrap();
/// assert_eq!(product.quantity, 1);
/// assert_eq!(product.volume(), 8.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub weight: f64,
    pub purchase_price: f64,
    pub resale_price: f64,
    pub days_to_sell: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub container_id: Option<String>,
}

impl Product {
    /// Bounding volume of one unit. Always derived, never stored.
    pub fn volume(&self) -> f64 {
        self.height * self.width * self.length
    }

    /// Profit of one unit, before quantity is applied.
    pub fn unit_profit(&self) -> f64 {
        self.resale_price - self.purchase_price
    }

    pub(crate) fn quantity_f64(&self) -> f64 {
        f64::from(self.quantity)
    }

    /// Volume across all units.
    pub fn total_volume(&self) -> f64 {
        self.volume() * self.quantity_f64()
    }

    /// Mass across all units.
    pub fn total_weight(&self) -> f64 {
        self.weight * self.quantity_f64()
    }

    /// Resale value across all units.
    pub fn total_value(&self) -> f64 {
        self.resale_price * self.quantity_f64()
    }

    /// Profit across all units.
    pub fn total_profit(&self) -> f64 {
        self.unit_profit() * self.quantity_f64()
    }

    /// Whether the persisted assignment points at the given container.
    pub fn is_assigned_to(&self, container_id: &str) -> bool {
        self.container_id.as_deref() == Some(container_id)
    }

    /// Whether the product has no persisted assignment at all.
    ///
    /// A dangling `container_id` (referencing a container that no longer
    /// exists) does not count as unassigned here; resolving dangling
    /// references needs the container list and is the aggregator's job.
    pub fn is_unassigned(&self) -> bool {
        self.container_id.is_none()
    }
}

/// A shipping container with a bounding volume and an aggregate weight limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub weight_limit: f64,
}

impl Container {
    /// Bounding volume of the container.
    pub fn volume(&self) -> f64 {
        self.height * self.width * self.length
    }
}

/// A shipment owning ordered product and container collections.
///
/// Collection order is display-relevant and serves as the tie-break baseline
/// for the planner's stable sorts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Shipment {
    /// Shipment-level metrics over the owned collections.
    pub fn metrics(&self) -> ShipmentMetrics {
        aggregate(&self.containers, &self.products)
    }

    /// Assignment proposals for the owned collections.
    pub fn plan(&self) -> Vec<AssignmentRecord> {
        plan(&self.containers, &self.products)
    }
}
