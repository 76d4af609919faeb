//! Greedy best-fit assignment of unassigned products to containers.
//!
//! A single deterministic pass, not a globally optimal packing: products are
//! ranked best-score-first, containers are tried nearly-full-first, and the
//! first container satisfying both the volume and weight constraint wins.
//! The container order is fixed once from the persisted assignment state and
//! is never re-sorted while the pass consumes capacity.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::capacity::utilization;
use crate::model::{Container, Product};
use crate::score::score;

/// Why a product was proposed for a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentReason {
    OptimalFit,
}

impl AssignmentReason {
    pub fn code(&self) -> &'static str {
        match self {
            AssignmentReason::OptimalFit => "optimal_fit",
        }
    }
}

impl fmt::Display for AssignmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A proposed assignment. Applying it is the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub product_id: String,
    pub container_id: String,
    pub reason: AssignmentReason,
}

/// Working copy of a container's spare capacity, consumed during one pass.
struct RemainingCapacity {
    volume: f64,
    weight: f64,
}

/// Proposes container assignments for the currently-unassigned products.
///
/// Candidates are the products whose `container_id` is `None`; a dangling
/// reference is nominally assigned and therefore not a candidate. Candidates
/// are stable-sorted descending by efficiency score (a candidate that fails
/// to score stays unassigned), containers are stable-sorted ascending by
/// remaining volume, and each product takes the first container whose
/// remaining capacity covers one unit of volume and the full quantity of
/// weight. Deductions happen on a local ledger keyed by container id; the
/// caller's records are never mutated. A product no container fits is simply
/// left out of the result.
pub fn plan(containers: &[Container], products: &[Product]) -> Vec<AssignmentRecord> {
    // Rank candidates best score first; equal scores keep snapshot order.
    let mut candidates: Vec<(&Product, i64)> = Vec::new();
    for product in products.iter().filter(|p| p.is_unassigned()) {
        match score(product) {
            Ok(result) => candidates.push((product, result.score)),
            Err(error) => {
                warn!(product_id = %product.id, %error, "unscorable product left unassigned");
            }
        }
    }
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    // Capacity ledger from the persisted assignment state. The scan order is
    // fixed here: smallest remaining volume first, ties keep snapshot order,
    // and deductions below never re-sort it.
    let mut ledger: HashMap<&str, RemainingCapacity> = HashMap::with_capacity(containers.len());
    let mut scan_order: Vec<&str> = Vec::with_capacity(containers.len());
    for container in containers {
        let snapshot = utilization(container, products);
        ledger.insert(
            container.id.as_str(),
            RemainingCapacity {
                volume: snapshot.remaining_volume,
                weight: snapshot.remaining_weight,
            },
        );
        scan_order.push(container.id.as_str());
    }
    scan_order.sort_by(|a, b| {
        ledger[a]
            .volume
            .partial_cmp(&ledger[b].volume)
            .unwrap_or(Ordering::Equal)
    });

    let mut records = Vec::new();
    for (product, product_score) in candidates {
        let needed_volume = product.volume();
        let needed_weight = product.weight * product.quantity_f64();

        let target = scan_order.iter().copied().find(|id| {
            let remaining = &ledger[id];
            remaining.volume >= needed_volume && remaining.weight >= needed_weight
        });

        match target {
            Some(container_id) => {
                if let Some(remaining) = ledger.get_mut(container_id) {
                    remaining.volume -= needed_volume;
                    remaining.weight -= needed_weight;
                }
                debug!(
                    product_id = %product.id,
                    container_id,
                    score = product_score,
                    "proposed assignment"
                );
                records.push(AssignmentRecord {
                    product_id: product.id.clone(),
                    container_id: container_id.to_string(),
                    reason: AssignmentReason::OptimalFit,
                });
            }
            None => {
                // Expected outcome, not an error: the product stays unassigned.
                debug!(product_id = %product.id, score = product_score, "no container fits");
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, volume_side: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("product {id}"),
            height: volume_side,
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

    fn container(id: &str, volume_height: f64, weight_limit: f64) -> Container {
        Container {
            id: id.to_string(),
            name: format!("container {id}"),
            height: volume_height,
            width: 1.0,
            length: 1.0,
            weight_limit,
        }
    }

    /// High-scoring reference product (score 93) with a chosen volume.
    fn strong_product(id: &str, volume_side: f64) -> Product {
        product(id, volume_side)
    }

    /// Lower-scoring product (score 46) with a chosen volume.
    fn weak_product(id: &str, volume_side: f64) -> Product {
        let mut p = product(id, volume_side);
        p.resale_price = 110.0; // margin score 20
        p.days_to_sell = 30.0; // turnover score 25
        p.weight = 1.0;
        p
    }

    #[test]
    fn assigns_best_scores_first_into_tightest_fit() {
        // Small container (volume 5) sorts first; only the large one (50)
        // fits either product.
        let containers = vec![container("c-large", 50.0, 100.0), container("c-small", 5.0, 100.0)];
        let products = vec![weak_product("p-weak", 25.0), strong_product("p-strong", 20.0)];

        let records = plan(&containers, &products);

        // The strong product is handled first even though it came second.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_id, "p-strong");
        assert_eq!(records[0].container_id, "c-large");
        assert_eq!(records[1].product_id, "p-weak");
        assert_eq!(records[1].container_id, "c-large");
        assert_eq!(records[0].reason, AssignmentReason::OptimalFit);
    }

    #[test]
    fn second_product_misses_when_first_deduction_exhausts_capacity() {
        let containers = vec![container("c-large", 50.0, 100.0), container("c-small", 5.0, 100.0)];
        // After the strong product takes 20, only 30 remains; 35 no longer fits.
        let products = vec![weak_product("p-weak", 35.0), strong_product("p-strong", 20.0)];

        let records = plan(&containers, &products);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, "p-strong");
    }

    #[test]
    fn weight_constraint_covers_full_quantity() {
        let containers = vec![container("c-1", 100.0, 10.0)];
        let mut heavy = strong_product("p-1", 1.0);
        heavy.weight = 4.0;
        heavy.quantity = 3; // 12 total, over the 10 limit

        assert!(plan(&containers, &[heavy.clone()]).is_empty());

        heavy.quantity = 2; // 8 total fits
        let records = plan(&containers, &[heavy]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn volume_constraint_uses_one_unit() {
        // Volume is checked and deducted per unit even when quantity > 1.
        let containers = vec![container("c-1", 10.0, 100.0)];
        let mut stacked = strong_product("p-1", 8.0);
        stacked.quantity = 5;

        let records = plan(&containers, &[stacked]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].container_id, "c-1");
    }

    #[test]
    fn equal_scores_keep_snapshot_order() {
        let containers = vec![container("c-1", 10.0, 100.0)];
        // Identical products, identical scores; only one fits.
        let products = vec![strong_product("p-first", 6.0), strong_product("p-second", 6.0)];

        let records = plan(&containers, &products);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, "p-first");
    }

    #[test]
    fn equal_remaining_volumes_keep_container_order() {
        let containers = vec![container("c-a", 10.0, 100.0), container("c-b", 10.0, 100.0)];
        let records = plan(&containers, &[strong_product("p-1", 5.0)]);
        assert_eq!(records[0].container_id, "c-a");
    }

    #[test]
    fn persisted_assignments_reduce_planning_capacity() {
        let containers = vec![container("c-1", 10.0, 100.0)];
        let mut occupant = strong_product("p-occupant", 7.0);
        occupant.container_id = Some("c-1".to_string());
        let newcomer = strong_product("p-new", 5.0);

        // Only 3 volume remains, so the newcomer stays unassigned.
        assert!(plan(&containers, &[occupant, newcomer]).is_empty());
    }

    #[test]
    fn dangling_reference_is_not_a_candidate() {
        let containers = vec![container("c-1", 100.0, 100.0)];
        let mut dangling = strong_product("p-1", 1.0);
        dangling.container_id = Some("c-gone".to_string());

        assert!(plan(&containers, &[dangling]).is_empty());
    }

    #[test]
    fn unscorable_product_is_skipped_not_fatal() {
        let containers = vec![container("c-1", 100.0, 100.0)];
        let mut broken = strong_product("p-bad", 1.0);
        broken.purchase_price = 0.0;
        let fine = strong_product("p-ok", 1.0);

        let records = plan(&containers, &[broken, fine]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, "p-ok");
    }

    #[test]
    fn ledger_never_goes_negative_at_assignment_time() {
        let containers = vec![
            container("c-a", 12.0, 6.0),
            container("c-b", 30.0, 15.0),
        ];
        let products: Vec<Product> = (0..8)
            .map(|i| {
                let mut p = strong_product(&format!("p-{i}"), 4.0 + i as f64);
                p.weight = 2.0;
                p
            })
            .collect();

        let records = plan(&containers, &products);

        // Replay the deductions and assert capacity was honored throughout.
        let mut remaining: HashMap<&str, (f64, f64)> = containers
            .iter()
            .map(|c| (c.id.as_str(), (c.volume(), c.weight_limit)))
            .collect();
        for record in &records {
            let p = products
                .iter()
                .find(|p| p.id == record.product_id)
                .unwrap();
            let slot = remaining.get_mut(record.container_id.as_str()).unwrap();
            assert!(slot.0 >= p.volume(), "volume overdraft for {}", p.id);
            assert!(slot.1 >= p.total_weight(), "weight overdraft for {}", p.id);
            slot.0 -= p.volume();
            slot.1 -= p.total_weight();
        }
    }

    #[test]
    fn planning_never_mutates_inputs() {
        let containers = vec![container("c-1", 50.0, 100.0)];
        let products = vec![strong_product("p-1", 5.0)];
        let containers_before = containers.clone();
        let products_before = products.clone();

        let _ = plan(&containers, &products);

        assert_eq!(containers, containers_before);
        assert_eq!(products, products_before);
    }

    #[test]
    fn reason_serializes_as_optimal_fit() {
        let record = AssignmentRecord {
            product_id: "p-1".to_string(),
            container_id: "c-1".to_string(),
            reason: AssignmentReason::OptimalFit,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["reason"], "optimal_fit");
        assert_eq!(AssignmentReason::OptimalFit.code(), "optimal_fit");
    }
}
