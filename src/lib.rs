//! Scoring and container-assignment engine for shipment planning.
//!
//! Given in-memory snapshots of products and shipping containers, the engine
//! answers how profitable and well-packed a shipment is and which unassigned
//! products should go into which containers:
//!
//! - [`score::score`] — multi-factor product efficiency score
//! - [`capacity::utilization`] — per-container usage and capacity statistics
//! - [`metrics::aggregate`] — shipment-level summary metrics
//! - [`planner::plan`] — greedy best-fit assignment proposals
//! - [`risk::assess`] — advisory risk classification
//!
//! Every function is pure and recomputes from the snapshot it is handed; the
//! engine holds no state, performs no I/O and never mutates its inputs, so
//! independent calls may run concurrently without synchronization. Applying
//! the returned [`planner::AssignmentRecord`]s to storage is the caller's
//! responsibility.
//!
//! # Examples
//! ```
//! use stowplan::{Container, Product, plan, utilization};
//!
//! let container = Container {
//!     id: "c-1".into(),
//!     name: "Pallet box".into(),
//!     height: 10.0,
//!     width: 10.0,
//!     length: 10.0,
//!     weight_limit: 50.0,
//! };
//! let product = Product {
//!     id: "p-1".into(),
//!     name: "Desk lamp".into(),
//!     height: 2.0,
//!     width: 2.0,
//!     length: 2.0,
//!     weight: 1.0,
//!     purchase_price: 100.0,
//!     resale_price: 150.0,
//!     days_to_sell: 10.0,
//!     quantity: 1,
//!     container_id: None,
//! };
//!
//! let proposals = plan(&[container.clone()], &[product.clone()]);
//! assert_eq!(proposals[0].container_id, "c-1");
//!
//! // Utilization reflects only persisted assignments, not proposals.
//! let usage = utilization(&container, &[product]);
//! assert_eq!(usage.product_count, 0);
//! ```

pub mod capacity;
pub mod config;
pub mod finance;
pub mod metrics;
pub mod model;
pub mod planner;
pub mod risk;
pub mod score;

pub use capacity::{UtilizationResult, utilization};
pub use config::EngineConfig;
pub use metrics::{ScoreFailure, ShipmentMetrics, aggregate};
pub use model::{Container, Product, Shipment};
pub use planner::{AssignmentReason, AssignmentRecord, plan};
pub use risk::{RiskFactors, RiskLevel, RiskResult, assess};
pub use score::{
    ScoreBreakdown, ScoreError, ScoreResult, ScoringWeights, score, score_with_weights,
};
