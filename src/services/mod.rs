//! Service layer for the meal planner
//!
//! Two kinds of services live here. The engines (demand aggregation,
//! grocery list generation and pantry reconciliation) do no I/O of their own
//! and reach persistence through the `MealPlanSource` and `PantryStore`
//! traits. The storage-backed services wrap them with validation, audit
//! logging and the cross-entity rules the CLI needs.

pub mod demand;
pub mod dish;
pub mod grocery;
pub mod pantry;
pub mod plan;
pub mod reconcile;
pub mod shopping;

pub use demand::{Aggregation, DemandAggregator, IngredientDemand, MealPlanSource};
pub use dish::DishService;
pub use grocery::GroceryListGenerator;
pub use pantry::PantryService;
pub use plan::{CompletionOutcome, PlanService};
pub use reconcile::{
    plan_pantry_mutations, MutationPlan, PantryMutation, PantryStore, PantryUpdateReport,
    PantryUpdater, StockDirection,
};
pub use shopping::{CommitOutcome, GenerateOutcome, GroceryService};
