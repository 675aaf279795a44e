//! Shared types and planning core for the Supply Chain Planning Platform
//!
//! This crate contains the domain models, the planning calculation engine
//! and the input resolver, shared between the backend and the WASM bindings.

pub mod calculator;
pub mod engine;
pub mod error;
pub mod memory;
pub mod models;
pub mod resolver;
pub mod store;
pub mod types;
pub mod validation;

pub use calculator::PlanCalculator;
pub use error::{PlanningError, StoreError};
pub use memory::InMemoryPlanningStore;
pub use models::*;
pub use resolver::InputResolver;
pub use store::PlanningStore;
pub use types::*;
pub use validation::*;
