//! Business logic services for the Supply Chain Planning Platform

pub mod common;
pub mod material;
pub mod plan;
pub mod raw_material;
pub mod regulation;
pub mod subdivision;
pub mod supply_source;
pub mod technological_card;
pub mod transfer;

pub use material::MaterialService;
pub use plan::PlanService;
pub use raw_material::{Movement, RawMaterialService};
pub use regulation::RegulationService;
pub use subdivision::SubdivisionService;
pub use supply_source::SupplySourceService;
pub use technological_card::TechnologicalCardService;
pub use transfer::TransferPlanService;
