//! HTTP handlers for the Supply Chain Planning Platform

pub mod calculation;
pub mod health;
pub mod material;
pub mod plan;
pub mod raw_material;
pub mod regulation;
pub mod subdivision;
pub mod supply_source;
pub mod technological_card;
pub mod transfer;

pub use calculation::*;
pub use health::*;
pub use material::*;
pub use plan::*;
pub use raw_material::*;
pub use regulation::*;
pub use subdivision::*;
pub use supply_source::*;
pub use technological_card::*;
pub use transfer::*;
