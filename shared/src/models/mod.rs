//! Domain models for the Supply Chain Planning Platform

mod calculation;
mod organization;
mod planning;

pub use calculation::*;
pub use organization::*;
pub use planning::*;
