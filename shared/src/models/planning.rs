//! Planning facts and stock-cover regulations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PlanningMonth;

/// Kind of monthly planning figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    SalesPlan,
    InventoryPlan,
    ProductionPlan,
    /// Keyed by the source subdivision in `get_fact`; destination lookups
    /// return the fact with `subdivision_id` set to the destination
    TransferPlan,
}

impl FactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactKind::SalesPlan => "sales_plan",
            FactKind::InventoryPlan => "inventory_plan",
            FactKind::ProductionPlan => "production_plan",
            FactKind::TransferPlan => "transfer_plan",
        }
    }
}

impl std::fmt::Display for FactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactKind::SalesPlan => write!(f, "Sales plan"),
            FactKind::InventoryPlan => write!(f, "Inventory plan"),
            FactKind::ProductionPlan => write!(f, "Production plan"),
            FactKind::TransferPlan => write!(f, "Transfer plan"),
        }
    }
}

/// One planning figure for a subdivision, material and month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningFact {
    pub kind: FactKind,
    pub subdivision_id: i32,
    pub material_id: i32,
    pub date: NaiveDate,
    pub quantity: i32,
}

impl PlanningFact {
    pub fn month(&self) -> PlanningMonth {
        PlanningMonth::of(self.date)
    }
}

/// Target stock cover, in days of sales, for a subdivision/material pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub subdivision_id: i32,
    pub material_id: i32,
    pub days_count: i32,
}
