//! Calculation requests and results

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::ParseEnumError;

/// The four derived plans the engine can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationKind {
    Inventory,
    Production,
    Transfer,
    RawMaterial,
}

impl CalculationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::Inventory => "inventory",
            CalculationKind::Production => "production",
            CalculationKind::Transfer => "transfer",
            CalculationKind::RawMaterial => "raw-material",
        }
    }
}

impl std::fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inventory" => Ok(CalculationKind::Inventory),
            "production" => Ok(CalculationKind::Production),
            "transfer" => Ok(CalculationKind::Transfer),
            "raw-material" => Ok(CalculationKind::RawMaterial),
            other => Err(ParseEnumError::new("calculation kind", other)),
        }
    }
}

/// Request for one derived plan. Only the year and month of `date` select
/// facts; the response echoes `date` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CalculationRequest {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: i32,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: i32,
    pub date: NaiveDate,
}

impl CalculationRequest {
    pub fn new(subdivision_id: i32, material_id: i32, date: NaiveDate) -> Self {
        Self {
            subdivision_id,
            material_id,
            date,
        }
    }
}

/// Inventory plan derived from sales and the stock-cover norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCalculationResult {
    pub date: NaiveDate,
    pub inventory_plan: Decimal,
    pub sales_plan: Decimal,
    pub stock_norm: Decimal,
}

/// Production plan derived from the inventory build and inbound transfers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCalculationResult {
    pub date: NaiveDate,
    pub production_plan: Decimal,
    pub current_inventory: Decimal,
    pub previous_inventory: Decimal,
    pub transfer_quantity: Decimal,
}

/// Transfer plan derived from the inventory build and sales draw-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCalculationResult {
    pub date: NaiveDate,
    pub transfer_plan: Decimal,
    pub current_inventory: Decimal,
    pub previous_inventory: Decimal,
    pub sales_amount: Decimal,
}

/// Raw-material purchase plan derived from the inventory build and production
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialCalculationResult {
    pub date: NaiveDate,
    pub raw_material_plan: Decimal,
    pub current_inventory: Decimal,
    pub previous_inventory: Decimal,
    pub production_quantity: Decimal,
}

/// Any of the four calculation results; serializes as the inner shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CalculationResult {
    Inventory(InventoryCalculationResult),
    Production(ProductionCalculationResult),
    Transfer(TransferCalculationResult),
    RawMaterial(RawMaterialCalculationResult),
}

impl CalculationResult {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationResult::Inventory(_) => CalculationKind::Inventory,
            CalculationResult::Production(_) => CalculationKind::Production,
            CalculationResult::Transfer(_) => CalculationKind::Transfer,
            CalculationResult::RawMaterial(_) => CalculationKind::RawMaterial,
        }
    }

    /// The computed plan value, whatever the kind
    pub fn plan_value(&self) -> Decimal {
        match self {
            CalculationResult::Inventory(r) => r.inventory_plan,
            CalculationResult::Production(r) => r.production_plan,
            CalculationResult::Transfer(r) => r.transfer_plan,
            CalculationResult::RawMaterial(r) => r.raw_material_plan,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            CalculationResult::Inventory(r) => r.date,
            CalculationResult::Production(r) => r.date,
            CalculationResult::Transfer(r) => r.date,
            CalculationResult::RawMaterial(r) => r.date,
        }
    }
}
