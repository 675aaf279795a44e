//! Input resolution for the planning formulas
//!
//! Each resolver gathers the exact facts one formula needs from the planning
//! store. Lookups run in a fixed order and the first absent fact aborts the
//! resolution with [`PlanningError::MissingFact`].

use chrono::NaiveDate;
use std::sync::Arc;

use crate::error::{FactKey, MissingRecord, PlanningError};
use crate::models::{FactKind, PlanningFact, Regulation};
use crate::store::PlanningStore;
use crate::types::{previous_month, PlanningMonth};

/// Facts behind an inventory plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryInputs {
    pub sales_plan: PlanningFact,
    pub regulation: Regulation,
}

/// Facts behind a production plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionInputs {
    pub current_inventory: PlanningFact,
    pub previous_inventory: PlanningFact,
    pub transfer_in: PlanningFact,
}

/// Facts behind a transfer plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInputs {
    pub current_inventory: PlanningFact,
    pub previous_inventory: PlanningFact,
    pub sales_plan: PlanningFact,
}

/// Facts behind a raw-material purchase plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMaterialInputs {
    pub current_inventory: PlanningFact,
    pub previous_inventory: PlanningFact,
    pub production_plan: PlanningFact,
}

/// Resolves calculation inputs against a [`PlanningStore`]
#[derive(Clone)]
pub struct InputResolver {
    store: Arc<dyn PlanningStore>,
}

impl InputResolver {
    pub fn new(store: Arc<dyn PlanningStore>) -> Self {
        Self { store }
    }

    /// Sales plan for the month and the subdivision's regulation
    pub async fn resolve_inventory_inputs(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<InventoryInputs, PlanningError> {
        let sales_plan = self
            .require_fact(FactKind::SalesPlan, subdivision_id, material_id, date)
            .await?;
        let regulation = self.require_regulation(subdivision_id, material_id).await?;

        Ok(InventoryInputs {
            sales_plan,
            regulation,
        })
    }

    /// Current and previous inventory plus the transfer arriving at the
    /// subdivision this month
    pub async fn resolve_production_inputs(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<ProductionInputs, PlanningError> {
        let (current_inventory, previous_inventory) =
            self.require_inventory_pair(subdivision_id, material_id, date).await?;

        let transfer_in = self
            .store
            .get_transfer_fact_by_destination(subdivision_id, material_id, date)
            .await?
            .ok_or_else(|| {
                missing(
                    MissingRecord::Fact(FactKind::TransferPlan),
                    subdivision_id,
                    material_id,
                    Some(date),
                )
            })?;

        Ok(ProductionInputs {
            current_inventory,
            previous_inventory,
            transfer_in,
        })
    }

    /// Current and previous inventory plus this month's sales
    pub async fn resolve_transfer_inputs(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<TransferInputs, PlanningError> {
        let (current_inventory, previous_inventory) =
            self.require_inventory_pair(subdivision_id, material_id, date).await?;
        let sales_plan = self
            .require_fact(FactKind::SalesPlan, subdivision_id, material_id, date)
            .await?;

        Ok(TransferInputs {
            current_inventory,
            previous_inventory,
            sales_plan,
        })
    }

    /// Current and previous inventory plus this month's production
    pub async fn resolve_raw_material_inputs(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<RawMaterialInputs, PlanningError> {
        let (current_inventory, previous_inventory) =
            self.require_inventory_pair(subdivision_id, material_id, date).await?;
        let production_plan = self
            .require_fact(FactKind::ProductionPlan, subdivision_id, material_id, date)
            .await?;

        Ok(RawMaterialInputs {
            current_inventory,
            previous_inventory,
            production_plan,
        })
    }

    async fn require_inventory_pair(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<(PlanningFact, PlanningFact), PlanningError> {
        let current = self
            .require_fact(FactKind::InventoryPlan, subdivision_id, material_id, date)
            .await?;
        let previous = self
            .require_fact(
                FactKind::InventoryPlan,
                subdivision_id,
                material_id,
                previous_month(date),
            )
            .await?;
        Ok((current, previous))
    }

    async fn require_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<PlanningFact, PlanningError> {
        self.store
            .get_fact(kind, subdivision_id, material_id, date)
            .await?
            .ok_or_else(|| missing(MissingRecord::Fact(kind), subdivision_id, material_id, Some(date)))
    }

    async fn require_regulation(
        &self,
        subdivision_id: i32,
        material_id: i32,
    ) -> Result<Regulation, PlanningError> {
        self.store
            .get_regulation(subdivision_id, material_id)
            .await?
            .ok_or_else(|| missing(MissingRecord::Regulation, subdivision_id, material_id, None))
    }
}

fn missing(
    record: MissingRecord,
    subdivision_id: i32,
    material_id: i32,
    date: Option<NaiveDate>,
) -> PlanningError {
    tracing::debug!(
        %record,
        subdivision_id,
        material_id,
        ?date,
        "planning input missing"
    );
    PlanningError::MissingFact {
        record,
        key: FactKey {
            subdivision_id,
            material_id,
            month: date.map(PlanningMonth::of),
        },
    }
}
