//! Calculation orchestration: validate, resolve, compute, package

use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;

use crate::engine;
use crate::error::PlanningError;
use crate::models::{
    CalculationKind, CalculationRequest, CalculationResult, InventoryCalculationResult,
    ProductionCalculationResult, RawMaterialCalculationResult, TransferCalculationResult,
};
use crate::resolver::InputResolver;
use crate::store::PlanningStore;
use crate::types::PlanningMonth;

/// Computes derived plans from facts held in a [`PlanningStore`].
///
/// Stateless apart from the store handle; clones share the store.
#[derive(Clone)]
pub struct PlanCalculator {
    resolver: InputResolver,
}

impl PlanCalculator {
    pub fn new(store: Arc<dyn PlanningStore>) -> Self {
        Self {
            resolver: InputResolver::new(store),
        }
    }

    /// Dispatch on `kind`
    pub async fn calculate(
        &self,
        kind: CalculationKind,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, PlanningError> {
        Ok(match kind {
            CalculationKind::Inventory => {
                CalculationResult::Inventory(self.calculate_inventory(request).await?)
            }
            CalculationKind::Production => {
                CalculationResult::Production(self.calculate_production(request).await?)
            }
            CalculationKind::Transfer => {
                CalculationResult::Transfer(self.calculate_transfer(request).await?)
            }
            CalculationKind::RawMaterial => {
                CalculationResult::RawMaterial(self.calculate_raw_material(request).await?)
            }
        })
    }

    pub async fn calculate_inventory(
        &self,
        request: &CalculationRequest,
    ) -> Result<InventoryCalculationResult, PlanningError> {
        request.validate()?;

        let inputs = self
            .resolver
            .resolve_inventory_inputs(request.subdivision_id, request.material_id, request.date)
            .await?;

        let sales_plan = Decimal::from(inputs.sales_plan.quantity);
        let stock_norm = Decimal::from(inputs.regulation.days_count);
        let days_in_month = PlanningMonth::of(request.date)
            .days_in_month()
            .map(Decimal::from)
            .ok_or_else(|| PlanningError::InvalidInput {
                field: "date".to_string(),
                message: format!("{} is outside the supported calendar", request.date),
            })?;
        let inventory_plan = engine::calculate_inventory_plan(sales_plan, stock_norm, days_in_month);

        tracing::debug!(
            subdivision_id = request.subdivision_id,
            material_id = request.material_id,
            date = %request.date,
            %sales_plan,
            %stock_norm,
            %inventory_plan,
            "inventory plan calculated"
        );

        Ok(InventoryCalculationResult {
            date: request.date,
            inventory_plan,
            sales_plan,
            stock_norm,
        })
    }

    pub async fn calculate_production(
        &self,
        request: &CalculationRequest,
    ) -> Result<ProductionCalculationResult, PlanningError> {
        request.validate()?;

        let inputs = self
            .resolver
            .resolve_production_inputs(request.subdivision_id, request.material_id, request.date)
            .await?;

        let current_inventory = Decimal::from(inputs.current_inventory.quantity);
        let previous_inventory = Decimal::from(inputs.previous_inventory.quantity);
        let transfer_quantity = Decimal::from(inputs.transfer_in.quantity);
        let production_plan =
            engine::calculate_production_plan(current_inventory, previous_inventory, transfer_quantity);

        tracing::debug!(
            subdivision_id = request.subdivision_id,
            material_id = request.material_id,
            date = %request.date,
            %production_plan,
            "production plan calculated"
        );

        Ok(ProductionCalculationResult {
            date: request.date,
            production_plan,
            current_inventory,
            previous_inventory,
            transfer_quantity,
        })
    }

    pub async fn calculate_transfer(
        &self,
        request: &CalculationRequest,
    ) -> Result<TransferCalculationResult, PlanningError> {
        request.validate()?;

        let inputs = self
            .resolver
            .resolve_transfer_inputs(request.subdivision_id, request.material_id, request.date)
            .await?;

        let current_inventory = Decimal::from(inputs.current_inventory.quantity);
        let previous_inventory = Decimal::from(inputs.previous_inventory.quantity);
        let sales_amount = Decimal::from(inputs.sales_plan.quantity);
        let transfer_plan =
            engine::calculate_transfer_plan(current_inventory, previous_inventory, sales_amount);

        tracing::debug!(
            subdivision_id = request.subdivision_id,
            material_id = request.material_id,
            date = %request.date,
            %transfer_plan,
            "transfer plan calculated"
        );

        Ok(TransferCalculationResult {
            date: request.date,
            transfer_plan,
            current_inventory,
            previous_inventory,
            sales_amount,
        })
    }

    pub async fn calculate_raw_material(
        &self,
        request: &CalculationRequest,
    ) -> Result<RawMaterialCalculationResult, PlanningError> {
        request.validate()?;

        let inputs = self
            .resolver
            .resolve_raw_material_inputs(request.subdivision_id, request.material_id, request.date)
            .await?;

        let current_inventory = Decimal::from(inputs.current_inventory.quantity);
        let previous_inventory = Decimal::from(inputs.previous_inventory.quantity);
        let production_quantity = Decimal::from(inputs.production_plan.quantity);
        let raw_material_plan = engine::calculate_raw_material_purchase_plan(
            current_inventory,
            previous_inventory,
            production_quantity,
        );

        tracing::debug!(
            subdivision_id = request.subdivision_id,
            material_id = request.material_id,
            date = %request.date,
            %raw_material_plan,
            "raw material purchase plan calculated"
        );

        Ok(RawMaterialCalculationResult {
            date: request.date,
            raw_material_plan,
            current_inventory,
            previous_inventory,
            production_quantity,
        })
    }
}
