//! WebAssembly module for the Supply Chain Planning Platform
//!
//! Provides client-side previews of the planning formulas so a form can
//! show the derived plan before the figures are saved:
//! - Inventory, production, transfer and raw material purchase plans
//! - Planning month arithmetic
//! - Offline input validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use shared::engine;
use shared::{
    InventoryCalculationResult, PlanningMonth, ProductionCalculationResult,
    RawMaterialCalculationResult, TransferCalculationResult,
};

// Re-export shared models for Rust consumers of the rlib
pub use shared::models::*;

#[derive(Debug, Deserialize)]
struct InventoryPreview {
    date: NaiveDate,
    sales_plan: Decimal,
    stock_norm: Decimal,
}

/// Inputs shared by the three stock-difference plans
#[derive(Debug, Deserialize)]
struct StockDeltaPreview {
    date: NaiveDate,
    current_inventory: Decimal,
    previous_inventory: Decimal,
    flow: Decimal,
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid input JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn overflow(plan: &str) -> String {
    format!("{} is out of range for decimal arithmetic", plan)
}

fn inventory_preview(json: &str) -> Result<String, String> {
    let input: InventoryPreview = parse(json)?;
    let days = PlanningMonth::of(input.date)
        .days_in_month()
        .map(Decimal::from)
        .ok_or_else(|| format!("Date {} is outside the supported calendar", input.date))?;
    let inventory_plan = engine::checked_inventory_plan(input.sales_plan, input.stock_norm, days)
        .ok_or_else(|| overflow("Inventory plan"))?;

    to_json(&InventoryCalculationResult {
        date: input.date,
        inventory_plan,
        sales_plan: input.sales_plan,
        stock_norm: input.stock_norm,
    })
}

fn stock_delta(input: &StockDeltaPreview, plan: &str) -> Result<Decimal, String> {
    engine::checked_stock_delta_plus_flow(
        input.current_inventory,
        input.previous_inventory,
        input.flow,
    )
    .ok_or_else(|| overflow(plan))
}

fn production_preview(json: &str) -> Result<String, String> {
    let input: StockDeltaPreview = parse(json)?;

    to_json(&ProductionCalculationResult {
        date: input.date,
        production_plan: stock_delta(&input, "Production plan")?,
        current_inventory: input.current_inventory,
        previous_inventory: input.previous_inventory,
        transfer_quantity: input.flow,
    })
}

fn transfer_preview(json: &str) -> Result<String, String> {
    let input: StockDeltaPreview = parse(json)?;

    to_json(&TransferCalculationResult {
        date: input.date,
        transfer_plan: stock_delta(&input, "Transfer plan")?,
        current_inventory: input.current_inventory,
        previous_inventory: input.previous_inventory,
        sales_amount: input.flow,
    })
}

fn raw_material_preview(json: &str) -> Result<String, String> {
    let input: StockDeltaPreview = parse(json)?;

    to_json(&RawMaterialCalculationResult {
        date: input.date,
        raw_material_plan: stock_delta(&input, "Raw material plan")?,
        current_inventory: input.current_inventory,
        previous_inventory: input.previous_inventory,
        production_quantity: input.flow,
    })
}

fn previous_month_of(date: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {}: {}", date, e))?;
    Ok(shared::previous_month(date).format("%Y-%m-%d").to_string())
}

/// Preview an inventory plan from `{ date, sales_plan, stock_norm }`
#[wasm_bindgen]
pub fn preview_inventory_plan(input_json: &str) -> Result<String, JsValue> {
    inventory_preview(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Preview a production plan; `flow` is the inbound transfer quantity
#[wasm_bindgen]
pub fn preview_production_plan(input_json: &str) -> Result<String, JsValue> {
    production_preview(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Preview a transfer plan; `flow` is the planned sales amount
#[wasm_bindgen]
pub fn preview_transfer_plan(input_json: &str) -> Result<String, JsValue> {
    transfer_preview(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Preview a raw material purchase plan; `flow` is the planned production
#[wasm_bindgen]
pub fn preview_raw_material_plan(input_json: &str) -> Result<String, JsValue> {
    raw_material_preview(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Number of days in a calendar month; `undefined` for an invalid month
#[wasm_bindgen]
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    shared::days_in_month(year, month)
}

/// Same day one month earlier, clamped to the end of a shorter month
#[wasm_bindgen]
pub fn previous_planning_month(date: &str) -> Result<String, JsValue> {
    previous_month_of(date).map_err(|e| JsValue::from_str(&e))
}

/// Validate a planned quantity (at least one unit)
#[wasm_bindgen]
pub fn is_valid_plan_quantity(quantity: i32) -> bool {
    shared::validate_plan_quantity(quantity).is_ok()
}

/// Validate a subdivision or material name
#[wasm_bindgen]
pub fn is_valid_name(name: &str) -> bool {
    shared::validate_name(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn field(json: &str, key: &str) -> Decimal {
        let value: Value = serde_json::from_str(json).unwrap();
        value[key].as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_inventory_preview_uses_month_length() {
        let march = inventory_preview(r#"{"date":"2024-03-10","sales_plan":"310","stock_norm":"10"}"#)
            .unwrap();
        assert_eq!(field(&march, "inventory_plan"), Decimal::from(100));

        let feb = inventory_preview(r#"{"date":"2023-02-10","sales_plan":"280","stock_norm":7}"#)
            .unwrap();
        assert_eq!(field(&feb, "inventory_plan"), Decimal::from(70));
    }

    #[test]
    fn test_stock_delta_previews() {
        let input = r#"{"date":"2024-03-01","current_inventory":"150","previous_inventory":"100","flow":"20"}"#;
        assert_eq!(field(&production_preview(input).unwrap(), "production_plan"), Decimal::from(70));
        assert_eq!(field(&transfer_preview(input).unwrap(), "transfer_plan"), Decimal::from(70));
        assert_eq!(field(&raw_material_preview(input).unwrap(), "raw_material_plan"), Decimal::from(70));
    }

    #[test]
    fn test_negative_plan_is_not_clamped() {
        let input = r#"{"date":"2024-03-01","current_inventory":"80","previous_inventory":"120","flow":"10"}"#;
        assert_eq!(field(&production_preview(input).unwrap(), "production_plan"), Decimal::from(-30));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = inventory_preview(r#"{"date":"2024-03-10"}"#).unwrap_err();
        assert!(err.starts_with("Invalid input JSON"));
    }

    #[test]
    fn test_overflowing_inputs_are_errors() {
        let err = inventory_preview(
            r#"{"date":"2024-03-10","sales_plan":"79228162514264337593543950335","stock_norm":"10"}"#,
        )
        .unwrap_err();
        assert!(err.contains("Inventory plan"), "{}", err);

        let input = r#"{"date":"2024-03-01","current_inventory":"79228162514264337593543950335","previous_inventory":"-1","flow":"0"}"#;
        assert!(production_preview(input).is_err());
        assert!(transfer_preview(input).is_err());
        assert!(raw_material_preview(input).is_err());
    }

    #[test]
    fn test_inventory_preview_in_last_representable_month() {
        let out = inventory_preview(r#"{"date":"+262142-12-31","sales_plan":"310","stock_norm":"10"}"#)
            .unwrap();
        assert_eq!(field(&out, "inventory_plan"), Decimal::from(100));
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_length(2024, 2), Some(29));
        assert_eq!(month_length(2023, 2), Some(28));
        assert_eq!(month_length(2024, 13), None);
        assert_eq!(previous_month_of("2024-03-31").unwrap(), "2024-02-29");
        assert_eq!(previous_month_of("2024-01-15").unwrap(), "2023-12-15");
        assert!(previous_month_of("31/03/2024").is_err());
    }

    #[test]
    fn test_validation_helpers() {
        assert!(is_valid_plan_quantity(1));
        assert!(!is_valid_plan_quantity(0));
        assert!(is_valid_name("Main warehouse"));
        assert!(!is_valid_name("  "));
    }
}
