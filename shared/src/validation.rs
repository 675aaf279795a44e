//! Validation utilities for the Supply Chain Planning Platform

use chrono::NaiveDate;

use crate::models::MaterialType;

/// Maximum length of subdivision and material names
pub const MAX_NAME_LENGTH: usize = 100;

// ============================================================================
// Reference Data Validations
// ============================================================================

/// Validate a subdivision or material name (non-blank, at most 100 characters)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// Validate that a technological card links a finished product to a raw material
pub fn validate_card_materials(
    finished_product: MaterialType,
    raw_material: MaterialType,
) -> Result<(), &'static str> {
    if finished_product != MaterialType::FinishedProduct {
        return Err("finished_product_id must reference a finished product");
    }
    if raw_material != MaterialType::RawMaterial {
        return Err("raw_material_id must reference a raw material");
    }
    Ok(())
}

// ============================================================================
// Plan Validations
// ============================================================================

/// Validate a planned quantity (plans record at least one unit)
pub fn validate_plan_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be greater than 0");
    }
    Ok(())
}

/// Validate a stock-cover norm in days
pub fn validate_days_count(days_count: i32) -> Result<(), &'static str> {
    if days_count < 0 {
        return Err("Days count cannot be negative");
    }
    Ok(())
}

/// Validate raw material consumed per unit of finished product
pub fn validate_raw_material_per_unit(per_unit: i32) -> Result<(), &'static str> {
    if per_unit < 1 {
        return Err("Raw material per unit must be a positive number");
    }
    Ok(())
}

/// Validate a supply source validity period
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must not be after end date");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Central warehouse").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
        assert!(validate_name(&"x".repeat(101)).is_err());
        // Length is counted in characters, not bytes
        assert!(validate_name(&"склад".repeat(20)).is_ok());
    }

    #[test]
    fn test_validate_card_materials() {
        assert!(validate_card_materials(MaterialType::FinishedProduct, MaterialType::RawMaterial).is_ok());
        assert!(validate_card_materials(MaterialType::RawMaterial, MaterialType::RawMaterial).is_err());
        assert!(
            validate_card_materials(MaterialType::FinishedProduct, MaterialType::FinishedProduct)
                .is_err()
        );
    }

    #[test]
    fn test_validate_plan_quantity() {
        assert!(validate_plan_quantity(1).is_ok());
        assert!(validate_plan_quantity(0).is_err());
        assert!(validate_plan_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_days_count_allows_zero() {
        assert!(validate_days_count(0).is_ok());
        assert!(validate_days_count(45).is_ok());
        assert!(validate_days_count(-1).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dec = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(validate_date_range(jan, dec).is_ok());
        assert!(validate_date_range(jan, jan).is_ok());
        assert!(validate_date_range(dec, jan).is_err());
    }

    #[test]
    fn test_validate_per_unit() {
        assert!(validate_raw_material_per_unit(3).is_ok());
        assert!(validate_raw_material_per_unit(0).is_err());
    }
}
