//! Raw material purchases and write-offs
//!
//! Both movements are dated quantities of a raw material at a subdivision
//! and live in tables of identical shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check_quantity, ensure_raw_material, require_material, require_subdivision};
use crate::error::{AppError, AppResult};

/// Direction of a raw material movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Purchase,
    WriteOff,
}

impl Movement {
    fn table(self) -> &'static str {
        match self {
            Movement::Purchase => "raw_material_purchases",
            Movement::WriteOff => "raw_material_write_offs",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Movement::Purchase => "Raw material purchase",
            Movement::WriteOff => "Raw material write-off",
        }
    }
}

#[derive(Clone)]
pub struct RawMaterialService {
    db: PgPool,
    movement: Movement,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RawMaterialRecord {
    pub id: i32,
    pub subdivision_id: i32,
    pub subdivision_name: String,
    pub raw_material_id: i32,
    pub raw_material_name: String,
    pub date: NaiveDate,
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMaterialFilter {
    pub subdivision_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRawMaterialInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: i32,
    #[validate(range(min = 1, message = "raw_material_id must be positive"))]
    pub raw_material_id: i32,
    pub date: NaiveDate,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRawMaterialInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "raw_material_id must be positive"))]
    pub raw_material_id: Option<i32>,
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: Option<i32>,
}

impl RawMaterialService {
    pub fn new(db: PgPool, movement: Movement) -> Self {
        Self { db, movement }
    }

    fn select_sql(&self, condition: &str) -> String {
        format!(
            r#"
            SELECT r.id, r.subdivision_id, s.name AS subdivision_name,
                   r.raw_material_id, m.name AS raw_material_name, r.date, r.quantity
            FROM {} r
            JOIN subdivisions s ON s.id = r.subdivision_id
            JOIN materials m ON m.id = r.raw_material_id
            WHERE {}
            ORDER BY r.date DESC, r.id ASC
            "#,
            self.movement.table(),
            condition
        )
    }

    pub async fn list(&self, filter: RawMaterialFilter) -> AppResult<Vec<RawMaterialRecord>> {
        let sql = self.select_sql("($1::INTEGER IS NULL OR r.subdivision_id = $1)");

        let records = sqlx::query_as::<_, RawMaterialRecord>(&sql)
            .bind(filter.subdivision_id)
            .fetch_all(&self.db)
            .await?;

        Ok(records)
    }

    pub async fn get(&self, id: i32) -> AppResult<RawMaterialRecord> {
        let sql = self.select_sql("r.id = $1");

        sqlx::query_as::<_, RawMaterialRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(self.movement.label().to_string()))
    }

    pub async fn create(&self, input: CreateRawMaterialInput) -> AppResult<RawMaterialRecord> {
        input.validate()?;
        check_quantity(input.quantity)?;
        require_subdivision(&self.db, input.subdivision_id).await?;
        self.require_raw_material(input.raw_material_id).await?;

        let id = sqlx::query_scalar::<_, i32>(&format!(
            r#"
            INSERT INTO {} (subdivision_id, raw_material_id, date, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
            self.movement.table()
        ))
        .bind(input.subdivision_id)
        .bind(input.raw_material_id)
        .bind(input.date)
        .bind(input.quantity)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created {} {}", self.movement.label(), id);
        self.get(id).await
    }

    pub async fn update(&self, id: i32, input: UpdateRawMaterialInput) -> AppResult<RawMaterialRecord> {
        input.validate()?;
        let existing = self.get(id).await?;

        let subdivision_id = input.subdivision_id.unwrap_or(existing.subdivision_id);
        let raw_material_id = input.raw_material_id.unwrap_or(existing.raw_material_id);
        let date = input.date.unwrap_or(existing.date);
        let quantity = input.quantity.unwrap_or(existing.quantity);

        check_quantity(quantity)?;
        if input.subdivision_id.is_some() {
            require_subdivision(&self.db, subdivision_id).await?;
        }
        if input.raw_material_id.is_some() {
            self.require_raw_material(raw_material_id).await?;
        }

        sqlx::query(&format!(
            r#"
            UPDATE {}
            SET subdivision_id = $1, raw_material_id = $2, date = $3, quantity = $4
            WHERE id = $5
            "#,
            self.movement.table()
        ))
        .bind(subdivision_id)
        .bind(raw_material_id)
        .bind(date)
        .bind(quantity)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.movement.table()))
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(self.movement.label().to_string()));
        }
        Ok(())
    }

    async fn require_raw_material(&self, material_id: i32) -> AppResult<()> {
        ensure_raw_material(require_material(&self.db, material_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_tables() {
        assert_eq!(Movement::Purchase.table(), "raw_material_purchases");
        assert_eq!(Movement::WriteOff.table(), "raw_material_write_offs");
        assert_ne!(Movement::Purchase.label(), Movement::WriteOff.label());
    }
}
