//! Transfer plans between subdivisions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{month_start, FactKind};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check_quantity, ensure_key_free, require_material, require_subdivision};
use crate::error::{AppError, AppResult};

/// Transfer plan service
#[derive(Clone)]
pub struct TransferPlanService {
    db: PgPool,
}

/// Transfer plan with subdivision and material names
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TransferPlanRecord {
    pub id: i32,
    pub source_subdivision_id: i32,
    pub source_subdivision_name: String,
    pub destination_subdivision_id: i32,
    pub destination_subdivision_name: String,
    pub material_id: i32,
    pub material_name: String,
    pub transfer_date: NaiveDate,
    pub quantity: i32,
}

/// Input for creating a transfer plan
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransferPlanInput {
    #[validate(range(min = 1, message = "source_subdivision_id must be positive"))]
    pub source_subdivision_id: i32,
    #[validate(range(min = 1, message = "destination_subdivision_id must be positive"))]
    pub destination_subdivision_id: i32,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: i32,
    pub transfer_date: NaiveDate,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i32,
}

/// Input for updating a transfer plan
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransferPlanInput {
    #[validate(range(min = 1, message = "source_subdivision_id must be positive"))]
    pub source_subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "destination_subdivision_id must be positive"))]
    pub destination_subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: Option<i32>,
    pub transfer_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: Option<i32>,
}

/// Natural key of a transfer plan
struct TransferKey {
    source_subdivision_id: i32,
    destination_subdivision_id: i32,
    material_id: i32,
    transfer_date: NaiveDate,
}

const SELECT_TRANSFER: &str = r#"
    SELECT t.id,
           t.source_subdivision_id, src.name AS source_subdivision_name,
           t.destination_subdivision_id, dst.name AS destination_subdivision_name,
           t.material_id, m.name AS material_name,
           t.transfer_date, t.quantity
    FROM transfer_plans t
    JOIN subdivisions src ON src.id = t.source_subdivision_id
    JOIN subdivisions dst ON dst.id = t.destination_subdivision_id
    JOIN materials m ON m.id = t.material_id
"#;

impl TransferPlanService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<TransferPlanRecord>> {
        let transfers = sqlx::query_as::<_, TransferPlanRecord>(&format!(
            "{} ORDER BY t.transfer_date DESC, t.id ASC",
            SELECT_TRANSFER
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(transfers)
    }

    pub async fn get(&self, id: i32) -> AppResult<TransferPlanRecord> {
        sqlx::query_as::<_, TransferPlanRecord>(&format!("{} WHERE t.id = $1", SELECT_TRANSFER))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(FactKind::TransferPlan.to_string()))
    }

    pub async fn create(&self, input: CreateTransferPlanInput) -> AppResult<TransferPlanRecord> {
        input.validate()?;
        check_quantity(input.quantity)?;
        require_subdivision(&self.db, input.source_subdivision_id).await?;
        require_subdivision(&self.db, input.destination_subdivision_id).await?;
        require_material(&self.db, input.material_id).await?;

        let key = TransferKey {
            source_subdivision_id: input.source_subdivision_id,
            destination_subdivision_id: input.destination_subdivision_id,
            material_id: input.material_id,
            transfer_date: month_start(input.transfer_date),
        };
        self.ensure_unique(&key, None).await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO transfer_plans (source_subdivision_id, destination_subdivision_id,
                                        material_id, transfer_date, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(key.source_subdivision_id)
        .bind(key.destination_subdivision_id)
        .bind(key.material_id)
        .bind(key.transfer_date)
        .bind(input.quantity)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Created transfer plan {}: {} -> {}, material {}",
            id,
            key.source_subdivision_id,
            key.destination_subdivision_id,
            key.material_id
        );

        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        input: UpdateTransferPlanInput,
    ) -> AppResult<TransferPlanRecord> {
        input.validate()?;
        let existing = self.get(id).await?;

        let key = TransferKey {
            source_subdivision_id: input
                .source_subdivision_id
                .unwrap_or(existing.source_subdivision_id),
            destination_subdivision_id: input
                .destination_subdivision_id
                .unwrap_or(existing.destination_subdivision_id),
            material_id: input.material_id.unwrap_or(existing.material_id),
            transfer_date: month_start(input.transfer_date.unwrap_or(existing.transfer_date)),
        };
        let quantity = input.quantity.unwrap_or(existing.quantity);

        check_quantity(quantity)?;
        if input.source_subdivision_id.is_some() {
            require_subdivision(&self.db, key.source_subdivision_id).await?;
        }
        if input.destination_subdivision_id.is_some() {
            require_subdivision(&self.db, key.destination_subdivision_id).await?;
        }
        if input.material_id.is_some() {
            require_material(&self.db, key.material_id).await?;
        }
        self.ensure_unique(&key, Some(id)).await?;

        sqlx::query(
            r#"
            UPDATE transfer_plans
            SET source_subdivision_id = $1, destination_subdivision_id = $2,
                material_id = $3, transfer_date = $4, quantity = $5
            WHERE id = $6
            "#,
        )
        .bind(key.source_subdivision_id)
        .bind(key.destination_subdivision_id)
        .bind(key.material_id)
        .bind(key.transfer_date)
        .bind(quantity)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM transfer_plans WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(FactKind::TransferPlan.to_string()));
        }
        Ok(())
    }

    async fn ensure_unique(&self, key: &TransferKey, exclude_id: Option<i32>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM transfer_plans
                WHERE source_subdivision_id = $1 AND destination_subdivision_id = $2
                  AND material_id = $3 AND transfer_date = $4
                  AND ($5::INTEGER IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(key.source_subdivision_id)
        .bind(key.destination_subdivision_id)
        .bind(key.material_id)
        .bind(key.transfer_date)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, &FactKind::TransferPlan.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_requires_positive_ids() {
        let input = CreateTransferPlanInput {
            source_subdivision_id: 0,
            destination_subdivision_id: 2,
            material_id: 3,
            transfer_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            quantity: 10,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("source_subdivision_id"));
    }
}
