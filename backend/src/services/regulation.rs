//! Stock-cover regulations

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check, ensure_key_free, require_material, require_subdivision};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RegulationService {
    db: PgPool,
}

/// Regulation with subdivision and material names
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RegulationRecord {
    pub id: i32,
    pub subdivision_id: i32,
    pub subdivision_name: String,
    pub material_id: i32,
    pub material_name: String,
    pub days_count: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRegulationInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: i32,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: i32,
    #[validate(range(min = 0, message = "Days count cannot be negative"))]
    pub days_count: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRegulationInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: Option<i32>,
    #[validate(range(min = 0, message = "Days count cannot be negative"))]
    pub days_count: Option<i32>,
}

const SELECT_REGULATION: &str = r#"
    SELECT r.id, r.subdivision_id, s.name AS subdivision_name,
           r.material_id, m.name AS material_name, r.days_count
    FROM regulations r
    JOIN subdivisions s ON s.id = r.subdivision_id
    JOIN materials m ON m.id = r.material_id
"#;

impl RegulationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<RegulationRecord>> {
        let regulations = sqlx::query_as::<_, RegulationRecord>(&format!(
            "{} ORDER BY s.name ASC, m.name ASC",
            SELECT_REGULATION
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(regulations)
    }

    pub async fn get(&self, id: i32) -> AppResult<RegulationRecord> {
        sqlx::query_as::<_, RegulationRecord>(&format!("{} WHERE r.id = $1", SELECT_REGULATION))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Regulation".to_string()))
    }

    /// Create a regulation; one per subdivision/material pair
    pub async fn create(&self, input: CreateRegulationInput) -> AppResult<RegulationRecord> {
        input.validate()?;
        check(shared::validate_days_count(input.days_count), "days_count")?;
        require_subdivision(&self.db, input.subdivision_id).await?;
        require_material(&self.db, input.material_id).await?;
        self.ensure_unique(input.subdivision_id, input.material_id, None)
            .await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO regulations (subdivision_id, material_id, days_count)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.subdivision_id)
        .bind(input.material_id)
        .bind(input.days_count)
        .fetch_one(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn update(&self, id: i32, input: UpdateRegulationInput) -> AppResult<RegulationRecord> {
        input.validate()?;
        let existing = self.get(id).await?;

        let subdivision_id = input.subdivision_id.unwrap_or(existing.subdivision_id);
        let material_id = input.material_id.unwrap_or(existing.material_id);
        let days_count = input.days_count.unwrap_or(existing.days_count);

        check(shared::validate_days_count(days_count), "days_count")?;
        if input.subdivision_id.is_some() {
            require_subdivision(&self.db, subdivision_id).await?;
        }
        if input.material_id.is_some() {
            require_material(&self.db, material_id).await?;
        }
        self.ensure_unique(subdivision_id, material_id, Some(id))
            .await?;

        sqlx::query(
            r#"
            UPDATE regulations
            SET subdivision_id = $1, material_id = $2, days_count = $3
            WHERE id = $4
            "#,
        )
        .bind(subdivision_id)
        .bind(material_id)
        .bind(days_count)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM regulations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Regulation".to_string()));
        }
        Ok(())
    }

    async fn ensure_unique(
        &self,
        subdivision_id: i32,
        material_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM regulations
                WHERE subdivision_id = $1 AND material_id = $2
                  AND ($3::INTEGER IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(subdivision_id)
        .bind(material_id)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, "Regulation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_days_is_allowed() {
        let input = CreateRegulationInput {
            subdivision_id: 1,
            material_id: 1,
            days_count: 0,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_days_is_rejected() {
        let input = UpdateRegulationInput {
            subdivision_id: None,
            material_id: None,
            days_count: Some(-1),
        };
        assert!(input.validate().is_err());
    }
}
