//! Subdivision management service

use serde::{Deserialize, Serialize};
use shared::SubdivisionType;
use sqlx::PgPool;
use validator::Validate;

use super::common::{check, ensure_key_free, ensure_unreferenced};
use crate::error::{AppError, AppResult};

/// Subdivision service for warehouses, production sites and sales points
#[derive(Clone)]
pub struct SubdivisionService {
    db: PgPool,
}

/// Subdivision information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subdivision {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub subdivision_type: SubdivisionType,
}

/// Input for creating a subdivision
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubdivisionInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub subdivision_type: SubdivisionType,
}

/// Input for updating a subdivision
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubdivisionInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub subdivision_type: Option<SubdivisionType>,
}

impl SubdivisionService {
    /// Create a new SubdivisionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all subdivisions
    pub async fn list(&self) -> AppResult<Vec<Subdivision>> {
        let subdivisions = sqlx::query_as::<_, Subdivision>(
            "SELECT id, name, subdivision_type FROM subdivisions ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(subdivisions)
    }

    /// Get a subdivision by ID
    pub async fn get(&self, id: i32) -> AppResult<Subdivision> {
        sqlx::query_as::<_, Subdivision>(
            "SELECT id, name, subdivision_type FROM subdivisions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Subdivision".to_string()))
    }

    /// Create a new subdivision with a unique name
    pub async fn create(&self, input: CreateSubdivisionInput) -> AppResult<Subdivision> {
        input.validate()?;
        check(shared::validate_name(&input.name), "name")?;
        self.ensure_name_free(&input.name, None).await?;

        let subdivision = sqlx::query_as::<_, Subdivision>(
            r#"
            INSERT INTO subdivisions (name, subdivision_type)
            VALUES ($1, $2)
            RETURNING id, name, subdivision_type
            "#,
        )
        .bind(&input.name)
        .bind(input.subdivision_type.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created subdivision {} ({})", subdivision.id, subdivision.name);
        Ok(subdivision)
    }

    /// Update a subdivision; absent fields keep their stored values
    pub async fn update(&self, id: i32, input: UpdateSubdivisionInput) -> AppResult<Subdivision> {
        input.validate()?;
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let subdivision_type = input.subdivision_type.unwrap_or(existing.subdivision_type);

        check(shared::validate_name(&name), "name")?;
        self.ensure_name_free(&name, Some(id)).await?;

        let subdivision = sqlx::query_as::<_, Subdivision>(
            r#"
            UPDATE subdivisions
            SET name = $1, subdivision_type = $2
            WHERE id = $3
            RETURNING id, name, subdivision_type
            "#,
        )
        .bind(&name)
        .bind(subdivision_type.as_str())
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(subdivision)
    }

    /// Delete a subdivision that no planning record refers to
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?;

        let in_use = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM sales_plans WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM inventory_plans WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM production_plans WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM transfer_plans
                          WHERE source_subdivision_id = $1 OR destination_subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM regulations WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM raw_material_purchases WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM raw_material_write_offs WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM technological_cards WHERE subdivision_id = $1)
                OR EXISTS(SELECT 1 FROM supply_sources
                          WHERE source_subdivision_id = $1 OR destination_subdivision_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        ensure_unreferenced(
            in_use,
            "subdivision",
            "Невозможно удалить подразделение, так как есть связанные данные",
        )?;

        sqlx::query("DELETE FROM subdivisions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        tracing::info!("Deleted subdivision {}", id);
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, exclude_id: Option<i32>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM subdivisions
                WHERE name = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, "Subdivision")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_uses_type_key() {
        let input: CreateSubdivisionInput =
            serde_json::from_str(r#"{"name":"Central warehouse","type":"Warehouse"}"#).unwrap();
        assert_eq!(input.subdivision_type, SubdivisionType::Warehouse);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_input_rejects_long_name() {
        let input = CreateSubdivisionInput {
            name: "x".repeat(101),
            subdivision_type: SubdivisionType::Sales,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_serialized_subdivision_uses_type_key() {
        let subdivision = Subdivision {
            id: 1,
            name: "Plant".to_string(),
            subdivision_type: SubdivisionType::Production,
        };
        let json = serde_json::to_value(&subdivision).unwrap();
        assert_eq!(json["type"], "Production");
    }
}
