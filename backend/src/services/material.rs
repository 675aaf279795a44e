//! Material catalogue service

use serde::{Deserialize, Serialize};
use shared::MaterialType;
use sqlx::PgPool;
use validator::Validate;

use super::common::{check, ensure_key_free, ensure_type_change_allowed, ensure_unreferenced};
use crate::error::{AppError, AppResult};

/// Material service for finished products and raw materials
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Material information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Material {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub material_type: MaterialType,
}

/// Input for creating a material
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaterialInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
}

/// Input for updating a material
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaterialInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<MaterialType>,
}

impl MaterialService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<Material>> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT id, name, material_type FROM materials ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    pub async fn get(&self, id: i32) -> AppResult<Material> {
        sqlx::query_as::<_, Material>("SELECT id, name, material_type FROM materials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Material".to_string()))
    }

    pub async fn create(&self, input: CreateMaterialInput) -> AppResult<Material> {
        input.validate()?;
        check(shared::validate_name(&input.name), "name")?;
        self.ensure_name_free(&input.name, None).await?;

        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (name, material_type)
            VALUES ($1, $2)
            RETURNING id, name, material_type
            "#,
        )
        .bind(&input.name)
        .bind(input.material_type.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created material {} ({})", material.id, material.name);
        Ok(material)
    }

    /// Update a material; absent fields keep their stored values.
    ///
    /// Changing the type of a material referenced by a technological card
    /// would break the card's finished/raw pairing and is refused.
    pub async fn update(&self, id: i32, input: UpdateMaterialInput) -> AppResult<Material> {
        input.validate()?;
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let material_type = input.material_type.unwrap_or(existing.material_type);

        check(shared::validate_name(&name), "name")?;
        self.ensure_name_free(&name, Some(id)).await?;

        let on_card = if material_type != existing.material_type {
            sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(SELECT 1 FROM technological_cards
                              WHERE finished_product_id = $1 OR raw_material_id = $1)
                "#,
            )
            .bind(id)
            .fetch_one(&self.db)
            .await?
        } else {
            false
        };
        ensure_type_change_allowed(existing.material_type, material_type, on_card)?;

        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET name = $1, material_type = $2
            WHERE id = $3
            RETURNING id, name, material_type
            "#,
        )
        .bind(&name)
        .bind(material_type.as_str())
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(material)
    }

    /// Delete a material that no planning record refers to
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?;

        let in_use = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM sales_plans WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM inventory_plans WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM production_plans WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM transfer_plans WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM regulations WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM supply_sources WHERE material_id = $1)
                OR EXISTS(SELECT 1 FROM raw_material_purchases WHERE raw_material_id = $1)
                OR EXISTS(SELECT 1 FROM raw_material_write_offs WHERE raw_material_id = $1)
                OR EXISTS(SELECT 1 FROM technological_cards
                          WHERE finished_product_id = $1 OR raw_material_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        ensure_unreferenced(
            in_use,
            "material",
            "Невозможно удалить материал, так как есть связанные данные",
        )?;

        sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        tracing::info!("Deleted material {}", id);
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, exclude_id: Option<i32>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM materials
                WHERE name = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, "Material")
    }
}
