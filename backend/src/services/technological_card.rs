//! Technological cards: raw material consumed per unit of a finished product

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check, ensure_key_free, require_material, require_subdivision};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct TechnologicalCardService {
    db: PgPool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TechnologicalCard {
    pub id: i32,
    pub subdivision_id: i32,
    pub subdivision_name: String,
    pub finished_product_id: i32,
    pub finished_product_name: String,
    pub raw_material_id: i32,
    pub raw_material_name: String,
    pub raw_material_per_unit: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTechnologicalCardInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: i32,
    #[validate(range(min = 1, message = "finished_product_id must be positive"))]
    pub finished_product_id: i32,
    #[validate(range(min = 1, message = "raw_material_id must be positive"))]
    pub raw_material_id: i32,
    #[validate(range(min = 1, message = "Raw material per unit must be a positive number"))]
    pub raw_material_per_unit: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTechnologicalCardInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "finished_product_id must be positive"))]
    pub finished_product_id: Option<i32>,
    #[validate(range(min = 1, message = "raw_material_id must be positive"))]
    pub raw_material_id: Option<i32>,
    #[validate(range(min = 1, message = "Raw material per unit must be a positive number"))]
    pub raw_material_per_unit: Option<i32>,
}

const SELECT_CARD: &str = r#"
    SELECT c.id, c.subdivision_id, s.name AS subdivision_name,
           c.finished_product_id, fp.name AS finished_product_name,
           c.raw_material_id, rm.name AS raw_material_name,
           c.raw_material_per_unit
    FROM technological_cards c
    JOIN subdivisions s ON s.id = c.subdivision_id
    JOIN materials fp ON fp.id = c.finished_product_id
    JOIN materials rm ON rm.id = c.raw_material_id
"#;

impl TechnologicalCardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<TechnologicalCard>> {
        let cards = sqlx::query_as::<_, TechnologicalCard>(&format!(
            "{} ORDER BY s.name ASC, fp.name ASC, rm.name ASC",
            SELECT_CARD
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(cards)
    }

    pub async fn get(&self, id: i32) -> AppResult<TechnologicalCard> {
        sqlx::query_as::<_, TechnologicalCard>(&format!("{} WHERE c.id = $1", SELECT_CARD))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Technological card".to_string()))
    }

    pub async fn create(
        &self,
        input: CreateTechnologicalCardInput,
    ) -> AppResult<TechnologicalCard> {
        input.validate()?;
        check(
            shared::validate_raw_material_per_unit(input.raw_material_per_unit),
            "raw_material_per_unit",
        )?;
        require_subdivision(&self.db, input.subdivision_id).await?;
        self.check_materials(input.finished_product_id, input.raw_material_id)
            .await?;
        self.ensure_unique(
            input.subdivision_id,
            input.finished_product_id,
            input.raw_material_id,
            None,
        )
        .await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO technological_cards (subdivision_id, finished_product_id,
                                             raw_material_id, raw_material_per_unit)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.subdivision_id)
        .bind(input.finished_product_id)
        .bind(input.raw_material_id)
        .bind(input.raw_material_per_unit)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created technological card {}", id);
        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        input: UpdateTechnologicalCardInput,
    ) -> AppResult<TechnologicalCard> {
        input.validate()?;
        let existing = self.get(id).await?;

        let subdivision_id = input.subdivision_id.unwrap_or(existing.subdivision_id);
        let finished_product_id = input
            .finished_product_id
            .unwrap_or(existing.finished_product_id);
        let raw_material_id = input.raw_material_id.unwrap_or(existing.raw_material_id);
        let raw_material_per_unit = input
            .raw_material_per_unit
            .unwrap_or(existing.raw_material_per_unit);

        check(
            shared::validate_raw_material_per_unit(raw_material_per_unit),
            "raw_material_per_unit",
        )?;
        if input.subdivision_id.is_some() {
            require_subdivision(&self.db, subdivision_id).await?;
        }
        if input.finished_product_id.is_some() || input.raw_material_id.is_some() {
            self.check_materials(finished_product_id, raw_material_id)
                .await?;
        }
        self.ensure_unique(subdivision_id, finished_product_id, raw_material_id, Some(id))
            .await?;

        sqlx::query(
            r#"
            UPDATE technological_cards
            SET subdivision_id = $1, finished_product_id = $2,
                raw_material_id = $3, raw_material_per_unit = $4
            WHERE id = $5
            "#,
        )
        .bind(subdivision_id)
        .bind(finished_product_id)
        .bind(raw_material_id)
        .bind(raw_material_per_unit)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM technological_cards WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Technological card".to_string()));
        }
        Ok(())
    }

    /// The finished product must be a finished product and the raw material a raw material
    async fn check_materials(&self, finished_product_id: i32, raw_material_id: i32) -> AppResult<()> {
        let finished_type = require_material(&self.db, finished_product_id).await?;
        let raw_type = require_material(&self.db, raw_material_id).await?;

        shared::validate_card_materials(finished_type, raw_type).map_err(|message| {
            let field = if message.starts_with("finished_product_id") {
                "finished_product_id"
            } else {
                "raw_material_id"
            };
            AppError::invalid(field, message)
        })
    }

    async fn ensure_unique(
        &self,
        subdivision_id: i32,
        finished_product_id: i32,
        raw_material_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM technological_cards
                WHERE subdivision_id = $1 AND finished_product_id = $2 AND raw_material_id = $3
                  AND ($4::INTEGER IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(subdivision_id)
        .bind(finished_product_id)
        .bind(raw_material_id)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, "Technological card")
    }
}
