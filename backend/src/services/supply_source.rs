//! Supply sources: dated routes of a material between subdivisions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check, ensure_key_free, require_material, require_subdivision};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SupplySourceService {
    db: PgPool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SupplySource {
    pub id: i32,
    pub source_subdivision_id: i32,
    pub source_subdivision_name: String,
    pub destination_subdivision_id: i32,
    pub destination_subdivision_name: String,
    pub material_id: i32,
    pub material_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplySourceInput {
    #[validate(range(min = 1, message = "source_subdivision_id must be positive"))]
    pub source_subdivision_id: i32,
    #[validate(range(min = 1, message = "destination_subdivision_id must be positive"))]
    pub destination_subdivision_id: i32,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSupplySourceInput {
    #[validate(range(min = 1, message = "source_subdivision_id must be positive"))]
    pub source_subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "destination_subdivision_id must be positive"))]
    pub destination_subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const SELECT_SOURCE: &str = r#"
    SELECT ss.id,
           ss.source_subdivision_id, src.name AS source_subdivision_name,
           ss.destination_subdivision_id, dst.name AS destination_subdivision_name,
           ss.material_id, m.name AS material_name,
           ss.start_date, ss.end_date
    FROM supply_sources ss
    JOIN subdivisions src ON src.id = ss.source_subdivision_id
    JOIN subdivisions dst ON dst.id = ss.destination_subdivision_id
    JOIN materials m ON m.id = ss.material_id
"#;

impl SupplySourceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<SupplySource>> {
        let sources = sqlx::query_as::<_, SupplySource>(&format!(
            "{} ORDER BY ss.start_date DESC, ss.id ASC",
            SELECT_SOURCE
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(sources)
    }

    pub async fn get(&self, id: i32) -> AppResult<SupplySource> {
        sqlx::query_as::<_, SupplySource>(&format!("{} WHERE ss.id = $1", SELECT_SOURCE))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Supply source".to_string()))
    }

    pub async fn create(&self, input: CreateSupplySourceInput) -> AppResult<SupplySource> {
        input.validate()?;
        check(
            shared::validate_date_range(input.start_date, input.end_date),
            "end_date",
        )?;
        require_subdivision(&self.db, input.source_subdivision_id).await?;
        require_subdivision(&self.db, input.destination_subdivision_id).await?;
        require_material(&self.db, input.material_id).await?;
        self.ensure_unique(
            input.source_subdivision_id,
            input.destination_subdivision_id,
            input.material_id,
            input.start_date,
            None,
        )
        .await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO supply_sources (source_subdivision_id, destination_subdivision_id,
                                        material_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(input.source_subdivision_id)
        .bind(input.destination_subdivision_id)
        .bind(input.material_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created supply source {}", id);
        self.get(id).await
    }

    pub async fn update(&self, id: i32, input: UpdateSupplySourceInput) -> AppResult<SupplySource> {
        input.validate()?;
        let existing = self.get(id).await?;

        let source_subdivision_id = input
            .source_subdivision_id
            .unwrap_or(existing.source_subdivision_id);
        let destination_subdivision_id = input
            .destination_subdivision_id
            .unwrap_or(existing.destination_subdivision_id);
        let material_id = input.material_id.unwrap_or(existing.material_id);
        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.unwrap_or(existing.end_date);

        check(shared::validate_date_range(start_date, end_date), "end_date")?;
        if input.source_subdivision_id.is_some() {
            require_subdivision(&self.db, source_subdivision_id).await?;
        }
        if input.destination_subdivision_id.is_some() {
            require_subdivision(&self.db, destination_subdivision_id).await?;
        }
        if input.material_id.is_some() {
            require_material(&self.db, material_id).await?;
        }
        self.ensure_unique(
            source_subdivision_id,
            destination_subdivision_id,
            material_id,
            start_date,
            Some(id),
        )
        .await?;

        sqlx::query(
            r#"
            UPDATE supply_sources
            SET source_subdivision_id = $1, destination_subdivision_id = $2,
                material_id = $3, start_date = $4, end_date = $5
            WHERE id = $6
            "#,
        )
        .bind(source_subdivision_id)
        .bind(destination_subdivision_id)
        .bind(material_id)
        .bind(start_date)
        .bind(end_date)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM supply_sources WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supply source".to_string()));
        }
        Ok(())
    }

    async fn ensure_unique(
        &self,
        source_subdivision_id: i32,
        destination_subdivision_id: i32,
        material_id: i32,
        start_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM supply_sources
                WHERE source_subdivision_id = $1 AND destination_subdivision_id = $2
                  AND material_id = $3 AND start_date = $4
                  AND ($5::INTEGER IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(source_subdivision_id)
        .bind(destination_subdivision_id)
        .bind(material_id)
        .bind(start_date)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, "Supply source")
    }
}
