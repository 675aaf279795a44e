//! Monthly sales, inventory and production plans
//!
//! The three plan tables share one shape, so a single service serves all of
//! them, parameterized by [`FactKind`]. Dates are stored as the first day of
//! their month; a second plan for the same subdivision, material and month is
//! a duplicate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{month_start, FactKind};
use sqlx::PgPool;
use validator::Validate;

use super::common::{check_quantity, ensure_key_free, require_material, require_subdivision};
use crate::error::{AppError, AppResult};
use crate::store::fact_table;

/// Plan service for one kind of monthly plan
#[derive(Clone)]
pub struct PlanService {
    db: PgPool,
    kind: FactKind,
}

/// Plan row with the names of its subdivision and material
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: i32,
    pub subdivision_id: i32,
    pub subdivision_name: String,
    pub material_id: i32,
    pub material_name: String,
    pub date: NaiveDate,
    pub quantity: i32,
}

/// Optional list filters
#[derive(Debug, Default, Deserialize)]
pub struct PlanFilter {
    pub subdivision_id: Option<i32>,
    pub material_id: Option<i32>,
}

/// Input for creating a plan
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: i32,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: i32,
    pub date: NaiveDate,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i32,
}

/// Input for updating a plan
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlanInput {
    #[validate(range(min = 1, message = "subdivision_id must be positive"))]
    pub subdivision_id: Option<i32>,
    #[validate(range(min = 1, message = "material_id must be positive"))]
    pub material_id: Option<i32>,
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: Option<i32>,
}

impl PlanService {
    /// `kind` selects the plan table; transfers have their own service
    pub fn new(db: PgPool, kind: FactKind) -> Self {
        Self { db, kind }
    }

    fn table(&self) -> &'static str {
        fact_table(self.kind)
    }

    fn select_sql(&self, condition: &str) -> String {
        format!(
            r#"
            SELECT p.id, p.subdivision_id, s.name AS subdivision_name,
                   p.material_id, m.name AS material_name, p.date, p.quantity
            FROM {} p
            JOIN subdivisions s ON s.id = p.subdivision_id
            JOIN materials m ON m.id = p.material_id
            WHERE {}
            ORDER BY p.date DESC, s.name ASC, m.name ASC
            "#,
            self.table(),
            condition
        )
    }

    /// List plans, optionally narrowed to a subdivision and/or material
    pub async fn list(&self, filter: PlanFilter) -> AppResult<Vec<PlanRecord>> {
        let sql = self.select_sql(
            "($1::INTEGER IS NULL OR p.subdivision_id = $1) AND ($2::INTEGER IS NULL OR p.material_id = $2)",
        );

        let plans = sqlx::query_as::<_, PlanRecord>(&sql)
            .bind(filter.subdivision_id)
            .bind(filter.material_id)
            .fetch_all(&self.db)
            .await?;

        Ok(plans)
    }

    pub async fn get(&self, id: i32) -> AppResult<PlanRecord> {
        let sql = self.select_sql("p.id = $1");

        sqlx::query_as::<_, PlanRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(self.kind.to_string()))
    }

    pub async fn create(&self, input: CreatePlanInput) -> AppResult<PlanRecord> {
        input.validate()?;
        check_quantity(input.quantity)?;
        require_subdivision(&self.db, input.subdivision_id).await?;
        require_material(&self.db, input.material_id).await?;

        let date = month_start(input.date);
        self.ensure_unique(input.subdivision_id, input.material_id, date, None)
            .await?;

        let id = sqlx::query_scalar::<_, i32>(&format!(
            r#"
            INSERT INTO {} (subdivision_id, material_id, date, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
            self.table()
        ))
        .bind(input.subdivision_id)
        .bind(input.material_id)
        .bind(date)
        .bind(input.quantity)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Created {} {} for subdivision {}, material {}, month {}",
            self.kind.as_str(),
            id,
            input.subdivision_id,
            input.material_id,
            date.format("%Y-%m")
        );

        self.get(id).await
    }

    /// Update a plan; absent fields keep their stored values and the
    /// resulting key is re-checked against other plans
    pub async fn update(&self, id: i32, input: UpdatePlanInput) -> AppResult<PlanRecord> {
        input.validate()?;
        let existing = self.get(id).await?;

        let subdivision_id = input.subdivision_id.unwrap_or(existing.subdivision_id);
        let material_id = input.material_id.unwrap_or(existing.material_id);
        let date = month_start(input.date.unwrap_or(existing.date));
        let quantity = input.quantity.unwrap_or(existing.quantity);

        check_quantity(quantity)?;
        if input.subdivision_id.is_some() {
            require_subdivision(&self.db, subdivision_id).await?;
        }
        if input.material_id.is_some() {
            require_material(&self.db, material_id).await?;
        }
        self.ensure_unique(subdivision_id, material_id, date, Some(id))
            .await?;

        sqlx::query(&format!(
            r#"
            UPDATE {}
            SET subdivision_id = $1, material_id = $2, date = $3, quantity = $4
            WHERE id = $5
            "#,
            self.table()
        ))
        .bind(subdivision_id)
        .bind(material_id)
        .bind(date)
        .bind(quantity)
        .bind(id)
        .execute(&self.db)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table()))
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(self.kind.to_string()));
        }
        Ok(())
    }

    async fn ensure_unique(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(&format!(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM {}
                WHERE subdivision_id = $1 AND material_id = $2 AND date = $3
                  AND ($4::INTEGER IS NULL OR id <> $4)
            )
            "#,
            self.table()
        ))
        .bind(subdivision_id)
        .bind(material_id)
        .bind(date)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        ensure_key_free(taken, &self.kind.to_string())
    }
}
