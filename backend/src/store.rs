//! PostgreSQL implementation of the planning data store
//!
//! Plan rows are stored with their date normalized to the first day of the
//! month, so every lookup binds the month start of the requested date.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{month_start, FactKind, PlanningFact, PlanningStore, Regulation, StoreError};
use sqlx::PgPool;

/// Planning store backed by the application database
#[derive(Clone)]
pub struct PgPlanningStore {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct FactRow {
    subdivision_id: i32,
    material_id: i32,
    date: NaiveDate,
    quantity: i32,
}

impl FactRow {
    fn into_fact(self, kind: FactKind) -> PlanningFact {
        PlanningFact {
            kind,
            subdivision_id: self.subdivision_id,
            material_id: self.material_id,
            date: self.date,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegulationRow {
    subdivision_id: i32,
    material_id: i32,
    days_count: i32,
}

/// Table holding facts of the given kind
pub(crate) fn fact_table(kind: FactKind) -> &'static str {
    match kind {
        FactKind::SalesPlan => "sales_plans",
        FactKind::InventoryPlan => "inventory_plans",
        FactKind::ProductionPlan => "production_plans",
        FactKind::TransferPlan => "transfer_plans",
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    tracing::warn!("Planning store query failed: {}", err);
    StoreError::Unavailable(err.to_string())
}

impl PgPlanningStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanningStore for PgPlanningStore {
    async fn get_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        let sql = match kind {
            FactKind::TransferPlan => r#"
                SELECT source_subdivision_id AS subdivision_id, material_id,
                       transfer_date AS date, quantity
                FROM transfer_plans
                WHERE source_subdivision_id = $1 AND material_id = $2 AND transfer_date = $3
                ORDER BY id
                LIMIT 1
                "#
            .to_string(),
            _ => format!(
                r#"
                SELECT subdivision_id, material_id, date, quantity
                FROM {}
                WHERE subdivision_id = $1 AND material_id = $2 AND date = $3
                "#,
                fact_table(kind)
            ),
        };

        let row = sqlx::query_as::<_, FactRow>(&sql)
            .bind(subdivision_id)
            .bind(material_id)
            .bind(month_start(date))
            .fetch_optional(&self.db)
            .await
            .map_err(unavailable)?;

        Ok(row.map(|r| r.into_fact(kind)))
    }

    async fn get_transfer_fact_by_destination(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        // Several sources may ship to one destination; the earliest row wins
        let row = sqlx::query_as::<_, FactRow>(
            r#"
            SELECT destination_subdivision_id AS subdivision_id, material_id,
                   transfer_date AS date, quantity
            FROM transfer_plans
            WHERE destination_subdivision_id = $1 AND material_id = $2 AND transfer_date = $3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(subdivision_id)
        .bind(material_id)
        .bind(month_start(date))
        .fetch_optional(&self.db)
        .await
        .map_err(unavailable)?;

        Ok(row.map(|r| r.into_fact(FactKind::TransferPlan)))
    }

    async fn get_regulation(
        &self,
        subdivision_id: i32,
        material_id: i32,
    ) -> Result<Option<Regulation>, StoreError> {
        let row = sqlx::query_as::<_, RegulationRow>(
            r#"
            SELECT subdivision_id, material_id, days_count
            FROM regulations
            WHERE subdivision_id = $1 AND material_id = $2
            "#,
        )
        .bind(subdivision_id)
        .bind(material_id)
        .fetch_optional(&self.db)
        .await
        .map_err(unavailable)?;

        Ok(row.map(|r| Regulation {
            subdivision_id: r.subdivision_id,
            material_id: r.material_id,
            days_count: r.days_count,
        }))
    }
}
