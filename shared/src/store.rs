//! Planning data store contract
//!
//! The calculation core reads planning facts only through this trait. All
//! lookups are point queries on a composite natural key; facts are matched
//! by the month of `date`, never by the exact day.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{FactKind, PlanningFact, Regulation};

#[async_trait]
pub trait PlanningStore: Send + Sync {
    /// Fact of `kind` for (subdivision, material, month of `date`).
    ///
    /// For [`FactKind::TransferPlan`] the subdivision is the transfer's
    /// source; use [`PlanningStore::get_transfer_fact_by_destination`] to
    /// look transfers up by where they arrive.
    async fn get_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError>;

    /// Transfer arriving at `subdivision_id` in the month of `date`
    async fn get_transfer_fact_by_destination(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError>;

    /// Stock-cover regulation for a subdivision/material pair
    async fn get_regulation(
        &self,
        subdivision_id: i32,
        material_id: i32,
    ) -> Result<Option<Regulation>, StoreError>;
}
