//! In-memory planning store keyed by composite natural keys

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::models::{FactKind, PlanningFact, Regulation};
use crate::store::PlanningStore;
use crate::types::PlanningMonth;

type FactKeyTuple = (FactKind, i32, i32, PlanningMonth);
type TransferKeyTuple = (i32, i32, PlanningMonth);

#[derive(Default)]
struct Tables {
    facts: HashMap<FactKeyTuple, PlanningFact>,
    transfers_by_destination: HashMap<TransferKeyTuple, PlanningFact>,
    regulations: HashMap<(i32, i32), Regulation>,
}

/// Planning store backed by hash maps, for tests and offline use.
///
/// Inserting a fact whose key already exists replaces it, so the store
/// always holds at most one fact per (kind, subdivision, material, month).
#[derive(Default)]
pub struct InMemoryPlanningStore {
    tables: RwLock<Tables>,
}

impl InMemoryPlanningStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sales, inventory or production fact. Transfer facts go
    /// through [`InMemoryPlanningStore::insert_transfer`].
    pub fn insert_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
        quantity: i32,
    ) -> Result<(), StoreError> {
        let fact = PlanningFact {
            kind,
            subdivision_id,
            material_id,
            date: PlanningMonth::of(date).first_day(),
            quantity,
        };
        let mut tables = self.write()?;
        tables
            .facts
            .insert((kind, subdivision_id, material_id, fact.month()), fact);
        Ok(())
    }

    /// Insert a transfer from `source_id` to `destination_id`. The first
    /// transfer stored for a month is the one returned by both source and
    /// destination lookups, matching the lowest-id row of the database.
    pub fn insert_transfer(
        &self,
        source_id: i32,
        destination_id: i32,
        material_id: i32,
        date: NaiveDate,
        quantity: i32,
    ) -> Result<(), StoreError> {
        let month = PlanningMonth::of(date);
        let by_source = PlanningFact {
            kind: FactKind::TransferPlan,
            subdivision_id: source_id,
            material_id,
            date: month.first_day(),
            quantity,
        };
        let by_destination = PlanningFact {
            subdivision_id: destination_id,
            ..by_source.clone()
        };

        let mut tables = self.write()?;
        tables
            .facts
            .entry((FactKind::TransferPlan, source_id, material_id, month))
            .or_insert(by_source);
        tables
            .transfers_by_destination
            .entry((destination_id, material_id, month))
            .or_insert(by_destination);
        Ok(())
    }

    pub fn insert_regulation(
        &self,
        subdivision_id: i32,
        material_id: i32,
        days_count: i32,
    ) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.regulations.insert(
            (subdivision_id, material_id),
            Regulation {
                subdivision_id,
                material_id,
                days_count,
            },
        );
        Ok(())
    }

    pub fn remove_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        let mut tables = self.write()?;
        Ok(tables
            .facts
            .remove(&(kind, subdivision_id, material_id, PlanningMonth::of(date))))
    }

    /// Number of stored facts, transfers counted once
    pub fn fact_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.facts.len())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PlanningStore for InMemoryPlanningStore {
    async fn get_fact(
        &self,
        kind: FactKind,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .facts
            .get(&(kind, subdivision_id, material_id, PlanningMonth::of(date)))
            .cloned())
    }

    async fn get_transfer_fact_by_destination(
        &self,
        subdivision_id: i32,
        material_id: i32,
        date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .transfers_by_destination
            .get(&(subdivision_id, material_id, PlanningMonth::of(date)))
            .cloned())
    }

    async fn get_regulation(
        &self,
        subdivision_id: i32,
        material_id: i32,
    ) -> Result<Option<Regulation>, StoreError> {
        let tables = self.read()?;
        Ok(tables.regulations.get(&(subdivision_id, material_id)).cloned())
    }
}
