//! Calculation pipeline tests
//!
//! Resolves inputs from an in-memory planning store and checks:
//! - worked examples for all four plans
//! - missing facts surface as MissingFact naming the first absent record
//! - store outages surface as StoreUnavailable
//! - invalid requests are rejected before any lookup
//! - resolving the same request twice yields identical results

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use shared::error::{MissingRecord, StoreError};
use shared::{
    CalculationKind, CalculationRequest, FactKind, InMemoryPlanningStore, InputResolver,
    PlanCalculator, PlanningError, PlanningFact, PlanningMonth, PlanningStore, Regulation,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const SUBDIVISION: i32 = 1;
const MATERIAL: i32 = 10;

/// Store with every fact the four calculations need for March 2024
fn seeded_store() -> Arc<InMemoryPlanningStore> {
    let store = InMemoryPlanningStore::new();
    store.insert_regulation(SUBDIVISION, MATERIAL, 10).unwrap();
    store
        .insert_fact(FactKind::SalesPlan, SUBDIVISION, MATERIAL, date(2024, 3, 1), 310)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, SUBDIVISION, MATERIAL, date(2024, 3, 1), 150)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, SUBDIVISION, MATERIAL, date(2024, 2, 1), 100)
        .unwrap();
    store
        .insert_fact(FactKind::ProductionPlan, SUBDIVISION, MATERIAL, date(2024, 3, 1), 40)
        .unwrap();
    store
        .insert_transfer(7, SUBDIVISION, MATERIAL, date(2024, 3, 1), 20)
        .unwrap();
    Arc::new(store)
}

fn calculator(store: Arc<InMemoryPlanningStore>) -> PlanCalculator {
    PlanCalculator::new(store)
}

/// Store that fails every lookup and counts how often it was asked
#[derive(Default)]
struct UnavailableStore {
    calls: AtomicUsize,
}

#[async_trait]
impl PlanningStore for UnavailableStore {
    async fn get_fact(
        &self,
        _kind: FactKind,
        _subdivision_id: i32,
        _material_id: i32,
        _date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_transfer_fact_by_destination(
        &self,
        _subdivision_id: i32,
        _material_id: i32,
        _date: NaiveDate,
    ) -> Result<Option<PlanningFact>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_regulation(
        &self,
        _subdivision_id: i32,
        _material_id: i32,
    ) -> Result<Option<Regulation>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

// ============================================================================
// Worked examples
// ============================================================================

#[tokio::test]
async fn test_inventory_plan_uses_days_in_request_month() {
    let calc = calculator(seeded_store());
    let request = CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 17));

    let result = calc.calculate_inventory(&request).await.unwrap();

    // 310 * 10 / 31
    assert_eq!(result.inventory_plan, Decimal::from(100));
    assert_eq!(result.sales_plan, Decimal::from(310));
    assert_eq!(result.stock_norm, Decimal::from(10));
    assert_eq!(result.date, date(2024, 3, 17));
}

#[tokio::test]
async fn test_inventory_plan_thirty_day_month() {
    let store = InMemoryPlanningStore::new();
    store.insert_regulation(2, 3, 10).unwrap();
    store
        .insert_fact(FactKind::SalesPlan, 2, 3, date(2024, 4, 1), 300)
        .unwrap();
    let calc = calculator(Arc::new(store));

    let result = calc
        .calculate_inventory(&CalculationRequest::new(2, 3, date(2024, 4, 1)))
        .await
        .unwrap();
    assert_eq!(result.inventory_plan, Decimal::from(100));
}

#[tokio::test]
async fn test_inventory_plan_in_last_representable_month() {
    let store = InMemoryPlanningStore::new();
    store.insert_regulation(SUBDIVISION, MATERIAL, 10).unwrap();
    store
        .insert_fact(FactKind::SalesPlan, SUBDIVISION, MATERIAL, NaiveDate::MAX, 310)
        .unwrap();
    let calc = calculator(Arc::new(store));

    let result = calc
        .calculate_inventory(&CalculationRequest::new(SUBDIVISION, MATERIAL, NaiveDate::MAX))
        .await
        .unwrap();

    // December has 31 days even when the following January is unrepresentable
    assert_eq!(result.inventory_plan, Decimal::from(100));
    assert_eq!(result.date, NaiveDate::MAX);
}

#[tokio::test]
async fn test_production_plan_uses_transfer_into_subdivision() {
    let calc = calculator(seeded_store());
    let request = CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 31));

    let result = calc.calculate_production(&request).await.unwrap();

    assert_eq!(result.production_plan, Decimal::from(70));
    assert_eq!(result.current_inventory, Decimal::from(150));
    assert_eq!(result.previous_inventory, Decimal::from(100));
    assert_eq!(result.transfer_quantity, Decimal::from(20));
    assert_eq!(result.date, date(2024, 3, 31));
}

#[tokio::test]
async fn test_transfer_plan_worked_example() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::InventoryPlan, 4, 5, date(2024, 6, 1), 80)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, 4, 5, date(2024, 5, 1), 120)
        .unwrap();
    store
        .insert_fact(FactKind::SalesPlan, 4, 5, date(2024, 6, 1), 50)
        .unwrap();
    let calc = calculator(Arc::new(store));

    let result = calc
        .calculate_transfer(&CalculationRequest::new(4, 5, date(2024, 6, 30)))
        .await
        .unwrap();

    assert_eq!(result.transfer_plan, Decimal::from(10));
    assert_eq!(result.sales_amount, Decimal::from(50));
}

#[tokio::test]
async fn test_raw_material_plan_worked_example() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::InventoryPlan, 4, 5, date(2024, 1, 1), 200)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, 4, 5, date(2023, 12, 1), 150)
        .unwrap();
    store
        .insert_fact(FactKind::ProductionPlan, 4, 5, date(2024, 1, 1), 40)
        .unwrap();
    let calc = calculator(Arc::new(store));

    // January looks back across the year boundary
    let result = calc
        .calculate_raw_material(&CalculationRequest::new(4, 5, date(2024, 1, 31)))
        .await
        .unwrap();

    assert_eq!(result.raw_material_plan, Decimal::from(90));
    assert_eq!(result.previous_inventory, Decimal::from(150));
}

#[tokio::test]
async fn test_negative_production_plan_is_returned() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2024, 3, 1), 50)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2024, 2, 1), 200)
        .unwrap();
    store.insert_transfer(2, 1, 1, date(2024, 3, 1), 30).unwrap();
    let calc = calculator(Arc::new(store));

    let result = calc
        .calculate_production(&CalculationRequest::new(1, 1, date(2024, 3, 1)))
        .await
        .unwrap();
    assert_eq!(result.production_plan, Decimal::from(-120));
}

#[tokio::test]
async fn test_dispatch_matches_direct_calls() {
    let calc = calculator(seeded_store());
    let request = CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 10));

    for kind in [
        CalculationKind::Inventory,
        CalculationKind::Production,
        CalculationKind::Transfer,
        CalculationKind::RawMaterial,
    ] {
        let result = calc.calculate(kind, &request).await.unwrap();
        assert_eq!(result.kind(), kind);
        assert_eq!(result.date(), request.date);
    }

    let transfer = calc
        .calculate(CalculationKind::Transfer, &request)
        .await
        .unwrap();
    // 150 - 100 + 310
    assert_eq!(transfer.plan_value(), Decimal::from(360));
}

// ============================================================================
// Previous month resolution
// ============================================================================

#[tokio::test]
async fn test_march_31_reads_february_inventory() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2023, 3, 1), 90)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2023, 2, 1), 60)
        .unwrap();
    store
        .insert_fact(FactKind::SalesPlan, 1, 1, date(2023, 3, 1), 5)
        .unwrap();
    let resolver = InputResolver::new(Arc::new(store));

    let inputs = resolver
        .resolve_transfer_inputs(1, 1, date(2023, 3, 31))
        .await
        .unwrap();

    assert_eq!(inputs.previous_inventory.quantity, 60);
    assert_eq!(
        inputs.previous_inventory.month(),
        PlanningMonth { year: 2023, month: 2 }
    );
}

// ============================================================================
// Failure modes
// ============================================================================

#[tokio::test]
async fn test_missing_sales_plan_is_missing_fact() {
    let store = InMemoryPlanningStore::new();
    store.insert_regulation(1, 1, 10).unwrap();
    let calc = calculator(Arc::new(store));

    let err = calc
        .calculate_inventory(&CalculationRequest::new(1, 1, date(2024, 3, 1)))
        .await
        .unwrap_err();

    match err {
        PlanningError::MissingFact { record, key } => {
            assert_eq!(record, MissingRecord::Fact(FactKind::SalesPlan));
            assert_eq!(key.subdivision_id, 1);
            assert_eq!(key.material_id, 1);
            assert_eq!(key.month, Some(PlanningMonth { year: 2024, month: 3 }));
        }
        other => panic!("expected MissingFact, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_regulation_is_missing_fact() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::SalesPlan, 1, 1, date(2024, 3, 1), 300)
        .unwrap();
    let calc = calculator(Arc::new(store));

    let err = calc
        .calculate_inventory(&CalculationRequest::new(1, 1, date(2024, 3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PlanningError::MissingFact {
            record: MissingRecord::Regulation,
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_previous_inventory_is_reported_with_previous_month() {
    let store = seeded_store();
    store
        .remove_fact(FactKind::InventoryPlan, SUBDIVISION, MATERIAL, date(2024, 2, 1))
        .unwrap();
    let calc = calculator(store);

    let err = calc
        .calculate_raw_material(&CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 31)))
        .await
        .unwrap_err();

    match err {
        PlanningError::MissingFact { record, key } => {
            assert_eq!(record, MissingRecord::Fact(FactKind::InventoryPlan));
            assert_eq!(key.month, Some(PlanningMonth { year: 2024, month: 2 }));
        }
        other => panic!("expected MissingFact, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transfer_from_subdivision_does_not_feed_its_production() {
    let store = InMemoryPlanningStore::new();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2024, 3, 1), 150)
        .unwrap();
    store
        .insert_fact(FactKind::InventoryPlan, 1, 1, date(2024, 2, 1), 100)
        .unwrap();
    // Outbound from subdivision 1, not inbound
    store.insert_transfer(1, 2, 1, date(2024, 3, 1), 20).unwrap();
    let calc = calculator(Arc::new(store));

    let err = calc
        .calculate_production(&CalculationRequest::new(1, 1, date(2024, 3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PlanningError::MissingFact {
            record: MissingRecord::Fact(FactKind::TransferPlan),
            ..
        }
    ));
}

#[tokio::test]
async fn test_store_outage_is_not_missing_fact() {
    let store = Arc::new(UnavailableStore::default());
    let calc = PlanCalculator::new(store.clone());

    let err = calc
        .calculate_production(&CalculationRequest::new(1, 1, date(2024, 3, 1)))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PlanningError::StoreUnavailable("connection refused".into())
    );
    // The first failing lookup aborts the resolution
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_lookup() {
    let store = Arc::new(UnavailableStore::default());
    let calc = PlanCalculator::new(store.clone());

    let err = calc
        .calculate_inventory(&CalculationRequest::new(0, 1, date(2024, 3, 1)))
        .await
        .unwrap_err();

    match err {
        PlanningError::InvalidInput { field, message } => {
            assert_eq!(field, "subdivision_id");
            assert_eq!(message, "subdivision_id must be positive");
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_resolving_twice_yields_identical_inputs() {
    let store = seeded_store();
    let resolver = InputResolver::new(store.clone());
    let calc = calculator(store);
    let request = CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 5));

    let first = resolver
        .resolve_production_inputs(SUBDIVISION, MATERIAL, request.date)
        .await
        .unwrap();
    let second = resolver
        .resolve_production_inputs(SUBDIVISION, MATERIAL, request.date)
        .await
        .unwrap();
    assert_eq!(first, second);

    let a = calc.calculate_inventory(&request).await.unwrap();
    let b = calc.calculate_inventory(&request).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_concurrent_calculations_share_one_store() {
    let calc = calculator(seeded_store());
    let request = CalculationRequest::new(SUBDIVISION, MATERIAL, date(2024, 3, 5));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let calc = calc.clone();
            let request = request.clone();
            tokio::spawn(async move { calc.calculate_production(&request).await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.production_plan, Decimal::from(70));
    }
}
