//! Planning calculation engine
//!
//! Pure formulas over decimal quantities. Three of the four plans share the
//! shape `current stock - baseline stock + flow`; the inventory plan is a
//! ratio of sales cover to month length.

use rust_decimal::Decimal;

/// Inventory to hold so that `stock_norm_days` days of the month's sales are
/// covered: `sales * stock_norm_days / days_in_month`.
///
/// `days_in_month` must be positive; every calendar month satisfies this.
pub fn calculate_inventory_plan(
    sales_quantity: Decimal,
    stock_norm_days: Decimal,
    days_in_month: Decimal,
) -> Decimal {
    sales_quantity * stock_norm_days / days_in_month
}

/// Production needed to build inventory from `previous_inventory` to
/// `current_inventory` while routing `transfer_in_quantity` onward.
pub fn calculate_production_plan(
    current_inventory: Decimal,
    previous_inventory: Decimal,
    transfer_in_quantity: Decimal,
) -> Decimal {
    stock_delta_plus_flow(current_inventory, previous_inventory, transfer_in_quantity)
}

/// Transfers needed to build inventory while covering `sales_quantity`.
pub fn calculate_transfer_plan(
    current_inventory: Decimal,
    previous_inventory: Decimal,
    sales_quantity: Decimal,
) -> Decimal {
    stock_delta_plus_flow(current_inventory, previous_inventory, sales_quantity)
}

/// Raw material to buy to build inventory while feeding `production_quantity`.
pub fn calculate_raw_material_purchase_plan(
    current_inventory: Decimal,
    previous_inventory: Decimal,
    production_quantity: Decimal,
) -> Decimal {
    stock_delta_plus_flow(current_inventory, previous_inventory, production_quantity)
}

/// Negative results signal over-supply and are returned unclamped.
fn stock_delta_plus_flow(current: Decimal, baseline: Decimal, flow: Decimal) -> Decimal {
    current - baseline + flow
}

/// Overflow-checked [`calculate_inventory_plan`] for unbounded client input.
///
/// `None` when a step overflows or `days_in_month` is zero.
pub fn checked_inventory_plan(
    sales_quantity: Decimal,
    stock_norm_days: Decimal,
    days_in_month: Decimal,
) -> Option<Decimal> {
    sales_quantity
        .checked_mul(stock_norm_days)?
        .checked_div(days_in_month)
}

/// Overflow-checked form of the production, transfer and raw material plans
pub fn checked_stock_delta_plus_flow(
    current: Decimal,
    baseline: Decimal,
    flow: Decimal,
) -> Option<Decimal> {
    current.checked_sub(baseline)?.checked_add(flow)
}
