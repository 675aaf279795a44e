//! Route definitions for the Supply Chain Planning Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Derived plan calculations
        .nest("/calculations", calculation_routes())
        // Reference data
        .nest("/subdivisions", subdivision_routes())
        .nest("/materials", material_routes())
        // Monthly plans
        .nest("/sales-plans", sales_plan_routes())
        .nest("/inventory-plans", inventory_plan_routes())
        .nest("/production-plans", production_plan_routes())
        .nest("/transfer-plans", transfer_plan_routes())
        .nest("/regulations", regulation_routes())
        // Raw material movements
        .nest("/raw-material-purchases", purchase_routes())
        .nest("/raw-material-write-offs", write_off_routes())
        // Bills of materials and supply routes
        .nest("/technological-cards", technological_card_routes())
        .nest("/supply-sources", supply_source_routes())
}

fn calculation_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", post(handlers::calculate_inventory))
        .route("/production", post(handlers::calculate_production))
        .route("/transfer", post(handlers::calculate_transfer))
        .route("/raw-material", post(handlers::calculate_raw_material))
}

fn subdivision_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_subdivisions).post(handlers::create_subdivision),
        )
        .route(
            "/:id",
            get(handlers::get_subdivision)
                .put(handlers::update_subdivision)
                .delete(handlers::delete_subdivision),
        )
}

fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_materials).post(handlers::create_material))
        .route(
            "/:id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
}

fn sales_plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sales_plans).post(handlers::create_sales_plan),
        )
        .route(
            "/:id",
            get(handlers::get_sales_plan)
                .put(handlers::update_sales_plan)
                .delete(handlers::delete_sales_plan),
        )
}

fn inventory_plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory_plans).post(handlers::create_inventory_plan),
        )
        .route(
            "/:id",
            get(handlers::get_inventory_plan)
                .put(handlers::update_inventory_plan)
                .delete(handlers::delete_inventory_plan),
        )
}

fn production_plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_production_plans).post(handlers::create_production_plan),
        )
        .route(
            "/:id",
            get(handlers::get_production_plan)
                .put(handlers::update_production_plan)
                .delete(handlers::delete_production_plan),
        )
}

fn transfer_plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transfer_plans).post(handlers::create_transfer_plan),
        )
        .route(
            "/:id",
            get(handlers::get_transfer_plan)
                .put(handlers::update_transfer_plan)
                .delete(handlers::delete_transfer_plan),
        )
}

fn regulation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_regulations).post(handlers::create_regulation),
        )
        .route(
            "/:id",
            get(handlers::get_regulation)
                .put(handlers::update_regulation)
                .delete(handlers::delete_regulation),
        )
}

fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchases).post(handlers::create_purchase))
        .route(
            "/:id",
            get(handlers::get_purchase)
                .put(handlers::update_purchase)
                .delete(handlers::delete_purchase),
        )
}

fn write_off_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_write_offs).post(handlers::create_write_off),
        )
        .route(
            "/:id",
            get(handlers::get_write_off)
                .put(handlers::update_write_off)
                .delete(handlers::delete_write_off),
        )
}

fn technological_card_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_technological_cards).post(handlers::create_technological_card),
        )
        .route(
            "/:id",
            get(handlers::get_technological_card)
                .put(handlers::update_technological_card)
                .delete(handlers::delete_technological_card),
        )
}

fn supply_source_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_supply_sources).post(handlers::create_supply_source),
        )
        .route(
            "/:id",
            get(handlers::get_supply_source)
                .put(handlers::update_supply_source)
                .delete(handlers::delete_supply_source),
        )
}
