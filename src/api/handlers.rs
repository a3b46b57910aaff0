//! HTTP request handlers
//!
//! Handlers only translate between HTTP and the services layer.

use super::types::{
    AnnualQuery, ComparisonQuery, DailyQuery, HealthResponse, HistoryQuery, MessageResponse,
    MonthlyQuery, Pagination, SaleFilterQuery, WeeklyQuery, DEFAULT_HISTORY_LIMIT, MAX_PAGE_SIZE,
};
use crate::analytics::{ComparisonResult, DateRange, Granularity, PeriodSummary, SaleRecord};
use crate::db::sqlite::{
    Category, Inventory, InventoryDetail, InventoryHistory, InventoryUpdate, LowStockProduct,
    NewCategory, NewProduct, NewSale, Product, ProductDetail, ProductUpdate, SaleDetail,
};
use crate::error::Result;
use crate::services::{CatalogService, InventoryService, SalesService};
use crate::state::AppState;
use super::extract::{ValidPath, ValidQuery};
use axum::extract::{Json, State};
use std::sync::Arc;

type AppStateRef = State<Arc<AppState>>;

// ============================================================================
// Service
// ============================================================================

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to E-commerce Admin API".to_string(),
    })
}

/// Always 200; the body says whether the database answered
pub async fn health_check(State(state): AppStateRef) -> Json<HealthResponse> {
    let response = match state.db.ping() {
        Ok(()) => HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
        },
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HealthResponse {
                status: "unhealthy".to_string(),
                database: e.to_string(),
            }
        }
    };
    Json(response)
}

// ============================================================================
// Categories
// ============================================================================

pub async fn list_categories(
    State(state): AppStateRef,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Category>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(CatalogService::list_categories(&state, offset, limit)?))
}

pub async fn create_category(
    State(state): AppStateRef,
    Json(req): Json<NewCategory>,
) -> Result<Json<Category>> {
    Ok(Json(CatalogService::create_category(&state, &req)?))
}

// ============================================================================
// Products
// ============================================================================

pub async fn list_products(
    State(state): AppStateRef,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Product>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(CatalogService::list_products(&state, offset, limit)?))
}

pub async fn get_product(
    State(state): AppStateRef,
    ValidPath(product_id): ValidPath<i64>,
) -> Result<Json<ProductDetail>> {
    Ok(Json(CatalogService::get_product(&state, product_id)?))
}

pub async fn create_product(
    State(state): AppStateRef,
    Json(req): Json<NewProduct>,
) -> Result<Json<Product>> {
    Ok(Json(CatalogService::create_product(&state, &req)?))
}

pub async fn update_product(
    State(state): AppStateRef,
    ValidPath(product_id): ValidPath<i64>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    Ok(Json(CatalogService::update_product(&state, product_id, &update)?))
}

pub async fn delete_product(
    State(state): AppStateRef,
    ValidPath(product_id): ValidPath<i64>,
) -> Result<Json<Product>> {
    Ok(Json(CatalogService::delete_product(&state, product_id)?))
}

pub async fn products_by_category(
    State(state): AppStateRef,
    ValidPath(category_id): ValidPath<i64>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Product>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(CatalogService::products_in_category(
        &state,
        category_id,
        offset,
        limit,
    )?))
}

// ============================================================================
// Inventory
// ============================================================================

pub async fn list_inventory(
    State(state): AppStateRef,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<InventoryDetail>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(InventoryService::list(&state, offset, limit)?))
}

pub async fn low_stock(State(state): AppStateRef) -> Result<Json<Vec<LowStockProduct>>> {
    Ok(Json(InventoryService::low_stock(&state)?))
}

pub async fn update_inventory(
    State(state): AppStateRef,
    ValidPath(product_id): ValidPath<i64>,
    Json(update): Json<InventoryUpdate>,
) -> Result<Json<Inventory>> {
    Ok(Json(InventoryService::update(&state, product_id, &update)?))
}

pub async fn inventory_history(
    State(state): AppStateRef,
    ValidPath(product_id): ValidPath<i64>,
    ValidQuery(query): ValidQuery<HistoryQuery>,
) -> Result<Json<Vec<InventoryHistory>>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).min(MAX_PAGE_SIZE);
    Ok(Json(InventoryService::history(&state, product_id, limit)?))
}

// ============================================================================
// Sales
// ============================================================================

pub async fn list_sales(
    State(state): AppStateRef,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<SaleDetail>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(SalesService::list(&state, offset, limit)?))
}

pub async fn create_sale(
    State(state): AppStateRef,
    Json(req): Json<NewSale>,
) -> Result<Json<SaleRecord>> {
    Ok(Json(SalesService::record(&state, &req)?))
}

pub async fn daily_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<DailyQuery>,
) -> Result<Json<Vec<PeriodSummary>>> {
    Ok(Json(SalesService::summarize(&state, Granularity::Day, query.days)?))
}

pub async fn weekly_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<WeeklyQuery>,
) -> Result<Json<Vec<PeriodSummary>>> {
    Ok(Json(SalesService::summarize(&state, Granularity::Week, query.weeks)?))
}

pub async fn monthly_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<MonthlyQuery>,
) -> Result<Json<Vec<PeriodSummary>>> {
    Ok(Json(SalesService::summarize(&state, Granularity::Month, query.months)?))
}

pub async fn annual_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<AnnualQuery>,
) -> Result<Json<Vec<PeriodSummary>>> {
    Ok(Json(SalesService::summarize(&state, Granularity::Year, query.years)?))
}

pub async fn compare_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<ComparisonQuery>,
) -> Result<Json<ComparisonResult>> {
    let period1 = DateRange::new(query.period1_start, query.period1_end);
    let period2 = DateRange::new(query.period2_start, query.period2_end);
    Ok(Json(SalesService::compare(&state, period1, period2)?))
}

pub async fn filter_sales(
    State(state): AppStateRef,
    ValidQuery(query): ValidQuery<SaleFilterQuery>,
) -> Result<Json<Vec<SaleDetail>>> {
    Ok(Json(SalesService::filter(&state, &query.to_filter())?))
}
