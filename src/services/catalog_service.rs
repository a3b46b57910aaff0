//! Catalog Service
//!
//! Categories and products.

use crate::db::sqlite::{
    category, product, Category, NewCategory, NewProduct, Product, ProductDetail, ProductUpdate,
};
use crate::error::{AppError, Result};
use crate::state::AppState;
use tracing::info;

/// Catalog service for business logic
pub struct CatalogService;

impl CatalogService {
    pub fn list_categories(state: &AppState, offset: u32, limit: u32) -> Result<Vec<Category>> {
        let conn = state.db.conn()?;
        category::list_categories(&conn, offset, limit)
    }

    pub fn create_category(state: &AppState, req: &NewCategory) -> Result<Category> {
        let conn = state.db.conn()?;
        let created = category::create_category(&conn, req)?;
        info!("CatalogService::create_category - {}", created.name);
        Ok(created)
    }

    pub fn list_products(state: &AppState, offset: u32, limit: u32) -> Result<Vec<Product>> {
        let conn = state.db.conn()?;
        product::list_products(&conn, offset, limit)
    }

    /// Product with its category, or `NotFound`
    pub fn get_product(state: &AppState, id: i64) -> Result<ProductDetail> {
        let conn = state.db.conn()?;
        product::get_product_detail(&conn, id)?.ok_or_else(|| AppError::not_found("Product", id))
    }

    /// Products of an existing category
    pub fn products_in_category(
        state: &AppState,
        category_id: i64,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Product>> {
        let conn = state.db.conn()?;
        if !category::category_exists(&conn, category_id)? {
            return Err(AppError::not_found("Category", category_id));
        }
        product::list_products_by_category(&conn, category_id, offset, limit)
    }

    pub fn create_product(state: &AppState, req: &NewProduct) -> Result<Product> {
        let mut conn = state.db.conn()?;
        product::create_product(&mut conn, req)
    }

    pub fn update_product(state: &AppState, id: i64, update: &ProductUpdate) -> Result<Product> {
        let conn = state.db.conn()?;
        product::update_product(&conn, id, update)?.ok_or_else(|| AppError::not_found("Product", id))
    }

    /// Delete a product and everything hanging off it
    pub fn delete_product(state: &AppState, id: i64) -> Result<Product> {
        let conn = state.db.conn()?;
        product::delete_product(&conn, id)?.ok_or_else(|| AppError::not_found("Product", id))
    }
}
