//! Inventory Service
//!
//! Stock levels, low-stock alerts and change history.

use crate::db::sqlite::{
    inventory, Inventory, InventoryDetail, InventoryHistory, InventoryUpdate, LowStockProduct,
};
use crate::error::{AppError, Result};
use crate::state::AppState;
use tracing::info;

/// Inventory service for business logic
pub struct InventoryService;

impl InventoryService {
    pub fn list(state: &AppState, offset: u32, limit: u32) -> Result<Vec<InventoryDetail>> {
        let conn = state.db.conn()?;
        inventory::list_inventory(&conn, offset, limit)
    }

    pub fn low_stock(state: &AppState) -> Result<Vec<LowStockProduct>> {
        let conn = state.db.conn()?;
        inventory::get_low_stock(&conn)
    }

    pub fn update(state: &AppState, product_id: i64, update: &InventoryUpdate) -> Result<Inventory> {
        let mut conn = state.db.conn()?;
        let updated = inventory::update_inventory(&mut conn, product_id, update)?
            .ok_or_else(|| Self::missing(product_id))?;

        info!(
            "InventoryService::update - product {} now {} (threshold {})",
            product_id, updated.quantity, updated.low_stock_threshold
        );
        Ok(updated)
    }

    /// Latest `limit` stock changes of a product, newest first
    pub fn history(state: &AppState, product_id: i64, limit: u32) -> Result<Vec<InventoryHistory>> {
        let conn = state.db.conn()?;
        let row = inventory::get_inventory(&conn, product_id)?.ok_or_else(|| Self::missing(product_id))?;
        inventory::get_history(&conn, row.id, limit)
    }

    fn missing(product_id: i64) -> AppError {
        AppError::NotFound(format!("Inventory record for product {} not found", product_id))
    }
}
