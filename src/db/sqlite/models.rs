//! SQLite database models

use crate::analytics::SaleRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Create request for a category
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Product model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Product with its category embedded
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
}

/// Create request for a product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i64,
}

/// Partial product update; `None` fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
}

/// Stock level of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub low_stock_threshold: i64,
    pub last_updated: NaiveDateTime,
}

/// Inventory row with its product embedded
#[derive(Debug, Clone, Serialize)]
pub struct InventoryDetail {
    #[serde(flatten)]
    pub inventory: Inventory,
    pub product: Product,
}

/// Partial inventory update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryUpdate {
    pub quantity: Option<i64>,
    pub low_stock_threshold: Option<i64>,
}

/// One recorded stock level change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryHistory {
    pub id: i64,
    pub inventory_id: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub change_date: NaiveDateTime,
}

/// Product at or below its low stock threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockProduct {
    pub product_id: i64,
    pub product_name: String,
    pub current_quantity: i64,
    pub threshold: i64,
}

/// Sale with its product embedded
#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: SaleRecord,
    pub product: Product,
}

/// Create request for a sale
#[derive(Debug, Clone, Deserialize)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity: i64,
    pub total_price: f64,
    pub platform: Option<String>,
}
