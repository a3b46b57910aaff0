//! Services Layer
//!
//! Business logic behind the REST handlers. Every service call checks out one
//! pooled connection, does its work on it, and releases it on return.
//!
//! # Services
//!
//! - `SalesService` - Record and list sales, period summaries, comparisons
//! - `CatalogService` - Categories and products
//! - `InventoryService` - Stock levels, low-stock report, change history

pub mod catalog_service;
pub mod inventory_service;
pub mod sales_service;

pub use catalog_service::CatalogService;
pub use inventory_service::InventoryService;
pub use sales_service::SalesService;
