//! REST API
//!
//! Provides:
//! - Catalog CRUD (`/categories`, `/products`)
//! - Inventory levels and low-stock report (`/inventory`)
//! - Sales listing, filtering and period analytics (`/sales`)

pub mod extract;
pub mod handlers;
mod server;
pub mod types;

pub use server::{build_router, ApiServer};
