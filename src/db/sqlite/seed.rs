//! Sample data for demos and local development

use super::category::{count_categories, create_category};
use super::inventory::set_stock;
use super::models::{NewCategory, NewSale};
use super::sales::insert_sale;
use crate::error::Result;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{params, Connection};
use serde::Serialize;

const CATEGORIES: &[(&str, &str)] = &[
    ("Electronics", "Electronic devices and accessories"),
    ("Clothing", "Apparel and fashion items"),
    ("Home & Kitchen", "Items for home and kitchen use"),
];

/// (name, description, price, index into CATEGORIES)
const PRODUCTS: &[(&str, &str, f64, usize)] = &[
    ("Smartphone X", "Latest smartphone with advanced features", 799.99, 0),
    ("Laptop Pro", "High-performance laptop for professionals", 1299.99, 0),
    ("Wireless Earbuds", "Noise-cancelling wireless earbuds", 129.99, 0),
    ("Smart Watch", "Fitness and health tracking smartwatch", 249.99, 0),
    ("Bluetooth Speaker", "Portable Bluetooth speaker with deep bass", 89.99, 0),
    ("Men's T-Shirt", "Comfortable cotton t-shirt", 19.99, 1),
    ("Women's Jeans", "Stylish and durable jeans", 49.99, 1),
    ("Running Shoes", "Lightweight shoes for running and athletics", 79.99, 1),
    ("Winter Jacket", "Warm jacket for cold weather", 129.99, 1),
    ("Summer Dress", "Flowy dress for summer days", 39.99, 1),
    ("Coffee Maker", "Programmable coffee maker", 69.99, 2),
    ("Blender", "High-speed blender for smoothies", 59.99, 2),
    ("Toaster", "2-slice toaster with multiple settings", 29.99, 2),
    ("Bedding Set", "Soft cotton bedding set", 79.99, 2),
    ("Cutting Board", "Durable bamboo cutting board", 24.99, 2),
];

pub const PLATFORMS: &[&str] = &["Amazon", "Daraz", "Direct Website", "OLX"];

/// Days of sales history generated, ending at `now`
pub const HISTORY_DAYS: i64 = 365;

/// What a seeding run inserted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub sales: usize,
}

/// Fill an empty database with a sample catalog and a year of sales.
///
/// Returns `None` without touching anything if categories already exist.
pub fn seed_database<R: Rng>(
    conn: &mut Connection,
    rng: &mut R,
    now: NaiveDateTime,
) -> Result<Option<SeedReport>> {
    if count_categories(conn)? > 0 {
        tracing::info!("Database already contains data, skipping seeding");
        return Ok(None);
    }

    tracing::info!("Seeding database...");
    let tx = conn.transaction()?;
    let mut report = SeedReport::default();

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = NewCategory {
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        category_ids.push(create_category(&tx, &category)?.id);
        report.categories += 1;
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for &(name, description, price, category) in PRODUCTS {
        // The outer transaction already covers product + inventory
        tx.execute(
            "INSERT INTO products (name, description, price, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![name, description, price, category_ids[category]],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute("INSERT INTO inventory (product_id) VALUES (?1)", params![id])?;
        set_stock(&tx, id, rng.gen_range(5..=100), rng.gen_range(5..=20))?;
        products.push((id, price));
        report.products += 1;
    }

    let first_day = now.date() - Duration::days(HISTORY_DAYS);
    for day in first_day.iter_days().take_while(|d| *d <= now.date()) {
        for _ in 0..rng.gen_range(0..=15) {
            let Some(&(product_id, unit_price)) = products.choose(rng) else {
                break;
            };
            let quantity: i64 = rng.gen_range(1..=5);
            let discount: f64 = rng.gen_range(0.0..0.2);
            let total = (unit_price * (1.0 - discount) * quantity as f64 * 100.0).round() / 100.0;
            let time = NaiveTime::from_hms_opt(
                rng.gen_range(0..24),
                rng.gen_range(0..60),
                rng.gen_range(0..60),
            )
            .unwrap_or(NaiveTime::MIN);

            insert_sale(
                &tx,
                &NewSale {
                    product_id,
                    quantity,
                    total_price: total,
                    platform: PLATFORMS.choose(rng).map(|p| p.to_string()),
                },
                day.and_time(time),
            )?;
            report.sales += 1;
        }
    }

    tx.commit()?;
    tracing::info!(
        "Seeded {} categories, {} products, {} sales",
        report.categories,
        report.products,
        report.sales
    );

    Ok(Some(report))
}
