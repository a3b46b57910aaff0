//! Products
//!
//! Creating a product also creates its inventory row.

use super::category::{category_exists, get_category};
use super::models::{NewProduct, Product, ProductDetail, ProductUpdate};
use crate::error::{AppError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Product columns, qualified with the `p` alias
pub(crate) const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.description, p.price, p.category_id, p.created_at, p.updated_at";

/// Read a product from `PRODUCT_COLUMNS` starting at column `start`
pub(crate) fn product_from_row(row: &Row, start: usize) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(start)?,
        name: row.get(start + 1)?,
        description: row.get(start + 2)?,
        price: row.get(start + 3)?,
        category_id: row.get(start + 4)?,
        created_at: row.get(start + 5)?,
        updated_at: row.get(start + 6)?,
    })
}

/// List products ordered by id
pub fn list_products(conn: &Connection, offset: u32, limit: u32) -> Result<Vec<Product>> {
    let sql = format!(
        "SELECT {} FROM products p ORDER BY p.id LIMIT ?1 OFFSET ?2",
        PRODUCT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let products = stmt
        .query_map(params![limit, offset], |row| product_from_row(row, 0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(products)
}

/// List the products of one category
pub fn list_products_by_category(
    conn: &Connection,
    category_id: i64,
    offset: u32,
    limit: u32,
) -> Result<Vec<Product>> {
    let sql = format!(
        "SELECT {} FROM products p WHERE p.category_id = ?1 ORDER BY p.id LIMIT ?2 OFFSET ?3",
        PRODUCT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let products = stmt
        .query_map(params![category_id, limit, offset], |row| {
            product_from_row(row, 0)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(products)
}

/// Get a product by id
pub fn get_product(conn: &Connection, id: i64) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products p WHERE p.id = ?1", PRODUCT_COLUMNS);
    let product = conn
        .query_row(&sql, params![id], |row| product_from_row(row, 0))
        .optional()?;

    Ok(product)
}

/// Get a product with its category
pub fn get_product_detail(conn: &Connection, id: i64) -> Result<Option<ProductDetail>> {
    let Some(product) = get_product(conn, id)? else {
        return Ok(None);
    };

    let category = get_category(conn, product.category_id)?.ok_or_else(|| {
        AppError::Internal(format!(
            "Product {} references missing category {}",
            product.id, product.category_id
        ))
    })?;

    Ok(Some(ProductDetail { product, category }))
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!(
            "Price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

/// Create a product and an empty inventory row for it
pub fn create_product(conn: &mut Connection, req: &NewProduct) -> Result<Product> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Product name must not be empty".to_string()));
    }
    validate_price(req.price)?;

    let tx = conn.transaction()?;

    if !category_exists(&tx, req.category_id)? {
        return Err(AppError::not_found("Category", req.category_id));
    }

    tx.execute(
        "INSERT INTO products (name, description, price, category_id) VALUES (?1, ?2, ?3, ?4)",
        params![req.name.trim(), req.description, req.price, req.category_id],
    )?;
    let id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO inventory (product_id, quantity, low_stock_threshold) VALUES (?1, 0, ?2)",
        params![id, DEFAULT_LOW_STOCK_THRESHOLD],
    )?;

    let product = get_product(&tx, id)?
        .ok_or_else(|| AppError::Internal(format!("Product {} vanished after insert", id)))?;

    tx.commit()?;
    tracing::info!("Created product: {} ({})", product.name, product.id);

    Ok(product)
}

/// Apply a partial update. Returns `None` if the product does not exist.
pub fn update_product(
    conn: &Connection,
    id: i64,
    update: &ProductUpdate,
) -> Result<Option<Product>> {
    if get_product(conn, id)?.is_none() {
        return Ok(None);
    }

    let mut updates = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Product name must not be empty".to_string()));
        }
        updates.push("name = ?");
        params.push(Box::new(name.trim().to_string()));
    }
    if let Some(description) = &update.description {
        updates.push("description = ?");
        params.push(Box::new(description.clone()));
    }
    if let Some(price) = update.price {
        validate_price(price)?;
        updates.push("price = ?");
        params.push(Box::new(price));
    }
    if let Some(category_id) = update.category_id {
        if !category_exists(conn, category_id)? {
            return Err(AppError::not_found("Category", category_id));
        }
        updates.push("category_id = ?");
        params.push(Box::new(category_id));
    }

    if !updates.is_empty() {
        updates.push("updated_at = datetime('now')");
        params.push(Box::new(id));

        let sql = format!("UPDATE products SET {} WHERE id = ?", updates.join(", "));
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;
        tracing::debug!("Updated product {}", id);
    }

    get_product(conn, id)
}

/// Delete a product, returning it. Inventory and sales cascade.
pub fn delete_product(conn: &Connection, id: i64) -> Result<Option<Product>> {
    let Some(product) = get_product(conn, id)? else {
        return Ok(None);
    };

    conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
    tracing::info!("Deleted product: {} ({})", product.name, id);

    Ok(Some(product))
}

pub fn list_all_products(conn: &Connection) -> Result<Vec<Product>> {
    list_products(conn, 0, u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::category::create_category;
    use crate::db::sqlite::inventory::get_inventory;
    use crate::db::sqlite::migrations::run_migrations;
    use crate::db::sqlite::models::NewCategory;

    fn test_conn() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
        run_migrations(&conn).unwrap();
        let category = create_category(
            &conn,
            &NewCategory {
                name: "Home & Kitchen".to_string(),
                description: None,
            },
        )
        .unwrap();
        (conn, category.id)
    }

    fn new_product(name: &str, category_id: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some("test".to_string()),
            price: 69.99,
            category_id,
        }
    }

    #[test]
    fn test_create_product_creates_inventory() {
        let (mut conn, category_id) = test_conn();
        let product = create_product(&mut conn, &new_product("Coffee Maker", category_id)).unwrap();

        assert_eq!(product.name, "Coffee Maker");
        assert_eq!(product.price, 69.99);

        let inventory = get_inventory(&conn, product.id).unwrap().unwrap();
        assert_eq!(inventory.quantity, 0);
        assert_eq!(inventory.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn test_create_product_unknown_category() {
        let (mut conn, category_id) = test_conn();
        let err = create_product(&mut conn, &new_product("Toaster", category_id + 10)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(list_all_products(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let (mut conn, category_id) = test_conn();
        let mut req = new_product("Blender", category_id);
        req.price = -1.0;
        let err = create_product(&mut conn, &req).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_partial_update() {
        let (mut conn, category_id) = test_conn();
        let product = create_product(&mut conn, &new_product("Blender", category_id)).unwrap();

        let updated = update_product(
            &conn,
            product.id,
            &ProductUpdate {
                price: Some(49.5),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.price, 49.5);
        assert_eq!(updated.name, "Blender");
        assert_eq!(updated.description, product.description);

        assert!(update_product(&conn, product.id + 1, &ProductUpdate::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_update_to_missing_category() {
        let (mut conn, category_id) = test_conn();
        let product = create_product(&mut conn, &new_product("Blender", category_id)).unwrap();

        let err = update_product(
            &conn,
            product.id,
            &ProductUpdate {
                category_id: Some(999),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_detail_and_delete_cascade() {
        let (mut conn, category_id) = test_conn();
        let product = create_product(&mut conn, &new_product("Toaster", category_id)).unwrap();

        let detail = get_product_detail(&conn, product.id).unwrap().unwrap();
        assert_eq!(detail.category.name, "Home & Kitchen");

        let deleted = delete_product(&conn, product.id).unwrap().unwrap();
        assert_eq!(deleted.id, product.id);
        assert!(get_product(&conn, product.id).unwrap().is_none());
        assert!(get_inventory(&conn, product.id).unwrap().is_none());
        assert!(delete_product(&conn, product.id).unwrap().is_none());
    }

    #[test]
    fn test_products_by_category() {
        let (mut conn, category_id) = test_conn();
        let other = create_category(
            &conn,
            &NewCategory {
                name: "Clothing".to_string(),
                description: None,
            },
        )
        .unwrap();
        create_product(&mut conn, &new_product("Toaster", category_id)).unwrap();
        create_product(&mut conn, &new_product("Jeans", other.id)).unwrap();

        let products = list_products_by_category(&conn, other.id, 0, 100).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Jeans");
    }
}
