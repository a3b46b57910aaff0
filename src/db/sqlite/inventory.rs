//! Inventory levels, change history and low-stock queries

use super::models::{Inventory, InventoryDetail, InventoryHistory, InventoryUpdate, LowStockProduct};
use super::product::{product_from_row, PRODUCT_COLUMNS};
use crate::error::{AppError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn inventory_from_row(row: &Row) -> rusqlite::Result<Inventory> {
    Ok(Inventory {
        id: row.get(0)?,
        product_id: row.get(1)?,
        quantity: row.get(2)?,
        low_stock_threshold: row.get(3)?,
        last_updated: row.get(4)?,
    })
}

/// List inventory rows with their products
pub fn list_inventory(conn: &Connection, offset: u32, limit: u32) -> Result<Vec<InventoryDetail>> {
    let sql = format!(
        r#"
        SELECT i.id, i.product_id, i.quantity, i.low_stock_threshold, i.last_updated, {}
        FROM inventory i
        JOIN products p ON p.id = i.product_id
        ORDER BY i.id
        LIMIT ?1 OFFSET ?2
        "#,
        PRODUCT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(params![limit, offset], |row| {
            Ok(InventoryDetail {
                inventory: inventory_from_row(row)?,
                product: product_from_row(row, 5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Get the inventory row of a product
pub fn get_inventory(conn: &Connection, product_id: i64) -> Result<Option<Inventory>> {
    let inventory = conn
        .query_row(
            "SELECT id, product_id, quantity, low_stock_threshold, last_updated
             FROM inventory WHERE product_id = ?1",
            params![product_id],
            inventory_from_row,
        )
        .optional()?;

    Ok(inventory)
}

/// Products whose quantity is at or below their threshold
pub fn get_low_stock(conn: &Connection) -> Result<Vec<LowStockProduct>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT i.product_id, p.name, i.quantity, i.low_stock_threshold
        FROM inventory i
        JOIN products p ON p.id = i.product_id
        WHERE i.quantity <= i.low_stock_threshold
        ORDER BY i.quantity ASC, i.product_id ASC
        "#,
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(LowStockProduct {
                product_id: row.get(0)?,
                product_name: row.get(1)?,
                current_quantity: row.get(2)?,
                threshold: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Update a product's stock level and/or threshold.
///
/// A history entry is written only when the quantity actually changes.
/// Returns `None` if the product has no inventory row.
pub fn update_inventory(
    conn: &mut Connection,
    product_id: i64,
    update: &InventoryUpdate,
) -> Result<Option<Inventory>> {
    if update.quantity.is_some_and(|q| q < 0) {
        return Err(AppError::Validation("Quantity must not be negative".to_string()));
    }
    if update.low_stock_threshold.is_some_and(|t| t < 0) {
        return Err(AppError::Validation(
            "Low stock threshold must not be negative".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    let Some(current) = get_inventory(&tx, product_id)? else {
        return Ok(None);
    };

    let new_quantity = update.quantity.unwrap_or(current.quantity);
    let new_threshold = update.low_stock_threshold.unwrap_or(current.low_stock_threshold);

    tx.execute(
        "UPDATE inventory
         SET quantity = ?1, low_stock_threshold = ?2, last_updated = datetime('now')
         WHERE id = ?3",
        params![new_quantity, new_threshold, current.id],
    )?;

    if new_quantity != current.quantity {
        tx.execute(
            "INSERT INTO inventory_history (inventory_id, previous_quantity, new_quantity)
             VALUES (?1, ?2, ?3)",
            params![current.id, current.quantity, new_quantity],
        )?;
        tracing::debug!(
            "Inventory for product {}: {} -> {}",
            product_id,
            current.quantity,
            new_quantity
        );
    }

    let updated = get_inventory(&tx, product_id)?;
    tx.commit()?;

    Ok(updated)
}

/// Most recent stock changes for an inventory row, newest first
pub fn get_history(conn: &Connection, inventory_id: i64, limit: u32) -> Result<Vec<InventoryHistory>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, inventory_id, previous_quantity, new_quantity, change_date
        FROM inventory_history
        WHERE inventory_id = ?1
        ORDER BY change_date DESC, id DESC
        LIMIT ?2
        "#,
    )?;

    let history = stmt
        .query_map(params![inventory_id, limit], |row| {
            Ok(InventoryHistory {
                id: row.get(0)?,
                inventory_id: row.get(1)?,
                previous_quantity: row.get(2)?,
                new_quantity: row.get(3)?,
                change_date: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(history)
}

/// Overwrite stock level and threshold without writing history
pub fn set_stock(conn: &Connection, product_id: i64, quantity: i64, threshold: i64) -> Result<()> {
    conn.execute(
        "UPDATE inventory SET quantity = ?1, low_stock_threshold = ?2, last_updated = datetime('now')
         WHERE product_id = ?3",
        params![quantity, threshold, product_id],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::category::create_category;
    use crate::db::sqlite::migrations::run_migrations;
    use crate::db::sqlite::models::{NewCategory, NewProduct};
    use crate::db::sqlite::product::create_product;

    fn test_conn() -> (Connection, Vec<i64>) {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
        run_migrations(&conn).unwrap();
        let category = create_category(
            &conn,
            &NewCategory {
                name: "Electronics".to_string(),
                description: None,
            },
        )
        .unwrap();

        let ids = ["Smartphone X", "Laptop Pro", "Smart Watch"]
            .iter()
            .map(|name| {
                create_product(
                    &mut conn,
                    &NewProduct {
                        name: name.to_string(),
                        description: None,
                        price: 100.0,
                        category_id: category.id,
                    },
                )
                .unwrap()
                .id
            })
            .collect();
        (conn, ids)
    }

    #[test]
    fn test_low_stock_includes_threshold_boundary() {
        let (conn, ids) = test_conn();
        set_stock(&conn, ids[0], 5, 10).unwrap();
        set_stock(&conn, ids[1], 10, 10).unwrap();
        set_stock(&conn, ids[2], 11, 10).unwrap();

        let low = get_low_stock(&conn).unwrap();
        let low_ids: Vec<i64> = low.iter().map(|l| l.product_id).collect();
        assert_eq!(low_ids, vec![ids[0], ids[1]]);
        assert_eq!(low[0].product_name, "Smartphone X");
        assert_eq!(low[0].current_quantity, 5);
        assert_eq!(low[0].threshold, 10);
    }

    #[test]
    fn test_update_records_history_on_quantity_change() {
        let (mut conn, ids) = test_conn();

        let updated = update_inventory(
            &mut conn,
            ids[0],
            &InventoryUpdate {
                quantity: Some(25),
                low_stock_threshold: None,
            },
        )
        .unwrap()
        .unwrap();
        assert_eq!(updated.quantity, 25);

        // Threshold-only change leaves history alone
        update_inventory(
            &mut conn,
            ids[0],
            &InventoryUpdate {
                quantity: None,
                low_stock_threshold: Some(3),
            },
        )
        .unwrap();

        let history = get_history(&conn, updated.id, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_quantity, 0);
        assert_eq!(history[0].new_quantity, 25);
    }

    #[test]
    fn test_update_missing_inventory() {
        let (mut conn, _) = test_conn();
        let result = update_inventory(&mut conn, 9999, &InventoryUpdate::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let (mut conn, ids) = test_conn();
        let err = update_inventory(
            &mut conn,
            ids[0],
            &InventoryUpdate {
                quantity: Some(-4),
                low_stock_threshold: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_list_inventory_embeds_product() {
        let (conn, ids) = test_conn();
        let rows = list_inventory(&conn, 0, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product.id, ids[0]);
        assert_eq!(rows[0].inventory.product_id, ids[0]);
    }
}
