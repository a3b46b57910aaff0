//! Sale records
//!
//! Implements [`SaleStore`] for a plain connection, so analytics run on
//! whatever pooled connection the request already holds.

use super::models::{NewSale, SaleDetail};
use super::product::{get_product, product_from_row, PRODUCT_COLUMNS};
use crate::analytics::{EndBound, SaleFilter, SaleRecord, SaleStore};
use crate::error::{AppError, Result};
use chrono::{NaiveDateTime, Timelike, Utc};
use rusqlite::{params, Connection, Row};

const SALE_COLUMNS: &str = "s.id, s.product_id, s.quantity, s.total_price, s.sale_date, s.platform";

fn sale_from_row(row: &Row) -> rusqlite::Result<SaleRecord> {
    Ok(SaleRecord {
        id: row.get(0)?,
        product_id: row.get(1)?,
        quantity: row.get(2)?,
        total_price: row.get(3)?,
        sale_date: row.get(4)?,
        platform: row.get(5)?,
    })
}

/// Compile a filter into `WHERE ... [LIMIT ? OFFSET ?]` and its parameters.
///
/// Callers must select from `sales s JOIN products p`.
fn filter_clause(filter: &SaleFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(start) = filter.start {
        conditions.push("s.sale_date >= ?");
        params.push(Box::new(start));
    }

    match filter.end {
        Some(EndBound::Inclusive(end)) => {
            conditions.push("s.sale_date <= ?");
            params.push(Box::new(end));
        }
        Some(EndBound::Exclusive(end)) => {
            conditions.push("s.sale_date < ?");
            params.push(Box::new(end));
        }
        None => {}
    }

    if let Some(product_id) = filter.product_id {
        conditions.push("s.product_id = ?");
        params.push(Box::new(product_id));
    }

    if let Some(category_id) = filter.category_id {
        conditions.push("p.category_id = ?");
        params.push(Box::new(category_id));
    }

    if let Some(platform) = &filter.platform {
        conditions.push("s.platform = ?");
        params.push(Box::new(platform.clone()));
    }

    let mut clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    clause.push_str(" ORDER BY s.sale_date ASC, s.id ASC");

    if filter.limit.is_some() || filter.offset.is_some() {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = filter.limit.map_or(-1, i64::from);
        clause.push_str(" LIMIT ? OFFSET ?");
        params.push(Box::new(limit));
        params.push(Box::new(i64::from(filter.offset.unwrap_or(0))));
    }

    (clause, params)
}

/// Sales matching `filter`, with their products
pub fn filter_sale_details(conn: &Connection, filter: &SaleFilter) -> Result<Vec<SaleDetail>> {
    let (clause, params_vec) = filter_clause(filter);
    let sql = format!(
        "SELECT {}, {} FROM sales s JOIN products p ON p.id = s.product_id {}",
        SALE_COLUMNS, PRODUCT_COLUMNS, clause
    );

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

    let sales = stmt
        .query_map(params_refs.as_slice(), |row| {
            Ok(SaleDetail {
                sale: sale_from_row(row)?,
                product: product_from_row(row, 6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(sales)
}

/// Page through all sales, oldest first
pub fn list_sales(conn: &Connection, offset: u32, limit: u32) -> Result<Vec<SaleDetail>> {
    filter_sale_details(conn, &SaleFilter::new().paginate(offset, limit))
}

/// Record a sale at `sale_date`
pub fn insert_sale(conn: &Connection, req: &NewSale, sale_date: NaiveDateTime) -> Result<SaleRecord> {
    if req.quantity < 1 {
        return Err(AppError::Validation("Quantity must be at least 1".to_string()));
    }
    if !req.total_price.is_finite() || req.total_price < 0.0 {
        return Err(AppError::Validation(
            "Total price must be a non-negative number".to_string(),
        ));
    }
    if get_product(conn, req.product_id)?.is_none() {
        return Err(AppError::not_found("Product", req.product_id));
    }

    // Second precision keeps the stored text uniformly formatted
    let sale_date = sale_date.with_nanosecond(0).unwrap_or(sale_date);

    conn.execute(
        "INSERT INTO sales (product_id, quantity, total_price, sale_date, platform)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![req.product_id, req.quantity, req.total_price, sale_date, req.platform],
    )?;

    let id = conn.last_insert_rowid();
    tracing::debug!(
        "Recorded sale {}: product={}, quantity={}, total={:.2}",
        id,
        req.product_id,
        req.quantity,
        req.total_price
    );

    Ok(SaleRecord {
        id,
        product_id: req.product_id,
        quantity: req.quantity,
        total_price: req.total_price,
        sale_date,
        platform: req.platform.clone(),
    })
}

/// Record a sale happening now
pub fn record_sale(conn: &Connection, req: &NewSale) -> Result<SaleRecord> {
    insert_sale(conn, req, Utc::now().naive_utc())
}

impl SaleStore for Connection {
    fn query(&self, filter: &SaleFilter) -> Result<Vec<SaleRecord>> {
        let (clause, params_vec) = filter_clause(filter);
        let sql = format!(
            "SELECT {} FROM sales s JOIN products p ON p.id = s.product_id {}",
            SALE_COLUMNS, clause
        );

        let mut stmt = self.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let sales = stmt
            .query_map(params_refs.as_slice(), sale_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sales)
    }

    fn query_by_year_month(&self, year: i32, month: Option<u32>) -> Result<Vec<SaleRecord>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM sales s
            WHERE CAST(strftime('%Y', s.sale_date) AS INTEGER) = ?1
              AND (?2 IS NULL OR CAST(strftime('%m', s.sale_date) AS INTEGER) = ?2)
            ORDER BY s.sale_date ASC, s.id ASC
            "#,
            SALE_COLUMNS
        );

        let mut stmt = self.prepare(&sql)?;
        let sales = stmt
            .query_map(params![year, month], sale_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sales)
    }
}
