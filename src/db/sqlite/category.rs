//! Product categories

use super::models::{Category, NewCategory};
use crate::error::{AppError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// List categories ordered by id
pub fn list_categories(conn: &Connection, offset: u32, limit: u32) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description FROM categories ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;

    let categories = stmt
        .query_map(params![limit, offset], category_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(categories)
}

/// Get a category by id
pub fn get_category(conn: &Connection, id: i64) -> Result<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT id, name, description FROM categories WHERE id = ?1",
            params![id],
            category_from_row,
        )
        .optional()?;

    Ok(category)
}

pub fn category_exists(conn: &Connection, id: i64) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

pub fn count_categories(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
    Ok(count)
}

/// Create a category. Names are unique.
pub fn create_category(conn: &Connection, req: &NewCategory) -> Result<Category> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Category name must not be empty".to_string()));
    }

    let taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1)",
        params![name],
        |row| row.get(0),
    )?;
    if taken {
        return Err(AppError::Validation(format!(
            "Category '{}' already exists",
            name
        )));
    }

    conn.execute(
        "INSERT INTO categories (name, description) VALUES (?1, ?2)",
        params![name, req.description],
    )?;

    let id = conn.last_insert_rowid();
    tracing::debug!("Created category: {} ({})", name, id);

    Ok(Category {
        id,
        name: name.to_string(),
        description: req.description.clone(),
    })
}
