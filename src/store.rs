// store.rs

use std::path::Path;

use rusqlite::{Connection, params};
use thiserror::Error;

use crate::todo::TodoItem;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("todo {id} already exists")]
    Duplicate { id: i64 },
    #[error("todo text cannot be empty")]
    EmptyText,
}

/// Authoritative todo collection, one row per item.
///
/// Every operation is a single independent statement. Mutations that name an
/// id with no matching row are no-ops, not errors.
pub struct TodoStore {
    conn: Connection,
}

impl TodoStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS todos (
              id INTEGER PRIMARY KEY,
              text TEXT NOT NULL,
              done INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, done FROM todos ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(TodoItem {
                id: row.get(0)?,
                text: row.get(1)?,
                done: row.get(2)?,
            })
        })?;
        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?);
        }
        Ok(todos)
    }

    pub fn create(&self, id: i64, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        match self.conn.execute(
            "INSERT INTO todos (id, text, done) VALUES (?1, ?2, 0)",
            params![id, text],
        ) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate { id })
            }
            Err(e) => Err(StoreError::Sql(e)),
        }
    }

    pub fn edit(&self, id: i64, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let changed = self
            .conn
            .execute("UPDATE todos SET text = ?2 WHERE id = ?1", params![id, text])?;
        if changed == 0 {
            tracing::warn!(id, "edit for unknown todo ignored");
        }
        Ok(())
    }

    pub fn toggle(&self, id: i64, done: bool) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("UPDATE todos SET done = ?2 WHERE id = ?1", params![id, done])?;
        if changed == 0 {
            tracing::warn!(id, "toggle for unknown todo ignored");
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if changed == 0 {
            tracing::warn!(id, "delete for unknown todo ignored");
        }
        Ok(())
    }
}
