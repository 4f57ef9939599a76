use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite
/// (bundled SQLite).
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path)
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Self::configure(conn)
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self, SQLError> {
        // WAL for concurrent readers; foreign keys are declared in the
        // schema and must actually be checked.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Text(s) => Box::new(s.as_str()),
                Value::Blob(b) => Box::new(b.as_slice()),
            }
        })
        .collect()
}

/// Extract a Value from a rusqlite column without type probing.
fn column_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        // No REAL columns exist in this schema; round-trip through text
        // rather than losing the value entirely.
        ValueRef::Real(f) => Value::Text(f.to_string()),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = stmt
            .query(param_refs.as_slice())
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(|e| SQLError::Query(e.to_string()))? {
            let mut columns = Vec::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                let raw = row
                    .get_ref(i)
                    .map_err(|e| SQLError::Query(e.to_string()))?;
                columns.push((name.clone(), column_value(raw)));
            }
            result.push(Row { columns });
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        Ok(affected as u64)
    }

    fn exec_batch(&self, sql: &str) -> Result<(), SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Execution(e.to_string()))?;
        conn.execute_batch(sql)
            .map_err(|e| SQLError::Execution(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let s = SqliteStore::open_in_memory().unwrap();
        s.exec_batch("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)")
            .unwrap();
        s
    }

    #[test]
    fn exec_and_query_round_trip() {
        let s = store();
        let affected = s
            .exec("INSERT INTO t (name) VALUES (?1)", &[Value::Text("a".into())])
            .unwrap();
        assert_eq!(affected, 1);

        let rows = s.query("SELECT id, name FROM t", &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id"), Some(1));
        assert_eq!(rows[0].get_str("name"), Some("a"));
    }

    #[test]
    fn insert_returning_yields_generated_id() {
        let s = store();
        let rows = s
            .query(
                "INSERT INTO t (name) VALUES (?1) RETURNING id",
                &[Value::Text("b".into())],
            )
            .unwrap();
        assert_eq!(rows[0].get_i64("id"), Some(1));

        let rows = s
            .query(
                "INSERT INTO t (name) VALUES (?1) RETURNING id",
                &[Value::Text("c".into())],
            )
            .unwrap();
        assert_eq!(rows[0].get_i64("id"), Some(2));
    }

    #[test]
    fn unique_violation_surfaces_as_execution_error() {
        let s = SqliteStore::open_in_memory().unwrap();
        s.exec_batch("CREATE TABLE u (k TEXT UNIQUE)").unwrap();
        s.exec("INSERT INTO u (k) VALUES (?1)", &[Value::Text("x".into())])
            .unwrap();
        let err = s
            .exec("INSERT INTO u (k) VALUES (?1)", &[Value::Text("x".into())])
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint"));
    }

    #[test]
    fn null_columns_come_back_as_null() {
        let s = store();
        s.exec("INSERT INTO t (name) VALUES (NULL)", &[]).unwrap();
        let rows = s.query("SELECT name FROM t", &[]).unwrap();
        assert_eq!(rows[0].get("name"), Some(&Value::Null));
        assert_eq!(rows[0].get_str("name"), None);
    }
}
