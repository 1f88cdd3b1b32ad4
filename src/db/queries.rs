use rusqlite::{params, Connection, OptionalExtension};

// ── Key/value storage ──

pub fn get_item(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO storage (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove_item(conn: &Connection, key: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM storage WHERE key = ?1", params![key])?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    #[test]
    fn test_get_missing_item() {
        let conn = setup_db();
        assert_eq!(get_item(&conn, "authToken").unwrap(), None);
    }

    #[test]
    fn test_set_then_overwrite_item() {
        let conn = setup_db();
        set_item(&conn, "authToken", "first").unwrap();
        set_item(&conn, "authToken", "second").unwrap();
        assert_eq!(
            get_item(&conn, "authToken").unwrap(),
            Some("second".to_string())
        );
    }

    #[test]
    fn test_remove_item() {
        let conn = setup_db();
        set_item(&conn, "authToken", "abc").unwrap();
        assert!(remove_item(&conn, "authToken").unwrap());
        assert!(!remove_item(&conn, "authToken").unwrap());
        assert_eq!(get_item(&conn, "authToken").unwrap(), None);
    }
}
