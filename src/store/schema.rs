use rusqlite::{params, Connection};

use crate::internal_error::InternalResult;

pub fn create_tables(connection: &Connection) -> InternalResult<()> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goals (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \
         title TEXT NOT NULL, description TEXT NOT NULL, category TEXT NOT NULL, \
         time_frame TEXT NOT NULL, status TEXT NOT NULL, progress INTEGER NOT NULL, \
         created_at TEXT NOT NULL, updated_at TEXT NOT NULL)",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS milestones (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \
         goal_id TEXT NOT NULL, title TEXT NOT NULL, description TEXT NOT NULL, \
         date TEXT NOT NULL, completed INTEGER NOT NULL, \
         created_at TEXT NOT NULL, updated_at TEXT NOT NULL)",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS todos (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \
         title TEXT NOT NULL, description TEXT, priority TEXT NOT NULL, due_date TEXT, \
         category TEXT, completed INTEGER NOT NULL, \
         created_at TEXT NOT NULL, updated_at TEXT NOT NULL)",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS notes (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \
         title TEXT NOT NULL, content TEXT NOT NULL, category TEXT, is_pinned INTEGER NOT NULL, \
         created_at TEXT NOT NULL, updated_at TEXT NOT NULL)",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS checkins (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \
         date TEXT NOT NULL, mood TEXT NOT NULL, energy TEXT NOT NULL, \
         accomplishments TEXT NOT NULL, challenges TEXT NOT NULL, goals TEXT NOT NULL, \
         notes TEXT, created_at TEXT NOT NULL, updated_at TEXT NOT NULL)",
        params![],
    )?;

    Ok(())
}

#[cfg(test)]
pub fn test_connection() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    create_tables(&connection).unwrap();
    connection
}
