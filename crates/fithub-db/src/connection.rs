use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// A thread safe connection to the database
#[derive(Debug, Clone)]
pub struct Connection(Arc<Mutex<SqliteConnection>>);

impl Connection {
    /// Open a connection to the database
    pub async fn open(filename: &str) -> Result<Connection> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        tracing::debug!(filename, "opened database");
        Ok(Connection(Arc::new(Mutex::new(conn))))
    }

    /// Open a new test database connection.
    /// The database will be created on each open.
    pub async fn open_test() -> (TestHandle, Connection) {
        let filename = format!(
            "{}/fithub_test_{}.sqlite3",
            std::env::temp_dir().display(),
            rand::random::<u64>()
        );
        let handle = TestHandle {
            filename: filename.clone(),
        };
        let conn = Connection::open(&filename).await.unwrap();

        // Install the schema
        schema::install(&conn).await.unwrap();

        (handle, conn)
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.0.lock().await
    }
}

/// Removes the test database file when dropped.
pub struct TestHandle {
    filename: String,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}
