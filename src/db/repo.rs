use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use crate::db::models::{NewUser, User, UserChanges, UserSummary};

/// Access to the `users` table.
///
/// Holds connection options only. Every operation opens its own connection,
/// runs a single statement and closes the connection again before the
/// statement's result is handed back, whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct UserStore {
    options: SqliteConnectOptions,
}

impl UserStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        Self { options }
    }

    async fn acquire(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await;
        release(conn).await;

        result.map(|_| ())
    }

    pub async fn list(&self) -> Result<Vec<UserSummary>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users")
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        result
    }

    /// Looks a user up by the raw path id. The id is bound as text; the
    /// column's integer affinity converts numeric strings, anything else
    /// matches no row.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        release(conn).await;

        result
    }

    /// Returns the id assigned to the new row.
    pub async fn insert(&self, user: &NewUser) -> Result<i64, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&mut conn)
            .await;
        release(conn).await;

        Ok(result?.last_insert_rowid())
    }

    /// Returns the number of rows affected; zero means no such user.
    pub async fn update(&self, id: &str, changes: &UserChanges) -> Result<u64, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        Ok(result?.rows_affected())
    }

    /// Returns the number of rows affected; zero means no such user.
    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        Ok(result?.rows_affected())
    }

    /// Substring match on `name`. Matching follows SQLite's `LIKE`, which is
    /// case-insensitive for ASCII letters.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result =
            sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users WHERE name LIKE ?")
                .bind(format!("%{fragment}%"))
                .fetch_all(&mut conn)
                .await;
        release(conn).await;

        result
    }

    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email FROM users WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&mut conn)
        .await;
        release(conn).await;

        result
    }
}

async fn release(conn: SqliteConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "failed to close database connection");
    }
}
