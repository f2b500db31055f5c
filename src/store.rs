//! Record store for the `destinations` table.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::{Destination, DestinationChanges, NewDestination};

const COLUMNS: &str = "id, name, location, description, backgroundImage, galleryImage";

#[derive(Clone)]
pub struct DestinationStore {
    pool: SqlitePool,
}

impl DestinationStore {
    /// Open (creating if missing) a file-backed database and apply migrations.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// A private in-memory database. Kept to one connection that never expires,
    /// otherwise every new connection would see an empty database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn list_all(&self) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations ORDER BY id");
        sqlx::query_as::<_, Destination>(&query)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = ?");
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns the id SQLite assigned to the new row.
    pub async fn insert(&self, input: &NewDestination) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "
            INSERT INTO destinations
                (name, location, description, backgroundImage, galleryImage)
            VALUES
                (?, ?, ?, ?, ?)
            ",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.background_image)
        .bind(&input.gallery_image)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Applies only the `Some` fields of `changes`. Returns rows affected.
    pub async fn update(&self, id: i64, changes: &DestinationChanges) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "
            UPDATE destinations SET
                name = COALESCE(?, name),
                location = COALESCE(?, location),
                description = COALESCE(?, description),
                backgroundImage = COALESCE(?, backgroundImage),
                galleryImage = COALESCE(?, galleryImage)
            WHERE id = ?
            ",
        )
        .bind(&changes.name)
        .bind(&changes.location)
        .bind(&changes.description)
        .bind(&changes.background_image)
        .bind(&changes.gallery_image)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
