//! Target database provisioning.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::sqlstate;
use crate::table::is_safe_ident;
use crate::{DbConfig, StoreError};

/// SQLSTATE `duplicate_database`.
const DUPLICATE_DATABASE: &str = "42P04";

/// Outcome of [`ensure_database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The database was created by this run.
    Created,
    /// The database already existed, or a concurrent run created it first.
    AlreadyExists,
}

/// Ensure the target database exists, creating it if absent.
///
/// Connects to the server's maintenance database and runs the existence
/// check and the create as separate autocommit statements (`CREATE DATABASE`
/// cannot run inside a transaction). The check-then-create pair is not
/// isolated: a concurrent run may create the database in between, in which
/// case the server reports SQLSTATE 42P04 and the outcome is
/// [`Provisioned::AlreadyExists`] rather than an error. Calling this twice
/// in sequence never fails and leaves exactly one database of that name.
///
/// # Errors
/// [`StoreError::Connection`] if the server is unreachable or rejects the
/// credentials; [`StoreError::Sql`] for any other statement failure.
pub async fn ensure_database(config: &DbConfig) -> Result<Provisioned, StoreError> {
    if !is_safe_ident(&config.database) {
        return Err(StoreError::InvalidDatabaseName(config.database.clone()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.admin_url())
        .await
        .map_err(StoreError::Connection)?;

    let result = create_if_absent(&pool, config).await;
    pool.close().await;
    result
}

async fn create_if_absent(pool: &PgPool, config: &DbConfig) -> Result<Provisioned, StoreError> {
    let exists: Option<(i32,)> =
        sqlx::query_as("SELECT 1 FROM pg_catalog.pg_database WHERE datname = $1")
            .bind(&config.database)
            .fetch_optional(pool)
            .await?;

    if exists.is_some() {
        return Ok(Provisioned::AlreadyExists);
    }

    match sqlx::query(&format!("CREATE DATABASE \"{}\"", config.database)).execute(pool).await {
        Ok(_) => Ok(Provisioned::Created),
        // Lost the check-then-create race to a concurrent run.
        Err(err) if sqlstate(&err).as_deref() == Some(DUPLICATE_DATABASE) => {
            Ok(Provisioned::AlreadyExists)
        }
        Err(err) => Err(StoreError::Sql(err)),
    }
}
