//! Error types for persistence operations.

/// Errors that can occur while provisioning or loading the destination table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Server unreachable or authentication failed.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed for a reason other than an expected conflict.
    #[error("sql execution failed: {0}")]
    Sql(#[from] sqlx::Error),

    /// The enriched batch could not be converted to destination rows.
    #[error("could not extract rows from enriched batch: {0}")]
    Extract(#[from] polars::error::PolarsError),

    /// Caller-supplied table name is not a safe identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    /// Configured database name is not a safe identifier.
    #[error("invalid database name: {0:?}")]
    InvalidDatabaseName(String),
}

/// SQLSTATE of a database-side error, if any.
pub(crate) fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|code| code.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_table_name_display() {
        let err = StoreError::InvalidTableName("drop table; --".to_string());
        assert!(err.to_string().contains("drop table; --"));
    }

    #[test]
    fn non_database_errors_have_no_sqlstate() {
        assert_eq!(sqlstate(&sqlx::Error::RowNotFound), None);
    }
}
