//! Classification of sqlx errors into store error categories.

use crate::domain::repositories::StoreError;

/// Name of the unique constraint guarding `urls.alias`.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "urls_alias_key";

/// Returns true if `e` is a unique violation on the alias constraint.
pub fn is_alias_conflict(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ALIAS_UNIQUE_CONSTRAINT) | None)
}

/// Maps a sqlx error that is not an alias conflict to a store failure.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    let message = e.to_string();

    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        _ => StoreError::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_other_errors_are_query_failures() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }

    #[test]
    fn test_non_database_error_is_not_alias_conflict() {
        assert!(!is_alias_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_alias_conflict(&sqlx::Error::PoolTimedOut));
    }
}
