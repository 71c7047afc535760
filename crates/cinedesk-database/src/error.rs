//! Translation of sqlx failures into [`AppError`].

use cinedesk_core::error::{AppError, ErrorKind};

/// Wrap a failed read in a database error carrying `context`.
pub fn query_failed(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Translate a failed write.
///
/// `known` maps a violated constraint name to the error the caller wants to
/// surface (usually a conflict naming the duplicate value). Unmapped unique
/// violations become a generic conflict, foreign key violations a
/// validation error, and anything else a database error with `context`.
pub fn write_failed(
    err: sqlx::Error,
    context: &'static str,
    known: impl FnOnce(&str) -> Option<AppError>,
) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(mapped) = db_err.constraint().and_then(known) {
            return mapped;
        }
        if db_err.is_unique_violation() {
            return AppError::conflict("Record already exists");
        }
        if db_err.is_foreign_key_violation() {
            return AppError::validation("Referenced record does not exist");
        }
        if db_err.is_check_violation() {
            return AppError::validation(format!(
                "Value violates constraint {}",
                db_err.constraint().unwrap_or("check")
            ));
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_keep_context() {
        let err = write_failed(sqlx::Error::RowNotFound, "Failed to update film", |_| None);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to update film");

        let err = query_failed("Failed to list films")(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
