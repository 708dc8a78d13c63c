use rusqlite::ErrorCode;
use thiserror::Error;

/// Failures surfaced by the relational store.
///
/// Database functions classify every rusqlite error into one of these
/// before attaching context, so callers can recover the kind with
/// `err.downcast_ref::<StoreError>()`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("malformed result: {0}")]
    MalformedResult(String),

    #[error("query failed: {0}")]
    Query(#[source] rusqlite::Error),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        classify(err)
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Map a rusqlite error onto the store error taxonomy
pub fn classify(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => match failure.code {
            ErrorCode::ConstraintViolation => {
                StoreError::ConstraintViolation(message.unwrap_or_else(|| failure.to_string()))
            }
            ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked => StoreError::Unavailable(
                rusqlite::Error::SqliteFailure(failure, message).to_string(),
            ),
            _ => StoreError::Query(rusqlite::Error::SqliteFailure(failure, message)),
        },
        rusqlite::Error::QueryReturnedNoRows => {
            StoreError::MalformedResult("expected a row, store returned none".to_string())
        }
        rusqlite::Error::InvalidColumnType(idx, name, ty) => StoreError::MalformedResult(
            format!("column {idx} ({name}) has unexpected type {ty}"),
        ),
        rusqlite::Error::InvalidColumnIndex(idx) => {
            StoreError::MalformedResult(format!("missing column {idx}"))
        }
        rusqlite::Error::FromSqlConversionFailure(idx, ty, source) => {
            StoreError::MalformedResult(format!(
                "column {idx} of type {ty} could not be converted: {source}"
            ))
        }
        other => StoreError::Query(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    #[test]
    fn test_constraint_failures_are_classified() {
        let err = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_FOREIGNKEY),
            Some("FOREIGN KEY constraint failed".to_string()),
        );

        let classified = classify(err);

        assert!(classified.is_constraint_violation());
        assert_eq!(
            classified.to_string(),
            "constraint violation: FOREIGN KEY constraint failed"
        );
    }

    #[test]
    fn test_missing_row_is_malformed() {
        let classified = classify(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(classified, StoreError::MalformedResult(_)));
    }

    #[test]
    fn test_unopenable_database_is_unavailable() {
        let err = rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_CANTOPEN), None);
        assert!(matches!(classify(err), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_other_failures_keep_the_source() {
        let classified = classify(rusqlite::Error::InvalidQuery);
        assert!(matches!(classified, StoreError::Query(rusqlite::Error::InvalidQuery)));
    }
}
