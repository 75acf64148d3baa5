//! Database-specific error types and conversions.

use wellspring_core::error::WellspringError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate {entity}")]
    Duplicate { entity: String },

    #[error("Malformed record: {0}")]
    InvalidRecord(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl DbError {
    /// Classify a failed write: unique-index violations become
    /// [`DbError::Duplicate`], anything else stays a store error.
    pub(crate) fn from_write(entity: &str, err: surrealdb::Error) -> Self {
        if err.to_string().contains("already contains") {
            DbError::Duplicate {
                entity: entity.into(),
            }
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for WellspringError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => WellspringError::NotFound { entity, id },
            DbError::Duplicate { entity } => WellspringError::AlreadyExists { entity },
            DbError::Hash(msg) => WellspringError::Crypto(msg),
            other => WellspringError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_already_exists() {
        let err: WellspringError = DbError::Duplicate {
            entity: "user".into(),
        }
        .into();
        assert!(matches!(err, WellspringError::AlreadyExists { entity } if entity == "user"));
    }

    #[test]
    fn invalid_record_maps_to_database() {
        let err: WellspringError = DbError::InvalidRecord("bad uuid".into()).into();
        assert!(matches!(err, WellspringError::Database(_)));
    }
}
