//! Store error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Engine-level constraint rejected the write (foreign key, check)
    #[error("constraint violated: {message}")]
    Constraint { message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_foreign_key_violation() || db.is_check_violation() || db.is_unique_violation()
            {
                return Self::Constraint {
                    message: db.message().to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}
