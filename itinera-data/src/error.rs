/// Errors that can occur in the data layer.
///
/// The taxonomy is deliberately small:
///
/// - [`DataError::Database`] wraps any failure raised while preparing or
///   executing a statement or decoding a row. It is always propagated to the
///   caller, never retried or swallowed.
/// - [`DataError::Validation`] is a caller-semantic violation (blank or
///   duplicate type name, a `keyword` filter with a non-text value, updating
///   an entity that was never saved). Raised at the service boundary, it is
///   recoverable and distinct from database failures.
/// - [`DataError::UnknownKey`] is the contract for filter keys that have no
///   entry in an entity's column map: the operation fails before any SQL is
///   built. Unmapped keys never reach statement text.
///
/// A missing row is *not* an error anywhere in this engine — lookups return
/// `Option` and searches return an empty `Vec`.
#[derive(Debug)]
pub enum DataError {
    /// Failure from the underlying store while executing a statement.
    Database(Box<dyn std::error::Error + Send + Sync>),
    /// Caller-supplied semantic violation, recoverable by the caller.
    Validation(String),
    /// A filter key that the entity's column map does not expose.
    UnknownKey {
        entity: &'static str,
        key: String,
    },
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    ///
    /// Used by backend crates (e.g. `itinera-data-sqlx`) to wrap
    /// driver-specific errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    /// Construct a `Validation` variant from a message.
    pub fn validation(msg: impl Into<String>) -> Self {
        DataError::Validation(msg.into())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Database(err) => write!(f, "Database error: {err}"),
            DataError::Validation(msg) => write!(f, "Validation error: {msg}"),
            DataError::UnknownKey { entity, key } => {
                write!(f, "Unknown filter key for {entity}: {key}")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
