use itinera_data::FilterValue;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// Attach ordered bind values to a prepared query.
///
/// Text binds borrow from the parameter slice, so the slice must outlive
/// the query execution. Null binds as a typed `NULL` (SQLite ignores the
/// nominal type).
pub fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [FilterValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            FilterValue::Int(v) => query.bind(*v),
            FilterValue::Float(v) => query.bind(*v),
            FilterValue::Bool(v) => query.bind(*v),
            FilterValue::Text(v) => query.bind(v.as_str()),
            FilterValue::Null => query.bind(None::<String>),
        };
    }
    query
}
