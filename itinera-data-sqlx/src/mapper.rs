use sqlx::sqlite::SqliteRow;

/// Row-to-entity conversion injected into a repository at construction.
///
/// A mapper reads by column name with `row.try_get("...")` and surfaces
/// decode failures as `sqlx::Error`, which the repository bridges into
/// `DataError::Database`. Plain `fn` rather than a closure type: mappers
/// are static per family, carry no state, and keep repositories `Copy`-able
/// field by field.
///
/// ```ignore
/// fn map_location(row: &SqliteRow) -> Result<Location, sqlx::Error> {
///     Ok(Location {
///         id: row.try_get("id")?,
///         name: row.try_get("name")?,
///         country: row.try_get("country")?,
///         location_type_name: row.try_get("location_type_name")?,
///     })
/// }
/// ```
pub type RowMapper<T> = fn(&SqliteRow) -> Result<T, sqlx::Error>;
