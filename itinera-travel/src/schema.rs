use itinera_data::DataError;
use itinera_data_sqlx::SqlxErrorExt;
use sqlx::sqlite::SqlitePool;

/// Storage schema the descriptors are written against.
///
/// Ten base tables plus three link tables, every link keyed by two
/// `<entity>_id` columns forming the primary key. Booleans are stored as
/// integers, money as whole units. Link pairs are not FK-constrained:
/// deleting a linked row leaves a dangling pair, which hydrated listings
/// skip.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS location_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        country TEXT NOT NULL,
        location_type_id INTEGER REFERENCES location_types(id)
    )",
    "CREATE TABLE IF NOT EXISTS tour_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tours (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price INTEGER NOT NULL,
        active INTEGER NOT NULL DEFAULT 1,
        tour_type_id INTEGER REFERENCES tour_types(id)
    )",
    "CREATE TABLE IF NOT EXISTS transport_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS transports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price INTEGER NOT NULL,
        transport_type_id INTEGER REFERENCES transport_types(id)
    )",
    "CREATE TABLE IF NOT EXISTS meal_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS user_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1,
        user_type_id INTEGER REFERENCES user_types(id)
    )",
    "CREATE TABLE IF NOT EXISTS tour_locations (
        tour_id INTEGER NOT NULL,
        location_id INTEGER NOT NULL,
        PRIMARY KEY (tour_id, location_id)
    )",
    "CREATE TABLE IF NOT EXISTS user_tours (
        user_id INTEGER NOT NULL,
        tour_id INTEGER NOT NULL,
        PRIMARY KEY (user_id, tour_id)
    )",
    "CREATE TABLE IF NOT EXISTS meal_meal_types (
        meal_id INTEGER NOT NULL,
        meal_type_id INTEGER NOT NULL,
        PRIMARY KEY (meal_id, meal_type_id)
    )",
];

/// Create every catalog table that does not exist yet.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), DataError> {
    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
    }
    tracing::debug!(tables = SCHEMA.len(), "catalog schema ready");
    Ok(())
}
