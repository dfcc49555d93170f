//! One module per entity family: the descriptor (column map, joins, write
//! columns, accessors), the injected row mapper and a repository
//! constructor. The module docs list each family's filter vocabulary —
//! that list is the whole query language a caller gets.

pub mod links;
pub mod locations;
pub mod meals;
pub mod tours;
pub mod transports;
pub mod users;

/// Expands the classifier side of a family: descriptor, mapper and
/// repository constructor for a pure (id, name) record. Column expressions
/// must be literals because the map borrows them for `'static`.
macro_rules! classifier_family {
    ($ty:ident, $table:literal, $alias:literal, $id_col:literal, $name_col:literal) => {
        /// Vocabulary: `id`, `name`, `keyword`.
        pub fn type_descriptor() -> itinera_data::EntityDescriptor<crate::models::$ty> {
            itinera_data::EntityDescriptor::builder($table, $alias)
                .column("id", $id_col)
                .column("name", $name_col)
                .column("keyword", $name_col)
                .insert_columns(&["name"])
                .id_accessors(|e: &crate::models::$ty| e.id, |e, id| e.id = id)
                .name_accessor(|e| e.name.as_str())
                .bind_with(|e| vec![e.name.clone().into()])
                .build()
        }

        pub fn map_type_row(
            row: &sqlx::sqlite::SqliteRow,
        ) -> Result<crate::models::$ty, sqlx::Error> {
            use sqlx::Row;
            Ok(crate::models::$ty {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        }

        pub fn type_repository(
            pool: sqlx::sqlite::SqlitePool,
        ) -> itinera_data_sqlx::TypeRepository<crate::models::$ty> {
            itinera_data_sqlx::TypeRepository::new(pool, type_descriptor(), map_type_row)
        }
    };
}

pub(crate) use classifier_family;
