//! Locations and their classifier.
//!
//! Filter vocabulary:
//!
//! | Key | Column | Notes |
//! |-----|--------|-------|
//! | `id` | `l.id` | |
//! | `name` | `l.name` | exact match |
//! | `keyword` | `l.name` | substring via `LIKE` |
//! | `country` | `l.country` | |
//! | `locationType` | `lt.name` | classifier display name |
//!
//! The classifier join is always on so every read carries
//! `location_type_name`; the SELECT list never varies.

use crate::models::Location;
use itinera_data::{EntityDescriptor, JoinSpec};
use itinera_data_sqlx::EntityRepository;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

pub fn descriptor() -> EntityDescriptor<Location> {
    EntityDescriptor::builder("locations", "l")
        .column("id", "l.id")
        .column("name", "l.name")
        .column("keyword", "l.name")
        .column("country", "l.country")
        .column("locationType", "lt.name")
        .join(
            JoinSpec::left("location_types", "lt", "lt.id = l.location_type_id")
                .selecting(&["lt.name AS location_type_name"]),
        )
        .insert_columns(&["name", "country", "location_type_id"])
        .id_accessors(|e: &Location| e.id, |e, id| e.id = id)
        .bind_with(|e| {
            vec![
                e.name.clone().into(),
                e.country.clone().into(),
                e.location_type_id.into(),
            ]
        })
        .build()
}

pub fn map_row(row: &SqliteRow) -> Result<Location, sqlx::Error> {
    Ok(Location {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        country: row.try_get("country")?,
        location_type_id: row.try_get("location_type_id")?,
        location_type_name: row.try_get("location_type_name")?,
    })
}

pub fn repository(pool: SqlitePool) -> EntityRepository<Location> {
    EntityRepository::new(pool, descriptor(), map_row)
}

super::classifier_family!(LocationType, "location_types", "lt", "lt.id", "lt.name");
