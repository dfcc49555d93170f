//! Transports and their classifier.
//!
//! Filter vocabulary:
//!
//! | Key | Column | Notes |
//! |-----|--------|-------|
//! | `id` | `tr.id` | |
//! | `name` | `tr.name` | exact match |
//! | `keyword` | `tr.name` | substring via `LIKE` |
//! | `minPrice` | `tr.price` | lower bound, inclusive |
//! | `maxPrice` | `tr.price` | upper bound, inclusive |
//! | `transport_type` | `trt.name` | classifier display name |
//!
//! Like locations, the classifier join is always on and contributes
//! `transport_type_name` to every read.

use crate::models::Transport;
use itinera_data::{EntityDescriptor, JoinSpec};
use itinera_data_sqlx::EntityRepository;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

pub fn descriptor() -> EntityDescriptor<Transport> {
    EntityDescriptor::builder("transports", "tr")
        .column("id", "tr.id")
        .column("name", "tr.name")
        .column("keyword", "tr.name")
        .column("minPrice", "tr.price")
        .column("maxPrice", "tr.price")
        .column("transport_type", "trt.name")
        .join(
            JoinSpec::left("transport_types", "trt", "trt.id = tr.transport_type_id")
                .selecting(&["trt.name AS transport_type_name"]),
        )
        .insert_columns(&["name", "price", "transport_type_id"])
        .id_accessors(|e: &Transport| e.id, |e, id| e.id = id)
        .bind_with(|e| {
            vec![
                e.name.clone().into(),
                e.price.into(),
                e.transport_type_id.into(),
            ]
        })
        .build()
}

pub fn map_row(row: &SqliteRow) -> Result<Transport, sqlx::Error> {
    Ok(Transport {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        transport_type_id: row.try_get("transport_type_id")?,
        transport_type_name: row.try_get("transport_type_name")?,
    })
}

pub fn repository(pool: SqlitePool) -> EntityRepository<Transport> {
    EntityRepository::new(pool, descriptor(), map_row)
}

super::classifier_family!(TransportType, "transport_types", "trt", "trt.id", "trt.name");
