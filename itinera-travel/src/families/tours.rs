//! Tours and their classifier.
//!
//! Filter vocabulary:
//!
//! | Key | Column | Notes |
//! |-----|--------|-------|
//! | `id` | `t.id` | |
//! | `name` | `t.name` | exact match |
//! | `keyword` | `t.name` | substring via `LIKE` |
//! | `minPrice` | `t.price` | lower bound, inclusive |
//! | `maxPrice` | `t.price` | upper bound, inclusive |
//! | `isActive` | `t.active` | |
//! | `tour_type` | `tt.name` | pulls the classifier join |
//! | `country` | `loc.country` | pulls the link and location joins |
//!
//! Both joins are conditional: an unfiltered listing reads only `tours`.
//! The `country` path goes through the link table, which can fan one tour
//! into several rows, so the composer switches to `DISTINCT` for it.

use crate::models::Tour;
use itinera_data::{EntityDescriptor, JoinSpec};
use itinera_data_sqlx::EntityRepository;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

pub fn descriptor() -> EntityDescriptor<Tour> {
    EntityDescriptor::builder("tours", "t")
        .column("id", "t.id")
        .column("name", "t.name")
        .column("keyword", "t.name")
        .column("minPrice", "t.price")
        .column("maxPrice", "t.price")
        .column("isActive", "t.active")
        .column("tour_type", "tt.name")
        .column("country", "loc.country")
        .join(
            JoinSpec::inner("tour_types", "tt", "tt.id = t.tour_type_id")
                .triggered_by(&["tour_type"]),
        )
        .join(
            JoinSpec::inner("tour_locations", "tl", "tl.tour_id = t.id")
                .triggered_by(&["country"])
                .fans_out(),
        )
        .join(
            JoinSpec::inner("locations", "loc", "loc.id = tl.location_id")
                .triggered_by(&["country"]),
        )
        .insert_columns(&["name", "price", "active", "tour_type_id"])
        .id_accessors(|e: &Tour| e.id, |e, id| e.id = id)
        .bind_with(|e| {
            vec![
                e.name.clone().into(),
                e.price.into(),
                e.active.into(),
                e.tour_type_id.into(),
            ]
        })
        .build()
}

pub fn map_row(row: &SqliteRow) -> Result<Tour, sqlx::Error> {
    Ok(Tour {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        active: row.try_get("active")?,
        tour_type_id: row.try_get("tour_type_id")?,
    })
}

pub fn repository(pool: SqlitePool) -> EntityRepository<Tour> {
    EntityRepository::new(pool, descriptor(), map_row)
}

super::classifier_family!(TourType, "tour_types", "tt", "tt.id", "tt.name");
