//! Meals and their classifier.
//!
//! Filter vocabulary:
//!
//! | Key | Column | Notes |
//! |-----|--------|-------|
//! | `id` | `m.id` | |
//! | `name` | `m.name` | exact match |
//! | `keyword` | `m.name` | substring via `LIKE` |
//! | `minPrice` | `m.price` | lower bound, inclusive |
//! | `maxPrice` | `m.price` | upper bound, inclusive |
//! | `meal_types` | `mt.name` | pulls the link and classifier joins |
//!
//! A meal can carry several meal types, so the `meal_types` key reaches
//! its classifier through the link table and fans out.

use crate::models::Meal;
use itinera_data::{EntityDescriptor, JoinSpec};
use itinera_data_sqlx::EntityRepository;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

pub fn descriptor() -> EntityDescriptor<Meal> {
    EntityDescriptor::builder("meals", "m")
        .column("id", "m.id")
        .column("name", "m.name")
        .column("keyword", "m.name")
        .column("minPrice", "m.price")
        .column("maxPrice", "m.price")
        .column("meal_types", "mt.name")
        .join(
            JoinSpec::inner("meal_meal_types", "mmt", "mmt.meal_id = m.id")
                .triggered_by(&["meal_types"])
                .fans_out(),
        )
        .join(
            JoinSpec::inner("meal_types", "mt", "mt.id = mmt.meal_type_id")
                .triggered_by(&["meal_types"]),
        )
        .insert_columns(&["name", "price"])
        .id_accessors(|e: &Meal| e.id, |e, id| e.id = id)
        .bind_with(|e| vec![e.name.clone().into(), e.price.into()])
        .build()
}

pub fn map_row(row: &SqliteRow) -> Result<Meal, sqlx::Error> {
    Ok(Meal {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
    })
}

pub fn repository(pool: SqlitePool) -> EntityRepository<Meal> {
    EntityRepository::new(pool, descriptor(), map_row)
}

super::classifier_family!(MealType, "meal_types", "mt", "mt.id", "mt.name");
