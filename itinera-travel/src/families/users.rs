//! Users and their classifier.
//!
//! Filter vocabulary:
//!
//! | Key | Column | Notes |
//! |-----|--------|-------|
//! | `id` | `u.id` | |
//! | `name` | `u.username` | exact match |
//! | `keyword` | `u.username` | substring via `LIKE` |
//! | `isActive` | `u.active` | |
//! | `user_type` | `ut.name` | pulls the classifier join |
//!
//! The `name` key targets the `username` column; the logical vocabulary is
//! uniform across families even where storage names differ.

use crate::models::User;
use itinera_data::{EntityDescriptor, JoinSpec};
use itinera_data_sqlx::EntityRepository;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

pub fn descriptor() -> EntityDescriptor<User> {
    EntityDescriptor::builder("users", "u")
        .column("id", "u.id")
        .column("name", "u.username")
        .column("keyword", "u.username")
        .column("isActive", "u.active")
        .column("user_type", "ut.name")
        .join(
            JoinSpec::inner("user_types", "ut", "ut.id = u.user_type_id")
                .triggered_by(&["user_type"]),
        )
        .insert_columns(&["username", "password", "active", "user_type_id"])
        .id_accessors(|e: &User| e.id, |e, id| e.id = id)
        .bind_with(|e| {
            vec![
                e.username.clone().into(),
                e.password.clone().into(),
                e.active.into(),
                e.user_type_id.into(),
            ]
        })
        .build()
}

pub fn map_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        active: row.try_get("active")?,
        user_type_id: row.try_get("user_type_id")?,
    })
}

pub fn repository(pool: SqlitePool) -> EntityRepository<User> {
    EntityRepository::new(pool, descriptor(), map_row)
}

super::classifier_family!(UserType, "user_types", "ut", "ut.id", "ut.name");
