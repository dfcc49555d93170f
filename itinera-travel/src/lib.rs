//! # itinera-travel — travel catalog binding for the itinera engine
//!
//! The engine crates know nothing about travel; this crate supplies the
//! domain: models, the storage schema, one descriptor per entity family
//! (column map, joins, write columns, accessors), the injected row mappers
//! and the services that sit above the drivers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`models`] | Plain entity structs and hydrated link records |
//! | [`schema`] | SQLite DDL for the ten base and three link tables |
//! | [`families`] | Per-family descriptors, mappers and repository constructors |
//! | [`services`] | [`TypeService`] (name contract) and [`TourPlanner`] |
//! | [`catalog`] | [`Catalog`]: everything wired over one pool |
//!
//! ```ignore
//! let pool = SqlitePoolOptions::new().connect("sqlite::memory:").await?;
//! itinera_travel::create_schema(&pool).await?;
//! let catalog = Catalog::new(pool);
//!
//! let hits = catalog
//!     .tours
//!     .search(&Filter::new().with("country", "France").with("maxPrice", 500i64))
//!     .await?;
//! ```

pub mod catalog;
pub mod families;
pub mod models;
pub mod schema;
pub mod services;

pub use catalog::Catalog;
pub use models::{
    Location, LocationType, Meal, MealMealType, MealType, Tour, TourLocation, TourType,
    Transport, TransportType, User, UserTour, UserType,
};
pub use schema::create_schema;
pub use services::{TourPlanner, TypeService};
