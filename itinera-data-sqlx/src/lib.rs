//! # itinera-data-sqlx — SQLx drivers for the itinera engine
//!
//! This crate executes the statements that [`itinera-data`] composes. It
//! depends on `itinera-data` for descriptors, filters and statement text,
//! and adds the SQLite-backed repositories plus the bind and error glue
//! needed to talk to a real database.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EntityRepository`] | Generic CRUD driver: pool + descriptor + row mapper |
//! | [`TypeRepository`] | Classifier driver layering the non-blank / unique name contract |
//! | [`LinkRepository`] | Two-sided link-table driver with per-pair hydration |
//! | [`Hydrate`] | Pair-to-record conversion injected into `LinkRepository` |
//! | [`RowMapper<T>`] | `fn(&SqliteRow) -> Result<T, sqlx::Error>` injected into repositories |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, DataError>` |
//!
//! # Quick start
//!
//! ```ignore
//! use itinera_data::prelude::*;
//! use itinera_data_sqlx::EntityRepository;
//!
//! let repo = EntityRepository::new(pool.clone(), descriptor, map_row);
//! let rows = repo.search(&Filter::new().with("country", "France")).await?;
//! ```
//!
//! # Error bridging
//!
//! Due to Rust's orphan rules, `From<sqlx::Error> for DataError` can't be
//! implemented here. Use the [`SqlxErrorExt`] trait instead:
//!
//! ```ignore
//! use itinera_data_sqlx::SqlxErrorExt;
//!
//! let row = sqlx::query("SELECT ...")
//!     .fetch_one(&pool)
//!     .await
//!     .map_err(|e| e.into_data_error())?;
//! ```

pub mod bind;
pub mod error;
pub mod link_repository;
pub mod mapper;
pub mod repository;
pub mod type_repository;

pub use bind::bind_params;
pub use error::{SqlxErrorExt, SqlxResult};
pub use link_repository::{Hydrate, LinkRepository};
pub use mapper::RowMapper;
pub use repository::EntityRepository;
pub use type_repository::TypeRepository;

/// Re-exports of the most commonly used types from both `itinera-data` and
/// this crate.
pub mod prelude {
    pub use crate::{
        EntityRepository, Hydrate, LinkRepository, RowMapper, SqlxErrorExt, SqlxResult,
        TypeRepository,
    };
    pub use itinera_data::prelude::*;
}
