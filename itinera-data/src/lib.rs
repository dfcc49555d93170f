pub mod descriptor;
pub mod error;
pub mod filter;
pub mod join;
pub mod predicate;
pub mod repository;
pub mod statement;
pub mod value;

pub use descriptor::{ColumnMap, EntityDescriptor, LinkDescriptor, UNSAVED_ID};
pub use error::DataError;
pub use filter::Filter;
pub use join::{JoinKind, JoinSpec};
pub use predicate::{build_predicate, Predicate};
pub use repository::Repository;
pub use statement::{Dialect, EntityStatements, LinkStatements, QueryOptions, Statement};
pub use value::FilterValue;

pub mod prelude {
    //! Re-exports of the most commonly used engine types.
    pub use crate::{
        Dialect, EntityDescriptor, EntityStatements, Filter, FilterValue, JoinSpec,
        LinkDescriptor, LinkStatements, QueryOptions, Repository, UNSAVED_ID,
    };
}
