//! Tables, schemas and the database that owns them.
//!
//! Operations that can fail on bad input report the problem through an
//! [`Outcome`] and leave state untouched; positional accessors and table
//! handle lookups fail hard with a [`CatalogError`].

pub mod column;
pub mod database;
pub mod error;
pub mod outcome;
pub mod schema;
pub mod table;

pub use column::*;
pub use database::Database;
pub use error::CatalogError;
pub use outcome::Outcome;
pub use schema::{Schema, SchemaError};
pub use table::{IndexLookup, Row, Table};
