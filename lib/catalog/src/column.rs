//! # Column Representation
//!
//! A column of a table schema. Cells are opaque text, so a column is fully
//! described by its name; validation of names happens in [`crate::Schema`].
//!
//! ```
//! use catalog::Column;
//!
//! let column = Column::new("name");
//! assert_eq!(column.column_name(), "name");
//! ```

use getset::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    TypedBuilder,
    Getters,
)]
#[serde(transparent)]
#[getset(get = "pub")]
pub struct Column {
    #[builder(setter(into))]
    column_name: String,
}

impl Column {
    pub fn new(column_name: &str) -> Self {
        Column::builder().column_name(column_name).build()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.column_name)
    }
}
