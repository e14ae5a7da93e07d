pub mod config;
pub mod index_kind;
pub mod rid;
pub mod util;

pub use config::*;
pub use index_kind::*;
pub use rid::*;
