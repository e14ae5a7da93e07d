use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown index kind {0:?}, expected `ordered` or `hash`")]
pub struct UnknownIndexKind(pub String);

/// Selects the index implementation built over a column.
///
/// Configuration files and `.index` accept `ordered` (alias `btree`) and
/// `hash`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    #[serde(alias = "btree")]
    Ordered,
    Hash,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Ordered => write!(f, "ordered"),
            IndexKind::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for IndexKind {
    type Err = UnknownIndexKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ordered" | "btree" => Ok(IndexKind::Ordered),
            "hash" => Ok(IndexKind::Hash),
            _ => Err(UnknownIndexKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("ordered".parse::<IndexKind>(), Ok(IndexKind::Ordered));
        assert_eq!("BTREE".parse::<IndexKind>(), Ok(IndexKind::Ordered));
        assert_eq!("Hash".parse::<IndexKind>(), Ok(IndexKind::Hash));
        assert_eq!(
            "bitmap".parse::<IndexKind>(),
            Err(UnknownIndexKind("bitmap".to_string()))
        );
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [IndexKind::Ordered, IndexKind::Hash] {
            assert_eq!(kind.to_string().parse::<IndexKind>(), Ok(kind));
        }
    }
}
