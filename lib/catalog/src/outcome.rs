use crate::CatalogError;
use tracing::warn;

/// Result of an operation that reports bad input instead of failing.
///
/// A skipped operation left the database unchanged; the carried
/// [`CatalogError`] says why. The same diagnostic is also emitted as a
/// `warn` event.
#[must_use = "a skipped operation is only reported through its outcome"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(CatalogError),
}

impl Outcome {
    pub(crate) fn skipped(error: CatalogError) -> Self {
        warn!(%error, "operation skipped");
        Outcome::Skipped(error)
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        !self.is_applied()
    }

    /// The reason the operation was skipped, if it was.
    pub fn diagnostic(&self) -> Option<&CatalogError> {
        match self {
            Outcome::Applied => None,
            Outcome::Skipped(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied() {
        let outcome = Outcome::Applied;
        assert!(outcome.is_applied());
        assert!(outcome.diagnostic().is_none());
    }

    #[test]
    fn test_skipped_carries_diagnostic() {
        let error = CatalogError::TableNotFound {
            table: "users".to_string(),
        };
        let outcome = Outcome::skipped(error.clone());

        assert!(outcome.is_skipped());
        assert_eq!(outcome.diagnostic(), Some(&error));
        assert_eq!(
            outcome.diagnostic().map(ToString::to_string),
            Some(r#"table "users" not found"#.to_string())
        );
    }
}
