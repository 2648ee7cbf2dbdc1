//! Error handling and result types for KdTree operations.
//!
//! Lookups that miss and erases of absent keys are not errors; they are reported
//! through the end position, `None` or `false`. The errors here cover invalid
//! traversal, misuse of positions and detected structural corruption.

/// Error type for k-d tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// Attempted to advance the end position.
    IncrementPastEnd,
    /// Attempted to step back from the first position.
    DecrementPastBegin,
    /// Attempted to read the entry at the end position.
    DereferenceEnd,
    /// The position refers to a node that has since been removed.
    StalePosition(String),
    /// The position was produced by a different tree.
    ForeignPosition(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Tree corruption detected.
    CorruptedTree(String),
}

impl KdTreeError {
    /// Create a StalePosition error for a node slot
    pub fn stale_position(node: u32, generation: u32) -> Self {
        Self::StalePosition(format!(
            "node {} (generation {}) is no longer in the tree",
            node, generation
        ))
    }

    /// Create a ForeignPosition error with both tree identities
    pub fn foreign_position(expected: u64, found: u64) -> Self {
        Self::ForeignPosition(format!(
            "position belongs to tree {} but was used with tree {}",
            found, expected
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error comes from stepping outside the traversal range
    pub fn is_traversal_error(&self) -> bool {
        matches!(self, Self::IncrementPastEnd | Self::DecrementPastBegin)
    }

    /// Check if this error comes from a position that can no longer be used
    pub fn is_position_error(&self) -> bool {
        matches!(
            self,
            Self::DereferenceEnd | Self::StalePosition(_) | Self::ForeignPosition(_)
        )
    }
}

impl std::fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KdTreeError::IncrementPastEnd => write!(f, "Cannot increment the end position"),
            KdTreeError::DecrementPastBegin => write!(f, "Cannot decrement the begin position"),
            KdTreeError::DereferenceEnd => write!(f, "Cannot dereference the end position"),
            KdTreeError::StalePosition(msg) => write!(f, "Stale position: {}", msg),
            KdTreeError::ForeignPosition(msg) => write!(f, "Foreign position: {}", msg),
            KdTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            KdTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for KdTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, KdTreeError>;

/// Public result type for tree operations that may fail
pub type KdResult<T> = Result<T, KdTreeError>;

/// Result extension trait for improved error handling
pub trait KdResultExt<T> {
    /// Convert to a KdResult with additional context
    fn with_context(self, context: &str) -> KdResult<T>;

    /// Convert to a KdResult with operation context
    fn with_operation(self, operation: &str) -> KdResult<T>;

    /// Log error and continue with default value
    fn or_default_with_log(self) -> T
    where
        T: Default;
}

impl<T> KdResultExt<T> for Result<T, KdTreeError> {
    fn with_context(self, context: &str) -> KdResult<T> {
        self.map_err(|e| match e {
            KdTreeError::StalePosition(msg) => {
                KdTreeError::StalePosition(format!("{}: {}", context, msg))
            }
            KdTreeError::ForeignPosition(msg) => {
                KdTreeError::ForeignPosition(format!("{}: {}", context, msg))
            }
            KdTreeError::DataIntegrityError(msg) => KdTreeError::data_integrity(context, &msg),
            KdTreeError::CorruptedTree(msg) => KdTreeError::corrupted_tree(context, &msg),
            other => other,
        })
    }

    fn with_operation(self, operation: &str) -> KdResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }

    fn or_default_with_log(self) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::warn!("k-d tree operation failed, using default: {}", e);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_errors_are_distinct() {
        assert_ne!(KdTreeError::IncrementPastEnd, KdTreeError::DecrementPastBegin);
        assert!(KdTreeError::IncrementPastEnd.is_traversal_error());
        assert!(KdTreeError::DecrementPastBegin.is_traversal_error());
        assert!(!KdTreeError::DereferenceEnd.is_traversal_error());
    }

    #[test]
    fn test_with_context_keeps_variant() {
        let err: KdResult<()> = Err(KdTreeError::stale_position(3, 7));
        let err = err.with_operation("erase_at").unwrap_err();
        assert!(err.is_position_error());
        assert!(err.to_string().contains("Operation 'erase_at'"));
        assert!(err.to_string().contains("node 3"));
    }

    #[test]
    fn test_or_default_with_log() {
        let err: KdResult<usize> = Err(KdTreeError::IncrementPastEnd);
        assert_eq!(err.or_default_with_log(), 0);
        let ok: KdResult<usize> = Ok(5);
        assert_eq!(ok.or_default_with_log(), 5);
    }
}
