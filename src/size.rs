//! Container size constraints.
//!
//! A size constraint is always attached to a container schema and evaluated
//! while that schema checks a value; it is never evaluated standalone.

use serde::{Deserialize, Serialize};

use crate::errors::{SchemaError, SchemaResult};

/// Size constraint attached to a container schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    /// No size check.
    #[default]
    Unconstrained,
    /// Container length must equal the given count.
    Exact(usize),
    /// All sibling containers under one parent iteration must share a
    /// length. The first sibling seen establishes the reference; against a
    /// single container in isolation the constraint passes.
    AllEqual,
}

impl Size {
    /// Checks a single container's length.
    pub(crate) fn check_len(&self, found: usize) -> SchemaResult<()> {
        match self {
            Size::Exact(expected) if found != *expected => Err(SchemaError::new(format!(
                "Expected length {}, found length {}",
                expected, found
            ))),
            _ => Ok(()),
        }
    }
}

impl From<usize> for Size {
    fn from(count: usize) -> Self {
        Size::Exact(count)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::Unconstrained => f.write_str("UNCONSTRAINED"),
            Size::Exact(count) => write!(f, "{}", count),
            Size::AllEqual => f.write_str("ALL_EQUAL"),
        }
    }
}

/// Tracks sibling container sizes for [`Size::AllEqual`].
///
/// Owned by the parent iteration: the first sibling observed sets the
/// reference size, and every later sibling must match it. The reference is
/// always reported second, with the position where it was established.
#[derive(Debug, Default)]
pub(crate) struct SiblingSizes {
    reference: Option<(usize, usize)>,
}

impl SiblingSizes {
    pub(crate) fn observe(&mut self, position: usize, size: usize) -> SchemaResult<()> {
        match self.reference {
            None => {
                self.reference = Some((position, size));
                Ok(())
            }
            Some((_, reference_size)) if size == reference_size => Ok(()),
            Some((reference_position, reference_size)) => Err(SchemaError::new(format!(
                "Expected members of equal size, found size={} at position {} but size={} at position {}",
                size, position, reference_size, reference_position
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_accepts_any_length() {
        assert!(Size::Unconstrained.check_len(0).is_ok());
        assert!(Size::Unconstrained.check_len(100).is_ok());
    }

    #[test]
    fn test_exact_length() {
        assert!(Size::Exact(3).check_len(3).is_ok());
        let err = Size::Exact(3).check_len(2).unwrap_err();
        assert_eq!(err.message(), "Expected length 3, found length 2");
    }

    #[test]
    fn test_all_equal_passes_in_isolation() {
        assert!(Size::AllEqual.check_len(0).is_ok());
        assert!(Size::AllEqual.check_len(7).is_ok());
    }

    #[test]
    fn test_from_count() {
        assert_eq!(Size::from(5), Size::Exact(5));
    }

    #[test]
    fn test_sibling_sizes_reference_is_first_seen() {
        let mut siblings = SiblingSizes::default();
        assert!(siblings.observe(0, 3).is_ok());
        assert!(siblings.observe(1, 3).is_ok());
        assert!(siblings.observe(2, 3).is_ok());
        let err = siblings.observe(3, 1).unwrap_err();
        assert_eq!(
            err.message(),
            "Expected members of equal size, found size=1 at position 3 but size=3 at position 0"
        );
    }
}
