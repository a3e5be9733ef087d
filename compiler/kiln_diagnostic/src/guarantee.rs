//! Type-level proof that an error was reported.

use std::fmt;

/// Obtainable only when at least one error diagnostic was recorded.
///
/// Functions that abandon work return it to prove the user was told why.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// `Some` iff `count` is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_nonzero_counts_produce_proof() {
        assert!(ErrorGuaranteed::from_error_count(0).is_none());
        assert!(ErrorGuaranteed::from_error_count(2).is_some());
    }
}
