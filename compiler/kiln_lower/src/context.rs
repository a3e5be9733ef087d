//! Per-unit lowering context.

use kiln_ir::StringInterner;
use kiln_symbols::TypeOracle;

/// Shared, read-only state a rewrite rule may consult, plus a rewrite
/// counter for logging.
///
/// One context exists per compilation unit; it is never shared between
/// workers.
pub struct LowerCx<'a> {
    oracle: &'a dyn TypeOracle,
    interner: &'a StringInterner,
    rewrites: usize,
}

impl<'a> LowerCx<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, interner: &'a StringInterner) -> Self {
        LowerCx {
            oracle,
            interner,
            rewrites: 0,
        }
    }

    #[inline]
    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Record that a rule replaced a node.
    #[inline]
    pub fn note_rewrite(&mut self) {
        self.rewrites += 1;
    }

    /// Rewrites recorded since the context was created.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }
}
