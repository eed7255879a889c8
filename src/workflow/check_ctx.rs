//! Which query of the run is being processed, for log prefixes

use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct CheckCtx {
    /// 1-based position in the input
    pub index: usize,
    pub total: usize,
}

impl CheckCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

impl Display for CheckCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[plate {}/{}]", self.index, self.total)
    }
}
