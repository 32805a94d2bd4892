//! Reusable pre-allocated buffer for lattice backward induction.

/// Scratch storage for repeated lattice pricing calls.
///
/// The buffer grows on demand and never shrinks, amortizing allocations across runs.
/// Contents never carry meaning from one pricing call to the next.
#[derive(Debug, Clone, Default)]
pub struct PricingArena {
    pub tree_buffer: Vec<f64>,
}

impl PricingArena {
    /// Creates an arena sized for trees of up to `max_steps` steps.
    pub fn with_capacity(max_steps: usize) -> Self {
        Self {
            tree_buffer: Vec::with_capacity(max_steps.saturating_add(1)),
        }
    }

    /// Returns a mutable tree slice with length `n`.
    #[inline]
    pub fn tree_slice(&mut self, n: usize) -> &mut [f64] {
        if self.tree_buffer.len() < n {
            self.tree_buffer.resize(n, 0.0);
        }
        &mut self.tree_buffer[..n]
    }
}
