//! Fixed-width trigger vectors for the settle, active and NBA regions.
//!
//! A [`TriggerVec`] records which triggers of an evaluation region fired
//! during the current pass. The width is a const generic so the storage is a
//! single machine word with no allocation.

use std::fmt;

/// A bit-set of `N` triggers, `1 <= N <= 64`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerVec<const N: usize> {
    bits: u64,
}

impl<const N: usize> TriggerVec<N> {
    const WIDTH_OK: () = assert!(N >= 1 && N <= 64, "trigger vectors hold 1 to 64 triggers");

    /// Creates a vector with every trigger cleared.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Self { bits: 0 }
    }

    /// Number of triggers in the vector.
    pub const fn width(&self) -> usize {
        N
    }

    /// Returns whether trigger `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn at(&self, index: usize) -> bool {
        assert!(index < N, "trigger index {index} out of range for width {N}");
        self.bits & (1 << index) != 0
    }

    /// Sets trigger `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < N, "trigger index {index} out of range for width {N}");
        if value {
            self.bits |= 1 << index;
        } else {
            self.bits &= !(1 << index);
        }
    }

    /// Returns `true` if any trigger is set.
    pub fn any(&self) -> bool {
        self.bits != 0
    }

    /// Clears every trigger.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Sets every trigger that is set in `other`.
    pub fn this_or(&mut self, other: &Self) {
        self.bits |= other.bits;
    }

}

impl<const N: usize> fmt::Debug for TriggerVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TriggerVec<{N}>({:0width$b})", self.bits, width = N)
    }
}
