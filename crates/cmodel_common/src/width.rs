//! Fixed-width signal value helpers.
//!
//! Signal values travel as `u64` through the generic read/write paths and are
//! truncated to the declared width of the signal on every write.

/// Returns a mask with the low `width` bits set. Widths above 64 saturate.
pub const fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Truncates `value` to `width` bits.
pub const fn fit(width: u32, value: u64) -> u64 {
    value & mask(width)
}
