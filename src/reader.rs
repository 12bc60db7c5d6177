//! Folded wavetable reader.
//!
//! The phase is scaled to `2 * TABLE_SIZE` steps. The first half reads the
//! bank directly; the second half mirrors the index back into the bank and
//! negates the result, rebuilding an odd-symmetric cycle from half a table.

use crate::math::{lerp, wrap_unit};
use crate::wavetable::{WavetableProvider, LUT_SIZE, TABLE_MASK, TABLE_SIZE};

/// Interpolation weight used on the mirrored half of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldWeight {
    /// Reuse the un-mirrored remainder `x0f - x0p` for both halves.
    #[default]
    Direct,
    /// Recompute the remainder in mirrored space (`1 - (x0f - x0p)`).
    Mirrored,
}

/// Bank selected by a morph value. Truncates toward zero; negative, NaN and
/// oversized values saturate into `[0, bank_count - 1]`.
#[inline]
pub fn select_bank(idx: f32, bank_count: usize) -> usize {
    (idx as usize).min(bank_count.saturating_sub(1))
}

/// Read one sample at phase `x` (turns) from the bank selected by `idx`.
#[inline]
pub fn read_folded<W>(tables: &W, x: f32, idx: f32, weight: FoldWeight) -> f32
where
    W: WavetableProvider + ?Sized,
{
    let p = wrap_unit(x);
    let x0f = 2.0 * p * TABLE_SIZE as f32;
    let x0p = x0f as usize;
    let frac = x0f - x0p as f32;

    let (x0, x1, sign, fr) = if x0p < TABLE_SIZE {
        (x0p, x0p + 1, 1.0, frac)
    } else {
        let x0 = TABLE_SIZE - (x0p & TABLE_MASK);
        let fr = match weight {
            FoldWeight::Direct => frac,
            FoldWeight::Mirrored => 1.0 - frac,
        };
        (x0, x0 - 1, -1.0, fr)
    };

    let wt = tables.bank(select_bank(idx, tables.bank_count()));
    sign * lerp(fr, wt[x0 % LUT_SIZE], wt[x1 % LUT_SIZE])
}
