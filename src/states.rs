//! Oscillator state carried by the RT engine.

// IMPORTANT: Do not call assert_invariant or any PPT logging in RT paths to avoid locks/allocs.

use crate::lfo::LfoRamp;
use crate::params::ParamStore;

/// Everything the block generator reads or writes between calls.
///
/// `phase` and the LFO's current value carry continuity across blocks;
/// `phase_increment` and the LFO target are refreshed at the top of every
/// block; the parameter store is written only by parameter events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OscState {
    /// Per-sample phase advance for the current block.
    pub phase_increment: f32,
    /// Running position in turns, always in [0, 1).
    pub phase: f32,
    pub lfo: LfoRamp,
    pub params: ParamStore,
}

impl OscState {
    pub const fn new() -> Self {
        Self {
            phase_increment: 0.0,
            phase: 0.0,
            lfo: LfoRamp::new(),
            params: ParamStore::new(),
        }
    }

    /// True while the accumulated phase satisfies its wrap invariant.
    pub fn phase_in_range(&self) -> bool {
        (0.0..1.0).contains(&self.phase)
    }
}
