//! RT Proof Harness: empirical proofs for RT guarantees.

use crate::osc::Oscillator;
use crate::rt::process_block_safe;
use crate::wavetable::WavetableProvider;
use crate::CycleParams;

/// Runs blocks through [`process_block_safe`] and counts state violations.
pub struct RtHarness<W> {
    osc: Oscillator<W>,
    scratch: Vec<i32>,
    violations: usize,
    blocks: usize,
}

impl<W: WavetableProvider> RtHarness<W> {
    pub fn new(osc: Oscillator<W>, block_size: usize) -> Self {
        Self {
            osc,
            scratch: vec![0; block_size],
            violations: 0,
            blocks: 0,
        }
    }

    /// Run one block and check that phase and LFO state stayed sane.
    pub fn run_block(&mut self, params: &CycleParams) -> &[i32] {
        process_block_safe(&mut self.osc, params, &mut self.scratch);
        self.blocks += 1;

        let state = self.osc.state();
        if !state.phase_in_range() {
            self.violations += 1;
        }
        if !state.lfo.current().is_finite() {
            self.violations += 1;
        }
        &self.scratch
    }

    pub fn violations(&self) -> usize {
        self.violations
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn oscillator_mut(&mut self) -> &mut Oscillator<W> {
        &mut self.osc
    }
}
