//! The oscillator: block generation, parameter events and note stubs.

// IMPORTANT: Do not call assert_invariant or any PPT logging in RT paths to avoid locks/allocs.

use crate::config::{spanning_morph_scale, ConfigError, OscConfig};
use crate::math::{f32_to_q31, q31_to_f32, sin_turns, softclip, w0_for_note};
use crate::params::ParamId;
use crate::reader::read_folded;
use crate::states::OscState;
use crate::wavetable::{Wavetable, WavetableProvider};
use crate::CycleParams;

/// One monophonic folded-wavetable voice.
///
/// Owns its state exclusively; the host drives it through `&mut` calls to
/// [`cycle`](Self::cycle) and [`param`](Self::param).
#[derive(Debug, Clone)]
pub struct Oscillator<W = Wavetable> {
    tables: W,
    config: OscConfig,
    morph_scale: f32,
    state: OscState,
}

impl<W: WavetableProvider> Oscillator<W> {
    /// Oscillator with the default config.
    pub fn new(tables: W) -> Self {
        let config = OscConfig::default();
        let morph_scale = spanning_morph_scale(tables.bank_count());
        tracing::debug!(banks = tables.bank_count(), "created oscillator");
        Self {
            tables,
            config,
            morph_scale,
            state: OscState::new(),
        }
    }

    pub fn with_config(tables: W, config: OscConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let morph_scale = config.resolved_morph_scale(tables.bank_count())?;
        tracing::debug!(
            banks = tables.bank_count(),
            sample_rate = config.sample_rate,
            morph_scale,
            "created oscillator"
        );
        Ok(Self {
            tables,
            config,
            morph_scale,
            state: OscState::new(),
        })
    }

    /// Zero every state field. Parameters must be sent again afterwards.
    pub fn init(&mut self) {
        self.state = OscState::new();
    }

    pub fn state(&self) -> &OscState {
        &self.state
    }

    pub fn config(&self) -> &OscConfig {
        &self.config
    }

    pub fn tables(&self) -> &W {
        &self.tables
    }

    pub fn morph_scale(&self) -> f32 {
        self.morph_scale
    }

    /// Fill `out` with Q31 samples. An empty buffer does no work.
    pub fn cycle(&mut self, params: &CycleParams, out: &mut [i32]) {
        self.generate(params, out.len(), |i, sig| out[i] = f32_to_q31(sig));
    }

    /// Same as [`cycle`](Self::cycle) but leaves the samples in floating point.
    pub fn cycle_f32(&mut self, params: &CycleParams, out: &mut [f32]) {
        self.generate(params, out.len(), |i, sig| out[i] = sig);
    }

    #[inline]
    fn generate<F: FnMut(usize, f32)>(&mut self, params: &CycleParams, frames: usize, mut emit: F) {
        if frames == 0 {
            return;
        }

        let w0 = w0_for_note(params.pitch.note, params.pitch.fine, self.config.sample_rate);
        self.state.phase_increment = w0;

        let mut lfo = self.state.lfo.ramp(q31_to_f32(params.shape_lfo), frames);
        let mut phase = self.state.phase;
        let morph = self.state.params.morph_index();
        let shape = self.state.params.shape_amount();
        let c = self.config.softclip;
        let weight = self.config.fold_weight;

        for i in 0..frames {
            let raw = softclip(c, read_folded(&self.tables, phase, morph + lfo.value(), weight));
            // Fold the bipolar sample into a phase for the sine stage.
            let p = if raw <= 0.0 { 1.0 - raw } else { raw - raw.trunc() };
            emit(i, softclip(c, shape * sin_turns(p)));

            phase += w0;
            phase -= phase.trunc();
            lfo.advance();
        }

        self.state.phase = phase;
        self.state.lfo.settle(lfo);
    }

    /// Raw host parameter event. Returns true when a control field was written.
    pub fn param(&mut self, index: u16, value: u16) -> bool {
        self.state.params.apply_raw(index, value, self.morph_scale)
    }

    /// Parameter event with an already-normalized value.
    pub fn set_param(&mut self, id: ParamId, value: f32) -> bool {
        self.state.params.apply(id, value, self.morph_scale)
    }

    /// Accepted; has no effect on the oscillator.
    pub fn note_on(&mut self, _params: &CycleParams) {}

    /// Accepted; has no effect on the oscillator.
    pub fn note_off(&mut self, _params: &CycleParams) {}
}

impl Default for Oscillator<Wavetable> {
    fn default() -> Self {
        Self::new(Wavetable::saw())
    }
}
