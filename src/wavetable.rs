//! Wavetable provider: immutable banks of half-cycle lookup tables.
//!
//! Each bank stores the first half of an odd-symmetric cycle at
//! `TABLE_SIZE` steps plus one guard point, so a read at the fold point
//! never leaves the bank. The folded reader rebuilds the second half by
//! mirroring the index and negating the sample.

use crate::invariant_ppt::{assert_invariant, WAVETABLE_REJECTS_INVALID, WAVETABLE_WELL_FORMED};
use crate::math::note_hz;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const TABLE_SIZE_EXP: u32 = 7;
/// Steps per half cycle.
pub const TABLE_SIZE: usize = 1 << TABLE_SIZE_EXP;
pub const TABLE_MASK: usize = TABLE_SIZE - 1;
/// Stored points per bank (half cycle plus the guard point).
pub const LUT_SIZE: usize = TABLE_SIZE + 1;
/// Samples in one full cycle of source material.
pub const CYCLE_SIZE: usize = 2 * TABLE_SIZE;

/// Highest note covered by each built-in sawtooth bank, ascending.
pub const SAW_NOTES: [u8; 7] = [35, 47, 59, 71, 83, 95, 151];

/// Sample rate the built-in banks are band-limited for.
const SAW_REFERENCE_RATE: f64 = 48_000.0;

pub type Bank = [f32; LUT_SIZE];

/// Read-only source of wavetable banks.
///
/// Implementations must report at least one bank; `bank` is only called
/// with indices below `bank_count`.
pub trait WavetableProvider {
    fn bank_count(&self) -> usize;

    fn bank(&self, index: usize) -> &Bank;

    /// Bank whose note range covers `note`.
    fn bank_for_note(&self, note: u8) -> usize {
        let _ = note;
        0
    }
}

impl<T: WavetableProvider + ?Sized> WavetableProvider for &T {
    fn bank_count(&self) -> usize {
        (**self).bank_count()
    }

    fn bank(&self, index: usize) -> &Bank {
        (**self).bank(index)
    }

    fn bank_for_note(&self, note: u8) -> usize {
        (**self).bank_for_note(note)
    }
}

impl<T: WavetableProvider + ?Sized> WavetableProvider for Arc<T> {
    fn bank_count(&self) -> usize {
        (**self).bank_count()
    }

    fn bank(&self, index: usize) -> &Bank {
        (**self).bank(index)
    }

    fn bank_for_note(&self, note: u8) -> usize {
        (**self).bank_for_note(note)
    }
}

/// Errors while building a wavetable.
#[derive(Debug)]
pub enum WavetableError {
    /// The WAV file could not be read or decoded.
    Wav(hound::Error),
    /// No samples were supplied.
    Empty,
    /// Sample count is not a whole number of cycles.
    PartialCycle { len: usize },
    /// A sample is NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for WavetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavetableError::Wav(err) => write!(f, "failed to read wavetable WAV: {}", err),
            WavetableError::Empty => write!(f, "wavetable contains no samples"),
            WavetableError::PartialCycle { len } => write!(
                f,
                "wavetable length {} is not a multiple of the {}-sample cycle",
                len, CYCLE_SIZE
            ),
            WavetableError::NonFinite { index } => {
                write!(f, "wavetable sample {} is not finite", index)
            }
        }
    }
}

impl std::error::Error for WavetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavetableError::Wav(err) => Some(err),
            _ => None,
        }
    }
}

impl From<hound::Error> for WavetableError {
    fn from(err: hound::Error) -> Self {
        WavetableError::Wav(err)
    }
}

/// Owned set of banks with optional note-range metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    banks: Vec<Bank>,
    /// Top note per bank, ascending. Empty when the banks carry no ranges.
    notes: Vec<u8>,
}

impl Wavetable {
    /// Built-in band-limited sawtooth family, one bank per `SAW_NOTES` range.
    ///
    /// Bank 0 is the brightest; each following bank drops the harmonics that
    /// would alias for the top note of its range. Every bank peaks at 1.0.
    pub fn saw() -> Self {
        let banks = SAW_NOTES
            .iter()
            .map(|&note| saw_bank(saw_harmonics(note)))
            .collect();
        let table = Self {
            banks,
            notes: SAW_NOTES.to_vec(),
        };
        assert_invariant(
            WAVETABLE_WELL_FORMED,
            table.banks.iter().all(has_unit_peak),
            "every saw bank peaks at 1.0",
            Some("Wavetable::saw"),
        );
        table
    }

    /// Build banks from whole cycles of `CYCLE_SIZE` samples each.
    ///
    /// Only the first half of every cycle (plus the guard point) is kept;
    /// the source must be odd-symmetric for the fold to reproduce it.
    pub fn from_cycles(samples: &[f32]) -> Result<Self, WavetableError> {
        if let Err(err) = validate_cycles(samples) {
            assert_invariant(
                WAVETABLE_REJECTS_INVALID,
                true,
                "Malformed wavetable, rejecting",
                Some("Wavetable::from_cycles"),
            );
            tracing::warn!(error = %err, "rejected wavetable");
            return Err(err);
        }

        let banks: Vec<Bank> = samples
            .chunks_exact(CYCLE_SIZE)
            .map(|cycle| {
                let mut bank = [0.0; LUT_SIZE];
                bank.copy_from_slice(&cycle[..LUT_SIZE]);
                bank
            })
            .collect();

        tracing::debug!(banks = banks.len(), "built wavetable from cycles");
        Ok(Self {
            banks,
            notes: Vec::new(),
        })
    }

    /// Load banks from a WAV file of consecutive `CYCLE_SIZE`-sample cycles.
    ///
    /// Integer formats are normalised to [-1, 1]; only the first channel of
    /// multi-channel files is used.
    pub fn from_wav<P: AsRef<Path>>(path: P) -> Result<Self, WavetableError> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_value))
                    .collect::<Result<_, _>>()?
            }
        };

        let channel: Vec<f32> = if spec.channels > 1 {
            samples
                .iter()
                .step_by(spec.channels as usize)
                .copied()
                .collect()
        } else {
            samples
        };

        let table = Self::from_cycles(&channel)?;
        tracing::info!(
            path = %path.display(),
            banks = table.banks.len(),
            "loaded wavetable"
        );
        Ok(table)
    }

    /// Top note of each bank's range; empty for tables without ranges.
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    /// Largest absolute sample in a bank.
    pub fn peak(&self, index: usize) -> f32 {
        bank_peak(self.bank(index))
    }
}

impl Default for Wavetable {
    fn default() -> Self {
        Self::saw()
    }
}

impl WavetableProvider for Wavetable {
    fn bank_count(&self) -> usize {
        self.banks.len()
    }

    fn bank(&self, index: usize) -> &Bank {
        &self.banks[index.min(self.banks.len() - 1)]
    }

    fn bank_for_note(&self, note: u8) -> usize {
        self.notes
            .iter()
            .position(|&top| note <= top)
            .unwrap_or(self.notes.len().saturating_sub(1))
    }
}

fn bank_peak(bank: &Bank) -> f32 {
    bank.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

/// NaN anywhere in the bank fails too: `f32::max` skips it but the sum does not.
fn has_unit_peak(bank: &Bank) -> bool {
    let sum: f32 = bank.iter().sum();
    sum.is_finite() && (bank_peak(bank) - 1.0).abs() < 1e-4
}

fn validate_cycles(samples: &[f32]) -> Result<(), WavetableError> {
    if samples.is_empty() {
        return Err(WavetableError::Empty);
    }
    if samples.len() % CYCLE_SIZE != 0 {
        return Err(WavetableError::PartialCycle { len: samples.len() });
    }
    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(WavetableError::NonFinite { index });
    }
    Ok(())
}

/// Harmonics that stay below Nyquist for the top note of a range.
fn saw_harmonics(top_note: u8) -> usize {
    let nyquist = SAW_REFERENCE_RATE / 2.0;
    let harmonics = (nyquist / note_hz(top_note) as f64) as usize;
    harmonics.clamp(1, TABLE_SIZE - 1)
}

fn saw_bank(harmonics: usize) -> Bank {
    let mut acc = [0.0f64; LUT_SIZE];
    for (i, a) in acc.iter_mut().enumerate() {
        let x = i as f64 / CYCLE_SIZE as f64;
        *a = (1..=harmonics)
            .map(|k| (std::f64::consts::TAU * k as f64 * x).sin() / k as f64)
            .sum();
    }
    let peak = acc.iter().fold(0.0f64, |m, a| m.max(a.abs()));

    let mut bank = [0.0f32; LUT_SIZE];
    for (b, a) in bank.iter_mut().zip(acc.iter()) {
        *b = (a / peak) as f32;
    }
    bank
}
