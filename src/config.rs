//! Oscillator configuration, validated once at construction.

use crate::invariant_ppt::{
    assert_invariant, CONFIG_REJECTS_INVALID, CONFIG_VALID, MORPH_SCALE_SPANS_BANKS,
};
use crate::reader::FoldWeight;
use std::fmt;

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub const DEFAULT_SOFTCLIP: f32 = 0.05;

/// Static settings for one oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Cubic soft-clip coefficient, in [0, 1/3] so the curve stays monotonic.
    pub softclip: f32,
    /// Morph-select scale. `None` spans every bank of the provider.
    pub morph_scale: Option<f32>,
    pub fold_weight: FoldWeight,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            softclip: DEFAULT_SOFTCLIP,
            morph_scale: None,
            fold_weight: FoldWeight::Direct,
        }
    }
}

/// Errors from config validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate is zero, negative or not finite.
    InvalidSampleRate(f32),
    /// Soft-clip coefficient outside [0, 1/3].
    InvalidSoftclip(f32),
    /// Morph scale is negative or not finite.
    InvalidMorphScale(f32),
    /// Morph scale would select past the last bank of the provider.
    MorphScaleExceedsBanks { scale: f32, banks: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate(v) => write!(f, "invalid sample rate: {}", v),
            ConfigError::InvalidSoftclip(v) => {
                write!(f, "soft-clip coefficient {} outside [0, 1/3]", v)
            }
            ConfigError::InvalidMorphScale(v) => write!(f, "invalid morph scale: {}", v),
            ConfigError::MorphScaleExceedsBanks { scale, banks } => {
                write!(f, "morph scale {} reaches past {} banks", scale, banks)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl OscConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_softclip(mut self, softclip: f32) -> Self {
        self.softclip = softclip;
        self
    }

    pub fn with_morph_scale(mut self, scale: f32) -> Self {
        self.morph_scale = Some(scale);
        self
    }

    pub fn with_fold_weight(mut self, weight: FoldWeight) -> Self {
        self.fold_weight = weight;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        match &result {
            Ok(()) => assert_invariant(CONFIG_VALID, true, "config accepted", Some("validate")),
            Err(err) => {
                assert_invariant(
                    CONFIG_REJECTS_INVALID,
                    true,
                    "Invalid config, rejecting",
                    Some("validate"),
                );
                tracing::warn!(error = %err, "rejected oscillator config");
            }
        }
        result
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if !(0.0..=1.0 / 3.0).contains(&self.softclip) {
            return Err(ConfigError::InvalidSoftclip(self.softclip));
        }
        if let Some(scale) = self.morph_scale {
            if !(scale.is_finite() && scale >= 0.0) {
                return Err(ConfigError::InvalidMorphScale(scale));
            }
        }
        Ok(())
    }

    /// Scale applied to the morph-select slot for a provider with
    /// `bank_count` banks. The default maps the full knob range onto
    /// `[0, bank_count - 1]`; a configured scale must stay below
    /// `bank_count` so the stored morph index always names a bank.
    pub fn resolved_morph_scale(&self, bank_count: usize) -> Result<f32, ConfigError> {
        let scale = match self.morph_scale {
            Some(scale) => scale,
            None => spanning_morph_scale(bank_count),
        };
        if scale >= bank_count as f32 {
            let err = ConfigError::MorphScaleExceedsBanks {
                scale,
                banks: bank_count,
            };
            assert_invariant(
                CONFIG_REJECTS_INVALID,
                true,
                "Morph scale past last bank, rejecting",
                Some("resolved_morph_scale"),
            );
            tracing::warn!(error = %err, "rejected oscillator config");
            return Err(err);
        }
        Ok(scale)
    }
}

/// Morph scale spanning every bank of a provider.
///
/// # Panics
/// Panics if the provider exposes no banks.
pub(crate) fn spanning_morph_scale(bank_count: usize) -> f32 {
    assert_invariant(
        MORPH_SCALE_SPANS_BANKS,
        bank_count > 0,
        "provider exposes at least one bank",
        Some("spanning_morph_scale"),
    );
    bank_count.saturating_sub(1) as f32
}
