//! Contract tests for the non-RT invariant log.
//! Setup paths (config validation, wavetable construction) must record the
//! invariants they enforce.

#![cfg(feature = "ppt")]

use foldosc::invariant_ppt::{
    contract_test, CONFIG_REJECTS_INVALID, CONFIG_VALID, MORPH_SCALE_SPANS_BANKS,
    WAVETABLE_REJECTS_INVALID, WAVETABLE_WELL_FORMED,
};
use foldosc::wavetable::CYCLE_SIZE;
use foldosc::{OscConfig, Oscillator, Wavetable, WavetableError};

#[test]
fn test_config_contracts() {
    let _ = OscConfig::default().validate();
    let _ = OscConfig::default().with_softclip(1.0).validate();
    contract_test(
        "config validation",
        &[CONFIG_VALID, CONFIG_REJECTS_INVALID],
    );
}

#[test]
fn test_wavetable_contracts() {
    let cycles = vec![0.0f32; 2 * CYCLE_SIZE];
    assert!(Wavetable::from_cycles(&cycles).is_ok());
    let _ = Wavetable::saw();
    assert!(matches!(
        Wavetable::from_cycles(&cycles[..CYCLE_SIZE + 1]),
        Err(WavetableError::PartialCycle { len }) if len == CYCLE_SIZE + 1
    ));
    contract_test(
        "wavetable construction",
        &[WAVETABLE_WELL_FORMED, WAVETABLE_REJECTS_INVALID],
    );
}

#[test]
fn test_oscillator_construction_contracts() {
    let osc = Oscillator::with_config(Wavetable::saw(), OscConfig::default()).unwrap();
    assert_eq!(osc.morph_scale(), 6.0);
    contract_test(
        "oscillator construction",
        &[CONFIG_VALID, WAVETABLE_WELL_FORMED, MORPH_SCALE_SPANS_BANKS],
    );
}

#[test]
fn test_morph_scale_rejection_contract() {
    let cfg = OscConfig::default().with_morph_scale(7.0);
    assert!(Oscillator::with_config(Wavetable::saw(), cfg).is_err());
    contract_test("morph scale past last bank", &[CONFIG_REJECTS_INVALID]);
}

#[test]
#[should_panic(expected = "invariants not enforced")]
fn test_contract_reports_missing_invariant() {
    contract_test("unknown invariant", &[999]);
}
