//! RT-safe invariant signaling for the oscillator's audio callback.
//!
//! Two tiers:
//! - **Tier 1 (RT-safe)**: the callback pushes invariant IDs into a
//!   lock-free SPSC queue.
//! - **Tier 2 (Non-RT)**: the control thread drains the queue and judges
//!   contracts.
//!
//! RT code **signals facts**. Non-RT code **judges correctness**.
//!
//! Signalling never allocates, locks or panics; when the queue is full the
//! signal is dropped.

use rtrb::{Consumer, Producer, RingBuffer};

// ============================================================================
// RT-Safe Invariant IDs (Tier 1)
// ============================================================================

/// A parameter event wrote a control field in the RT callback.
pub const INV_PARAM_UPDATE_DELIVERED: u8 = 1;

/// Output buffer was completely filled (no underrun).
pub const INV_SAMPLE_BUFFER_FILLED: u8 = 2;

/// Accumulated phase stayed within [0, 1) after the block.
pub const INV_PHASE_IN_RANGE: u8 = 3;

/// Note on/off event was accepted.
pub const INV_NOTE_EVENT_ACCEPTED: u8 = 4;

/// Control message was processed without error.
pub const INV_CONTROL_MSG_PROCESSED: u8 = 5;

/// RT callback executed without panic.
pub const INV_RT_CALLBACK_CLEAN: u8 = 6;

/// Oscillator state was zeroed on request.
pub const INV_STATE_RESET: u8 = 7;

// ============================================================================
// Invariant Signal Queue
// ============================================================================

/// Capacity for invariant signal queue.
/// Holds a few dozen blocks' worth of signals between main thread drains.
pub const INVARIANT_QUEUE_CAPACITY: usize = 256;

/// Creates a new invariant signal queue pair.
///
/// Returns (producer for RT, consumer for main thread).
pub fn new_invariant_queue() -> (Producer<u8>, Consumer<u8>) {
    RingBuffer::new(INVARIANT_QUEUE_CAPACITY)
}

/// Signals an invariant from the RT path; dropped if the queue is full.
#[inline]
pub fn signal_invariant(tx: &mut Producer<u8>, id: u8) {
    let _ = tx.push(id);
}

// ============================================================================
// Non-RT Verification (Tier 2)
// ============================================================================

/// Drains all pending invariant signals from the queue.
pub fn drain_invariant_signals(rx: &mut Consumer<u8>) -> Vec<u8> {
    let mut signals = Vec::with_capacity(rx.slots());
    while let Ok(id) = rx.pop() {
        signals.push(id);
    }
    signals
}

/// Counts occurrences of each invariant ID in a signal list.
pub fn count_invariant_signals(signals: &[u8]) -> [usize; 256] {
    let mut counts = [0usize; 256];
    for &id in signals {
        counts[id as usize] += 1;
    }
    counts
}

/// Contract verification: asserts that required invariants were signaled.
///
/// # Panics
/// Panics if any required invariant was not signaled at least once.
#[cfg(any(test, feature = "ppt"))]
pub fn contract_test_rt(contract_name: &str, signals: &[u8], required: &[u8]) {
    let counts = count_invariant_signals(signals);
    let missing: Vec<&str> = required
        .iter()
        .filter(|&&id| counts[id as usize] == 0)
        .map(|&id| invariant_name(id))
        .collect();

    if !missing.is_empty() {
        let present: std::collections::BTreeSet<&str> =
            signals.iter().map(|&id| invariant_name(id)).collect();
        panic!(
            "RT Contract '{}' missing invariants: {:?}. Present: {:?}",
            contract_name, missing, present
        );
    }
}

/// Maps invariant ID to human-readable name (for diagnostics only).
pub const fn invariant_name(id: u8) -> &'static str {
    match id {
        INV_PARAM_UPDATE_DELIVERED => "PARAM_UPDATE_DELIVERED",
        INV_SAMPLE_BUFFER_FILLED => "SAMPLE_BUFFER_FILLED",
        INV_PHASE_IN_RANGE => "PHASE_IN_RANGE",
        INV_NOTE_EVENT_ACCEPTED => "NOTE_EVENT_ACCEPTED",
        INV_CONTROL_MSG_PROCESSED => "CONTROL_MSG_PROCESSED",
        INV_RT_CALLBACK_CLEAN => "RT_CALLBACK_CLEAN",
        INV_STATE_RESET => "STATE_RESET",
        _ => "UNKNOWN",
    }
}
