//! Control message types for main → RT communication.
//!
//! Messages travel through a lock-free SPSC queue from the control thread to
//! the audio callback, which drains the queue before rendering each block.
//! Parameter writes therefore land between blocks, never inside one.
//!
//! All messages are fixed-size and `Copy`.

use crate::params::ParamId;
use crate::Pitch;
use rtrb::{Consumer, Producer, RingBuffer};

/// Capacity for control message queue.
/// Should absorb a burst of knob movement between two blocks.
pub const CONTROL_QUEUE_CAPACITY: usize = 256;

/// Creates a new control message queue pair.
///
/// Returns (producer for main thread, consumer for RT).
pub fn new_control_queue() -> (Producer<ControlMsg>, Consumer<ControlMsg>) {
    RingBuffer::new(CONTROL_QUEUE_CAPACITY)
}

/// Control messages sent from main thread to RT callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMsg {
    /// Raw host parameter event.
    SetParam {
        /// Host slot index (see [`ParamId::from_index`]).
        index: u16,
        /// Raw 10-bit value.
        value: u16,
    },

    /// Note on (accepted, no effect).
    NoteOn { pitch: Pitch },

    /// Note off (accepted, no effect).
    NoteOff { pitch: Pitch },

    /// Zero all oscillator state.
    Reset,
}

impl ControlMsg {
    pub fn set_param(id: ParamId, value: u16) -> Self {
        ControlMsg::SetParam {
            index: id.index(),
            value,
        }
    }

    /// The parameter slot this message targets, if recognized.
    pub fn param_id(&self) -> Option<ParamId> {
        match self {
            ControlMsg::SetParam { index, .. } => ParamId::from_index(*index),
            _ => None,
        }
    }

    /// Returns a human-readable description (for debugging).
    pub fn description(&self) -> &'static str {
        match self {
            ControlMsg::SetParam { .. } => "SetParam",
            ControlMsg::NoteOn { .. } => "NoteOn",
            ControlMsg::NoteOff { .. } => "NoteOff",
            ControlMsg::Reset => "Reset",
        }
    }
}
