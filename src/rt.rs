//! RT module: audio-thread handle, control-thread handle and offline render.

// IMPORTANT: Do not call assert_invariant or any PPT logging in RT paths to avoid locks/allocs.

use crate::control::{new_control_queue, ControlMsg};
use crate::invariant_rt::{
    drain_invariant_signals, new_invariant_queue, signal_invariant, INV_CONTROL_MSG_PROCESSED,
    INV_NOTE_EVENT_ACCEPTED, INV_PARAM_UPDATE_DELIVERED, INV_PHASE_IN_RANGE,
    INV_RT_CALLBACK_CLEAN, INV_SAMPLE_BUFFER_FILLED, INV_STATE_RESET,
};
use crate::osc::Oscillator;
use crate::wavetable::WavetableProvider;
use crate::CycleParams;
use rtrb::{Consumer, Producer};
use std::path::Path;

/// Splits an oscillator into its audio-thread and control-thread halves.
pub struct OscillatorCore;

impl OscillatorCore {
    pub fn new_with_channels<W: WavetableProvider>(
        osc: Oscillator<W>,
    ) -> (RtHandle<W>, RtControl) {
        let (control_tx, control_rx) = new_control_queue();
        let (invariant_tx, invariant_rx) = new_invariant_queue();
        (
            RtHandle {
                osc,
                control_rx,
                invariant_tx,
            },
            RtControl {
                control_tx,
                invariant_rx,
            },
        )
    }
}

/// Audio-thread half: owns the oscillator.
pub struct RtHandle<W> {
    osc: Oscillator<W>,
    control_rx: Consumer<ControlMsg>,
    invariant_tx: Producer<u8>,
}

impl<W: WavetableProvider> RtHandle<W> {
    /// Apply pending control messages, then render one block.
    pub fn process_block(&mut self, params: &CycleParams, out: &mut [i32]) {
        while let Ok(msg) = self.control_rx.pop() {
            self.apply(msg, params);
        }

        self.osc.cycle(params, out);

        if !out.is_empty() {
            signal_invariant(&mut self.invariant_tx, INV_SAMPLE_BUFFER_FILLED);
        }
        if self.osc.state().phase_in_range() {
            signal_invariant(&mut self.invariant_tx, INV_PHASE_IN_RANGE);
        }
        signal_invariant(&mut self.invariant_tx, INV_RT_CALLBACK_CLEAN);
    }

    fn apply(&mut self, msg: ControlMsg, params: &CycleParams) {
        match msg {
            ControlMsg::SetParam { index, value } => {
                if self.osc.param(index, value) {
                    signal_invariant(&mut self.invariant_tx, INV_PARAM_UPDATE_DELIVERED);
                }
            }
            ControlMsg::NoteOn { pitch } => {
                self.osc.note_on(&CycleParams { pitch, ..*params });
                signal_invariant(&mut self.invariant_tx, INV_NOTE_EVENT_ACCEPTED);
            }
            ControlMsg::NoteOff { pitch } => {
                self.osc.note_off(&CycleParams { pitch, ..*params });
                signal_invariant(&mut self.invariant_tx, INV_NOTE_EVENT_ACCEPTED);
            }
            ControlMsg::Reset => {
                self.osc.init();
                signal_invariant(&mut self.invariant_tx, INV_STATE_RESET);
            }
        }
        signal_invariant(&mut self.invariant_tx, INV_CONTROL_MSG_PROCESSED);
    }

    pub fn oscillator(&self) -> &Oscillator<W> {
        &self.osc
    }
}

/// Control-thread half: sends messages and collects invariant signals.
pub struct RtControl {
    control_tx: Producer<ControlMsg>,
    invariant_rx: Consumer<u8>,
}

impl RtControl {
    /// Queue a message for the next block. Hands the message back when the
    /// queue is full.
    pub fn send(&mut self, msg: ControlMsg) -> Result<(), ControlMsg> {
        self.control_tx.push(msg).map_err(|rtrb::PushError::Full(msg)| {
            tracing::warn!(msg = msg.description(), "control queue full, dropping message");
            msg
        })
    }

    /// Queue a raw host parameter event.
    pub fn param(&mut self, index: u16, value: u16) -> Result<(), ControlMsg> {
        self.send(ControlMsg::SetParam { index, value })
    }

    pub fn drain_invariant_signals(&mut self) -> Vec<u8> {
        let signals = drain_invariant_signals(&mut self.invariant_rx);
        tracing::trace!(count = signals.len(), "drained invariant signals");
        signals
    }
}

/// Render one block with panic containment; a panic leaves the block silent.
pub fn process_block_safe<W: WavetableProvider>(
    osc: &mut Oscillator<W>,
    params: &CycleParams,
    out: &mut [i32],
) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        osc.cycle(params, out);
    }));
    if result.is_err() {
        out.fill(0);
    }
}

/// Render `frames` samples offline in blocks of `block_size` (a zero block
/// size renders everything as one block). The last block may be short.
pub fn render_offline<W: WavetableProvider>(
    osc: &mut Oscillator<W>,
    params: &CycleParams,
    frames: usize,
    block_size: usize,
) -> Vec<i32> {
    let mut output = vec![0; frames];
    let block_size = if block_size == 0 {
        frames.max(1)
    } else {
        block_size
    };
    for block in output.chunks_mut(block_size) {
        osc.cycle(params, block);
    }
    output
}

/// Render offline and write a mono 32-bit integer WAV at the oscillator's
/// sample rate.
pub fn render_wav<W: WavetableProvider, P: AsRef<Path>>(
    osc: &mut Oscillator<W>,
    params: &CycleParams,
    frames: usize,
    block_size: usize,
    path: P,
) -> Result<(), hound::Error> {
    let samples = render_offline(osc, params, frames, block_size);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: osc.config().sample_rate.round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    tracing::info!(
        path = %path.as_ref().display(),
        frames,
        "rendered oscillator to WAV"
    );
    Ok(())
}
