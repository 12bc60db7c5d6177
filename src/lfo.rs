//! Per-block linear ramp for the shape LFO.
//!
//! Each block latches a new target and walks from the previous block's end
//! value toward it in equal steps. The target is approached, never snapped
//! to: the stored value after a block is the accumulated sum of the steps.

/// Persistent LFO state carried between blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LfoRamp {
    target: f32,
    current: f32,
}

/// In-flight ramp for one block. Copy it into the sample loop, then hand it
/// back with [`LfoRamp::settle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    value: f32,
    step: f32,
}

impl LfoRamp {
    pub const fn new() -> Self {
        Self {
            target: 0.0,
            current: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Latch `target` and start a ramp spanning `frames` samples.
    ///
    /// `frames` must be non-zero.
    #[inline]
    pub fn ramp(&mut self, target: f32, frames: usize) -> Ramp {
        self.target = target;
        Ramp {
            value: self.current,
            step: (target - self.current) / frames as f32,
        }
    }

    /// Store where the ramp ended.
    #[inline]
    pub fn settle(&mut self, ramp: Ramp) {
        self.current = ramp.value;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Ramp {
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn advance(&mut self) {
        self.value += self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lfo: &mut LfoRamp, target: f32, frames: usize) -> Vec<f32> {
        let mut ramp = lfo.ramp(target, frames);
        let mut seen = Vec::with_capacity(frames);
        for _ in 0..frames {
            seen.push(ramp.value());
            ramp.advance();
        }
        lfo.settle(ramp);
        seen
    }

    #[test]
    fn starts_from_previous_value() {
        let mut lfo = LfoRamp::new();
        let seen = run(&mut lfo, 1.0, 4);
        assert_eq!(seen, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(lfo.current(), 1.0);
        assert_eq!(lfo.target(), 1.0);

        let seen = run(&mut lfo, 0.0, 2);
        assert_eq!(seen, vec![1.0, 0.5]);
    }

    #[test]
    fn ends_at_accumulated_sum() {
        let mut lfo = LfoRamp::new();
        let frames = 48;
        let target = 0.3f32;
        run(&mut lfo, target, frames);

        let step = target / frames as f32;
        let mut expected = 0.0f32;
        for _ in 0..frames {
            expected += step;
        }
        assert_eq!(lfo.current(), expected);
        assert!((lfo.current() - target).abs() < 1e-5);
    }

    #[test]
    fn steady_target_holds() {
        let mut lfo = LfoRamp::new();
        let seen = run(&mut lfo, 0.0, 16);
        assert!(seen.iter().all(|&v| v == 0.0));
        assert_eq!(lfo.current(), 0.0);
    }

    #[test]
    fn reset_zeroes() {
        let mut lfo = LfoRamp::new();
        run(&mut lfo, -0.5, 8);
        lfo.reset();
        assert_eq!(lfo, LfoRamp::new());
    }
}
