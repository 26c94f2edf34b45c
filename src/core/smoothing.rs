use crate::constants::{SMOOTHING_INPUT, SMOOTHING_RETAIN};

/// Single-pole low-pass filter: `s = s * retain + x * input`.
///
/// The first sample primes the filter so a steady input reads correctly
/// from the first measurement instead of ramping up from zero.
#[derive(Clone, Copy, Debug)]
pub struct ExpSmoother {
    value: f32,
    primed: bool,
    retain: f32,
    input: f32,
}

impl Default for ExpSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_RETAIN, SMOOTHING_INPUT)
    }
}

impl ExpSmoother {
    pub fn new(retain: f32, input: f32) -> Self {
        Self {
            value: 0.0,
            primed: false,
            retain,
            input,
        }
    }

    #[inline]
    pub fn push(&mut self, sample: f32) -> f32 {
        if self.primed {
            self.value = self.value * self.retain + sample * self.input;
        } else {
            self.value = sample;
            self.primed = true;
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Force the output to zero, keeping the filter primed.
    pub fn zero(&mut self) {
        self.value = 0.0;
        self.primed = true;
    }
}
