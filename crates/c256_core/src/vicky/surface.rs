use c256_common::GammaRamp;

/// Where finished frames go.
///
/// The renderer owns exactly one surface for its whole lifetime and only
/// talks to it at frame boundaries.
pub trait Surface {
    /// Hand over a complete `width * height` frame of `BGRA8888` pixels.
    fn present(&mut self, frame: &[u32], width: usize, height: usize);

    fn set_gamma_ramp(&mut self, ramp: &GammaRamp);
}

/// Deferred surface work queued by register writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SurfaceEffect {
    GammaRampChanged,
}

/// A surface without a display. Keeps counters so callers can observe it.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    frames: u64,
    gamma: Option<GammaRamp>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn gamma_ramp(&self) -> Option<&GammaRamp> {
        self.gamma.as_ref()
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, _frame: &[u32], _width: usize, _height: usize) {
        self.frames += 1;
    }

    fn set_gamma_ramp(&mut self, ramp: &GammaRamp) {
        self.gamma = Some(ramp.clone());
    }
}
