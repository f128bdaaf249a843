pub mod app;

/// Number of entries in each channel of a window gamma ramp.
pub const GAMMA_RAMP_SIZE: usize = 256;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Opaque grey with all three colour channels set to `level`.
    #[inline]
    pub const fn grey(level: u8) -> Color {
        Color::new_rgb(level, level, level)
    }

    #[inline]
    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Pack into a `BGRA8888` pixel: blue in the most significant byte,
    /// alpha in the least significant one.
    #[inline]
    pub const fn to_bgra8888(&self) -> u32 {
        u32::from_be_bytes([self.b, self.g, self.r, self.a])
    }

    #[inline]
    pub const fn from_bgra8888(pixel: u32) -> Color {
        let [b, g, r, a] = pixel.to_be_bytes();
        Color { r, g, b, a }
    }
}

/// Per-channel 16-bit gamma ramps, in the layout window systems expect.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GammaRamp {
    pub red: [u16; GAMMA_RAMP_SIZE],
    pub green: [u16; GAMMA_RAMP_SIZE],
    pub blue: [u16; GAMMA_RAMP_SIZE],
}

impl Default for GammaRamp {
    fn default() -> Self {
        Self {
            red: [0; GAMMA_RAMP_SIZE],
            green: [0; GAMMA_RAMP_SIZE],
            blue: [0; GAMMA_RAMP_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra8888_puts_blue_in_the_high_byte() {
        let color = Color::new_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.to_bgra8888(), 0x3322_1144);
        assert_eq!(Color::from_bgra8888(0x3322_1144), color);
    }

    #[test]
    fn grey_is_opaque() {
        assert_eq!(Color::grey(0x80).rgba(), (0x80, 0x80, 0x80, 0xff));
    }
}
