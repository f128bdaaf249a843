use std::time::Instant;

use c256_common::Color;

use super::registers::CursorControl;
use super::{BORDER_HEIGHT, BORDER_WIDTH, TILE_MAP_COLS, TILE_MAP_SIZE};

/// One byte-addressed colour channel, in the order the hardware stores them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    Blue,
    Green,
    Red,
    Alpha,
}

impl Channel {
    /// Channel for byte `index` of a `b, g, r, a` interleaved entry.
    pub const fn from_byte_index(index: usize) -> Channel {
        match index & 0b11 {
            0 => Channel::Blue,
            1 => Channel::Green,
            2 => Channel::Red,
            _ => Channel::Alpha,
        }
    }

    pub(super) fn get(self, color: &Color) -> u8 {
        match self {
            Channel::Blue => color.b,
            Channel::Green => color.g,
            Channel::Red => color.r,
            Channel::Alpha => color.a,
        }
    }

    pub(super) fn set(self, color: &mut Color, value: u8) {
        match self {
            Channel::Blue => color.b = value,
            Channel::Green => color.g = value,
            Channel::Red => color.r = value,
            Channel::Alpha => color.a = value,
        }
    }
}

/// The exact storage slot a colour register write landed in.
///
/// Debug tooling uses this to watch or patch a single named channel; read it
/// back with [`Vicky::cell`](super::Vicky::cell).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StorageCell {
    Lut { lut: u8, index: u8, channel: Channel },
    Gamma { channel: Channel, index: u8 },
    Border(Channel),
}

/// A tile layer: control block plus its tile-index map.
#[derive(Clone, Debug)]
pub struct TileSet {
    pub enabled: bool,
    pub lut: u8,
    pub tiled_sheet: bool,
    /// Offset of the tile sheet inside video RAM.
    pub start_addr: u32,
    pub stride_x: u16,
    pub stride_y: u16,
    map: Vec<u8>,
}

impl Default for TileSet {
    fn default() -> Self {
        Self {
            enabled: false,
            lut: 0,
            tiled_sheet: false,
            start_addr: 0,
            stride_x: 0,
            stride_y: 0,
            map: vec![0; TILE_MAP_SIZE],
        }
    }
}

impl TileSet {
    /// Tile index at screen tile coordinates.
    pub fn tile_at(&self, row: usize, col: usize) -> u8 {
        self.map[(row * TILE_MAP_COLS + col) % TILE_MAP_SIZE]
    }

    pub fn map(&self) -> &[u8] {
        &self.map
    }

    pub(super) fn store_map_byte(&mut self, offset: usize, value: u8) {
        self.map[offset % TILE_MAP_SIZE] = value;
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Sprite {
    pub lut: u8,
    pub tile_striding: bool,
    /// Offset of the 32x32 bitmap inside video RAM.
    pub start_addr: u32,
    pub x: u16,
    pub y: u16,
}

/// Text cursor registers plus the flash state the renderer owns.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cursor {
    pub control: CursorControl,
    pub char_code: u8,
    pub colour: u8,
    /// Text column.
    pub x: u16,
    /// Text row.
    pub y: u16,
    /// True while the cursor glyph is shown.
    pub phase: bool,
    pub last_flash: Option<Instant>,
}

impl Cursor {
    pub fn is_enabled(&self) -> bool {
        self.control.contains(CursorControl::ENABLE)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Border {
    pub enabled: bool,
    pub width: usize,
    pub height: usize,
    pub colour: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            enabled: false,
            width: BORDER_WIDTH,
            height: BORDER_HEIGHT,
            colour: Color::default(),
        }
    }
}

impl Border {
    /// Whether the pixel at (`x`, `y`) lies in one of the four margins.
    pub fn covers(&self, x: usize, y: usize, screen_width: usize, screen_height: usize) -> bool {
        x < self.width
            || x > screen_width - self.width
            || y < self.height
            || y > screen_height - self.height
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Bitmap {
    pub(super) enabled: bool,
    pub(super) lut: u8,
    pub(super) offset: u32,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct MousePointer {
    pub(super) enabled: bool,
    pub(super) select: bool,
    pub(super) x: u16,
    pub(super) y: u16,
}

/// OR `value` into byte `byte_pos` of a packed colour, counting from the most
/// significant byte.
///
/// Character colour memory is written this way: bits already set stay set, so
/// a second write to the same channel composes with the first.
pub fn accumulate_channel(packed: &mut u32, byte_pos: usize, value: u8) {
    *packed |= (value as u32) << (8 * (3 - (byte_pos & 0b11)));
}

pub(super) fn set_byte16(dest: &mut u16, index: usize, value: u8) {
    let mut bytes = dest.to_le_bytes();
    bytes[index & 1] = value;
    *dest = u16::from_le_bytes(bytes);
}

/// Replace one of the three low bytes of a 24-bit value.
pub(super) fn set_byte24(dest: &mut u32, index: usize, value: u8) {
    let mut bytes = dest.to_le_bytes();
    if index < 3 {
        bytes[index] = value;
    }
    bytes[3] = 0;
    *dest = u32::from_le_bytes(bytes);
}
