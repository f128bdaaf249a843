//! Vicky II, the C256 video chip.
//!
//! Bus writes land in [`Vicky::store_byte_traced`], which decodes them into
//! typed state; [`Vicky::render_line`] composites that state one scanline at a
//! time and hands each finished frame to a [`Surface`].

mod decode;
pub mod registers;
mod render;
mod state;
mod surface;

#[cfg(test)]
mod tests;

use c256_common::{Color, GammaRamp};

use crate::address::{Address, MemoryRegion};
use crate::bus::BusDevice;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use registers::*;
use state::{set_byte16, Bitmap, MousePointer};

pub use registers::{CursorControl, VideoMode};
pub use state::{accumulate_channel, Border, Channel, Cursor, Sprite, StorageCell, TileSet};
pub use surface::{HeadlessSurface, Surface, SurfaceEffect};

pub const NUM_LAYERS: usize = 4;
/// Sprite enable masks exist for every value of the 3-bit layer field.
pub const NUM_SPRITE_LAYERS: usize = 8;
pub const NUM_SPRITES: usize = 32;
pub const NUM_LUTS: usize = 8;
pub const LUT_SIZE: usize = 256;
pub const CHAR_LUT_SIZE: usize = 16;

pub const TILE_SIZE: usize = 16;
/// Tiles per row of a tile sheet.
pub const TILE_SHEET_COLS: usize = 16;
pub const TILE_MAP_COLS: usize = 64;
pub const TILE_MAP_SIZE: usize = 0x800;
pub const SPRITE_SIZE: usize = 32;
pub const MOUSE_POINTER_SIZE: usize = 16;

pub const BORDER_WIDTH: usize = 32;
pub const BORDER_HEIGHT: usize = 32;

pub const TEXT_COLS_PER_LINE: usize = 128;
pub const GLYPH_SIZE: usize = 8;

pub const VRAM_SIZE: usize = 0x40_0000;
const TEXT_MEM_SIZE: usize = 0x2000;
const FONT_BANK_SIZE: usize = 0x800;
const MOUSE_POINTER_BYTES: usize = 0x100;

/// Buffers the bus can read and write without register decode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Buffer {
    VideoRam,
    TextMemory,
    TextColourMemory,
    CursorX,
    CursorY,
    MouseX,
    MouseY,
    FontBank0,
    FontBank1,
    MousePointer0,
    MousePointer1,
}

static REGIONS: [(Buffer, MemoryRegion); 11] = [
    (
        Buffer::VideoRam,
        MemoryRegion::new("video ram", VRAM_START.as_int(), VRAM_END.as_int()),
    ),
    (
        Buffer::TextMemory,
        MemoryRegion::new(
            "text memory",
            CS_TEXT_MEM_PTR.as_int(),
            CS_COLOR_MEM_PTR.with_offset(-1).as_int(),
        ),
    ),
    (
        Buffer::TextColourMemory,
        MemoryRegion::new(
            "text colour memory",
            CS_COLOR_MEM_PTR.as_int(),
            BTX_START.with_offset(-1).as_int(),
        ),
    ),
    (
        Buffer::CursorX,
        MemoryRegion::new(
            "cursor x",
            VKY_TXT_CURSOR_X_REG_L.as_int(),
            VKY_TXT_CURSOR_X_REG_H.as_int(),
        ),
    ),
    (
        Buffer::CursorY,
        MemoryRegion::new(
            "cursor y",
            VKY_TXT_CURSOR_Y_REG_L.as_int(),
            VKY_TXT_CURSOR_Y_REG_H.as_int(),
        ),
    ),
    (
        Buffer::MouseX,
        MemoryRegion::new("mouse x", MOUSE_PTR_X_POS_L.as_int(), MOUSE_PTR_X_POS_H.as_int()),
    ),
    (
        Buffer::MouseY,
        MemoryRegion::new("mouse y", MOUSE_PTR_Y_POS_L.as_int(), MOUSE_PTR_Y_POS_H.as_int()),
    ),
    (
        Buffer::FontBank0,
        MemoryRegion::new(
            "font bank 0",
            FONT_MEMORY_BANK0.as_int(),
            FONT_MEMORY_BANK1.with_offset(-1).as_int(),
        ),
    ),
    (
        Buffer::FontBank1,
        MemoryRegion::new(
            "font bank 1",
            FONT_MEMORY_BANK1.as_int(),
            FONT_MEMORY_BANK1_END.as_int(),
        ),
    ),
    (
        Buffer::MousePointer0,
        MemoryRegion::new(
            "mouse cursor 0",
            MOUSE_PTR_GRAP0_START.as_int(),
            MOUSE_PTR_GRAP0_END.with_offset(-1).as_int(),
        ),
    ),
    (
        Buffer::MousePointer1,
        MemoryRegion::new(
            "mouse cursor 1",
            MOUSE_PTR_GRAP1_START.as_int(),
            MOUSE_PTR_GRAP1_END.with_offset(-1).as_int(),
        ),
    ),
];

fn find_buffer(addr: Address) -> Option<(Buffer, usize)> {
    REGIONS
        .iter()
        .find_map(|(buffer, region)| region.offset_of(addr).map(|offset| (*buffer, offset)))
}

pub struct Vicky {
    mode: VideoMode,
    border: Border,
    /// 24-bit colour, blue in the low byte.
    background: u32,
    cursor: Cursor,
    bitmap: Bitmap,
    tile_sets: [TileSet; NUM_LAYERS],
    sprites: [Sprite; NUM_SPRITES],
    /// One bit per sprite, one word per layer.
    enabled_sprites: [u32; NUM_SPRITE_LAYERS],
    lut: Vec<[Color; LUT_SIZE]>,
    gamma: GammaRamp,
    fg_colour_mem: [u32; CHAR_LUT_SIZE],
    bg_colour_mem: [u32; CHAR_LUT_SIZE],
    mouse: MousePointer,

    video_ram: Vec<u8>,
    text_mem: Vec<u8>,
    text_colour_mem: Vec<u8>,
    font_bank_0: Vec<u8>,
    font_bank_1: Vec<u8>,
    mouse_pointer_0: Vec<u8>,
    mouse_pointer_1: Vec<u8>,

    frame: Vec<u32>,
    raster_y: usize,
    dirty: bool,
    frames_presented: u64,
    effects: Vec<SurfaceEffect>,
    surface: Box<dyn Surface>,
}

impl Default for Vicky {
    fn default() -> Self {
        Self::new(Box::new(HeadlessSurface::new()))
    }
}

impl Vicky {
    /// Zero-initialised chip presenting into `surface`.
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            mode: VideoMode::empty(),
            border: Border::default(),
            background: 0,
            cursor: Cursor::default(),
            bitmap: Bitmap::default(),
            tile_sets: Default::default(),
            sprites: [Sprite::default(); NUM_SPRITES],
            enabled_sprites: [0; NUM_SPRITE_LAYERS],
            lut: vec![[Color::default(); LUT_SIZE]; NUM_LUTS],
            gamma: GammaRamp::default(),
            fg_colour_mem: [0; CHAR_LUT_SIZE],
            bg_colour_mem: [0; CHAR_LUT_SIZE],
            mouse: MousePointer::default(),
            video_ram: vec![0; VRAM_SIZE],
            text_mem: vec![0; TEXT_MEM_SIZE],
            text_colour_mem: vec![0; TEXT_MEM_SIZE],
            font_bank_0: vec![0; FONT_BANK_SIZE],
            font_bank_1: vec![0; FONT_BANK_SIZE],
            mouse_pointer_0: vec![0; MOUSE_POINTER_BYTES],
            mouse_pointer_1: vec![0; MOUSE_POINTER_BYTES],
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            raster_y: 0,
            dirty: false,
            frames_presented: 0,
            effects: Vec::new(),
            surface,
        }
    }

    pub fn mode(&self) -> VideoMode {
        self.mode
    }

    pub fn tile_set(&self, layer: usize) -> Option<&TileSet> {
        self.tile_sets.get(layer)
    }

    pub fn sprite(&self, n: usize) -> Option<&Sprite> {
        self.sprites.get(n)
    }

    pub fn lut_entry(&self, lut: usize, index: usize) -> Option<Color> {
        self.lut.get(lut)?.get(index).copied()
    }

    /// Bitmask of sprites enabled on `layer`.
    pub fn enabled_sprites(&self, layer: usize) -> Option<u32> {
        self.enabled_sprites.get(layer).copied()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn background_colour(&self) -> Color {
        let [b, g, r, _] = self.background.to_le_bytes();
        Color::new_rgb(r, g, b)
    }

    pub fn gamma_ramp(&self) -> &GammaRamp {
        &self.gamma
    }

    /// Packed foreground text colour `index`.
    pub fn fg_char_colour(&self, index: usize) -> Option<u32> {
        self.fg_colour_mem.get(index).copied()
    }

    /// Packed background text colour `index`.
    pub fn bg_char_colour(&self, index: usize) -> Option<u32> {
        self.bg_colour_mem.get(index).copied()
    }

    pub fn video_ram(&self) -> &[u8] {
        &self.video_ram
    }

    pub fn frame_buffer(&self) -> &[u32] {
        &self.frame
    }

    /// Scanline the next [`render_line`](Self::render_line) call will draw.
    pub fn raster_row(&self) -> usize {
        self.raster_y
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Set by cursor flashes, cleared when a frame is presented.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pending_effects(&self) -> &[SurfaceEffect] {
        &self.effects
    }

    /// Current value of a storage cell reported by a colour register write.
    pub fn cell(&self, cell: StorageCell) -> u16 {
        match cell {
            StorageCell::Lut { lut, index, channel } => {
                channel.get(&self.lut[lut as usize % NUM_LUTS][index as usize]) as u16
            }
            StorageCell::Gamma { channel, index } => {
                let index = index as usize;
                match channel {
                    Channel::Blue => self.gamma.blue[index],
                    Channel::Green => self.gamma.green[index],
                    Channel::Red | Channel::Alpha => self.gamma.red[index],
                }
            }
            StorageCell::Border(channel) => channel.get(&self.border.colour) as u16,
        }
    }

    /// Feed the host pointer position into the mouse position registers.
    pub fn set_mouse_position(&mut self, x: u16, y: u16) {
        self.mouse.x = x;
        self.mouse.y = y;
    }

    pub fn memory_regions(&self) -> Vec<MemoryRegion> {
        REGIONS.iter().map(|(_, region)| *region).collect()
    }

    fn read_buffer(&self, buffer: Buffer, offset: usize) -> u8 {
        match buffer {
            Buffer::VideoRam => self.video_ram[offset],
            Buffer::TextMemory => self.text_mem[offset],
            Buffer::TextColourMemory => self.text_colour_mem[offset],
            Buffer::CursorX => self.cursor.x.to_le_bytes()[offset & 1],
            Buffer::CursorY => self.cursor.y.to_le_bytes()[offset & 1],
            Buffer::MouseX => self.mouse.x.to_le_bytes()[offset & 1],
            Buffer::MouseY => self.mouse.y.to_le_bytes()[offset & 1],
            Buffer::FontBank0 => self.font_bank_0[offset],
            Buffer::FontBank1 => self.font_bank_1[offset],
            Buffer::MousePointer0 => self.mouse_pointer_0[offset],
            Buffer::MousePointer1 => self.mouse_pointer_1[offset],
        }
    }

    fn write_buffer(&mut self, buffer: Buffer, offset: usize, value: u8) {
        match buffer {
            Buffer::VideoRam => self.video_ram[offset] = value,
            Buffer::TextMemory => self.text_mem[offset] = value,
            Buffer::TextColourMemory => self.text_colour_mem[offset] = value,
            Buffer::CursorX => set_byte16(&mut self.cursor.x, offset, value),
            Buffer::CursorY => set_byte16(&mut self.cursor.y, offset, value),
            Buffer::MouseX => set_byte16(&mut self.mouse.x, offset, value),
            Buffer::MouseY => set_byte16(&mut self.mouse.y, offset, value),
            Buffer::FontBank0 => self.font_bank_0[offset] = value,
            Buffer::FontBank1 => self.font_bank_1[offset] = value,
            Buffer::MousePointer0 => self.mouse_pointer_0[offset] = value,
            Buffer::MousePointer1 => self.mouse_pointer_1[offset] = value,
        }
    }
}

impl BusDevice for Vicky {
    fn decode_address(&self, addr: Address) -> Option<Address> {
        let claimed = addr.in_range(MASTER_CTRL_REG_L, CONTROL_BLOCK_END)
            || addr.in_range(FG_CHAR_LUT_PTR, BTX_START.with_offset(-1))
            || addr.in_range(VRAM_START, VRAM_END);
        claimed.then_some(addr)
    }

    /// Only directly-mapped buffers read back; register-only state reads 0.
    fn read_byte(&self, addr: Address) -> u8 {
        find_buffer(addr).map_or(0, |(buffer, offset)| self.read_buffer(buffer, offset))
    }

    fn store_byte(&mut self, addr: Address, value: u8) {
        self.store_byte_traced(addr, value);
    }

    fn memory_regions(&self) -> Vec<MemoryRegion> {
        Vicky::memory_regions(self)
    }
}
