//! Vicky II register map and bit-field definitions.
//!
//! Addresses mirror the C256 Foenix FMX datasheet and must stay bit-for-bit
//! identical for ROM compatibility.

use bitflags::bitflags;

use crate::address::Address;

const fn af(offset: u16) -> Address {
    Address::new(0xAF, offset)
}

// Master control.
pub const MASTER_CTRL_REG_L: Address = af(0x0000);
pub const MASTER_CTRL_REG_H: Address = af(0x0001);

// Border.
pub const BORDER_CTRL_REG: Address = af(0x0004);
pub const BORDER_COLOR_B: Address = af(0x0005);
pub const BORDER_COLOR_G: Address = af(0x0006);
pub const BORDER_COLOR_R: Address = af(0x0007);

// Background colour, stored but not painted by the renderer.
pub const BACKGROUND_COLOR_B: Address = af(0x000D);
pub const BACKGROUND_COLOR_R: Address = af(0x000F);

// Text cursor.
pub const VKY_TXT_CURSOR_CTRL_REG: Address = af(0x0010);
pub const VKY_TXT_CURSOR_CHAR_REG: Address = af(0x0012);
pub const VKY_TXT_CURSOR_COLR_REG: Address = af(0x0013);
pub const VKY_TXT_CURSOR_X_REG_L: Address = af(0x0014);
pub const VKY_TXT_CURSOR_X_REG_H: Address = af(0x0015);
pub const VKY_TXT_CURSOR_Y_REG_L: Address = af(0x0016);
pub const VKY_TXT_CURSOR_Y_REG_H: Address = af(0x0017);

// Bitmap layer.
pub const BM_CONTROL_REG: Address = af(0x0100);
pub const BM_START_ADDY_L: Address = af(0x0101);
pub const BM_START_ADDY_H: Address = af(0x0103);

// Tile layers: 8 registers per layer.
pub const TL0_CONTROL_REG: Address = af(0x0200);
pub const TL3_MAP_Y_STRIDE_H: Address = af(0x021F);

// VDMA block; the device claims the whole control page up to here.
pub const VDMA_CONTROL_REG: Address = af(0x0400);
pub const CONTROL_BLOCK_END: Address = af(0x0FFF);

// Mouse pointer.
pub const MOUSE_PTR_GRAP0_START: Address = af(0x0500);
pub const MOUSE_PTR_GRAP0_END: Address = af(0x0600);
pub const MOUSE_PTR_GRAP1_START: Address = af(0x0600);
pub const MOUSE_PTR_GRAP1_END: Address = af(0x0700);
pub const MOUSE_PTR_CTRL_REG_L: Address = af(0x0700);
pub const MOUSE_PTR_X_POS_L: Address = af(0x0702);
pub const MOUSE_PTR_X_POS_H: Address = af(0x0703);
pub const MOUSE_PTR_Y_POS_L: Address = af(0x0704);
pub const MOUSE_PTR_Y_POS_H: Address = af(0x0705);

// Sprites: 8 registers per sprite, 32 sprites.
pub const SP00_CONTROL_REG: Address = af(0x0C00);
pub const SP31_LAST_REG: Address = af(0x0CFF);

// Text colour lookup tables (16 entries of 4 bytes each).
pub const FG_CHAR_LUT_PTR: Address = af(0x1F40);
pub const BG_CHAR_LUT_PTR: Address = af(0x1F80);
pub const BG_CHAR_LUT_END: Address = af(0x1FBF);

// Graphics LUTs: 8 tables of 256 BGRA entries.
pub const GRPH_LUT0_PTR: Address = af(0x2000);
pub const GRPH_LUT7_END: Address = af(0x3FFF);

// Gamma ramps, 256 bytes per channel.
pub const GAMMA_B_LUT_PTR: Address = af(0x4000);
pub const GAMMA_G_LUT_PTR: Address = af(0x4100);
pub const GAMMA_R_LUT_PTR: Address = af(0x4200);
pub const GAMMA_R_LUT_END: Address = af(0x42FF);

// Tile maps, 0x800 bytes per layer.
pub const TILE_MAP0: Address = af(0x5000);
pub const TILE_MAP3_END: Address = af(0x6FFF);

// Fonts and text memory.
pub const FONT_MEMORY_BANK0: Address = af(0x8000);
pub const FONT_MEMORY_BANK1: Address = af(0x8800);
pub const FONT_MEMORY_BANK1_END: Address = af(0x8FFF);
pub const CS_TEXT_MEM_PTR: Address = af(0xA000);
pub const CS_COLOR_MEM_PTR: Address = af(0xC000);
pub const BTX_START: Address = af(0xE000);

// Video RAM banks.
pub const VRAM_START: Address = Address::new(0xB0, 0x0000);
pub const VRAM_END: Address = Address::new(0xEF, 0xFFFF);

bitflags! {
    /// MASTER_CTRL_REG, low byte in bits 0-7 and high byte in bits 8-15.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct VideoMode: u16 {
        const TEXT_MODE = 0x0001;
        const TEXT_OVERLAY = 0x0002;
        const GRAPHICS = 0x0004;
        const BITMAP = 0x0008;
        const TILEMAP = 0x0010;
        const SPRITE = 0x0020;
        const GAMMA = 0x0040;
        const DISABLE_VIDEO = 0x0080;

        const _ = !0;
    }
}

bitflags! {
    /// VKY_TXT_CURSOR_CTRL_REG.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct CursorControl: u8 {
        const ENABLE = 0x01;
        const FLASH_RATE0 = 0x02;
        const FLASH_RATE1 = 0x04;

        const _ = !0;
    }
}

impl CursorControl {
    /// Flash half-period selected by the two rate bits.
    pub fn flash_interval_ms(&self) -> u64 {
        match (self.bits() >> 1) & 0b11 {
            0b00 => 1000,
            0b01 => 500,
            0b10 => 250,
            _ => 200,
        }
    }
}

pub const BORDER_CTRL_ENABLE: u8 = 0x01;

pub const MOUSE_CTRL_ENABLE: u8 = 0x01;
pub const MOUSE_CTRL_SELECT: u8 = 0x02;

pub const LAYER_CTRL_ENABLE: u8 = 0x01;
pub const LAYER_CTRL_TILED_SHEET: u8 = 0x80;
