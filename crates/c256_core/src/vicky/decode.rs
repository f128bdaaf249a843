use crate::address::Address;

use super::registers::*;
use super::state::{accumulate_channel, set_byte16, set_byte24};
use super::{find_buffer, Channel, StorageCell, SurfaceEffect, Vicky};
use super::{CHAR_LUT_SIZE, LUT_SIZE, NUM_LUTS, TILE_MAP_SIZE};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum RegisterBlock {
    MasterControl,
    BorderControl,
    BorderColour,
    BackgroundColour,
    CursorControl,
    CursorChar,
    CursorColour,
    BitmapControl,
    BitmapStart,
    TileLayer,
    MouseControl,
    Sprite,
    FgCharLut,
    BgCharLut,
    GraphicsLut,
    Gamma(Channel),
    TileMap,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct RegisterRange {
    pub(super) start: Address,
    pub(super) end: Address,
    pub(super) block: RegisterBlock,
}

const fn range(start: Address, end: Address, block: RegisterBlock) -> RegisterRange {
    RegisterRange { start, end, block }
}

/// Register blocks sorted by start address. Ranges are inclusive and must not
/// overlap.
pub(super) static REGISTER_MAP: [RegisterRange; 19] = [
    range(MASTER_CTRL_REG_L, MASTER_CTRL_REG_H, RegisterBlock::MasterControl),
    range(BORDER_CTRL_REG, BORDER_CTRL_REG, RegisterBlock::BorderControl),
    range(BORDER_COLOR_B, BORDER_COLOR_R, RegisterBlock::BorderColour),
    range(BACKGROUND_COLOR_B, BACKGROUND_COLOR_R, RegisterBlock::BackgroundColour),
    range(VKY_TXT_CURSOR_CTRL_REG, VKY_TXT_CURSOR_CTRL_REG, RegisterBlock::CursorControl),
    range(VKY_TXT_CURSOR_CHAR_REG, VKY_TXT_CURSOR_CHAR_REG, RegisterBlock::CursorChar),
    range(VKY_TXT_CURSOR_COLR_REG, VKY_TXT_CURSOR_COLR_REG, RegisterBlock::CursorColour),
    range(BM_CONTROL_REG, BM_CONTROL_REG, RegisterBlock::BitmapControl),
    range(BM_START_ADDY_L, BM_START_ADDY_H, RegisterBlock::BitmapStart),
    range(TL0_CONTROL_REG, TL3_MAP_Y_STRIDE_H, RegisterBlock::TileLayer),
    range(MOUSE_PTR_CTRL_REG_L, MOUSE_PTR_CTRL_REG_L, RegisterBlock::MouseControl),
    range(SP00_CONTROL_REG, SP31_LAST_REG, RegisterBlock::Sprite),
    range(FG_CHAR_LUT_PTR, BG_CHAR_LUT_PTR.with_offset(-1), RegisterBlock::FgCharLut),
    range(BG_CHAR_LUT_PTR, BG_CHAR_LUT_END, RegisterBlock::BgCharLut),
    range(GRPH_LUT0_PTR, GRPH_LUT7_END, RegisterBlock::GraphicsLut),
    range(GAMMA_B_LUT_PTR, GAMMA_G_LUT_PTR.with_offset(-1), RegisterBlock::Gamma(Channel::Blue)),
    range(GAMMA_G_LUT_PTR, GAMMA_R_LUT_PTR.with_offset(-1), RegisterBlock::Gamma(Channel::Green)),
    range(GAMMA_R_LUT_PTR, GAMMA_R_LUT_END, RegisterBlock::Gamma(Channel::Red)),
    range(TILE_MAP0, TILE_MAP3_END, RegisterBlock::TileMap),
];

/// Block containing `addr` and the byte offset into it.
pub(super) fn lookup(addr: Address) -> Option<(RegisterBlock, usize)> {
    let i = REGISTER_MAP.partition_point(|r| r.end < addr);
    let entry = REGISTER_MAP.get(i).filter(|r| r.start <= addr)?;
    let offset = (addr.as_int() - entry.start.as_int()) as usize;
    Some((entry.block, offset))
}

impl Vicky {
    /// Decode one byte written to `addr`.
    ///
    /// Returns the storage cell for LUT, gamma and border colour writes so
    /// debug tooling can locate the exact channel. Never fails: writes that
    /// match no register and no buffer are logged and dropped.
    pub fn store_byte_traced(&mut self, addr: Address, value: u8) -> Option<StorageCell> {
        if let Some((block, offset)) = lookup(addr) {
            return self.store_register(block, offset, value);
        }
        if let Some((buffer, offset)) = find_buffer(addr) {
            self.write_buffer(buffer, offset, value);
            return None;
        }
        log::info!("unknown Vicky register {addr} (value 0x{value:02X})");
        None
    }

    fn store_register(
        &mut self,
        block: RegisterBlock,
        offset: usize,
        value: u8,
    ) -> Option<StorageCell> {
        match block {
            RegisterBlock::MasterControl => {
                let mut bits = self.mode.bits();
                set_byte16(&mut bits, offset, value);
                self.mode = VideoMode::from_bits_retain(bits);
                log::info!("video mode set to {:?} (0x{bits:04X})", self.mode);
            }
            RegisterBlock::BorderControl => {
                self.border.enabled = value & BORDER_CTRL_ENABLE != 0;
            }
            RegisterBlock::BorderColour => {
                let channel = Channel::from_byte_index(offset);
                channel.set(&mut self.border.colour, value);
                return Some(StorageCell::Border(channel));
            }
            RegisterBlock::BackgroundColour => set_byte24(&mut self.background, offset, value),
            RegisterBlock::CursorControl => {
                self.cursor.control = CursorControl::from_bits_retain(value);
            }
            RegisterBlock::CursorChar => self.cursor.char_code = value,
            RegisterBlock::CursorColour => self.cursor.colour = value,
            RegisterBlock::BitmapControl => {
                self.bitmap.enabled = value & 0x01 != 0;
                self.bitmap.lut = (value & 0b0111_0000) >> 4;
            }
            RegisterBlock::BitmapStart => set_byte24(&mut self.bitmap.offset, offset, value),
            RegisterBlock::TileLayer => self.store_tile_layer(offset / 8, offset % 8, value),
            RegisterBlock::MouseControl => {
                self.mouse.enabled = value & MOUSE_CTRL_ENABLE != 0;
                self.mouse.select = value & MOUSE_CTRL_SELECT != 0;
            }
            RegisterBlock::Sprite => self.store_sprite(offset / 8, offset % 8, value),
            RegisterBlock::FgCharLut => {
                let entry = &mut self.fg_colour_mem[(offset / 4) % CHAR_LUT_SIZE];
                accumulate_channel(entry, offset % 4, value);
            }
            RegisterBlock::BgCharLut => {
                let entry = &mut self.bg_colour_mem[(offset / 4) % CHAR_LUT_SIZE];
                accumulate_channel(entry, offset % 4, value);
            }
            RegisterBlock::GraphicsLut => {
                let lut = offset / (LUT_SIZE * 4) % NUM_LUTS;
                let index = offset % (LUT_SIZE * 4) / 4;
                let channel = Channel::from_byte_index(offset);
                channel.set(&mut self.lut[lut][index], value);
                return Some(StorageCell::Lut {
                    lut: lut as u8,
                    index: index as u8,
                    channel,
                });
            }
            RegisterBlock::Gamma(channel) => {
                let index = offset & 0xFF;
                let ramp = match channel {
                    Channel::Blue => &mut self.gamma.blue,
                    Channel::Green => &mut self.gamma.green,
                    Channel::Red | Channel::Alpha => &mut self.gamma.red,
                };
                ramp[index] = (value as u16) << 8;
                self.queue_effect(SurfaceEffect::GammaRampChanged);
                return Some(StorageCell::Gamma {
                    channel,
                    index: index as u8,
                });
            }
            RegisterBlock::TileMap => {
                let layer = offset / TILE_MAP_SIZE;
                self.tile_sets[layer].store_map_byte(offset % TILE_MAP_SIZE, value);
            }
        }
        None
    }

    fn store_tile_layer(&mut self, layer: usize, register: usize, value: u8) {
        let tiles = &mut self.tile_sets[layer];
        match register {
            0 => {
                tiles.enabled = value & LAYER_CTRL_ENABLE != 0;
                tiles.lut = (value & 0b0000_1110) >> 1;
                tiles.tiled_sheet = value & LAYER_CTRL_TILED_SHEET != 0;
            }
            1..=3 => set_byte24(&mut tiles.start_addr, register - 1, value),
            4 | 5 => set_byte16(&mut tiles.stride_x, register - 4, value),
            _ => set_byte16(&mut tiles.stride_y, register - 6, value),
        }
    }

    fn store_sprite(&mut self, n: usize, register: usize, value: u8) {
        let sprite = &mut self.sprites[n];
        match register {
            0 => {
                // Toggle, not set: the same control byte twice disables it again.
                let layer = ((value & 0b0111_0000) >> 4) as usize;
                self.enabled_sprites[layer] ^= 1 << n;
                sprite.lut = (value & 0b0000_1110) >> 1;
                sprite.tile_striding = value & LAYER_CTRL_TILED_SHEET != 0;
            }
            1..=3 => set_byte24(&mut sprite.start_addr, register - 1, value),
            4 | 5 => set_byte16(&mut sprite.x, register - 4, value),
            _ => set_byte16(&mut sprite.y, register - 6, value),
        }
    }

    fn queue_effect(&mut self, effect: SurfaceEffect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }
}
