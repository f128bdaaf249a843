use std::time::{Duration, Instant};

use c256_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::registers::VideoMode;
use super::{SurfaceEffect, Vicky};
use super::{
    BORDER_HEIGHT, BORDER_WIDTH, GLYPH_SIZE, MOUSE_POINTER_SIZE, NUM_LAYERS, NUM_LUTS,
    SPRITE_SIZE, TEXT_COLS_PER_LINE, TILE_SHEET_COLS, TILE_SIZE, VRAM_SIZE,
};

impl Vicky {
    /// Draw the current scanline using the wall clock for cursor flashing.
    pub fn render_line(&mut self) {
        self.render_line_at(Instant::now());
    }

    /// Draw the current scanline as if the time were `now`.
    ///
    /// Layers composite back to front: border, bitmap, then for layers 3..0
    /// sprites followed by tiles, then text, then the mouse pointer. The
    /// frame is presented after the last row. Nothing happens, not even a
    /// raster advance, while video is disabled.
    pub fn render_line_at(&mut self, now: Instant) {
        if self.mode.contains(VideoMode::DISABLE_VIDEO) {
            return;
        }

        let run_char_gen = self
            .mode
            .intersects(VideoMode::TEXT_MODE | VideoMode::TEXT_OVERLAY);
        if run_char_gen && self.cursor.is_enabled() {
            self.update_cursor_flash(now);
        }

        let y = self.raster_y;
        let row_start = y * SCREEN_WIDTH;
        for x in 0..SCREEN_WIDTH {
            let pixel = self.compose_pixel(x, y, self.frame[row_start + x], run_char_gen);
            self.frame[row_start + x] = pixel;
        }

        // TODO: raise the line interrupt once an interrupt controller exists.
        self.raster_y += 1;
        if self.raster_y == SCREEN_HEIGHT {
            self.flush_frame();
        }
    }

    fn update_cursor_flash(&mut self, now: Instant) {
        let interval = Duration::from_millis(self.cursor.control.flash_interval_ms());
        let expired = match self.cursor.last_flash {
            Some(last) => now.saturating_duration_since(last) > interval,
            None => true,
        };
        if expired {
            self.cursor.phase = !self.cursor.phase;
            self.cursor.last_flash = Some(now);
            self.dirty = true;
            log::trace!("cursor flash, phase {}", self.cursor.phase);
        }
    }

    fn flush_frame(&mut self) {
        for effect in self.effects.drain(..) {
            match effect {
                SurfaceEffect::GammaRampChanged => {
                    log::debug!("applying gamma ramp");
                    self.surface.set_gamma_ramp(&self.gamma);
                }
            }
        }
        self.surface.present(&self.frame, SCREEN_WIDTH, SCREEN_HEIGHT);
        self.frames_presented += 1;
        self.dirty = false;
        self.raster_y = 0;
        log::trace!("presented frame {}", self.frames_presented);
    }

    fn compose_pixel(&self, x: usize, y: usize, mut pixel: u32, run_char_gen: bool) -> u32 {
        if self.border.enabled && self.border.covers(x, y, SCREEN_WIDTH, SCREEN_HEIGHT) {
            return self.border.colour.to_bgra8888();
        }

        if self.mode.contains(VideoMode::BITMAP) && self.bitmap.enabled {
            if let Some(colour) = self.bitmap_pixel(x, y) {
                pixel = colour;
            }
        }

        for layer in (0..NUM_LAYERS).rev() {
            if self.mode.contains(VideoMode::SPRITE) {
                if let Some(colour) = self.sprite_pixel(layer, x, y) {
                    pixel = colour;
                }
            }
            if self.mode.contains(VideoMode::TILEMAP) {
                if let Some(colour) = self.tile_pixel(layer, x, y) {
                    pixel = colour;
                }
            }
        }

        if run_char_gen {
            if let Some(colour) = self.text_pixel(x, y) {
                pixel = colour;
            }
        }

        if self.mouse.enabled {
            if let Some(colour) = self.mouse_pixel(x, y) {
                pixel = colour;
            }
        }

        pixel
    }

    /// Video RAM byte at `offset`. Offsets past the end wrap around.
    fn vram_at(&self, offset: usize) -> u8 {
        self.video_ram[offset & (VRAM_SIZE - 1)]
    }

    /// LUT colour for a non-zero index; index 0 is transparent.
    fn indexed(&self, lut: u8, index: u8) -> Option<u32> {
        (index != 0).then(|| self.lut[lut as usize % NUM_LUTS][index as usize].to_bgra8888())
    }

    fn bitmap_pixel(&self, x: usize, y: usize) -> Option<u32> {
        let index = self.vram_at(self.bitmap.offset as usize + y * SCREEN_WIDTH + x);
        self.indexed(self.bitmap.lut, index)
    }

    /// Enabled sprites are visited in ascending order. The first sprite whose
    /// box misses the pixel, or whose pixel is transparent, ends the whole
    /// layer even if later sprites would cover it.
    fn sprite_pixel(&self, layer: usize, x: usize, y: usize) -> Option<u32> {
        let mut enabled = self.enabled_sprites[layer];
        let mut out = None;
        while enabled != 0 {
            let n = enabled.trailing_zeros() as usize;
            enabled &= enabled - 1;

            let sprite = &self.sprites[n];
            let (sx, sy) = (sprite.x as usize, sprite.y as usize);
            if x < sx || x >= sx + SPRITE_SIZE || y < sy || y >= sy + SPRITE_SIZE {
                return out;
            }
            let offset = sprite.start_addr as usize + (x - sx) + (y - sy) * SPRITE_SIZE;
            match self.indexed(sprite.lut, self.vram_at(offset)) {
                Some(colour) => out = Some(colour),
                None => return out,
            }
        }
        out
    }

    fn tile_pixel(&self, layer: usize, x: usize, y: usize) -> Option<u32> {
        let tiles = &self.tile_sets[layer];
        if !tiles.enabled {
            return None;
        }

        let (row, sub_row) = (y / TILE_SIZE, y % TILE_SIZE);
        let (col, sub_col) = (x / TILE_SIZE, x % TILE_SIZE);
        let tile_num = tiles.tile_at(row, col) as usize;

        // Fixed sheet layout: TILE_SHEET_COLS tiles per sheet row.
        let sheet_col = tile_num % TILE_SHEET_COLS;
        let sheet_row = tile_num / TILE_SHEET_COLS;
        let offset = tiles.start_addr as usize
            + (sheet_row * TILE_SIZE + sub_row) * tiles.stride_x as usize
            + sheet_col * TILE_SIZE
            + sub_col;
        self.indexed(tiles.lut, self.vram_at(offset))
    }

    fn text_pixel(&self, x: usize, y: usize) -> Option<u32> {
        let (mut bx, mut by) = (x as u16, y as u16);
        if self.border.enabled {
            bx = bx.wrapping_sub(BORDER_WIDTH as u16);
            by = by.wrapping_sub(BORDER_HEIGHT as u16);
        }
        let (row, sub_row) = (by as usize / GLYPH_SIZE, by as usize % GLYPH_SIZE);
        let (column, sub_column) = (bx as usize / GLYPH_SIZE, bx as usize % GLYPH_SIZE);

        let cell = (column + row * TEXT_COLS_PER_LINE) % self.text_mem.len();
        let character = self.text_mem[cell] as usize;
        let colour = self.text_colour_mem[cell];
        let fg = self.fg_colour_mem[(colour >> 4) as usize];
        let bg = self.bg_colour_mem[(colour & 0x0F) as usize];

        let glyph = self.font_bank_0[character * GLYPH_SIZE + sub_row];
        let cursor_glyph = self.font_bank_0[self.cursor.char_code as usize * GLYPH_SIZE + sub_row];

        let is_cursor_cell = self.cursor.phase
            && self.cursor.is_enabled()
            && self.cursor.x as usize == column
            && self.cursor.y as usize == row;

        let bit = 0x80 >> sub_column;
        if is_cursor_cell && cursor_glyph & bit != 0 {
            Some(fg)
        } else if glyph & bit != 0 {
            Some(if is_cursor_cell { bg } else { fg })
        } else if self.mode.contains(VideoMode::TEXT_MODE) && !is_cursor_cell {
            // No background in overlay mode or under the cursor.
            Some(bg)
        } else {
            None
        }
    }

    fn mouse_pixel(&self, x: usize, y: usize) -> Option<u32> {
        let (mx, my) = (self.mouse.x as usize, self.mouse.y as usize);
        if x < mx || x >= mx + MOUSE_POINTER_SIZE || y < my || y >= my + MOUSE_POINTER_SIZE {
            return None;
        }
        // Select set shows pointer 0.
        let pointer = if self.mouse.select {
            &self.mouse_pointer_0
        } else {
            &self.mouse_pointer_1
        };
        let level = pointer[(x - mx) + (y - my) * MOUSE_POINTER_SIZE];
        (level != 0).then(|| Color::grey(level).to_bgra8888())
    }
}
