use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use c256_common::{Color, GammaRamp};

use super::decode::{lookup, REGISTER_MAP};
use super::registers::*;
use super::*;
use crate::bus::{Bus, C256Bus};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, PartialEq, Eq)]
enum Event {
    Gamma(u16),
    Present(usize, usize),
}

struct RecordingSurface(Rc<RefCell<Vec<Event>>>);

impl Surface for RecordingSurface {
    fn present(&mut self, _frame: &[u32], width: usize, height: usize) {
        self.0.borrow_mut().push(Event::Present(width, height));
    }

    fn set_gamma_ramp(&mut self, ramp: &GammaRamp) {
        self.0.borrow_mut().push(Event::Gamma(ramp.blue[3]));
    }
}

fn write(vicky: &mut Vicky, addr: Address, bytes: &[u8]) {
    for (i, &b) in bytes.iter().enumerate() {
        vicky.store_byte_traced(addr + i as u16, b);
    }
}

fn write_bus(bus: &mut C256Bus, addr: Address, bytes: &[u8]) {
    for (i, &b) in bytes.iter().enumerate() {
        bus.store_byte(addr + i as u16, b);
    }
}

fn render_lines(vicky: &mut Vicky, count: usize, now: Instant) {
    for _ in 0..count {
        vicky.render_line_at(now);
    }
}

fn vram(offset: u32) -> Address {
    Address::from_linear(VRAM_START.as_int() + offset)
}

fn lut_colour(vicky: &Vicky, lut: usize, index: usize) -> u32 {
    vicky.lut_entry(lut, index).unwrap().to_bgra8888()
}

#[test]
fn register_map_is_sorted_and_disjoint() {
    for pair in REGISTER_MAP.windows(2) {
        assert!(pair[0].start <= pair[0].end);
        assert!(pair[0].end < pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
    assert_eq!(lookup(Address::new(0xAF, 0x0003)), None);
    assert_eq!(lookup(Address::new(0xAF, 0x2005)).map(|(_, o)| o), Some(5));
}

#[test]
fn claims_control_colour_and_video_ram_ranges() {
    let vicky = Vicky::default();
    for addr in [
        MASTER_CTRL_REG_L,
        VDMA_CONTROL_REG,
        FG_CHAR_LUT_PTR,
        CS_COLOR_MEM_PTR,
        VRAM_START,
        VRAM_END,
    ] {
        assert_eq!(vicky.decode_address(addr), Some(addr), "{addr}");
    }
    assert_eq!(vicky.decode_address(Address::new(0xAF, 0x1000)), None);
    assert_eq!(vicky.decode_address(BTX_START), None);
    assert_eq!(vicky.decode_address(Address::new(0xF0, 0x0000)), None);
}

#[test]
fn mode_register_is_written_a_byte_at_a_time() {
    let mut vicky = Vicky::default();
    vicky.store_byte_traced(MASTER_CTRL_REG_L, 0x01);
    assert_eq!(vicky.mode(), VideoMode::TEXT_MODE);
    vicky.store_byte_traced(MASTER_CTRL_REG_H, 0x02);
    assert_eq!(vicky.mode().bits(), 0x0201);
    vicky.store_byte_traced(MASTER_CTRL_REG_L, 0x0C);
    assert_eq!(vicky.mode().bits(), 0x020C);
}

#[test]
fn lut_entry_takes_channels_in_bgra_order() {
    let mut vicky = Vicky::default();
    let entry = GRPH_LUT0_PTR + 3 * 0x400 + 7 * 4;
    let mut cells = Vec::new();
    for (i, v) in [0x10, 0x20, 0x30, 0x40].into_iter().enumerate() {
        cells.push(vicky.store_byte_traced(entry + i as u16, v));
    }
    assert_eq!(vicky.lut_entry(3, 7), Some(Color::new_rgba(0x30, 0x20, 0x10, 0x40)));
    assert_eq!(
        cells[2],
        Some(StorageCell::Lut {
            lut: 3,
            index: 7,
            channel: Channel::Red
        })
    );
    for cell in cells.into_iter().flatten() {
        assert_ne!(vicky.cell(cell), 0);
    }
    assert_eq!(
        vicky.cell(StorageCell::Lut {
            lut: 3,
            index: 7,
            channel: Channel::Alpha
        }),
        0x40
    );
}

#[test]
fn tile_layer_registers_decode_flags_and_start_address() {
    let mut vicky = Vicky::default();
    let layer2 = TL0_CONTROL_REG + 2 * 8;
    write(
        &mut vicky,
        layer2,
        &[0x80 | (3 << 1) | 0x01, 0x56, 0x34, 0x12, 0x00, 0x01, 0x40, 0x00],
    );
    let tiles = vicky.tile_set(2).unwrap();
    assert!(tiles.enabled);
    assert_eq!(tiles.lut, 3);
    assert!(tiles.tiled_sheet);
    assert_eq!(tiles.start_addr, 0x12_3456);
    assert_eq!(tiles.stride_x, 0x0100);
    assert_eq!(tiles.stride_y, 0x0040);
    assert!(!vicky.tile_set(1).unwrap().enabled);
}

#[test]
fn tile_map_bytes_land_in_their_layer() {
    let mut vicky = Vicky::default();
    vicky.store_byte_traced(TILE_MAP0 + 0x800 + 65, 0x2A);
    assert_eq!(vicky.tile_set(1).unwrap().tile_at(1, 1), 0x2A);
    assert_eq!(vicky.tile_set(0).unwrap().tile_at(1, 1), 0);
}

#[test]
fn sprite_control_write_toggles_layer_enable() {
    let mut vicky = Vicky::default();
    let control = SP00_CONTROL_REG + 5 * 8;
    let value = (2 << 4) | (4 << 1) | 0x80;

    vicky.store_byte_traced(control, value);
    assert_eq!(vicky.enabled_sprites(2), Some(1 << 5));
    let sprite = vicky.sprite(5).unwrap();
    assert_eq!(sprite.lut, 4);
    assert!(sprite.tile_striding);

    vicky.store_byte_traced(control, value);
    assert_eq!(vicky.enabled_sprites(2), Some(0));
}

#[test]
fn sprite_position_and_start_address() {
    let mut vicky = Vicky::default();
    write(
        &mut vicky,
        SP00_CONTROL_REG + 31 * 8 + 1,
        &[0x00, 0x10, 0x02, 0x2C, 0x01, 0xF0, 0x00],
    );
    let sprite = vicky.sprite(31).unwrap();
    assert_eq!(sprite.start_addr, 0x02_1000);
    assert_eq!(sprite.x, 0x012C);
    assert_eq!(sprite.y, 0x00F0);
}

#[test]
fn character_colours_accumulate() {
    let mut vicky = Vicky::default();
    write(&mut vicky, FG_CHAR_LUT_PTR + 8, &[0x11, 0x22, 0x33, 0x44]);
    assert_eq!(vicky.fg_char_colour(2), Some(0x1122_3344));
    vicky.store_byte_traced(FG_CHAR_LUT_PTR + 8, 0x80);
    assert_eq!(vicky.fg_char_colour(2), Some(0x9122_3344));

    write(&mut vicky, BG_CHAR_LUT_PTR + 60, &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(vicky.bg_char_colour(15), Some(0x0102_0304));
    assert_eq!(vicky.fg_char_colour(15), Some(0));
}

#[test]
fn indexed_accessors_reject_out_of_range_indices() {
    let vicky = Vicky::default();
    assert!(vicky.tile_set(NUM_LAYERS).is_none());
    assert!(vicky.sprite(NUM_SPRITES).is_none());
    assert_eq!(vicky.lut_entry(NUM_LUTS, 0), None);
    assert_eq!(vicky.lut_entry(0, LUT_SIZE), None);
    assert_eq!(vicky.enabled_sprites(NUM_SPRITE_LAYERS), None);
    assert_eq!(vicky.fg_char_colour(CHAR_LUT_SIZE), None);
    assert_eq!(vicky.bg_char_colour(usize::MAX), None);
    assert_eq!(vicky.lut_entry(NUM_LUTS - 1, LUT_SIZE - 1), Some(Color::default()));
}

#[test]
fn border_and_background_registers() {
    let mut vicky = Vicky::default();
    vicky.store_byte_traced(BORDER_CTRL_REG, 0x01);
    let cell = vicky.store_byte_traced(BORDER_COLOR_G, 0x7F);
    assert!(vicky.border().enabled);
    assert_eq!(cell, Some(StorageCell::Border(Channel::Green)));
    assert_eq!(vicky.cell(StorageCell::Border(Channel::Green)), 0x7F);

    write(&mut vicky, BACKGROUND_COLOR_B, &[0x01, 0x02, 0x03]);
    assert_eq!(vicky.background_colour(), Color::new_rgb(0x03, 0x02, 0x01));
}

#[test]
fn cursor_registers_and_position_buffers() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, VKY_TXT_CURSOR_CTRL_REG, &[0x05]);
    write_bus(&mut bus, VKY_TXT_CURSOR_CHAR_REG, &[0x5F, 0x1E]);
    write_bus(&mut bus, VKY_TXT_CURSOR_X_REG_L, &[0x04, 0x01, 0x09, 0x00]);

    let cursor = bus.vicky.cursor();
    assert!(cursor.is_enabled());
    assert_eq!(cursor.control.flash_interval_ms(), 250);
    assert_eq!(cursor.char_code, 0x5F);
    assert_eq!(cursor.colour, 0x1E);
    assert_eq!((cursor.x, cursor.y), (0x0104, 9));
    assert_eq!(bus.read_word(VKY_TXT_CURSOR_X_REG_L), 0x0104);
}

#[test]
fn register_only_state_reads_back_as_zero() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, GRPH_LUT0_PTR, &[0xAA]);
    write_bus(&mut bus, CS_TEXT_MEM_PTR + 3, &[0xBB]);
    assert_eq!(bus.read_byte(GRPH_LUT0_PTR), 0);
    assert_eq!(bus.read_byte(CS_TEXT_MEM_PTR + 3), 0xBB);
    assert_eq!(bus.vicky.lut_entry(0, 0).map(|c| c.b), Some(0xAA));
}

#[test]
fn unknown_register_is_dropped() {
    let mut vicky = Vicky::default();
    assert_eq!(vicky.store_byte_traced(VDMA_CONTROL_REG, 0xFF), None);
    assert_eq!(BusDevice::read_byte(&vicky, VDMA_CONTROL_REG), 0);
    assert_eq!(vicky.mode(), VideoMode::empty());
}

#[test]
fn host_mouse_position_is_visible_on_the_bus() {
    let mut bus = C256Bus::default();
    bus.vicky.set_mouse_position(300, 0x1A5);
    assert_eq!(bus.read_word(MOUSE_PTR_X_POS_L), 300);
    assert_eq!(bus.read_word(MOUSE_PTR_Y_POS_L), 0x1A5);
}

#[test]
fn disabled_video_leaves_frame_and_raster_untouched() {
    let mut vicky = Vicky::default();
    write(&mut vicky, MASTER_CTRL_REG_L, &[0x81]);
    write(&mut vicky, BORDER_CTRL_REG, &[0x01, 0xFF, 0xFF, 0xFF]);
    write(&mut vicky, BG_CHAR_LUT_PTR, &[0xFF, 0xFF, 0xFF, 0xFF]);

    render_lines(&mut vicky, 3, Instant::now());
    assert_eq!(vicky.raster_row(), 0);
    assert!(vicky.frame_buffer().iter().all(|&p| p == 0));
    assert_eq!(vicky.frames_presented(), 0);
}

#[test]
fn height_lines_present_exactly_one_frame() {
    let mut vicky = Vicky::default();
    let now = Instant::now();
    render_lines(&mut vicky, SCREEN_HEIGHT - 1, now);
    assert_eq!(vicky.raster_row(), SCREEN_HEIGHT - 1);
    assert_eq!(vicky.frames_presented(), 0);

    vicky.render_line_at(now);
    assert_eq!(vicky.raster_row(), 0);
    assert_eq!(vicky.frames_presented(), 1);
}

#[test]
fn gamma_writes_are_applied_before_the_next_flush() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut vicky = Vicky::new(Box::new(RecordingSurface(events.clone())));

    let cell = vicky.store_byte_traced(GAMMA_B_LUT_PTR + 3, 0x80);
    vicky.store_byte_traced(GAMMA_R_LUT_PTR + 3, 0x40);
    assert_eq!(
        cell,
        Some(StorageCell::Gamma {
            channel: Channel::Blue,
            index: 3
        })
    );
    assert_eq!(vicky.cell(cell.unwrap()), 0x8000);
    assert_eq!(vicky.gamma_ramp().red[3], 0x4000);
    assert_eq!(vicky.pending_effects(), &[SurfaceEffect::GammaRampChanged]);
    assert!(events.borrow().is_empty());

    render_lines(&mut vicky, SCREEN_HEIGHT, Instant::now());
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Gamma(0x8000),
            Event::Present(SCREEN_WIDTH, SCREEN_HEIGHT)
        ]
    );
    assert!(vicky.pending_effects().is_empty());
}

/// Text mode with glyph 0x41 in cell (0, 0): row 0 is `1010_0000`.
fn text_screen() -> C256Bus {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MASTER_CTRL_REG_L, &[VideoMode::TEXT_MODE.bits() as u8]);
    write_bus(&mut bus, FONT_MEMORY_BANK0 + 0x41 * 8, &[0b1010_0000]);
    write_bus(&mut bus, FONT_MEMORY_BANK0 + 0x42 * 8, &[0b1000_0000]);
    write_bus(&mut bus, CS_TEXT_MEM_PTR, &[0x41]);
    write_bus(&mut bus, CS_COLOR_MEM_PTR, &[0x21]);
    write_bus(&mut bus, FG_CHAR_LUT_PTR + 2 * 4, &[0x11, 0x22, 0x33, 0x44]);
    write_bus(&mut bus, BG_CHAR_LUT_PTR + 4, &[0x55, 0x66, 0x77, 0x88]);
    bus
}

#[test]
fn text_mode_draws_glyph_in_foreground_over_background() {
    let mut bus = text_screen();
    bus.vicky.render_line_at(Instant::now());

    let (fg, bg): (u32, u32) = (0x1122_3344, 0x5566_7788);
    let row = &bus.vicky.frame_buffer()[..8];
    assert_eq!(row, &[fg, bg, fg, bg, bg, bg, bg, bg]);
}

#[test]
fn cursor_cell_swaps_colours_while_shown() {
    let mut bus = text_screen();
    write_bus(&mut bus, VKY_TXT_CURSOR_CTRL_REG, &[0x01]);
    write_bus(&mut bus, VKY_TXT_CURSOR_CHAR_REG, &[0x42]);
    bus.vicky.render_line_at(Instant::now());
    assert!(bus.vicky.cursor().phase);

    let (fg, bg): (u32, u32) = (0x1122_3344, 0x5566_7788);
    let row = &bus.vicky.frame_buffer()[..4];
    assert_eq!(row, &[fg, 0, bg, 0]);
}

#[test]
fn cursor_flashes_at_the_selected_rate() {
    let mut bus = text_screen();
    // Enabled, 500 ms.
    write_bus(&mut bus, VKY_TXT_CURSOR_CTRL_REG, &[0x03]);
    let t0 = Instant::now();

    bus.vicky.render_line_at(t0);
    assert!(bus.vicky.cursor().phase);
    assert!(bus.vicky.is_dirty());

    bus.vicky.render_line_at(t0 + Duration::from_millis(400));
    assert!(bus.vicky.cursor().phase);

    bus.vicky.render_line_at(t0 + Duration::from_millis(600));
    assert!(!bus.vicky.cursor().phase);
}

#[test]
fn cursor_does_not_flash_without_text() {
    let mut vicky = Vicky::default();
    vicky.store_byte_traced(VKY_TXT_CURSOR_CTRL_REG, 0x01);
    vicky.render_line_at(Instant::now());
    assert!(!vicky.cursor().phase);
    assert!(!vicky.is_dirty());
}

#[test]
fn border_wins_over_every_layer() {
    let mut bus = text_screen();
    write_bus(&mut bus, BORDER_CTRL_REG, &[0x01, 0x10, 0x20, 0x30]);
    write_bus(&mut bus, BG_CHAR_LUT_PTR, &[0xAA, 0xBB, 0xCC, 0xDD]);
    render_lines(&mut bus.vicky, 100, Instant::now());

    let border = Color::new_rgba(0x30, 0x20, 0x10, 0).to_bgra8888();
    let frame = bus.vicky.frame_buffer();
    let row = &frame[50 * SCREEN_WIDTH..51 * SCREEN_WIDTH];
    assert!(row[..BORDER_WIDTH].iter().all(|&p| p == border));
    assert!(row[SCREEN_WIDTH - BORDER_WIDTH + 1..].iter().all(|&p| p == border));
    assert_eq!(row[BORDER_WIDTH], 0xAABB_CCDD);
    assert_eq!(row[SCREEN_WIDTH - BORDER_WIDTH], 0xAABB_CCDD);
    assert!(frame[10 * SCREEN_WIDTH..11 * SCREEN_WIDTH]
        .iter()
        .all(|&p| p == border));
}

#[test]
fn bitmap_samples_video_ram_through_its_lut() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MASTER_CTRL_REG_L, &[VideoMode::BITMAP.bits() as u8]);
    write_bus(&mut bus, BM_CONTROL_REG, &[0x01 | (1 << 4), 0x00, 0x01, 0x00]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 0x400 + 7 * 4, &[0x01, 0x02, 0x03, 0xFF]);
    write_bus(&mut bus, vram(0x105), &[7]);
    bus.vicky.render_line_at(Instant::now());

    let frame = bus.vicky.frame_buffer();
    assert_eq!(frame[5], lut_colour(&bus.vicky, 1, 7));
    assert_eq!(frame[4], 0);
}

#[test]
fn tiles_come_from_a_sixteen_wide_sheet() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MASTER_CTRL_REG_L, &[VideoMode::TILEMAP.bits() as u8]);
    write_bus(
        &mut bus,
        TL0_CONTROL_REG,
        &[0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00],
    );
    write_bus(&mut bus, TILE_MAP0 + 1, &[17]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 9 * 4, &[0x09, 0x09, 0x09, 0xFF]);
    // Tile 17 is sheet row 1, column 1; pixel (3, 0) inside it.
    write_bus(&mut bus, vram(0x1_1013), &[9]);
    bus.vicky.render_line_at(Instant::now());

    let frame = bus.vicky.frame_buffer();
    assert_eq!(frame[16 + 3], lut_colour(&bus.vicky, 0, 9));
    assert_eq!(frame[16 + 2], 0);
}

#[test]
fn first_sprite_missing_the_pixel_ends_the_layer() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MASTER_CTRL_REG_L, &[VideoMode::SPRITE.bits() as u8]);
    // Sprite 0 at (0, 0), sprite 1 at (200, 0), both on layer 0.
    write_bus(&mut bus, SP00_CONTROL_REG, &[0x00, 0x00, 0x20, 0x00]);
    write_bus(&mut bus, SP00_CONTROL_REG + 8, &[0x00, 0x00, 0x30, 0x00, 200, 0]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 4 * 4, &[0x04, 0x04, 0x04, 0xFF]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 5 * 4, &[0x05, 0x05, 0x05, 0xFF]);
    write_bus(&mut bus, vram(0x2000), &[4]);
    write_bus(&mut bus, vram(0x3000), &[5]);
    bus.vicky.render_line_at(Instant::now());

    let frame = bus.vicky.frame_buffer();
    assert_eq!(frame[0], lut_colour(&bus.vicky, 0, 4));
    assert_eq!(frame[200], 0);
}

#[test]
fn transparent_sprite_pixel_ends_the_layer() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MASTER_CTRL_REG_L, &[VideoMode::SPRITE.bits() as u8]);
    // Sprites 0 and 1 overlap at (0, 0) on layer 0.
    write_bus(&mut bus, SP00_CONTROL_REG, &[0x00, 0x00, 0x20, 0x00]);
    write_bus(&mut bus, SP00_CONTROL_REG + 8, &[0x00, 0x00, 0x30, 0x00]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 4 * 4, &[0x04, 0x04, 0x04, 0xFF]);
    write_bus(&mut bus, GRPH_LUT0_PTR + 5 * 4, &[0x05, 0x05, 0x05, 0xFF]);
    write_bus(&mut bus, vram(0x2001), &[4]);
    write_bus(&mut bus, vram(0x3000), &[5, 5]);
    bus.vicky.render_line_at(Instant::now());

    let frame = bus.vicky.frame_buffer();
    assert_eq!(frame[0], 0);
    assert_eq!(frame[1], lut_colour(&bus.vicky, 0, 5));
}

#[test]
fn out_of_range_samples_never_fault() {
    let mut vicky = Vicky::default();
    let mode = (VideoMode::all() - VideoMode::DISABLE_VIDEO).bits();
    write(&mut vicky, MASTER_CTRL_REG_L, &mode.to_le_bytes());
    write(&mut vicky, BM_CONTROL_REG, &[0x01 | (7 << 4), 0xFF, 0xFF, 0xFF]);
    for layer in 0..NUM_LAYERS as u16 {
        write(
            &mut vicky,
            TL0_CONTROL_REG + layer * 8,
            &[0x8F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
        );
    }
    for n in 0..NUM_SPRITES as u16 {
        let control = ((n % 4) << 4) as u8 | 0x8E;
        write(
            &mut vicky,
            SP00_CONTROL_REG + n * 8,
            &[control, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00],
        );
    }
    let map_len = (TILE_MAP3_END.as_int() - TILE_MAP0.as_int() + 1) as usize;
    write(&mut vicky, TILE_MAP0, &vec![0xFF; map_len]);
    write(&mut vicky, CS_TEXT_MEM_PTR, &[0xFF; 0x2000]);
    write(&mut vicky, CS_COLOR_MEM_PTR, &[0xFF; 0x2000]);
    write(&mut vicky, VKY_TXT_CURSOR_CTRL_REG, &[0x07]);
    write(&mut vicky, VKY_TXT_CURSOR_CHAR_REG, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    write(&mut vicky, MOUSE_PTR_CTRL_REG_L, &[0x03]);
    vicky.set_mouse_position(0xFFFF, 0xFFFF);

    let now = Instant::now();
    render_lines(&mut vicky, 2 * SCREEN_HEIGHT, now);
    write(&mut vicky, BORDER_CTRL_REG, &[0x01]);
    render_lines(&mut vicky, SCREEN_HEIGHT, now + Duration::from_secs(1));
    assert_eq!(vicky.frames_presented(), 3);
    assert_eq!((vicky.cursor().x, vicky.cursor().y), (0xFFFF, 0xFFFF));
}

#[test]
fn mouse_pointer_draws_grey_levels_at_the_host_position() {
    let mut bus = C256Bus::default();
    write_bus(&mut bus, MOUSE_PTR_CTRL_REG_L, &[0x01]);
    write_bus(&mut bus, MOUSE_PTR_GRAP0_START + 1, &[0x80]);
    write_bus(&mut bus, MOUSE_PTR_GRAP1_START + 1, &[0x40]);
    bus.vicky.set_mouse_position(10, 0);
    bus.vicky.render_line_at(Instant::now());
    assert_eq!(bus.vicky.frame_buffer()[11], Color::grey(0x40).to_bgra8888());
    assert_eq!(bus.vicky.frame_buffer()[10], 0);

    // Select set switches to pointer 0.
    write_bus(&mut bus, MOUSE_PTR_CTRL_REG_L, &[0x03]);
    render_lines(&mut bus.vicky, SCREEN_HEIGHT, Instant::now());
    assert_eq!(bus.vicky.frame_buffer()[11], Color::grey(0x80).to_bgra8888());
}
