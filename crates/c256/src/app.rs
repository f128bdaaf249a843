use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use c256_common::app::App;
use c256_common::GammaRamp;
use c256_core::{Automation, C256Bus, Surface, Vicky, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

use crate::{Image, ImageFormat};

#[derive(Default)]
struct FrameSlot {
    frame: Vec<u32>,
    gamma: Option<GammaRamp>,
}

/// Surface handing frames to the SDL loop through a shared slot.
#[derive(Clone, Default)]
struct SharedSurface(Rc<RefCell<FrameSlot>>);

impl Surface for SharedSurface {
    fn present(&mut self, frame: &[u32], _width: usize, _height: usize) {
        let mut slot = self.0.borrow_mut();
        slot.frame.clear();
        slot.frame.extend_from_slice(frame);
    }

    fn set_gamma_ramp(&mut self, ramp: &GammaRamp) {
        self.0.borrow_mut().gamma = Some(ramp.clone());
    }
}

pub struct C256App {
    pub bus: C256Bus,
    pub automation: Automation,
    surface: SharedSurface,
    should_exit: bool,
    scale: u32,
}

impl Default for C256App {
    fn default() -> Self {
        Self::new(SCREEN_SCALE)
    }
}

impl C256App {
    pub fn new(scale: u32) -> Self {
        let surface = SharedSurface::default();
        let bus = C256Bus::new(Vicky::new(Box::new(surface.clone())));
        Self {
            bus,
            automation: Automation::new(),
            surface,
            should_exit: false,
            scale,
        }
    }

    /// Load a memory image through the bus. Returns the number of bytes stored.
    pub fn load(&mut self, image: &Image) -> Result<usize> {
        let stored = match image.format() {
            ImageFormat::Hex => self.automation.load_hex_file(&mut self.bus, &image.path),
            ImageFormat::Binary => {
                self.automation
                    .load_bin_file(&mut self.bus, image.address, &image.path)
            }
        }
        .with_context(|| format!("failed to load {}", image.path.display()))?;
        log::info!("loaded {} ({stored} bytes)", image.path.display());
        Ok(stored)
    }
}

impl App for C256App {
    fn init(&mut self) {
        log::info!("C256 init");
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        for _ in 0..SCREEN_HEIGHT {
            self.bus.vicky.render_line();
        }

        let slot = self.surface.0.borrow();
        for (pixel, out) in slot.frame.iter().zip(screen_state.chunks_exact_mut(4)) {
            out.copy_from_slice(&pixel.to_ne_bytes());
        }
    }

    fn handle_mouse_motion(&mut self, x: u16, y: u16) {
        self.bus.vicky.set_mouse_position(x, y);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        self.should_exit = true;
        log::info!("C256 exit");
    }

    fn take_gamma_ramp(&mut self) -> Option<GammaRamp> {
        self.surface.0.borrow_mut().gamma.take()
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        self.scale
    }

    fn title(&self) -> String {
        "C256 Foenix".to_string()
    }
}
