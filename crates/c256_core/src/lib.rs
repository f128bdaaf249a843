pub mod address;
pub mod automation;
pub mod bus;
pub mod cpu;
pub mod error;
pub mod vicky;

pub use address::{Address, MemoryRegion};
pub use automation::{Automation, Breakpoint};
pub use bus::{Bus, BusDevice, C256Bus, Ram};
pub use cpu::Stack;
pub use error::{Error, Result};
pub use vicky::{HeadlessSurface, StorageCell, Surface, Vicky};

/// Visible screen width in pixels.
pub const SCREEN_WIDTH: usize = 640;
/// Visible screen height in pixels (one rendered scanline per row).
pub const SCREEN_HEIGHT: usize = 480;
/// Default integer scaling factor for the SDL frontend.
pub const SCREEN_SCALE: u32 = 2;
