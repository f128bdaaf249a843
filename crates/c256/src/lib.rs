use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use c256_core::{Address, SCREEN_SCALE};
use c256_sdl2::App;
use c256_sdl2::{SdlContext, SdlInitInfo};

mod app;

pub use app::C256App;

/// Environment variable overriding the window scale.
pub const SCALE_ENV: &str = "C256_SCALE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Binary,
    Hex,
}

/// A memory image named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub path: PathBuf,
    /// Load address for raw binaries. Hex images carry their own addresses.
    pub address: Address,
}

impl Image {
    /// Parse `path[@hex-address]`.
    pub fn parse(arg: &str) -> Result<Image> {
        let (path, address) = match arg.rsplit_once('@') {
            Some((path, addr)) => {
                let digits = addr.trim_start_matches('$').trim_start_matches("0x");
                let linear = u32::from_str_radix(digits, 16)
                    .map_err(|_| anyhow!("invalid load address '{addr}' in '{arg}'"))?;
                (path, Address::from_linear(linear))
            }
            None => (arg, Address::default()),
        };
        if path.is_empty() {
            return Err(anyhow!("missing image path in '{arg}'"));
        }
        Ok(Image {
            path: PathBuf::from(path),
            address,
        })
    }

    pub fn format(&self) -> ImageFormat {
        if is_hex_path(&self.path) {
            ImageFormat::Hex
        } else {
            ImageFormat::Binary
        }
    }
}

fn is_hex_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hex"))
}

/// Window scale from `value`, falling back to the default when it is not a
/// positive integer.
pub fn parse_scale(value: Option<&str>) -> u32 {
    match value.map(|v| v.trim().parse::<u32>()) {
        None => SCREEN_SCALE,
        Some(Ok(scale)) if scale > 0 => scale,
        Some(_) => {
            log::warn!(
                "ignoring {SCALE_ENV}={:?}, using scale {SCREEN_SCALE}",
                value.unwrap_or_default()
            );
            SCREEN_SCALE
        }
    }
}

pub fn run(images: &[Image]) -> Result<()> {
    let scale = parse_scale(std::env::var(SCALE_ENV).ok().as_deref());
    let mut app = C256App::new(scale);
    for image in images {
        app.load(image)?;
    }

    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)?;
    Ok(())
}
