use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;
use typed_builder::TypedBuilder;

pub use c256_common;
pub use c256_common::app::App;
pub use sdl2;

use c256_common::GammaRamp;

/// Frames arrive as packed `BGRA8888` pixels.
const PIXEL_FORMAT: PixelFormatEnum = PixelFormatEnum::BGRA8888;
const BYTES_PER_PIXEL: u32 = 4;

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
}

pub struct SdlContext;

impl SdlContext {
    pub fn run(sdl_init_info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo {
            width,
            height,
            scale,
            title,
        } = sdl_init_info;

        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(&title, width * scale, height * scale)
            .position_centered()
            .build()?;
        let mut canvas: WindowCanvas = window.into_canvas().present_vsync().build()?;
        canvas
            .set_scale(scale as f32, scale as f32)
            .map_err(|e| anyhow!(e))?;

        let texture_creator = canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(PIXEL_FORMAT, width, height)?;

        let mut screen_state = vec![0u8; screen_len(width, height)];

        app.init();
        let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        // ~60 frames per second.
        let target_frame = Duration::from_micros(16_667);
        let mut last_frame = Instant::now();

        loop {
            if app.should_exit() {
                app.exit();
                break;
            }

            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::MouseMotion { x, y, .. } => {
                        let (x, y) = window_to_screen(x, y, scale);
                        app.handle_mouse_motion(x, y);
                    }
                    _ => {}
                }
            }

            app.update(&mut screen_state);

            if let Some(ramp) = app.take_gamma_ramp() {
                apply_gamma_ramp(&mut canvas, &ramp);
            }

            texture.update(None, &screen_state, (width * BYTES_PER_PIXEL) as usize)?;
            canvas.clear();
            canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
            canvas.present();

            let elapsed = last_frame.elapsed();
            if elapsed < target_frame {
                std::thread::sleep(target_frame - elapsed);
            }
            last_frame = Instant::now();
        }

        Ok(())
    }
}

fn apply_gamma_ramp(canvas: &mut WindowCanvas, ramp: &GammaRamp) {
    // Not every video driver supports gamma ramps.
    if let Err(e) = canvas
        .window_mut()
        .set_gamma_ramp(&ramp.red, &ramp.green, &ramp.blue)
    {
        log::warn!("failed to set gamma ramp: {e}");
    }
}

/// Window coordinates back to unscaled screen pixels.
fn window_to_screen(x: i32, y: i32, scale: u32) -> (u16, u16) {
    let scale = scale.max(1) as i32;
    let clamp = |v: i32| (v / scale).clamp(0, u16::MAX as i32) as u16;
    (clamp(x), clamp(y))
}

/// Bytes in one frame of the screen buffer handed to [`App::update`].
pub fn screen_len(width: u32, height: u32) -> usize {
    (width * height * BYTES_PER_PIXEL) as usize
}
