use crate::GammaRamp;

pub trait App {
    fn init(&mut self);
    fn update(&mut self, screen: &mut [u8]);
    fn handle_mouse_motion(&mut self, x: u16, y: u16);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    /// Gamma ramp the frontend should apply to its window, if it changed
    /// since the last call.
    fn take_gamma_ramp(&mut self) -> Option<GammaRamp> {
        None
    }

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
