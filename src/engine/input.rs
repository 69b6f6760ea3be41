// Pointer input for node picking.
// Turns winit events into a per-frame snapshot the simulation can query.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

#[derive(Debug, Default)]
pub struct InputState {
    /// Last known cursor position in physical pixels.
    pub pointer: Vec2,
    /// Pointer position at the most recent left press not yet consumed.
    pending_pick: Option<Vec2>,
    pub window_size: (u32, u32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit WindowEvent into the input state.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.pending_pick = Some(self.pointer);
            }
            WindowEvent::Resized(size) => {
                self.window_size = (size.width, size.height);
            }
            _ => {}
        }
    }

    /// Pick request for this frame, if any. Consumed on read.
    pub fn take_pick(&mut self) -> Option<Vec2> {
        self.pending_pick.take()
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.window_size.0 as f32, self.window_size.1 as f32)
    }

    /// Drops any pick nobody consumed this frame.
    pub fn end_frame(&mut self) {
        self.pending_pick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        DeviceId::dummy()
    }

    fn cursor(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn click(button: MouseButton, state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button,
        }
    }

    #[test]
    fn left_press_records_pick_at_cursor() {
        let mut input = InputState::new();
        input.process_event(&cursor(120.0, 48.5));
        input.process_event(&click(MouseButton::Left, ElementState::Pressed));
        assert_eq!(input.take_pick(), Some(Vec2::new(120.0, 48.5)));
        assert_eq!(input.take_pick(), None);
    }

    #[test]
    fn other_buttons_and_releases_ignored() {
        let mut input = InputState::new();
        input.process_event(&click(MouseButton::Right, ElementState::Pressed));
        input.process_event(&click(MouseButton::Left, ElementState::Released));
        assert_eq!(input.take_pick(), None);
    }

    #[test]
    fn end_frame_drops_unread_pick() {
        let mut input = InputState::new();
        input.process_event(&click(MouseButton::Left, ElementState::Pressed));
        input.end_frame();
        assert_eq!(input.take_pick(), None);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut input = InputState::new();
        input.process_event(&WindowEvent::Resized(PhysicalSize::new(1280, 720)));
        assert_eq!(input.viewport(), Vec2::new(1280.0, 720.0));
    }
}
