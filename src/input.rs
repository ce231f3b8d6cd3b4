use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-frame snapshot of the movement keys. Collected from window events and
/// passed by value into the player update, so the simulation never reads
/// ambient input state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        let WindowEvent::KeyboardInput { event: key_event, .. } = event else {
            return false;
        };
        let pressed = key_event.state == ElementState::Pressed;
        match key_event.physical_key {
            PhysicalKey::Code(KeyCode::KeyW) => {
                self.forward = pressed;
                true
            }
            PhysicalKey::Code(KeyCode::KeyS) => {
                self.back = pressed;
                true
            }
            PhysicalKey::Code(KeyCode::KeyA) => {
                self.left = pressed;
                true
            }
            PhysicalKey::Code(KeyCode::KeyD) => {
                self.right = pressed;
                true
            }
            PhysicalKey::Code(KeyCode::Space) => {
                self.jump = pressed;
                true
            }
            _ => false,
        }
    }

    /// Discrete movement axes: +x is right, +z is back, each in {-1, 0, 1}.
    pub fn axes(&self) -> (f32, f32) {
        let move_x = (self.right as i8 - self.left as i8) as f32;
        let move_z = (self.back as i8 - self.forward as i8) as f32;
        (move_x, move_z)
    }
}
