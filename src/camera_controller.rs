use crate::camera::FollowCamera;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

const ZOOM_SENSITIVITY: f32 = 0.5;
const PITCH_RANGE: (f32, f32) = (5.0, 89.0);
const DISTANCE_RANGE: (f32, f32) = (2.0, 50.0);

/// Orbit input for the follow camera: arrow keys rotate, middle-mouse drag
/// orbits freely, the scroll wheel zooms. Deltas accumulate between frames
/// and are applied once per `update_camera`.
#[derive(Default)]
pub struct CameraController {
    orbit_left: bool,
    orbit_right: bool,
    dragging: bool,

    orbit_speed: f32,
    mouse_sensitivity: f32,

    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(orbit_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            orbit_speed,
            mouse_sensitivity,
            ..Default::default()
        }
    }

    pub fn process_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => match &key_event.logical_key {
                Key::Named(NamedKey::ArrowLeft) => {
                    self.orbit_left = key_event.state == ElementState::Pressed;
                    true
                }
                Key::Named(NamedKey::ArrowRight) => {
                    self.orbit_right = key_event.state == ElementState::Pressed;
                    true
                }
                _ => false,
            },
            WindowEvent::MouseWheel { delta, .. } => {
                self.pending_zoom += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * -1.0,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * -0.1,
                };
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Middle {
                    self.dragging = *state == ElementState::Pressed;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if self.dragging {
            self.pending_yaw += delta_x as f32;
            self.pending_pitch += delta_y as f32;
        }
    }

    pub fn update_camera(&mut self, camera: &mut FollowCamera) {
        if self.orbit_left {
            camera.yaw -= self.orbit_speed;
        }
        if self.orbit_right {
            camera.yaw += self.orbit_speed;
        }

        camera.yaw += self.pending_yaw * self.mouse_sensitivity;
        camera.pitch = (camera.pitch - self.pending_pitch * self.mouse_sensitivity)
            .clamp(PITCH_RANGE.0, PITCH_RANGE.1);
        camera.distance = (camera.distance + self.pending_zoom * ZOOM_SENSITIVITY)
            .clamp(DISTANCE_RANGE.0, DISTANCE_RANGE.1);

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
    }
}
