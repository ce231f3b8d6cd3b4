mod camera;
mod camera_controller;
mod input;
mod mesh;
mod player;
mod renderer;
mod terrain;

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use camera::FollowCamera;
use camera_controller::CameraController;
use input::InputState;
use player::{Player, PlayerConfig};
use renderer::State;
use terrain::{Terrain, TerrainParams};

struct App {
    window: Option<Arc<Window>>,
    state: Option<State>,
    terrain: Terrain,
    player: Player,
    camera: FollowCamera,
    camera_controller: CameraController,
    input: InputState,
    last_frame: Instant,
}

impl App {
    fn new() -> Self {
        let terrain = Terrain::generate(TerrainParams::default());
        let spawn_ground = terrain.height_at(0.0, 0.0).unwrap_or(0.0);
        let player = Player::new(Vec3::new(0.0, spawn_ground, 0.0), PlayerConfig::default());
        let camera = FollowCamera::new(player.position);

        Self {
            window: None,
            state: None,
            terrain,
            player,
            camera,
            camera_controller: CameraController::new(2.0, 0.4),
            input: InputState::default(),
            last_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes().with_title("Hillwalk");
            let window = Arc::new(event_loop.create_window(window_attributes).unwrap());
            self.window = Some(window.clone());

            match pollster::block_on(State::new(window, &self.terrain)) {
                Ok(state) => {
                    self.state = Some(state);
                    self.last_frame = Instant::now();
                }
                Err(e) => {
                    log::error!("failed to create renderer: {e:?}");
                    event_loop.exit();
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.camera_controller.process_mouse_motion(delta.0, delta.1);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let window = match self.window.as_ref() {
            Some(w) => w,
            None => return,
        };
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        if id != window.id() {
            return;
        }

        if !self.input.process_event(&event) && !self.camera_controller.process_events(&event) {
            match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            logical_key: Key::Named(NamedKey::Escape),
                            ..
                        },
                    ..
                } => {
                    event_loop.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    state.resize(physical_size);
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                    Err(e) => log::warn!("surface error: {e:?}"),
                },
                _ => {}
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.player.update(dt, self.input, &self.terrain);
        self.camera_controller.update_camera(&mut self.camera);
        self.camera.follow(self.player.position);

        if let Some(state) = self.state.as_mut() {
            state.update(&self.camera, &self.player);
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
