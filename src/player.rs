use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use log::warn;

use crate::input::InputState;
use crate::terrain::Terrain;

/// Simulation tick length. `Player::update` consumes wall-clock time and
/// advances in whole ticks, so the tuning constants below are all per tick
/// and behavior is independent of the render frame rate.
pub const SIM_TICK: f32 = 1.0 / 60.0;

/// Longest backlog of unsimulated time carried across frames. Anything older
/// (debugger pause, window drag) is dropped instead of replayed.
const MAX_BACKLOG: f32 = 0.25;

#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// Horizontal displacement per tick.
    pub move_speed: f32,
    /// Downward acceleration per tick while airborne.
    pub gravity: f32,
    /// Upward velocity set on jump.
    pub jump_strength: f32,
    /// Snap-to-ground band: grounded while no higher than this above ground.
    pub ground_snap: f32,
    /// Slerp fraction toward the target facing per tick.
    pub turn_smoothing: f32,
    /// Yaw correction for the model's authored forward axis.
    pub facing_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.15,
            gravity: 0.015,
            jump_strength: 0.3,
            ground_snap: 0.6,
            turn_smoothing: 0.15,
            facing_offset: -FRAC_PI_2,
        }
    }
}

/// Kinematic state of the walking character. Mutated only by `update`/`step`;
/// the renderer and camera read position, orientation and the `running` flag.
pub struct Player {
    pub position: Vec3,
    pub velocity_y: f32,
    pub grounded: bool,
    pub orientation: Quat,
    pub move_dir: Vec3,
    /// Locomotion flag for the render layer (run animation on/off).
    pub running: bool,
    config: PlayerConfig,
    spawn_floor: f32,
    accumulator: f32,
    ground_missing: bool,
}

impl Player {
    pub fn new(position: Vec3, config: PlayerConfig) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            grounded: true,
            orientation: Quat::IDENTITY,
            move_dir: Vec3::ZERO,
            running: false,
            config,
            spawn_floor: position.y,
            accumulator: 0.0,
            ground_missing: false,
        }
    }

    /// Advance by wall-clock `dt`, running as many whole simulation ticks as
    /// have elapsed. Leftover time stays in the accumulator for next frame.
    pub fn update(&mut self, dt: f32, input: InputState, terrain: &Terrain) {
        self.accumulator = (self.accumulator + dt).min(MAX_BACKLOG);
        while self.accumulator >= SIM_TICK {
            self.accumulator -= SIM_TICK;
            self.step(input, terrain);
        }
    }

    /// One simulation tick.
    pub fn step(&mut self, input: InputState, terrain: &Terrain) {
        let (move_x, move_z) = input.axes();
        // Normalized so diagonal movement is no faster than axial.
        self.move_dir = Vec3::new(move_x, 0.0, move_z).normalize_or_zero();
        self.position.x += self.move_dir.x * self.config.move_speed;
        self.position.z += self.move_dir.z * self.config.move_speed;

        match terrain.height_at(self.position.x, self.position.z) {
            Some(ground) => {
                self.ground_missing = false;
                // Only re-ground while not moving upward, so a fresh jump can
                // leave the snap band instead of being pulled straight back.
                if self.velocity_y <= 0.0 {
                    let clearance = self.position.y - ground;
                    if clearance <= self.config.ground_snap {
                        self.position.y = ground;
                        self.velocity_y = 0.0;
                        self.grounded = true;
                    } else {
                        self.grounded = false;
                    }
                }
            }
            None => {
                if !self.ground_missing {
                    warn!(
                        "no ground under player at ({:.1}, {:.1}), free-falling",
                        self.position.x, self.position.z
                    );
                    self.ground_missing = true;
                }
                self.grounded = false;
            }
        }

        if input.jump && self.grounded {
            self.velocity_y = self.config.jump_strength;
            self.grounded = false;
        }

        if !self.grounded {
            self.velocity_y -= self.config.gravity;
            self.position.y += self.velocity_y;
            // With no ground below, the spawn height acts as an invisible
            // floor so the character never falls out of the world.
            if self.ground_missing && self.position.y <= self.spawn_floor {
                self.position.y = self.spawn_floor;
                self.velocity_y = 0.0;
                self.grounded = true;
            }
        }

        if self.move_dir != Vec3::ZERO {
            let yaw = f32::atan2(self.move_dir.x, self.move_dir.z) + self.config.facing_offset;
            let target = Quat::from_rotation_y(yaw);
            self.orientation = self.orientation.slerp(target, self.config.turn_smoothing);
        }
        self.running = self.move_dir != Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{HeightStyle, TerrainParams};

    fn flat_terrain() -> Terrain {
        Terrain::generate(TerrainParams {
            width: 100.0,
            depth: 100.0,
            segments_x: 50,
            segments_z: 50,
            amplitude: 0.0,
            frequency: 0.05,
            style: HeightStyle::Sinusoid {
                detail_frequency: 0.4,
                detail_weight: 0.3,
            },
        })
    }

    fn spawn() -> Player {
        Player::new(Vec3::ZERO, PlayerConfig::default())
    }

    fn held(forward: bool, back: bool, left: bool, right: bool, jump: bool) -> InputState {
        InputState {
            forward,
            back,
            left,
            right,
            jump,
        }
    }

    #[test]
    fn idle_tick_on_flat_ground_changes_nothing() {
        let terrain = flat_terrain();
        let mut player = spawn();
        player.step(InputState::default(), &terrain);
        assert_eq!(player.position, Vec3::ZERO);
        assert!(player.grounded);
        assert_eq!(player.velocity_y, 0.0);
        assert!(!player.running);
    }

    #[test]
    fn forward_for_n_ticks_moves_by_speed_times_n() {
        let terrain = flat_terrain();
        let mut player = spawn();
        for _ in 0..10 {
            player.step(held(true, false, false, false, false), &terrain);
        }
        assert!((player.position.z - (-0.15 * 10.0)).abs() < 1e-5);
        assert_eq!(player.position.x, 0.0);
        assert!(player.running);
    }

    #[test]
    fn diagonal_speed_equals_axial_speed() {
        let terrain = flat_terrain();
        let mut player = spawn();
        player.step(held(true, false, false, true, false), &terrain);
        assert!((player.move_dir.length() - 1.0).abs() < 1e-6);
        let moved = Vec3::new(player.position.x, 0.0, player.position.z).length();
        assert!((moved - 0.15).abs() < 1e-5);
    }

    #[test]
    fn jump_rises_then_lands_with_zero_velocity() {
        let terrain = flat_terrain();
        let mut player = spawn();
        player.step(held(false, false, false, false, true), &terrain);
        assert!(!player.grounded);
        // Jump sets velocity to 0.3; one tick of gravity has already applied.
        assert!((player.velocity_y - (0.3 - 0.015)).abs() < 1e-6);
        assert!(player.position.y > 0.0);

        let mut ticks = 0;
        let mut last_velocity = player.velocity_y;
        while !player.grounded {
            player.step(InputState::default(), &terrain);
            if !player.grounded {
                // Gravity strictly decreases vertical velocity while airborne.
                assert!((last_velocity - player.velocity_y - 0.015).abs() < 1e-6);
                last_velocity = player.velocity_y;
            }
            ticks += 1;
            assert!(ticks < 200, "never landed");
        }
        assert_eq!(player.position.y, 0.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn jump_input_while_airborne_is_ignored() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec3::new(0.0, 5.0, 0.0), PlayerConfig::default());
        player.step(InputState::default(), &terrain);
        assert!(!player.grounded);
        let before = player.velocity_y;
        player.step(held(false, false, false, false, true), &terrain);
        // Only gravity acted; no jump impulse.
        assert!((before - player.velocity_y - 0.015).abs() < 1e-6);
    }

    #[test]
    fn landing_grounds_and_zeroes_velocity_in_one_tick() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec3::new(0.0, 0.5, 0.0), PlayerConfig::default());
        player.velocity_y = -0.1;
        player.grounded = false;
        player.step(InputState::default(), &terrain);
        assert!(player.grounded);
        assert_eq!(player.position.y, 0.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn missing_ground_settles_on_spawn_floor() {
        let terrain = flat_terrain();
        // Outside the +-50 sampled domain, 2 units above the spawn floor.
        let mut player = Player::new(Vec3::new(60.0, 2.0, 0.0), PlayerConfig::default());
        player.position.y = 4.0;
        player.grounded = false;
        let mut ticks = 0;
        while !player.grounded {
            player.step(InputState::default(), &terrain);
            ticks += 1;
            assert!(ticks < 500, "never reached the spawn floor");
        }
        assert_eq!(player.position.y, 2.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn walking_off_the_grid_starts_free_fall() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec3::new(49.9, 0.0, 0.0), PlayerConfig::default());
        // On a ledge above the spawn floor; one tick right crosses x = 50.
        player.position.y = 3.0;
        player.step(held(false, false, false, true, false), &terrain);
        assert!(!player.grounded);
        assert!(player.velocity_y < 0.0);
        assert!(player.position.y < 3.0);
    }

    #[test]
    fn facing_turns_smoothly_toward_movement() {
        let terrain = flat_terrain();
        let mut player = spawn();
        let target = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        player.step(held(true, false, false, false, false), &terrain);
        let after_one = player.orientation.angle_between(target);
        assert!(after_one > 0.01, "turn should be gradual");

        for _ in 0..200 {
            player.step(held(true, false, false, false, false), &terrain);
        }
        assert!(player.orientation.angle_between(target) < 0.01);
    }

    #[test]
    fn update_runs_whole_ticks_and_caps_backlog() {
        let terrain = flat_terrain();
        let mut player = spawn();
        // 3.5 ticks of wall-clock time runs exactly 3 steps.
        player.update(3.5 * SIM_TICK, held(true, false, false, false, false), &terrain);
        assert!((player.position.z - (-0.15 * 3.0)).abs() < 1e-5);

        // A huge frame advances at most the capped backlog worth of ticks.
        let mut stalled = spawn();
        stalled.update(10.0, held(true, false, false, false, false), &terrain);
        let max_ticks = (0.25 / SIM_TICK).ceil();
        assert!(stalled.position.z.abs() <= 0.15 * max_ticks + 1e-4);
    }
}
