use glam::{Mat4, Quat, Vec3};

const FOCUS_HEIGHT: f32 = 1.0;
const FOLLOW_LERP: f32 = 0.2;

/// Orbit camera that trails the player. The focus point eases toward the
/// player each frame; yaw/pitch/distance come from the camera controller.
pub struct FollowCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl FollowCamera {
    pub fn new(target: Vec3) -> Self {
        Self {
            focus: target + Vec3::Y * FOCUS_HEIGHT,
            yaw: 0.0,
            pitch: 35.0,
            distance: 12.0,
        }
    }

    /// Ease the focus toward the target so the camera lags a little behind
    /// quick movement instead of being bolted to it.
    pub fn follow(&mut self, target: Vec3) {
        self.focus = self.focus.lerp(target + Vec3::Y * FOCUS_HEIGHT, FOLLOW_LERP);
    }

    fn orbit_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    pub fn eye_position(&self) -> Vec3 {
        self.focus + self.orbit_rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn build_view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.focus, Vec3::Y)
    }
}

pub struct Projection {
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy_degrees: f32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn build_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }
}
