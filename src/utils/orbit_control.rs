use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::app::input::{Input, MouseButton};
use crate::scene::transform::Transform;

/// Damped orbit camera controller.
///
/// Left drag rotates around `center`, the wheel zooms and right drag pans.
/// Angles are spherical: `theta` is the azimuth around +Y measured from +Z,
/// `phi` the polar angle measured from +Y.
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub enable_pan: bool,

    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.1,
            enable_damping: true,
            enable_pan: true,

            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: -PI,
            max_azimuth_angle: PI,

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Controller whose current orbit reproduces a camera at `position`
    /// looking at `target`.
    #[must_use]
    pub fn looking_from(position: Vec3, target: Vec3) -> Self {
        let mut controls = Self::new(target, 1.0);
        controls.set_position(position, target);
        controls
    }

    /// Re-derives the orbit from an explicit camera placement and drops any
    /// pending inertia.
    pub fn set_position(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.center = target;
        self.radius = offset.length().max(f32::EPSILON);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.rotate_delta = Vec2::ZERO;
    }

    /// Current camera position implied by the orbit.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.center
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let screen_height = input.screen_size().y.max(1.0);

        if input.get_mouse_button(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= input.mouse_delta() * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);

            self.theta += delta_apply.x;
            self.phi += delta_apply.y;

            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.apply_limits();

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
        }
        let (near, far) = ordered(self.min_distance, self.max_distance);
        self.radius = self.radius.clamp(near, far);

        if self.enable_pan && input.get_mouse_button(MouseButton::Right) {
            let half_fov = fov_degrees.to_radians() / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world_ratio = target_world_height / screen_height;

            let forward = (self.center - self.position()).normalize_or(Vec3::NEG_Z);
            let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
            let up = right.cross(forward).normalize_or(Vec3::Y);

            let delta = input.mouse_delta();
            self.center += (right * -delta.x + up * delta.y) * pixels_to_world_ratio * self.pan_speed;
        }

        transform.position = self.position();
        transform.look_at(self.center, Vec3::Y);
    }

    fn apply_limits(&mut self) {
        const EPS: f32 = 0.0001;

        // keep theta continuous before clamping against the azimuth window
        if self.theta > PI {
            self.theta -= 2.0 * PI;
        } else if self.theta < -PI {
            self.theta += 2.0 * PI;
        }
        if self.min_azimuth_angle > -PI || self.max_azimuth_angle < PI {
            let (low, high) = ordered(self.min_azimuth_angle, self.max_azimuth_angle);
            self.theta = self.theta.clamp(low, high);
        }

        let min_phi = self.min_polar_angle.max(EPS);
        let max_phi = self.max_polar_angle.min(PI - EPS).max(min_phi);
        self.phi = self.phi.clamp(min_phi, max_phi);
    }
}

/// `(a, b)` as a valid clamp range, whichever order the limits were set in.
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
