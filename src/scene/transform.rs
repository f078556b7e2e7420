use glam::{Affine3A, EulerRot, Mat3, Mat4, Quat, Vec3};

/// Transform component
///
/// Position, rotation and scale (TRS) plus cached local/world matrices with
/// shadow-state dirty checking.
///
/// Rotations set through [`Transform::set_rotation_euler`] are also kept as
/// Euler angles, so angles outside `(-π, π]` (a full spin of `2π`, say)
/// survive a round trip through [`Transform::rotation_euler`] unchanged.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // Euler angles last written, valid while `rotation == euler_source`
    euler: Vec3,
    euler_source: Quat,

    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            euler: Vec3::ZERO,
            euler_source: Quat::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    /// Recomputes the local matrix if any TRS component changed.
    /// Returns whether it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// Sets the rotation from XYZ Euler angles (radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self.euler = Vec3::new(x, y, z);
        self.euler_source = self.rotation;
    }

    /// XYZ Euler angles of the current rotation.
    ///
    /// Returns the exact angles last passed to `set_rotation_euler` unless
    /// the quaternion has been written directly since.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        if self.rotation == self.euler_source {
            return self.euler;
        }
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Replaces a single Euler component, keeping the other two.
    pub fn set_rotation_axis(&mut self, axis: usize, angle: f32) {
        let mut e = self.rotation_euler();
        e[axis.min(2)] = angle;
        self.set_rotation_euler(e.x, e.y, e.z);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Rotates so that -Z points at `target`.
    ///
    /// `target` and `up` are in the parent's space. Degenerate inputs
    /// (target on the up axis) leave the rotation untouched.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO || forward.cross(up).length_squared() < 1e-8 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        self.euler = Vec3::new(x, y, z);
        self.euler_source = self.rotation;
    }

    /// Forces a matrix refresh on the next hierarchy update.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
