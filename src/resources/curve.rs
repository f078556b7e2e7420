//! 3D parametric curves used to sweep cables and caster arms.

use glam::Vec3;

pub trait Curve3 {
    /// Point at `t` in `[0, 1]`.
    fn point_at(&self, t: f32) -> Vec3;

    /// Unit tangent at `t`, by central difference unless overridden.
    fn tangent_at(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 1e-4;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point_at(t2) - self.point_at(t1)).normalize_or_zero()
    }

    /// `divisions + 1` evenly spaced (in `t`) samples.
    fn points(&self, divisions: u32) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve3 {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl CubicBezierCurve3 {
    #[must_use]
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v0, v1, v2, v3 }
    }
}

impl Curve3 for CubicBezierCurve3 {
    fn point_at(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.v0 * (k * k * k)
            + self.v1 * (3.0 * k * k * t)
            + self.v2 * (3.0 * k * t * t)
            + self.v3 * (t * t * t)
    }

    fn tangent_at(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        let d = (self.v1 - self.v0) * (3.0 * k * k)
            + (self.v2 - self.v1) * (6.0 * k * t)
            + (self.v3 - self.v2) * (3.0 * t * t);
        let d = d.normalize_or_zero();
        if d == Vec3::ZERO {
            (self.v3 - self.v0).normalize_or_zero()
        } else {
            d
        }
    }
}

/// Uniform Catmull-Rom spline through every control point.
///
/// Open curves extrapolate a phantom point at each end.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve3 {
    pub points: Vec<Vec3>,
    pub closed: bool,
}

impl CatmullRomCurve3 {
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    fn control(&self, i: isize) -> Vec3 {
        let n = self.points.len() as isize;
        if self.closed {
            return self.points[i.rem_euclid(n) as usize];
        }
        if i < 0 {
            return self.points[0] * 2.0 - self.points[1.min(n as usize - 1)];
        }
        if i >= n {
            let last = self.points[n as usize - 1];
            let prev = self.points[(n - 2).max(0) as usize];
            return last * 2.0 - prev;
        }
        self.points[i as usize]
    }
}

impl Curve3 for CatmullRomCurve3 {
    fn point_at(&self, t: f32) -> Vec3 {
        match self.points.len() {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let segments = if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        };
        let p = t.clamp(0.0, 1.0) * segments as f32;
        let mut seg = p.floor() as isize;
        let mut w = p - seg as f32;
        if seg as usize >= segments {
            seg = segments as isize - 1;
            w = 1.0;
        }

        let p0 = self.control(seg - 1);
        let p1 = self.control(seg);
        let p2 = self.control(seg + 1);
        let p3 = self.control(seg + 2);

        let w2 = w * w;
        let w3 = w2 * w;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * w
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * w2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * w3)
    }
}
