//! 2D outlines for extrusion.
//!
//! A [`Shape`] is an outer [`Path`] plus optional holes. Paths are built
//! with canvas-style commands and flattened to polylines by
//! [`Path::points`]; [`triangulate`] turns an outline with holes into a
//! triangle list by ear clipping.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Line(Vec2, Vec2),
    Quadratic(Vec2, Vec2, Vec2),
    Cubic(Vec2, Vec2, Vec2, Vec2),
    Ellipse {
        center: Vec2,
        radii: Vec2,
        start: f32,
        end: f32,
        clockwise: bool,
    },
}

impl Segment {
    fn point_at(&self, t: f32) -> Vec2 {
        match *self {
            Segment::Line(a, b) => a.lerp(b, t),
            Segment::Quadratic(p0, c, p1) => {
                let k = 1.0 - t;
                p0 * (k * k) + c * (2.0 * k * t) + p1 * (t * t)
            }
            Segment::Cubic(p0, c1, c2, p1) => {
                let k = 1.0 - t;
                p0 * (k * k * k) + c1 * (3.0 * k * k * t) + c2 * (3.0 * k * t * t) + p1 * (t * t * t)
            }
            Segment::Ellipse {
                center,
                radii,
                start,
                end,
                clockwise,
            } => {
                let angle = start + t * ellipse_sweep(start, end, clockwise);
                center + Vec2::new(radii.x * angle.cos(), radii.y * angle.sin())
            }
        }
    }

    fn start_point(&self) -> Vec2 {
        self.point_at(0.0)
    }

    fn end_point(&self) -> Vec2 {
        self.point_at(1.0)
    }
}

/// Signed sweep from `start` to `end`, normalized the way canvas arcs are.
fn ellipse_sweep(start: f32, end: f32, clockwise: bool) -> f32 {
    use std::f32::consts::TAU;
    let mut delta = end - start;
    let same = delta.abs() < f32::EPSILON;

    while delta < 0.0 {
        delta += TAU;
    }
    while delta > TAU {
        delta -= TAU;
    }

    if delta < f32::EPSILON {
        delta = if same { 0.0 } else { TAU };
    }

    if clockwise && !same {
        if (delta - TAU).abs() < f32::EPSILON {
            delta = -TAU;
        } else {
            delta -= TAU;
        }
    }
    delta
}

/// A sequence of connected 2D segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    current: Vec2,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.current = Vec2::new(x, y);
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        let p = Vec2::new(x, y);
        self.segments.push(Segment::Line(self.current, p));
        self.current = p;
        self
    }

    pub fn quadratic_curve_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        let p = Vec2::new(x, y);
        self.segments
            .push(Segment::Quadratic(self.current, Vec2::new(cx, cy), p));
        self.current = p;
        self
    }

    pub fn bezier_curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> &mut Self {
        let p = Vec2::new(x, y);
        self.segments.push(Segment::Cubic(
            self.current,
            Vec2::new(c1x, c1y),
            Vec2::new(c2x, c2y),
            p,
        ));
        self.current = p;
        self
    }

    /// Ellipse arc around an absolute center. A line joins the current
    /// point to the arc start when the path already has segments.
    pub fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> &mut Self {
        let seg = Segment::Ellipse {
            center: Vec2::new(cx, cy),
            radii: Vec2::new(rx, ry),
            start: start_angle,
            end: end_angle,
            clockwise,
        };
        let first = seg.start_point();
        if !self.segments.is_empty() && first.distance_squared(self.current) > 1e-12 {
            self.segments.push(Segment::Line(self.current, first));
        }
        self.current = seg.end_point();
        self.segments.push(seg);
        self
    }

    pub fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, clockwise: bool) -> &mut Self {
        self.ellipse(cx, cy, radius, radius, start, end, clockwise)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flattens the path. Curves take `divisions` steps, full ellipses
    /// twice as many, straight lines only contribute their end point.
    #[must_use]
    pub fn points(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut out: Vec<Vec2> = Vec::new();

        for seg in &self.segments {
            let resolution = match seg {
                Segment::Line(..) => 1,
                Segment::Ellipse { .. } => divisions * 2,
                _ => divisions,
            };
            if out.is_empty() {
                out.push(seg.start_point());
            }
            for i in 1..=resolution as usize {
                let p = seg.point_at(i as f32 / resolution as f32);
                if out.last().is_some_and(|last| last.distance_squared(p) < 1e-14) {
                    continue;
                }
                out.push(p);
            }
        }

        out
    }
}

/// An outline with holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub path: Path,
    pub holes: Vec<Path>,
}

impl Shape {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Centered rectangle with quadratic rounded corners.
    #[must_use]
    pub fn rounded_rect(width: f32, height: f32, radius: f32) -> Self {
        let mut shape = Self::new();
        shape.path = rounded_rect_path(width, height, radius);
        shape
    }

    /// Centered full ellipse.
    #[must_use]
    pub fn ellipse(rx: f32, ry: f32) -> Self {
        let mut shape = Self::new();
        shape
            .path
            .ellipse(0.0, 0.0, rx, ry, 0.0, std::f32::consts::TAU, false);
        shape
    }

    pub fn add_hole(&mut self, hole: Path) -> &mut Self {
        self.holes.push(hole);
        self
    }

    /// Flattened outline and holes, normalized for extrusion: duplicate
    /// closing points removed, outline counter-clockwise, holes clockwise.
    #[must_use]
    pub fn extract_points(&self, divisions: u32) -> (Vec<Vec2>, Vec<Vec<Vec2>>) {
        let mut contour = self.path.points(divisions);
        remove_closing_duplicate(&mut contour);
        if is_clockwise(&contour) {
            contour.reverse();
        }

        let holes = self
            .holes
            .iter()
            .map(|h| {
                let mut pts = h.points(divisions);
                remove_closing_duplicate(&mut pts);
                if !is_clockwise(&pts) {
                    pts.reverse();
                }
                pts
            })
            .filter(|h| h.len() >= 3)
            .collect();

        (contour, holes)
    }
}

/// Centered rounded rectangle outline, counter-clockwise from the top edge.
#[must_use]
pub fn rounded_rect_path(width: f32, height: f32, radius: f32) -> Path {
    let (w, h) = (width / 2.0, height / 2.0);
    let r = radius.min(w).min(h).max(0.0);
    let mut p = Path::new();
    p.move_to(-w + r, h)
        .line_to(w - r, h)
        .quadratic_curve_to(w, h, w, h - r)
        .line_to(w, -h + r)
        .quadratic_curve_to(w, -h, w - r, -h)
        .line_to(-w + r, -h)
        .quadratic_curve_to(-w, -h, -w, -h + r)
        .line_to(-w, h - r)
        .quadratic_curve_to(-w, h, -w + r, h);
    p
}

/// Centered axis-aligned rectangle outline.
#[must_use]
pub fn rect_path(width: f32, height: f32) -> Path {
    let (w, h) = (width / 2.0, height / 2.0);
    let mut p = Path::new();
    p.move_to(-w, -h)
        .line_to(w, -h)
        .line_to(w, h)
        .line_to(-w, h)
        .line_to(-w, -h);
    p
}

fn remove_closing_duplicate(points: &mut Vec<Vec2>) {
    while points.len() > 2 {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            break;
        };
        if first.distance_squared(*last) < 1e-12 {
            points.pop();
        } else {
            break;
        }
    }
}

/// Twice the signed area (shoelace); positive for counter-clockwise.
#[must_use]
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

#[must_use]
pub fn is_clockwise(points: &[Vec2]) -> bool {
    signed_area(points) < 0.0
}

// ============================================================================
// Triangulation
// ============================================================================

/// Triangulates a counter-clockwise outline with clockwise holes.
///
/// Indices refer to the concatenation `contour ++ holes[0] ++ holes[1] ...`
/// and produce counter-clockwise triangles.
#[must_use]
pub fn triangulate(contour: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<u32> {
    if contour.len() < 3 {
        return Vec::new();
    }

    let mut all: Vec<Vec2> = contour.to_vec();
    let mut ring: Vec<usize> = (0..contour.len()).collect();

    // bridge holes right-most first so later bridges can't cross earlier ones
    let mut hole_ranges: Vec<(usize, usize)> = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = all.len();
        all.extend_from_slice(hole);
        hole_ranges.push((start, hole.len()));
    }
    hole_ranges.sort_by(|a, b| {
        let max_a = all[a.0..a.0 + a.1].iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let max_b = all[b.0..b.0 + b.1].iter().map(|p| p.x).fold(f32::MIN, f32::max);
        max_b.total_cmp(&max_a)
    });

    for (start, len) in hole_ranges {
        ring = bridge_hole(&all, &ring, start, len);
    }

    ear_clip(&all, ring)
}

fn bridge_hole(all: &[Vec2], ring: &[usize], start: usize, len: usize) -> Vec<usize> {
    // right-most hole vertex
    let hole_idx = (start..start + len)
        .max_by(|&a, &b| all[a].x.total_cmp(&all[b].x))
        .unwrap_or(start);
    let hp = all[hole_idx];

    // nearest ring vertex whose bridge does not cross any ring edge
    let mut best: Option<(usize, f32)> = None;
    for (ri, &vi) in ring.iter().enumerate() {
        let vp = all[vi];
        let d = vp.distance_squared(hp);
        if best.is_some_and(|(_, bd)| d >= bd) {
            continue;
        }
        let crosses = ring.iter().enumerate().any(|(ei, &ea)| {
            let eb = ring[(ei + 1) % ring.len()];
            if ea == vi || eb == vi {
                return false;
            }
            segments_intersect(hp, vp, all[ea], all[eb])
        });
        if !crosses {
            best = Some((ri, d));
        }
    }
    let bridge_at = best.map_or(0, |(ri, _)| ri);

    let mut out = Vec::with_capacity(ring.len() + len + 2);
    out.extend_from_slice(&ring[..=bridge_at]);
    let offset = hole_idx - start;
    for k in 0..=len {
        out.push(start + (offset + k) % len);
    }
    out.push(ring[bridge_at]);
    out.extend_from_slice(&ring[bridge_at + 1..]);
    out
}

fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = (p2 - p1).perp_dot(q1 - p1);
    let d2 = (p2 - p1).perp_dot(q2 - p1);
    let d3 = (q2 - q1).perp_dot(p1 - q1);
    let d4 = (q2 - q1).perp_dot(p2 - q1);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

fn ear_clip(all: &[Vec2], mut ring: Vec<usize>) -> Vec<u32> {
    let mut indices = Vec::with_capacity((ring.len().saturating_sub(2)) * 3);

    let mut guard = ring.len() * ring.len() + 8;
    let mut i = 0;
    while ring.len() > 3 && guard > 0 {
        guard -= 1;
        let n = ring.len();
        let (ia, ib, ic) = (ring[(i + n - 1) % n], ring[i % n], ring[(i + 1) % n]);
        let (a, b, c) = (all[ia], all[ib], all[ic]);

        let convex = (b - a).perp_dot(c - b) > 1e-12;
        let is_ear = convex
            && !ring.iter().any(|&vi| {
                if vi == ia || vi == ib || vi == ic {
                    return false;
                }
                let p = all[vi];
                // bridge duplicates share a position with a corner
                if p == a || p == b || p == c {
                    return false;
                }
                point_in_triangle(p, a, b, c)
            });

        if is_ear {
            indices.extend_from_slice(&[ia as u32, ib as u32, ic as u32]);
            ring.remove(i % n);
            i = i.saturating_sub(1);
        } else {
            i = (i + 1) % n;
        }
    }

    // degenerate leftovers: fan the remainder
    if ring.len() > 3 {
        for k in 1..ring.len() - 1 {
            indices.extend_from_slice(&[ring[0] as u32, ring[k] as u32, ring[k + 1] as u32]);
        }
    } else if ring.len() == 3 {
        indices.extend_from_slice(&[ring[0] as u32, ring[1] as u32, ring[2] as u32]);
    }

    indices
}
