use glam::Vec2;

/// Point on a cubic Bezier using the Bernstein basis
pub fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let w1 = u * u * u;
    let w2 = 3.0 * u * u * t;
    let w3 = 3.0 * u * t * t;
    let w4 = t * t * t;
    p0 * w1 + p1 * w2 + p2 * w3 + p3 * w4
}

/// Flatten a cubic curve into `segments + 1` points.
///
/// The first point is `p0`; the rest are samples at `t = i / segments` for
/// `i` in `1..=segments`, so the last point is exactly `p3`. The segment
/// count is fixed rather than adaptive to curve length. A count of zero is
/// treated as one.
pub fn flatten_cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    let step = 1.0 / segments as f32;

    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(p0);
    for i in 1..=segments {
        let t = i as f32 * step;
        points.push(cubic_point(p0, p1, p2, p3, t));
    }
    points
}
