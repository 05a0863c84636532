//! Even-odd scan-line polygon fill.
//!
//! Every pixel row in the polygon's vertical extent is sampled at its centre
//! (`row + 0.5`). An edge crosses the row when exactly one endpoint lies above
//! the sample and the other lies on or below it; the crossing x comes from
//! linear interpolation along the edge. Crossings are sorted and the pixels
//! between each pair (0-1, 2-3, ...) are filled, half-open on the right and
//! clamped to the polygon's horizontal extent.
//!
//! Only rows and columns inside the caller's window are visited, so the cost
//! follows the target surface rather than the polygon's coordinates.

use glam::IVec2;

use super::rect::IRect;

/// Largest vertex count the fill accepts; longer polygons are truncated.
pub const MAX_POLYGON_POINTS: usize = 64;

/// Edge crossings of the scan line at `sample_y`, sorted ascending.
///
/// Writes into `out` and returns how many entries are valid. A polygon has at
/// most one crossing per edge, so `out` never overflows for polygons of at
/// most [`MAX_POLYGON_POINTS`] vertices; extra vertices are ignored.
pub fn row_crossings(points: &[IVec2], sample_y: f32, out: &mut [f32; MAX_POLYGON_POINTS]) -> usize {
    let points = &points[..points.len().min(MAX_POLYGON_POINTS)];
    if points.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i].as_vec2(), points[j].as_vec2());
        if (pi.y < sample_y && pj.y >= sample_y) || (pj.y < sample_y && pi.y >= sample_y) {
            out[count] = pi.x + (sample_y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
            count += 1;
        }
        j = i;
    }

    out[..count].sort_unstable_by(f32::total_cmp);
    count
}

/// Walk the filled spans of a polygon that fall inside `window`.
///
/// `span(x_start, x_end, y)` is called once per filled run with `x_end`
/// exclusive. Polygons with fewer than three points produce nothing.
pub fn fill_spans(points: &[IVec2], window: IRect, mut span: impl FnMut(i32, i32, i32)) {
    if points.len() < 3 || window.is_empty() {
        return;
    }
    let points = &points[..points.len().min(MAX_POLYGON_POINTS)];

    let (mut min, mut max) = (points[0], points[0]);
    for p in &points[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }

    let left = min.x.max(window.x);
    let right = max.x.min(window.right());
    let top = min.y.max(window.y);
    let bottom = max.y.min(window.bottom() - 1);

    let mut crossings = [0.0f32; MAX_POLYGON_POINTS];
    for row in top..=bottom {
        let count = row_crossings(points, row as f32 + 0.5, &mut crossings);

        for pair in crossings[..count].chunks_exact(2) {
            let start = (pair[0] as i32).max(left);
            let end = (pair[1] as i32).min(right);
            if end > start {
                span(start, end, row);
            }
        }
    }
}
