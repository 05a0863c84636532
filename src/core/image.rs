use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Context as _;
use glam::{DVec2, IVec2, Vec2};

use crate::math::{Color, IRect};
use crate::traits::{Font, Raster};

/// Software RGBA8 pixel surface
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: Vec<Color>,
    width: i32,
    height: i32,
    /// Active clip rectangle, `None` = whole surface
    clip: Option<IRect>,
}

impl Image {
    /// Create a transparent image; negative dimensions are treated as zero
    pub fn new(width: i32, height: i32) -> Self {
        Self::new_color(width, height, Color::BLANK)
    }

    pub fn new_color(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
            clip: None,
        }
    }

    /// Wrap an existing buffer, `None` if the length does not match
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
            clip: None,
        })
    }

    pub fn bounds(&self) -> IRect {
        IRect::new(0, 0, self.width, self.height)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Overwrite every pixel, ignoring the clip
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Copy of the area `rect` covers; parts outside the image are dropped
    pub fn subimage(&self, rect: IRect) -> Image {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return Image::new(0, 0);
        };

        let mut pixels = Vec::with_capacity((area.width * area.height) as usize);
        for y in area.y..area.bottom() {
            let row = (y * self.width) as usize;
            pixels.extend_from_slice(&self.pixels[row + area.x as usize..row + area.right() as usize]);
        }

        Image {
            pixels,
            width: area.width,
            height: area.height,
            clip: None,
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        ::image::save_buffer(
            path,
            self.as_bytes(),
            self.width as u32,
            self.height as u32,
            ::image::ColorType::Rgba8,
        )
        .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Area writes may touch: surface bounds narrowed by the clip
    fn writable(&self) -> Option<IRect> {
        match self.clip {
            Some(clip) => clip.intersect(&self.bounds()),
            None => Some(self.bounds()).filter(|r| !r.is_empty()),
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 {
            return;
        }
        let Some(area) = self.writable() else {
            return;
        };
        if !area.contains(x, y) {
            return;
        }
        let idx = (y * self.width + x) as usize;
        self.pixels[idx] = self.pixels[idx].blend(color);
    }

    fn fill_rect(&mut self, rect: IRect, color: Color) {
        if color.a == 0 {
            return;
        }
        let Some(area) = self.writable().and_then(|w| w.intersect(&rect)) else {
            return;
        };
        for y in area.y..area.bottom() {
            let row = (y * self.width) as usize;
            for px in &mut self.pixels[row + area.x as usize..row + area.right() as usize] {
                *px = px.blend(color);
            }
        }
    }

    /// Fill the half-open run `[x0, x1)` of row `y`, given in wide coordinates
    fn fill_span(&mut self, x0: i64, x1: i64, y: i64, color: Color) {
        let Some(area) = self.writable() else {
            return;
        };
        if y < area.y as i64 || y >= area.bottom() as i64 {
            return;
        }
        let start = x0.max(area.x as i64);
        let end = x1.min(area.right() as i64);
        if end > start {
            self.fill_rect(IRect::new(start as i32, y as i32, (end - start) as i32, 1), color);
        }
    }

    /// Offsets in `first..=last` whose row `origin + offset` is writable
    fn visible_offsets(&self, origin: i32, first: i64, last: i64) -> Option<RangeInclusive<i64>> {
        let area = self.writable()?;
        let origin = origin as i64;
        let lo = first.max(area.y as i64 - origin);
        let hi = last.min(area.bottom() as i64 - 1 - origin);
        (lo <= hi).then_some(lo..=hi)
    }

    /// Outline of a conic too large for the midpoint walk, traced per row and
    /// per column of `area` so the cost follows the surface size
    fn trace_conic(&mut self, area: IRect, center: IVec2, radius_x: i32, radius_y: i32, color: Color) {
        let c = center.as_dvec2();
        let (rx, ry) = (radius_x as f64, radius_y as f64);

        for y in area.y..area.bottom() {
            let d = (y as f64 - c.y) / ry;
            if d.abs() <= 1.0 {
                let half = rx * (1.0 - d * d).sqrt();
                self.blend_pixel((c.x - half).round() as i32, y, color);
                self.blend_pixel((c.x + half).round() as i32, y, color);
            }
        }
        for x in area.x..area.right() {
            let d = (x as f64 - c.x) / rx;
            if d.abs() <= 1.0 {
                let half = ry * (1.0 - d * d).sqrt();
                self.blend_pixel(x, (c.y - half).round() as i32, color);
                self.blend_pixel(x, (c.y + half).round() as i32, color);
            }
        }
    }

    /// Plot the four symmetric points of an axis-aligned conic
    fn plot_quadrants(&mut self, center: IVec2, x: i32, y: i32, color: Color) {
        self.blend_pixel(center.x + x, center.y + y, color);
        if x != 0 {
            self.blend_pixel(center.x - x, center.y + y, color);
        }
        if y != 0 {
            self.blend_pixel(center.x + x, center.y - y, color);
            if x != 0 {
                self.blend_pixel(center.x - x, center.y - y, color);
            }
        }
    }

    fn arc_points(center: IVec2, radius: f32, start: f32, end: f32, segments: u32) -> Vec<IVec2> {
        let segments = segments.max(1);
        let step = (end - start) / segments as f32;
        let origin = center.as_vec2();
        (0..=segments)
            .map(|i| {
                let angle = (start + step * i as f32).to_radians();
                let p = origin + Vec2::new(angle.cos(), angle.sin()) * radius;
                IVec2::new(p.x.round() as i32, p.y.round() as i32)
            })
            .collect()
    }
}

/// Whether the bounding box of a conic overlaps `area`
fn conic_touches(area: IRect, center: IVec2, radius_x: i32, radius_y: i32) -> bool {
    let (cx, cy) = (center.x as i64, center.y as i64);
    let (rx, ry) = (radius_x as i64, radius_y as i64);
    cx + rx >= area.x as i64
        && cx - rx < area.right() as i64
        && cy + ry >= area.y as i64
        && cy - ry < area.bottom() as i64
}

/// Radius beyond which conic outlines are traced over the surface instead
fn walk_limit(area: IRect) -> i64 {
    area.width as i64 + area.height as i64
}

/// Liang-Barsky clip of a segment to the pixel rectangle `area`.
///
/// Endpoints already inside are kept exactly; clipped ones are rounded onto
/// the boundary.
fn clip_segment(start: IVec2, end: IVec2, area: IRect) -> Option<(IVec2, IVec2)> {
    if area.contains(start.x, start.y) && area.contains(end.x, end.y) {
        return Some((start, end));
    }

    let origin = start.as_dvec2();
    let delta = end.as_dvec2() - origin;
    let low = DVec2::new(area.x as f64, area.y as f64);
    let high = DVec2::new((area.right() - 1) as f64, (area.bottom() - 1) as f64);

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-delta.x, origin.x - low.x),
        (delta.x, high.x - origin.x),
        (-delta.y, origin.y - low.y),
        (delta.y, high.y - origin.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }

    let at = |t: f64| {
        let p = (origin + delta * t).round().clamp(low, high);
        IVec2::new(p.x as i32, p.y as i32)
    };
    Some((at(t0), at(t1)))
}

/// Horizontal inset of a rounded corner at `row` (0-based) of a shape `height` tall
fn corner_inset(row: i32, height: i32, radius: i32) -> i32 {
    let from_edge = if row < radius {
        radius - row
    } else if row >= height - radius {
        row - (height - radius) + 1
    } else {
        return 0;
    };
    let d = from_edge as f32 - 0.5;
    let r = radius as f32;
    (r - (r * r - d * d).max(0.0).sqrt()).round() as i32
}

impl Raster for Image {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_clip(&mut self, clip: Option<IRect>) {
        self.clip = clip;
    }

    fn clip(&self) -> Option<IRect> {
        self.clip
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.blend_pixel(x, y, color);
    }

    /// Bresenham over the part of the segment inside the writable area
    fn draw_line(&mut self, start: IVec2, end: IVec2, color: Color) {
        let Some((start, end)) = self
            .writable()
            .and_then(|area| clip_segment(start, end, area))
        else {
            return;
        };
        let (mut x, mut y) = (start.x, start.y);

        let dx = (end.x - x).abs();
        let dy = -(end.y - y).abs();
        let sx = if x < end.x { 1 } else { -1 };
        let sy = if y < end.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, color);

            if x == end.x && y == end.y {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        self.fill_rect(IRect::new(x, y, width, 1), color);
    }

    fn draw_rectangle(&mut self, rect: IRect, thickness: i32, color: Color) {
        if rect.is_empty() {
            return;
        }
        let t = thickness.max(1);
        if t.saturating_mul(2) >= rect.width || t.saturating_mul(2) >= rect.height {
            self.fill_rect(rect, color);
            return;
        }

        let side = rect.height - 2 * t;
        let top = rect.y.saturating_add(t);
        self.fill_rect(IRect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(IRect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        self.fill_rect(IRect::new(rect.x, top, t, side), color);
        self.fill_rect(IRect::new(rect.right() - t, top, t, side), color);
    }

    fn draw_rectangle_fill(&mut self, rect: IRect, color: Color) {
        self.fill_rect(rect, color);
    }

    fn draw_rectangle_rounded(&mut self, rect: IRect, radius: i32, thickness: i32, color: Color) {
        if rect.is_empty() {
            return;
        }
        let t = thickness.max(1);
        let radius = radius.clamp(0, rect.width.min(rect.height) / 2);
        let inner_radius = (radius - t).max(0);
        let inner_height = rect.height.saturating_sub(t.saturating_mul(2));
        let Some(rows) = self.visible_offsets(rect.y, 0, rect.height as i64 - 1) else {
            return;
        };
        let (left, right) = (rect.x as i64, rect.x as i64 + rect.width as i64);

        for row in rows {
            let y = rect.y as i64 + row;
            let row = row as i32;
            let outer = corner_inset(row, rect.height, radius) as i64;

            let inner_row = row - t;
            if inner_height <= 0 || inner_row < 0 || inner_row >= inner_height {
                self.fill_span(left + outer, right - outer, y, color);
                continue;
            }

            let inner = (t + corner_inset(inner_row, inner_height, inner_radius)) as i64;
            let edge = (inner - outer).max(0);
            self.fill_span(left + outer, left + outer + edge, y, color);
            self.fill_span(right - inner, right - inner + edge, y, color);
        }
    }

    fn draw_rectangle_rounded_fill(&mut self, rect: IRect, radius: i32, color: Color) {
        if rect.is_empty() {
            return;
        }
        let radius = radius.clamp(0, rect.width.min(rect.height) / 2);
        let Some(rows) = self.visible_offsets(rect.y, 0, rect.height as i64 - 1) else {
            return;
        };
        let (left, right) = (rect.x as i64, rect.x as i64 + rect.width as i64);
        for row in rows {
            let inset = corner_inset(row as i32, rect.height, radius) as i64;
            self.fill_span(left + inset, right - inset, rect.y as i64 + row, color);
        }
    }

    fn draw_rectangle_gradient(
        &mut self,
        rect: IRect,
        top_left: Color,
        top_right: Color,
        bottom_left: Color,
        bottom_right: Color,
    ) {
        let Some(area) = self.writable().and_then(|w| w.intersect(&rect)) else {
            return;
        };
        let span_x = (rect.width - 1).max(1) as f32;
        let span_y = (rect.height - 1).max(1) as f32;

        for y in area.y..area.bottom() {
            let v = (y as i64 - rect.y as i64) as f32 / span_y;
            for x in area.x..area.right() {
                let u = (x as i64 - rect.x as i64) as f32 / span_x;
                let top = top_left.lerp(top_right, u);
                let bottom = bottom_left.lerp(bottom_right, u);
                self.blend_pixel(x, y, top.lerp(bottom, v));
            }
        }
    }

    /// Midpoint circle
    fn draw_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let Some(area) = self.writable() else {
            return;
        };
        if !conic_touches(area, center, radius, radius) {
            return;
        }
        if radius as i64 > walk_limit(area) {
            self.trace_conic(area, center, radius, radius, color);
            return;
        }

        let (mut x, mut y) = (radius, 0);
        let mut p = 1 - radius;

        while x >= y {
            self.plot_quadrants(center, x, y, color);
            if x != y {
                self.plot_quadrants(center, y, x, color);
            }
            y += 1;

            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_circle_fill(&mut self, center: IVec2, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let r = radius as i64;
        let Some(rows) = self.visible_offsets(center.y, -r, r) else {
            return;
        };
        let (cx, cy) = (center.x as i64, center.y as i64);
        let r_sq = r * r;
        for dy in rows {
            let half = ((r_sq - dy * dy) as f64).sqrt() as i64;
            self.fill_span(cx - half, cx + half + 1, cy + dy, color);
        }
    }

    /// Midpoint ellipse, two regions split where the slope crosses -1
    fn draw_ellipse(&mut self, center: IVec2, radius_x: i32, radius_y: i32, color: Color) {
        if radius_x < 0 || radius_y < 0 {
            return;
        }
        let Some(area) = self.writable() else {
            return;
        };
        if !conic_touches(area, center, radius_x, radius_y) {
            return;
        }
        if radius_x == 0 || radius_y == 0 {
            let from = IVec2::new(center.x.saturating_sub(radius_x), center.y.saturating_sub(radius_y));
            let to = IVec2::new(center.x.saturating_add(radius_x), center.y.saturating_add(radius_y));
            self.draw_line(from, to, color);
            return;
        }
        if radius_x.max(radius_y) as i64 > walk_limit(area) {
            self.trace_conic(area, center, radius_x, radius_y, color);
            return;
        }

        let rx2 = (radius_x as f64).powi(2);
        let ry2 = (radius_y as f64).powi(2);
        let (mut x, mut y) = (0i32, radius_y);
        let mut px = 0.0;
        let mut py = 2.0 * rx2 * y as f64;

        let mut p = ry2 - rx2 * radius_y as f64 + 0.25 * rx2;
        while px < py {
            self.plot_quadrants(center, x, y, color);
            x += 1;
            px += 2.0 * ry2;
            if p < 0.0 {
                p += ry2 + px;
            } else {
                y -= 1;
                py -= 2.0 * rx2;
                p += ry2 + px - py;
            }
        }

        p = ry2 * (x as f64 + 0.5).powi(2) + rx2 * (y as f64 - 1.0).powi(2) - rx2 * ry2;
        while y >= 0 {
            self.plot_quadrants(center, x, y, color);
            y -= 1;
            py -= 2.0 * rx2;
            if p > 0.0 {
                p += rx2 - py;
            } else {
                x += 1;
                px += 2.0 * ry2;
                p += rx2 - py + px;
            }
        }
    }

    fn draw_ellipse_fill(&mut self, center: IVec2, radius_x: i32, radius_y: i32, color: Color) {
        if radius_x < 0 || radius_y < 0 {
            return;
        }
        let (cx, cy) = (center.x as i64, center.y as i64);
        if radius_y == 0 {
            let rx = radius_x as i64;
            self.fill_span(cx - rx, cx + rx + 1, cy, color);
            return;
        }
        let ry = radius_y as i64;
        let Some(rows) = self.visible_offsets(center.y, -ry, ry) else {
            return;
        };
        for dy in rows {
            let k = 1.0 - (dy as f64 / ry as f64).powi(2);
            let half = (radius_x as f64 * k.max(0.0).sqrt()) as i64;
            self.fill_span(cx - half, cx + half + 1, cy + dy, color);
        }
    }

    fn draw_triangle(&mut self, a: IVec2, b: IVec2, c: IVec2, color: Color) {
        self.draw_line(a, b, color);
        self.draw_line(b, c, color);
        self.draw_line(c, a, color);
    }

    /// Pixel-centre coverage test over the bounding box, either winding
    fn draw_triangle_fill(&mut self, a: IVec2, b: IVec2, c: IVec2, color: Color) {
        let edge =
            |p: DVec2, q: DVec2, s: DVec2| (q.x - p.x) * (s.y - p.y) - (q.y - p.y) * (s.x - p.x);
        let (fa, fb, fc) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2());
        let area = edge(fa, fb, fc);
        if area == 0.0 {
            self.draw_line(a, b, color);
            self.draw_line(b, c, color);
            return;
        }

        let Some(writable) = self.writable() else {
            return;
        };
        let min = a.min(b).min(c).max(IVec2::new(writable.x, writable.y));
        let max = a
            .max(b)
            .max(c)
            .min(IVec2::new(writable.right() - 1, writable.bottom() - 1));

        let sign = area.signum();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let s = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let inside = edge(fa, fb, s) * sign >= 0.0
                    && edge(fb, fc, s) * sign >= 0.0
                    && edge(fc, fa, s) * sign >= 0.0;
                if inside {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_arc(
        &mut self,
        center: IVec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: Color,
    ) {
        let points = Self::arc_points(center, radius, start_angle, end_angle, segments);
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
    }

    fn draw_arc_fill(
        &mut self,
        center: IVec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: Color,
    ) {
        let points = Self::arc_points(center, radius, start_angle, end_angle, segments);
        for pair in points.windows(2) {
            self.draw_triangle_fill(center, pair[0], pair[1], color);
        }
    }

    fn draw_text(&mut self, font: &dyn Font, text: &[u8], position: IVec2, color: Color) {
        font.rasterize(text, &mut |x, y| {
            self.blend_pixel(position.x.saturating_add(x), position.y.saturating_add(y), color)
        });
    }

    fn draw_image(&mut self, image: &Image, source_rect: IRect, position: IVec2, tint: Color) {
        let Some(source) = source_rect.intersect(&image.bounds()) else {
            return;
        };
        let dx = position.x as i64 - source_rect.x as i64;
        let dy = position.y as i64 - source_rect.y as i64;
        for y in source.y..source.bottom() {
            let Ok(target_y) = i32::try_from(y as i64 + dy) else {
                continue;
            };
            for x in source.x..source.right() {
                let Ok(target_x) = i32::try_from(x as i64 + dx) else {
                    continue;
                };
                let src = image.pixels[(y * image.width + x) as usize];
                self.blend_pixel(target_x, target_y, src.tint(tint));
            }
        }
    }
}
