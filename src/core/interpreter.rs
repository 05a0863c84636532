//! Command interpreter: drains a context's command list onto a [`Raster`].

use std::ops::{Deref, DerefMut};

use glam::{IVec2, Vec2};

use crate::config::InterpreterConfig;
use crate::core::command::Command;
use crate::core::context::Context;
use crate::math::{
    color_from_gui, fill_spans, flatten_cubic, rect_from_gui, vector_from_gui, Color, GuiRect,
    IRect, MAX_POLYGON_POINTS,
};
use crate::traits::Raster;

/// Resets the surface clip when dropped, whichever way the frame exits
struct ClipGuard<'a> {
    surface: &'a mut dyn Raster,
}

impl<'a> ClipGuard<'a> {
    fn new(surface: &'a mut dyn Raster) -> Self {
        surface.set_clip(None);
        Self { surface }
    }
}

impl<'a> Deref for ClipGuard<'a> {
    type Target = dyn Raster + 'a;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<'a> DerefMut for ClipGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl Drop for ClipGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_clip(None);
    }
}

enum Conic {
    Circle { center: IVec2, radius: i32 },
    Ellipse { center: IVec2, radius_x: i32, radius_y: i32 },
}

/// Rasterizes command lists with a fixed quality configuration
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Draw every pending command in order, then reopen the context for input
    pub fn render<R: Raster>(&self, surface: &mut R, context: &mut Context) {
        context.begin_render();
        log::trace!("rendering {} commands", context.commands().len());

        {
            let mut target = ClipGuard::new(surface);
            for command in context.commands() {
                self.draw(&mut *target, command);
            }
        }

        context.end_render();
    }

    fn draw(&self, surface: &mut dyn Raster, command: &Command) {
        match command {
            Command::Nop => {}
            Command::Scissor { rect } => surface.set_clip(Some(rect_from_gui(*rect))),
            Command::Line {
                begin,
                end,
                thickness,
                color,
            } => {
                let color = color_from_gui(*color);
                draw_thick_line(surface, *begin, *end, *thickness, color);
            }
            Command::Curve {
                begin,
                ctrl,
                end,
                color,
                ..
            } => {
                // thickness is not applied to curves
                let color = color_from_gui(*color);
                let points = flatten_cubic(*begin, ctrl[0], ctrl[1], *end, self.config.curve_segments);
                for pair in points.windows(2) {
                    surface.draw_line(vector_from_gui(pair[0]), vector_from_gui(pair[1]), color);
                }
            }
            Command::Rect {
                rect,
                rounding,
                thickness,
                color,
            } => {
                let (rect, color) = (rect_from_gui(*rect), color_from_gui(*color));
                let thickness = *thickness as i32;
                let radius = *rounding as i32;
                if radius > 0 {
                    surface.draw_rectangle_rounded(rect, radius, thickness, color);
                } else {
                    surface.draw_rectangle(rect, thickness, color);
                }
            }
            Command::RectFilled {
                rect,
                rounding,
                color,
            } => {
                let (rect, color) = (rect_from_gui(*rect), color_from_gui(*color));
                let radius = *rounding as i32;
                if radius > 0 {
                    surface.draw_rectangle_rounded_fill(rect, radius, color);
                } else {
                    surface.draw_rectangle_fill(rect, color);
                }
            }
            Command::RectMultiColor {
                rect,
                left,
                top,
                bottom,
                right,
            } => surface.draw_rectangle_gradient(
                rect_from_gui(*rect),
                color_from_gui(*left),
                color_from_gui(*top),
                color_from_gui(*bottom),
                color_from_gui(*right),
            ),
            Command::Circle { rect, color, .. } => {
                let color = color_from_gui(*color);
                match self.conic(*rect) {
                    Conic::Circle { center, radius } => surface.draw_circle(center, radius, color),
                    Conic::Ellipse {
                        center,
                        radius_x,
                        radius_y,
                    } => surface.draw_ellipse(center, radius_x, radius_y, color),
                }
            }
            Command::CircleFilled { rect, color } => {
                let color = color_from_gui(*color);
                match self.conic(*rect) {
                    Conic::Circle { center, radius } => {
                        surface.draw_circle_fill(center, radius, color)
                    }
                    Conic::Ellipse {
                        center,
                        radius_x,
                        radius_y,
                    } => surface.draw_ellipse_fill(center, radius_x, radius_y, color),
                }
            }
            Command::Arc {
                center,
                radius,
                angles,
                color,
                ..
            } => surface.draw_arc(
                vector_from_gui(*center),
                *radius,
                angles[0].to_degrees(),
                angles[1].to_degrees(),
                self.config.arc_segments(*radius),
                color_from_gui(*color),
            ),
            Command::ArcFilled {
                center,
                radius,
                angles,
                color,
            } => surface.draw_arc_fill(
                vector_from_gui(*center),
                *radius,
                angles[0].to_degrees(),
                angles[1].to_degrees(),
                self.config.arc_segments(*radius),
                color_from_gui(*color),
            ),
            Command::Triangle { a, b, c, color, .. } => surface.draw_triangle(
                vector_from_gui(*a),
                vector_from_gui(*b),
                vector_from_gui(*c),
                color_from_gui(*color),
            ),
            Command::TriangleFilled { a, b, c, color } => surface.draw_triangle_fill(
                vector_from_gui(*a),
                vector_from_gui(*b),
                vector_from_gui(*c),
                color_from_gui(*color),
            ),
            Command::Polygon { points, color, .. } => {
                let (points, color) = (to_pixels(points), color_from_gui(*color));
                stroke_path(surface, &points, color);
                if points.len() > 2 {
                    surface.draw_line(points[points.len() - 1], points[0], color);
                }
            }
            Command::PolygonFilled { points, color } => {
                if points.len() > MAX_POLYGON_POINTS {
                    log::debug!(
                        "polygon with {} points truncated to {MAX_POLYGON_POINTS}",
                        points.len()
                    );
                }
                let Some(window) = visible_area(surface) else {
                    return;
                };
                let color = color_from_gui(*color);
                fill_spans(&to_pixels(points), window, |x0, x1, y| {
                    surface.draw_hline(x0, y, x1 - x0, color)
                });
            }
            Command::Polyline { points, color, .. } => {
                stroke_path(surface, &to_pixels(points), color_from_gui(*color));
            }
            Command::Text {
                font,
                rect,
                foreground,
                text,
                ..
            } => {
                let Some(font) = font.upgrade() else {
                    log::warn!("skipping text command, font was dropped");
                    return;
                };
                let origin = vector_from_gui(Vec2::new(rect.x, rect.y));
                surface.draw_text(font.as_ref(), text, origin, color_from_gui(*foreground));
            }
            Command::Image {
                rect,
                image,
                region,
                color,
            } => {
                let Some(image) = image.upgrade() else {
                    log::warn!("skipping image command, image was dropped");
                    return;
                };
                let [x, y, w, h] = region.map(i32::from);
                let source = if w == 0 || h == 0 {
                    image.bounds()
                } else {
                    IRect::new(x, y, w, h)
                };
                let origin = vector_from_gui(Vec2::new(rect.x, rect.y));
                surface.draw_image(&image, source, origin, color_from_gui(*color));
            }
            Command::Custom {
                rect,
                callback,
                payload,
            } => callback.call(rect_from_gui(*rect), payload.as_ref()),
            Command::Unknown { tag } => {
                log::warn!("skipping unsupported command tag {tag}");
            }
        }
    }

    /// Circle when the box is square (exact compare), ellipse otherwise
    fn conic(&self, rect: GuiRect) -> Conic {
        let center = IVec2::new(
            (rect.x + rect.w / 2.0) as i32,
            (rect.y + rect.h / 2.0) as i32,
        );
        let bias = self.config.circle_radius_bias;
        let radius_x = ((rect.w / 2.0) as i32).saturating_add(bias);

        if rect.w == rect.h {
            Conic::Circle {
                center,
                radius: radius_x,
            }
        } else {
            Conic::Ellipse {
                center,
                radius_x,
                radius_y: ((rect.h / 2.0) as i32).saturating_add(bias),
            }
        }
    }
}

fn to_pixels(points: &[Vec2]) -> Vec<IVec2> {
    points.iter().copied().map(vector_from_gui).collect()
}

/// Connect consecutive points without closing the path
fn stroke_path(surface: &mut dyn Raster, points: &[IVec2], color: Color) {
    for pair in points.windows(2) {
        surface.draw_line(pair[0], pair[1], color);
    }
}

/// Surface bounds narrowed by the current clip
fn visible_area(surface: &dyn Raster) -> Option<IRect> {
    let bounds = IRect::new(0, 0, surface.width(), surface.height());
    match surface.clip() {
        Some(clip) => bounds.intersect(&clip),
        None => (!bounds.is_empty()).then_some(bounds),
    }
}

fn offset_by(point: IVec2, shift: IVec2) -> IVec2 {
    IVec2::new(
        point.x.saturating_add(shift.x),
        point.y.saturating_add(shift.y),
    )
}

/// Lines wider than one pixel become parallel strokes offset along the normal.
///
/// Strokes offset further than the surface extent cannot reach it, so the
/// count is capped there.
fn draw_thick_line(surface: &mut dyn Raster, begin: Vec2, end: Vec2, thickness: f32, color: Color) {
    let (start, finish) = (vector_from_gui(begin), vector_from_gui(end));
    let limit = surface
        .width()
        .max(0)
        .saturating_add(surface.height().max(0))
        .saturating_mul(2)
        .max(1);
    let width = (thickness as i32).clamp(1, limit);
    let direction = (end - begin).normalize_or_zero();
    if width == 1 || direction == Vec2::ZERO {
        surface.draw_line(start, finish, color);
        return;
    }

    let normal = direction.perp();
    let first = -(width - 1) as f32 / 2.0;
    for i in 0..width {
        let offset = normal * (first + i as f32);
        let shift = IVec2::new(offset.x.round() as i32, offset.y.round() as i32);
        surface.draw_line(offset_by(start, shift), offset_by(finish, shift), color);
    }
}

/// Render with the default configuration; no-op when either argument is missing
pub fn render<R: Raster>(surface: Option<&mut R>, context: Option<&mut Context>) {
    if let (Some(surface), Some(context)) = (surface, context) {
        Interpreter::default().render(surface, context);
    }
}
