use glam::IVec2;

use crate::core::Image;
use crate::math::{Color, IRect};

use super::font::Font;

/// Raster primitive library the command interpreter draws through.
///
/// Coordinates are integer pixels. Every primitive honours the active clip
/// rectangle and silently discards writes outside the surface.
pub trait Raster {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Restrict drawing to `clip`; `None` restores the full surface
    fn set_clip(&mut self, clip: Option<IRect>);

    fn clip(&self) -> Option<IRect>;

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color);

    /// One pixel wide line, both endpoints inclusive
    fn draw_line(&mut self, start: IVec2, end: IVec2, color: Color);

    /// Horizontal run of `width` pixels starting at `x`
    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: Color);

    fn draw_rectangle(&mut self, rect: IRect, thickness: i32, color: Color);

    fn draw_rectangle_fill(&mut self, rect: IRect, color: Color);

    fn draw_rectangle_rounded(&mut self, rect: IRect, radius: i32, thickness: i32, color: Color);

    fn draw_rectangle_rounded_fill(&mut self, rect: IRect, radius: i32, color: Color);

    /// Fill with a bilinear blend of the four corner colors
    fn draw_rectangle_gradient(
        &mut self,
        rect: IRect,
        top_left: Color,
        top_right: Color,
        bottom_left: Color,
        bottom_right: Color,
    );

    fn draw_circle(&mut self, center: IVec2, radius: i32, color: Color);

    fn draw_circle_fill(&mut self, center: IVec2, radius: i32, color: Color);

    fn draw_ellipse(&mut self, center: IVec2, radius_x: i32, radius_y: i32, color: Color);

    fn draw_ellipse_fill(&mut self, center: IVec2, radius_x: i32, radius_y: i32, color: Color);

    fn draw_triangle(&mut self, a: IVec2, b: IVec2, c: IVec2, color: Color);

    fn draw_triangle_fill(&mut self, a: IVec2, b: IVec2, c: IVec2, color: Color);

    /// Arc outline between two angles in degrees, approximated by `segments` lines
    fn draw_arc(
        &mut self,
        center: IVec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: Color,
    );

    /// Pie slice between two angles in degrees
    fn draw_arc_fill(
        &mut self,
        center: IVec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: Color,
    );

    /// Single line of text; `text` is drawn byte for byte with no terminator scan
    fn draw_text(&mut self, font: &dyn Font, text: &[u8], position: IVec2, color: Color);

    /// Copy `source_rect` of `image` to `position`, multiplied by `tint`
    fn draw_image(&mut self, image: &Image, source_rect: IRect, position: IVec2, tint: Color);
}
