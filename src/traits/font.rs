use glam::IVec2;

/// Host font: text measurement plus glyph coverage
pub trait Font {
    /// Pixel size of a single line of `text`.
    ///
    /// The slice length is authoritative; NUL bytes are ordinary glyphs.
    fn measure_text(&self, text: &[u8]) -> IVec2;

    /// Call `plot(x, y)` for every covered pixel, relative to the text origin
    fn rasterize(&self, text: &[u8], plot: &mut dyn FnMut(i32, i32));
}
