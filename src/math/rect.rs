use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Integer pixel rectangle on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturating at the `i32` range
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at the `i32` range
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping area, `None` when the rectangles do not overlap
    pub fn intersect(&self, other: &IRect) -> Option<IRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(IRect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

/// Toolkit rectangle with float coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuiRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl GuiRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

pub fn rect_to_gui(rect: IRect) -> GuiRect {
    GuiRect::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

/// Truncates toward zero, matching how every command is rasterized
pub fn rect_from_gui(rect: GuiRect) -> IRect {
    IRect::new(rect.x as i32, rect.y as i32, rect.w as i32, rect.h as i32)
}

pub fn vector_from_gui(vector: Vec2) -> IVec2 {
    IVec2::new(vector.x as i32, vector.y as i32)
}

pub fn vector_to_gui(vector: IVec2) -> Vec2 {
    Vec2::new(vector.x as f32, vector.y as f32)
}

impl From<IRect> for GuiRect {
    fn from(rect: IRect) -> Self {
        rect_to_gui(rect)
    }
}

impl From<GuiRect> for IRect {
    fn from(rect: GuiRect) -> Self {
        rect_from_gui(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_to_gui() {
        let gui = rect_to_gui(IRect::new(1, 2, 30, 40));
        assert_eq!(gui, GuiRect::new(1.0, 2.0, 30.0, 40.0));
    }

    #[test]
    fn test_rect_from_gui_truncates() {
        let rect = rect_from_gui(GuiRect::new(1.9, 2.5, 30.99, 40.01));
        assert_eq!(rect, IRect::new(1, 2, 30, 40));
    }

    #[test]
    fn test_vector_from_gui_truncates_toward_zero() {
        assert_eq!(vector_from_gui(Vec2::new(3.7, -3.7)), IVec2::new(3, -3));
        assert_eq!(vector_to_gui(IVec2::new(5, -2)), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = IRect::new(0, 0, 100, 100);
        let b = IRect::new(10, 10, 20, 20);
        assert_eq!(a.intersect(&b), Some(b));
        assert_eq!(b.intersect(&a), Some(b));
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = IRect::new(0, 0, 10, 10);
        let b = IRect::new(10, 0, 10, 10);
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = IRect::new(10, 10, 20, 20);
        assert!(r.contains(10, 10));
        assert!(r.contains(29, 29));
        assert!(!r.contains(30, 29));
        assert!(!r.contains(9, 10));
    }

    #[test]
    fn test_edges_saturate_for_huge_rects() {
        let r = rect_from_gui(GuiRect::new(3e9, 0.0, 3e9, 10.0));
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(IRect::new(i32::MIN, 0, -5, 1).right(), i32::MIN);

        let wide = IRect::new(-2_000_000_000, 0, i32::MAX, 10);
        let screen = IRect::new(0, 0, 32, 32);
        assert_eq!(wide.intersect(&screen), Some(IRect::new(0, 0, 32, 10)));

        let span = IRect::new(-2_000_000_000, 0, i32::MAX, 1)
            .intersect(&IRect::new(0, 0, i32::MAX, 1));
        assert_eq!(span, Some(IRect::new(0, 0, 147_483_647, 1)));
    }
}
