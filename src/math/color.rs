use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA8 color as stored in an [`Image`](crate::core::Image)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLANK: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RAYWHITE: Color = Color::new(245, 245, 245, 255);
    pub const RED: Color = Color::new(230, 41, 55, 255);
    pub const GREEN: Color = Color::new(0, 228, 48, 255);
    pub const BLUE: Color = Color::new(0, 121, 241, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from a packed 0xRRGGBBAA value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 24) as u8,
            g: (hex >> 16) as u8,
            b: (hex >> 8) as u8,
            a: hex as u8,
        }
    }

    /// Composite `src` over `self` (straight alpha)
    pub fn blend(self, src: Color) -> Color {
        match src.a {
            255 => src,
            0 => self,
            _ => {
                let sa = src.a as u32;
                let da = self.a as u32 * (255 - sa) / 255;
                let out_a = sa + da;
                if out_a == 0 {
                    return Color::BLANK;
                }
                let channel = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
                Color {
                    r: channel(src.r, self.r),
                    g: channel(src.g, self.g),
                    b: channel(src.b, self.b),
                    a: out_a as u8,
                }
            }
        }
    }

    /// Multiply each channel by the matching tint channel
    pub fn tint(self, tint: Color) -> Color {
        let mul = |c: u8, t: u8| ((c as u32 * t as u32 + 127) / 255) as u8;
        Color {
            r: mul(self.r, tint.r),
            g: mul(self.g, tint.g),
            b: mul(self.b, tint.b),
            a: mul(self.a, tint.a),
        }
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Toolkit color with 0-255 integer channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GuiColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl GuiColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Toolkit color with 0.0-1.0 float channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuiColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GuiColorF {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

fn channel_from_float(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn channel_to_float(value: u8) -> f32 {
    value as f32 / 255.0
}

pub fn color_from_gui(color: GuiColor) -> Color {
    Color::new(color.r, color.g, color.b, color.a)
}

pub fn color_to_gui(color: Color) -> GuiColor {
    GuiColor::rgba(color.r, color.g, color.b, color.a)
}

/// Float channels convert with `round(v * 255)`, clamped to the byte range
pub fn color_from_gui_f(color: GuiColorF) -> Color {
    Color::new(
        channel_from_float(color.r),
        channel_from_float(color.g),
        channel_from_float(color.b),
        channel_from_float(color.a),
    )
}

pub fn color_to_gui_f(color: Color) -> GuiColorF {
    GuiColorF::new(
        channel_to_float(color.r),
        channel_to_float(color.g),
        channel_to_float(color.b),
        channel_to_float(color.a),
    )
}

impl From<GuiColor> for Color {
    fn from(color: GuiColor) -> Self {
        color_from_gui(color)
    }
}

impl From<Color> for GuiColor {
    fn from(color: Color) -> Self {
        color_to_gui(color)
    }
}

impl From<GuiColorF> for Color {
    fn from(color: GuiColorF) -> Self {
        color_from_gui_f(color)
    }
}

impl From<Color> for GuiColorF {
    fn from(color: Color) -> Self {
        color_to_gui_f(color)
    }
}
