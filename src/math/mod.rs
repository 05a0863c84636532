mod bezier;
mod color;
mod rect;
mod scanline;

pub use bezier::{cubic_point, flatten_cubic};
pub use color::{
    color_from_gui, color_from_gui_f, color_to_gui, color_to_gui_f, Color, GuiColor, GuiColorF,
};
pub use rect::{rect_from_gui, rect_to_gui, vector_from_gui, vector_to_gui, GuiRect, IRect};
pub use scanline::{fill_spans, row_crossings, MAX_POLYGON_POINTS};
