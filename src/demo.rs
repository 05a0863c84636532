use glam::Vec2;

use crate::core::{Command, Context};
use crate::math::{GuiColor, GuiRect};

const WINDOW_BG: GuiColor = GuiColor::rgb(45, 45, 48);
const HEADER_BG: GuiColor = GuiColor::rgb(40, 40, 40);
const BORDER: GuiColor = GuiColor::rgb(65, 65, 65);
const TEXT: GuiColor = GuiColor::rgb(175, 175, 175);
const BUTTON: GuiColor = GuiColor::rgb(50, 50, 50);
const ACCENT: GuiColor = GuiColor::rgb(100, 140, 210);
const CURSOR: GuiColor = GuiColor::rgb(230, 230, 230);

fn text(context: &Context, x: f32, y: f32, label: &str, color: GuiColor) -> Command {
    let height = context.font().height();
    let width = context.text_width(label.as_bytes());
    Command::Text {
        font: context.font_handle(),
        rect: GuiRect::new(x, y, width, height),
        background: GuiColor::rgba(0, 0, 0, 0),
        foreground: color,
        height,
        text: label.as_bytes().to_vec(),
    }
}

/// Queue one frame of a small demo window, as a layout pass would emit it
pub fn demo_frame(context: &mut Context, width: f32, height: f32) {
    let window = GuiRect::new(10.0, 10.0, width - 20.0, height - 20.0);
    let left = window.x + 12.0;
    let row = |i: f32| window.y + 34.0 + i * 30.0;

    let mut frame = vec![
        Command::Scissor { rect: window },
        Command::RectFilled {
            rect: window,
            rounding: 4.0,
            color: WINDOW_BG,
        },
        Command::RectFilled {
            rect: GuiRect::new(window.x, window.y, window.w, 24.0),
            rounding: 0.0,
            color: HEADER_BG,
        },
        text(context, left, window.y + 8.0, "Demo", TEXT),
        Command::Rect {
            rect: window,
            rounding: 4.0,
            thickness: 1.0,
            color: BORDER,
        },
        // button
        Command::RectFilled {
            rect: GuiRect::new(left, row(0.0), 100.0, 22.0),
            rounding: 4.0,
            color: BUTTON,
        },
        Command::Rect {
            rect: GuiRect::new(left, row(0.0), 100.0, 22.0),
            rounding: 4.0,
            thickness: 1.0,
            color: BORDER,
        },
        text(context, left + 26.0, row(0.0) + 7.0, "button", TEXT),
        // option
        Command::CircleFilled {
            rect: GuiRect::new(left, row(1.0) + 3.0, 16.0, 16.0),
            color: BUTTON,
        },
        Command::CircleFilled {
            rect: GuiRect::new(left + 4.0, row(1.0) + 7.0, 8.0, 8.0),
            color: CURSOR,
        },
        text(context, left + 24.0, row(1.0) + 7.0, "easy", TEXT),
        Command::Circle {
            rect: GuiRect::new(left + 80.0, row(1.0) + 3.0, 16.0, 16.0),
            thickness: 1.0,
            color: BORDER,
        },
        text(context, left + 104.0, row(1.0) + 7.0, "hard", TEXT),
        // slider
        Command::RectFilled {
            rect: GuiRect::new(left, row(2.0) + 9.0, 160.0, 4.0),
            rounding: 2.0,
            color: BUTTON,
        },
        Command::RectFilled {
            rect: GuiRect::new(left, row(2.0) + 9.0, 100.0, 4.0),
            rounding: 2.0,
            color: ACCENT,
        },
        Command::CircleFilled {
            rect: GuiRect::new(left + 92.0, row(2.0) + 3.0, 16.0, 16.0),
            color: CURSOR,
        },
        // chart area
        Command::RectMultiColor {
            rect: GuiRect::new(left, row(3.0), 160.0, 40.0),
            left: GuiColor::rgb(200, 60, 60),
            top: GuiColor::rgb(60, 200, 60),
            bottom: GuiColor::rgb(60, 60, 200),
            right: GuiColor::rgb(200, 200, 60),
        },
        Command::Curve {
            begin: Vec2::new(left, row(5.0)),
            ctrl: [
                Vec2::new(left + 50.0, row(4.0)),
                Vec2::new(left + 110.0, row(6.0)),
            ],
            end: Vec2::new(left + 160.0, row(5.0)),
            thickness: 1.0,
            color: ACCENT,
        },
        Command::PolygonFilled {
            points: vec![
                Vec2::new(left + 200.0, row(0.0)),
                Vec2::new(left + 240.0, row(0.0) + 30.0),
                Vec2::new(left + 220.0, row(0.0) + 70.0),
                Vec2::new(left + 180.0, row(0.0) + 70.0),
                Vec2::new(left + 160.0, row(0.0) + 30.0),
            ],
            color: ACCENT,
        },
        Command::ArcFilled {
            center: Vec2::new(left + 210.0, row(4.0)),
            radius: 24.0,
            angles: [0.0, std::f32::consts::FRAC_PI_2 * 3.0],
            color: GuiColor::rgb(210, 140, 60),
        },
    ];
    frame.push(text(context, left, window.y + window.h - 16.0, "gui-raster", TEXT));

    context.commands_mut().extend(frame);
}
