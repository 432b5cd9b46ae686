// Builds the displayed image: live frame, brush preview, board + canvas, buttons, HUD.

use crate::draw::{draw_text_5x7, fill_disc};
use crate::gesture::{FrameReport, Session};
use crate::hint::Hint;
use crate::types::{FrameBuffer, Rgb};

const HUD_COLOR: Rgb = Rgb::WHITE;
const HUD_SCALE: i32 = 2;

/// Text drawn along the bottom of the frame.
pub struct Hud<'a> {
    pub hint: Hint,
    pub result: Option<&'a str>,
    pub fps: &'a str,
}

/// Draw everything for one frame on top of the live camera image in `frame`.
pub fn compose(frame: &mut FrameBuffer, session: &Session, report: &FrameReport, hud: &Hud<'_>) {
    let tools = &session.tools;

    if let Some(p) = report.cursor {
        fill_disc(frame, p.x, p.y, tools.brush_size() as i32, tools.color().to_u32());
    }

    if tools.board_visible {
        session.palette.render_board(frame, tools);
        session.canvas.composite_onto(frame);
    }

    session.palette.render_buttons(frame, tools);

    let line_h = 7 * HUD_SCALE + 6;
    let bottom = frame.height as i32 - line_h;
    draw_text_5x7(frame, 8, bottom, hud.hint.text(), HUD_COLOR.to_u32(), HUD_SCALE);
    if let Some(result) = hud.result {
        draw_text_5x7(frame, 8, bottom - line_h, &format!("Result: {result}"), HUD_COLOR.to_u32(), HUD_SCALE);
    }
    let fps_x = frame.width as i32 - 8 - 6 * HUD_SCALE * hud.fps.chars().count() as i32;
    draw_text_5x7(frame, fps_x, bottom, hud.fps, HUD_COLOR.to_u32(), HUD_SCALE);
}
