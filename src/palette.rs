//! Tool buttons, the tool state they commit to, and the per-region pressed look.

use std::collections::HashMap;

use log::{debug, info};

use crate::cooldown::Cooldown;
use crate::error::{Error, Result};
use crate::region::{HitRegion, Rect};
use crate::types::{FrameBuffer, Point, Rgb};

/// Drawing with this colour erases. The canvas background is black as well.
pub const ERASER_COLOR: Rgb = Rgb::BLACK;
/// Brush sizes offered by the pen panel.
pub const BRUSH_SIZES: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_BRUSH_SIZE: u32 = 5;
pub const ERASER_SIZE: u32 = 20;
/// Brush colour at launch (blue).
pub const DEFAULT_COLOR: Rgb = Rgb::new(0, 0, 255);

/// Label a toggle button shows while its panel is open.
pub const HIDE_LABEL: &str = "Hide";

/// Identity of every on-screen region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionId {
    Swatch(usize),
    Clear,
    PenSize(usize),
    ColorsToggle,
    PenToggle,
    BoardToggle,
    Board,
}

/// The three panels a toggle button opens and closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Colors,
    Pen,
    Board,
}

/// Active colour, sizes and panel visibility for the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolState {
    color: Rgb,
    brush_size: u32,
    eraser_size: u32,
    pub colors_visible: bool,
    pub pen_visible: bool,
    pub board_visible: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser_size: ERASER_SIZE,
            colors_visible: false,
            pen_visible: false,
            board_visible: false,
        }
    }
}

impl ToolState {
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn eraser_size(&self) -> u32 {
        self.eraser_size
    }

    /// The eraser is active whenever the active colour is the eraser colour.
    pub fn is_erasing(&self) -> bool {
        self.color == ERASER_COLOR
    }

    /// Width of the next stroke segment.
    pub fn stroke_width(&self) -> u32 {
        if self.is_erasing() { self.eraser_size } else { self.brush_size }
    }

    /// Commit a colour. Only colours in `allowed` are accepted; otherwise the
    /// current colour is kept.
    pub fn set_color(&mut self, color: Rgb, allowed: &[Rgb]) -> Result<()> {
        if !allowed.contains(&color) {
            return Err(Error::UnknownColor(color));
        }
        if self.color != color {
            debug!("colour -> {color:?}");
        }
        self.color = color;
        Ok(())
    }

    /// Commit a brush size from [`BRUSH_SIZES`]; anything else keeps the current size.
    pub fn set_brush_size(&mut self, size: u32) -> Result<()> {
        if !BRUSH_SIZES.contains(&size) {
            return Err(Error::InvalidBrushSize(size));
        }
        if self.brush_size != size {
            debug!("brush size -> {size}");
        }
        self.brush_size = size;
        Ok(())
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Colors => self.colors_visible,
            Panel::Pen => self.pen_visible,
            Panel::Board => self.board_visible,
        }
    }

    fn flip(&mut self, panel: Panel) -> bool {
        let flag = match panel {
            Panel::Colors => &mut self.colors_visible,
            Panel::Pen => &mut self.pen_visible,
            Panel::Board => &mut self.board_visible,
        };
        *flag = !*flag;
        *flag
    }
}

/// Which regions currently show the pressed look. Kept apart from the fixed
/// geometry so hit-testing never depends on render state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    highlighted: HashMap<RegionId, bool>,
}

impl UiState {
    pub fn set_highlighted(&mut self, id: RegionId, on: bool) {
        self.highlighted.insert(id, on);
    }

    pub fn is_highlighted(&self, id: RegionId) -> bool {
        self.highlighted.get(&id).copied().unwrap_or(false)
    }
}

struct Swatch {
    region: HitRegion,
    color: Rgb,
}

struct PenOption {
    region: HitRegion,
    size: u32,
}

/// Fixed button layout for a 1280x720 frame.
pub struct ToolPalette {
    swatches: Vec<Swatch>,
    clear: HitRegion,
    pens: Vec<PenOption>,
    colors_toggle: HitRegion,
    pen_toggle: HitRegion,
    board_toggle: HitRegion,
    board: HitRegion,
    ui: UiState,
}

impl ToolPalette {
    /// Build the layout. `random_color` fills the first swatch.
    pub fn new(random_color: Rgb) -> Self {
        let swatch = |x: i32, color: Rgb, label: &str| Swatch {
            region: HitRegion::new(Rect::new(x, 0, 100, 100), color, label),
            color,
        };
        let swatches = vec![
            swatch(300, random_color, ""),
            swatch(400, Rgb::new(255, 0, 0), ""),
            swatch(500, Rgb::new(0, 0, 255), ""),
            swatch(600, Rgb::new(0, 255, 0), ""),
            swatch(700, Rgb::new(255, 255, 0), ""),
            swatch(800, ERASER_COLOR, "Eraser"),
        ];

        let pens = BRUSH_SIZES
            .iter()
            .enumerate()
            .map(|(i, &size)| PenOption {
                region: HitRegion::new(Rect::new(1100, 50 + 100 * i as i32, 100, 100), Rgb::new(50, 50, 50), size.to_string()),
                size,
            })
            .collect();

        Self {
            swatches,
            clear: HitRegion::new(Rect::new(900, 0, 100, 100), Rgb::new(100, 100, 100), "Clear"),
            pens,
            colors_toggle: HitRegion::new(Rect::new(200, 0, 100, 100), Rgb::new(0, 255, 120), "Colors"),
            pen_toggle: HitRegion::new(Rect::new(1100, 0, 100, 50), DEFAULT_COLOR, "Pen"),
            board_toggle: HitRegion::new(Rect::new(50, 0, 100, 100), Rgb::new(0, 255, 255), "Board"),
            board: HitRegion::new(Rect::new(50, 120, 1020, 580), Rgb::WHITE, "").with_idle_translucency(0.6),
            ui: UiState::default(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn region(&self, id: RegionId) -> Option<&HitRegion> {
        match id {
            RegionId::Swatch(i) => self.swatches.get(i).map(|s| &s.region),
            RegionId::Clear => Some(&self.clear),
            RegionId::PenSize(i) => self.pens.get(i).map(|p| &p.region),
            RegionId::ColorsToggle => Some(&self.colors_toggle),
            RegionId::PenToggle => Some(&self.pen_toggle),
            RegionId::BoardToggle => Some(&self.board_toggle),
            RegionId::Board => Some(&self.board),
        }
    }

    /// Colours a swatch can commit, eraser included.
    pub fn colors(&self) -> Vec<Rgb> {
        self.swatches.iter().map(|s| s.color).collect()
    }

    pub fn is_over_board(&self, p: Point) -> bool {
        self.board.contains(p)
    }

    pub fn is_over_clear(&self, p: Point) -> bool {
        self.clear.contains(p)
    }

    pub fn is_over_eraser(&self, p: Point) -> bool {
        self.swatches.iter().any(|s| s.color == ERASER_COLOR && s.region.contains(p))
    }

    pub fn is_over_toggle(&self, panel: Panel, p: Point) -> bool {
        self.toggle_region(panel).contains(p)
    }

    /// Highlight the swatch under `p`, commit its colour and reset its siblings.
    pub fn select_color(&mut self, p: Point, tools: &mut ToolState) -> Result<()> {
        let allowed = self.colors();
        let mut picked = None;
        for (i, s) in self.swatches.iter().enumerate() {
            let over = s.region.contains(p);
            self.ui.set_highlighted(RegionId::Swatch(i), over);
            if over {
                picked = Some(s.color);
            }
        }
        match picked {
            Some(color) => tools.set_color(color, &allowed),
            None => Ok(()),
        }
    }

    /// Highlight the pen option under `p`, commit its size and reset its siblings.
    pub fn select_pen_size(&mut self, p: Point, tools: &mut ToolState) -> Result<()> {
        let mut picked = None;
        for (i, pen) in self.pens.iter().enumerate() {
            let over = pen.region.contains(p);
            self.ui.set_highlighted(RegionId::PenSize(i), over);
            if over {
                picked = Some(pen.size);
            }
        }
        match picked {
            Some(size) => tools.set_brush_size(size),
            None => Ok(()),
        }
    }

    /// Highlight Clear while `p` is over it. Returns whether the canvas should be wiped.
    pub fn press_clear(&mut self, p: Point) -> bool {
        let over = self.clear.contains(p);
        self.ui.set_highlighted(RegionId::Clear, over);
        over
    }

    pub fn toggle_colors_panel(&mut self, p: Point, tools: &mut ToolState, cooldown: &mut Cooldown) -> bool {
        self.toggle(Panel::Colors, p, tools, cooldown)
    }

    pub fn toggle_pen_panel(&mut self, p: Point, tools: &mut ToolState, cooldown: &mut Cooldown) -> bool {
        self.toggle(Panel::Pen, p, tools, cooldown)
    }

    pub fn toggle_board_panel(&mut self, p: Point, tools: &mut ToolState, cooldown: &mut Cooldown) -> bool {
        self.toggle(Panel::Board, p, tools, cooldown)
    }

    /// Flip `panel` if `p` is over its button and the cooldown allows it. The button
    /// looks pressed only on the frame it fires.
    fn toggle(&mut self, panel: Panel, p: Point, tools: &mut ToolState, cooldown: &mut Cooldown) -> bool {
        let id = toggle_id(panel);
        let fired = self.toggle_region(panel).contains(p) && cooldown.can_fire();
        if fired {
            cooldown.fire();
            let visible = tools.flip(panel);
            info!("{panel:?} panel {}", if visible { "shown" } else { "hidden" });
        }
        self.ui.set_highlighted(id, fired);
        fired
    }

    fn toggle_region(&self, panel: Panel) -> &HitRegion {
        match panel {
            Panel::Colors => &self.colors_toggle,
            Panel::Pen => &self.pen_toggle,
            Panel::Board => &self.board_toggle,
        }
    }

    /// Text a region shows: toggles read "Hide" while their panel is open.
    pub fn label(&self, id: RegionId, tools: &ToolState) -> &str {
        let panel = match id {
            RegionId::ColorsToggle => Some(Panel::Colors),
            RegionId::PenToggle => Some(Panel::Pen),
            RegionId::BoardToggle => Some(Panel::Board),
            _ => None,
        };
        match panel {
            Some(panel) if tools.is_visible(panel) => HIDE_LABEL,
            _ => self.region(id).map(|r| r.label.as_str()).unwrap_or(""),
        }
    }

    fn render_region(&self, fb: &mut FrameBuffer, id: RegionId, tools: &ToolState) {
        if let Some(region) = self.region(id) {
            let t = region.translucency(self.ui.is_highlighted(id));
            region.render(fb, t, self.label(id, tools));
        }
    }

    /// Draw the board backdrop if it is shown. The canvas goes on top of this.
    pub fn render_board(&self, fb: &mut FrameBuffer, tools: &ToolState) {
        if tools.board_visible {
            self.render_region(fb, RegionId::Board, tools);
        }
    }

    /// Draw the toggles and every open panel.
    pub fn render_buttons(&self, fb: &mut FrameBuffer, tools: &ToolState) {
        self.render_region(fb, RegionId::ColorsToggle, tools);
        self.render_region(fb, RegionId::BoardToggle, tools);
        self.render_region(fb, RegionId::PenToggle, tools);

        if tools.colors_visible {
            for i in 0..self.swatches.len() {
                self.render_region(fb, RegionId::Swatch(i), tools);
            }
            self.render_region(fb, RegionId::Clear, tools);
        }
        if tools.pen_visible {
            for i in 0..self.pens.len() {
                self.render_region(fb, RegionId::PenSize(i), tools);
            }
        }
    }
}

fn toggle_id(panel: Panel) -> RegionId {
    match panel {
        Panel::Colors => RegionId::ColorsToggle,
        Panel::Pen => RegionId::PenToggle,
        Panel::Board => RegionId::BoardToggle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RANDOM: Rgb = Rgb::new(12, 34, 56);

    fn setup() -> (ToolPalette, ToolState, Cooldown) {
        (ToolPalette::new(RANDOM), ToolState::default(), Cooldown::new(0))
    }

    #[test]
    fn initial_state() {
        let tools = ToolState::default();
        assert_eq!(tools.color(), DEFAULT_COLOR);
        assert_eq!(tools.brush_size(), 5);
        assert_eq!(tools.eraser_size(), 20);
        assert!(!tools.colors_visible && !tools.pen_visible && !tools.board_visible);
    }

    #[test]
    fn select_color_commits_and_highlights_only_hovered() {
        let (mut palette, mut tools, _) = setup();
        palette.select_color(Point::new(450, 50), &mut tools).unwrap();
        assert_eq!(tools.color(), Rgb::new(255, 0, 0));
        assert!(palette.ui().is_highlighted(RegionId::Swatch(1)));
        assert!(!palette.ui().is_highlighted(RegionId::Swatch(0)));

        palette.select_color(Point::new(350, 50), &mut tools).unwrap();
        assert_eq!(tools.color(), RANDOM);
        assert!(palette.ui().is_highlighted(RegionId::Swatch(0)));
        assert!(!palette.ui().is_highlighted(RegionId::Swatch(1)));
    }

    #[test]
    fn select_color_is_idempotent_while_held() {
        let (mut palette, mut tools, _) = setup();
        for _ in 0..3 {
            palette.select_color(Point::new(650, 50), &mut tools).unwrap();
        }
        assert_eq!(tools.color(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn select_eraser_switches_stroke_width() {
        let (mut palette, mut tools, _) = setup();
        assert!(palette.is_over_eraser(Point::new(850, 50)));
        palette.select_color(Point::new(850, 50), &mut tools).unwrap();
        assert!(tools.is_erasing());
        assert_eq!(tools.stroke_width(), ERASER_SIZE);
    }

    #[test]
    fn select_pen_size_commits_size() {
        let (mut palette, mut tools, _) = setup();
        palette.select_pen_size(Point::new(1150, 260), &mut tools).unwrap();
        assert_eq!(tools.brush_size(), 15);
        assert!(palette.ui().is_highlighted(RegionId::PenSize(2)));
        // off every option: size stays, highlights drop
        palette.select_pen_size(Point::new(10, 10), &mut tools).unwrap();
        assert_eq!(tools.brush_size(), 15);
        assert!(!palette.ui().is_highlighted(RegionId::PenSize(2)));
    }

    #[test]
    fn invalid_commits_keep_prior_state() {
        let mut tools = ToolState::default();
        assert!(matches!(tools.set_brush_size(7), Err(Error::InvalidBrushSize(7))));
        assert_eq!(tools.brush_size(), 5);

        let allowed = [Rgb::new(255, 0, 0)];
        assert!(tools.set_color(Rgb::new(1, 2, 3), &allowed).is_err());
        assert_eq!(tools.color(), DEFAULT_COLOR);
    }

    #[test]
    fn toggle_fires_flips_and_relabels() {
        let (mut palette, mut tools, mut cooldown) = setup();
        let over = Point::new(250, 50);
        assert_eq!(palette.label(RegionId::ColorsToggle, &tools), "Colors");

        assert!(palette.toggle_colors_panel(over, &mut tools, &mut cooldown));
        assert!(tools.colors_visible);
        assert_eq!(cooldown.remaining(), 10);
        assert_eq!(palette.label(RegionId::ColorsToggle, &tools), HIDE_LABEL);
        assert!(palette.ui().is_highlighted(RegionId::ColorsToggle));
    }

    #[test]
    fn toggle_twice_with_cooldown_elapsed_restores() {
        let (mut palette, mut tools, mut cooldown) = setup();
        let over = Point::new(1150, 25);
        assert!(palette.toggle_pen_panel(over, &mut tools, &mut cooldown));
        for _ in 0..10 {
            cooldown.tick();
        }
        assert!(palette.toggle_pen_panel(over, &mut tools, &mut cooldown));
        assert!(!tools.pen_visible);
        assert_eq!(palette.label(RegionId::PenToggle, &tools), "Pen");
    }

    #[test]
    fn toggle_during_cooldown_is_ignored() {
        let (mut palette, mut tools, mut cooldown) = setup();
        let over = Point::new(100, 50);
        assert!(palette.toggle_board_panel(over, &mut tools, &mut cooldown));
        cooldown.tick();
        assert!(!palette.toggle_board_panel(over, &mut tools, &mut cooldown));
        assert!(tools.board_visible);
        assert!(!palette.ui().is_highlighted(RegionId::BoardToggle));
        assert_eq!(cooldown.remaining(), 9);
    }

    #[test]
    fn clear_press_tracks_hover() {
        let (mut palette, ..) = setup();
        assert!(palette.press_clear(Point::new(950, 50)));
        assert!(palette.ui().is_highlighted(RegionId::Clear));
        assert!(!palette.press_clear(Point::new(950, 150)));
        assert!(!palette.ui().is_highlighted(RegionId::Clear));
    }

    #[test]
    fn board_geometry() {
        let (palette, ..) = setup();
        assert!(palette.is_over_board(Point::new(100, 100 + 50)));
        assert!(!palette.is_over_board(Point::new(1100, 300)));
        assert!(!palette.is_over_board(Point::new(250, 50)));
    }

    #[test]
    fn render_buttons_only_draws_open_panels() {
        let (palette, mut tools, _) = setup();
        let mut fb = FrameBuffer::filled(1280, 720, Rgb::BLACK);
        palette.render_buttons(&mut fb, &tools);
        // red swatch hidden
        assert_eq!(fb.get(450, 90), Some(Rgb::BLACK));

        tools.colors_visible = true;
        palette.render_buttons(&mut fb, &tools);
        assert_eq!(fb.get(450, 90), Some(Rgb::new(128, 0, 0)));
    }
}
