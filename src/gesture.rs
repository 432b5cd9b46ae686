//! Per-frame gesture interpretation.
//!
//! A pure [`transition`] classifies the hand into SELECT / DRAW / IDLE and names
//! the action to take; [`GestureRouter`] applies that action to a [`Session`].

use log::{debug, info, warn};

use crate::canvas::{Canvas, Segment};
use crate::cooldown::Cooldown;
use crate::hint::Hint;
use crate::palette::{Panel, ToolPalette, ToolState};
use crate::stroke::StrokeTracker;
use crate::types::{FRAME_HEIGHT, FRAME_WIDTH, Point, Rgb};

/// Landmark index of the index fingertip.
pub const INDEX_TIP: usize = 8;
/// Landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Which fingers are extended, thumb first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerFlags(pub [bool; 5]);

impl FingerFlags {
    pub fn index(&self) -> bool { self.0[1] }
    pub fn middle(&self) -> bool { self.0[2] }
}

/// What the hand detector reports for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandSample {
    pub landmarks: Vec<Point>,
    pub fingers: FingerFlags,
}

impl HandSample {
    pub fn fingertip(&self) -> Option<Point> {
        self.landmarks.get(INDEX_TIP).copied()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Index and middle fingers up: hover and press buttons.
    Select,
    /// Index finger up alone: draw on the board.
    Draw,
}

/// What the router does with a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Break the current stroke and do nothing else.
    ResetStroke,
    /// Break the current stroke and hit-test the buttons at this point.
    Select(Point),
    /// Extend the current stroke to this point.
    Stroke(Point),
}

/// Board facts the transition needs about the fingertip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardView {
    pub over: bool,
    pub visible: bool,
}

/// Classify one frame. `hand` is None when no hand was detected.
pub fn transition(hand: Option<(FingerFlags, Point)>, board: BoardView) -> (GestureState, Action) {
    let Some((fingers, p)) = hand else {
        return (GestureState::Idle, Action::ResetStroke);
    };
    match (fingers.index(), fingers.middle()) {
        // two fingers over the board never paint
        (true, true) if !board.over => (GestureState::Select, Action::Select(p)),
        (true, false) if board.over && board.visible => (GestureState::Draw, Action::Stroke(p)),
        (true, false) => (GestureState::Draw, Action::ResetStroke),
        _ => (GestureState::Idle, Action::ResetStroke),
    }
}

/// Everything a run mutates, owned by the frame loop.
pub struct Session {
    pub palette: ToolPalette,
    pub tools: ToolState,
    pub cooldown: Cooldown,
    pub canvas: Canvas,
    pub stroke: StrokeTracker,
}

impl Session {
    /// A fresh session on a black canvas of the processing-frame size.
    pub fn new(random_color: Rgb) -> Self {
        Self {
            palette: ToolPalette::new(random_color),
            tools: ToolState::default(),
            cooldown: Cooldown::default(),
            canvas: Canvas::new(FRAME_WIDTH, FRAME_HEIGHT, Rgb::BLACK),
            stroke: StrokeTracker::default(),
        }
    }
}

/// Outcome of one frame, for the overlay and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub state: GestureState,
    pub hint: Option<Hint>,
    pub segment: Option<Segment>,
    pub cleared: bool,
    pub toggled: Option<Panel>,
    /// Brush preview position while drawing on the board.
    pub cursor: Option<Point>,
}

#[derive(Debug, Default)]
pub struct GestureRouter {
    state: GestureState,
}

impl GestureRouter {
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Process one frame: tick the cooldown, classify the hand and apply the action.
    pub fn step(&mut self, session: &mut Session, hand: Option<&HandSample>) -> FrameReport {
        session.cooldown.tick();

        let hand = hand.and_then(|h| h.fingertip().map(|p| (h.fingers, p)));
        let board = BoardView {
            over: hand.is_some_and(|(_, p)| session.palette.is_over_board(p)),
            visible: session.tools.board_visible,
        };
        let (state, action) = transition(hand, board);
        if state != self.state {
            debug!("gesture {:?} -> {:?}", self.state, state);
            self.state = state;
        }

        let mut report = FrameReport { state, ..FrameReport::default() };
        match action {
            Action::ResetStroke => session.stroke.reset(),
            Action::Select(p) => {
                session.stroke.reset();
                select(session, p, &mut report);
            }
            Action::Stroke(p) => {
                report.segment = session.stroke.begin_or_continue(&mut session.canvas, p, &session.tools);
                report.cursor = Some(p);
            }
        }
        report
    }
}

/// Selection-mode hit-testing: open panels first, then the toggles.
fn select(session: &mut Session, p: Point, report: &mut FrameReport) {
    let Session { palette, tools, cooldown, canvas, .. } = session;
    report.hint = Some(Hint::for_selection(palette, cooldown, p));

    if tools.pen_visible {
        if let Err(e) = palette.select_pen_size(p, tools) {
            warn!("pen size rejected: {e}");
        }
    }
    if tools.colors_visible {
        if let Err(e) = palette.select_color(p, tools) {
            warn!("colour rejected: {e}");
        }
        if palette.press_clear(p) {
            canvas.clear();
            report.cleared = true;
            info!("canvas cleared");
        }
    }

    if palette.toggle_colors_panel(p, tools, cooldown) {
        report.toggled = Some(Panel::Colors);
    }
    if palette.toggle_pen_panel(p, tools, cooldown) {
        report.toggled = Some(Panel::Pen);
    }
    if palette.toggle_board_panel(p, tools, cooldown) {
        report.toggled = Some(Panel::Board);
    }
}
