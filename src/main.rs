// What you SEE:
// • Live camera (mirrored) is always the base image.
// • Two fingers up (right mouse button): hover the buttons along the top to open
//   panels, pick colours, brush sizes, the eraser, or clear the canvas.
// • One finger up (left mouse button): draw on the white board once it is shown.
// • ESC quits.

use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, error, info};
use rand::Rng;

use air_canvas::camera::CameraCapture;
use air_canvas::config::{self, Config};
use air_canvas::detector::{HandDetector, PointerDetector};
use air_canvas::draw::Drawer;
use air_canvas::gesture::{GestureRouter, Session};
use air_canvas::hint::Hint;
use air_canvas::overlay::{self, Hud};
use air_canvas::recognize::{CommandRecognizer, Recognition};
use air_canvas::types::{FRAME_HEIGHT, FRAME_WIDTH, Rgb};
use air_canvas::Result;

fn main() -> Result<()> {
    let config = Config::parse();
    config::init_logging(config.verbose);

    /* --- Camera + window setup ---
       The camera is scoped to this function; leaving it stops the stream. */
    let mut cam = CameraCapture::new(
        config.camera,
        (config.capture_width, config.capture_height),
        (FRAME_WIDTH as u32, FRAME_HEIGHT as u32),
        config.mirror(),
    )?;
    let mut drawer = Drawer::new("Air Canvas", FRAME_WIDTH, FRAME_HEIGHT)?;
    info!("window {FRAME_WIDTH}x{FRAME_HEIGHT}");

    /* --- Session state ---
       Canvas, tools and cooldown live for the whole run. */
    let mut rng = rand::rng();
    let random_color = Rgb::new(rng.random(), rng.random(), rng.random());
    let mut session = Session::new(random_color);
    let mut router = GestureRouter::default();
    let mut detector = PointerDetector::default();

    let mut recognition = match config.recognizer.as_deref() {
        Some(cmd) => {
            let recognizer = CommandRecognizer::new(cmd)?.with_timeout(config.recognize_timeout());
            Some(Recognition::new(Box::new(recognizer), config.recognize_every))
        }
        None => None,
    };

    /* --- HUD / FPS --- */
    let mut hint = Hint::Idle;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Grab a fresh live frame. A dead device ends the run. */
        let mut screen = match cam.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("{e}; stopping");
                break;
            }
        };

        /* 2) Find the hand and route the gesture into the session. */
        detector.observe(drawer.pointer());
        let hand = detector.detect(&screen);
        let report = router.step(&mut session, hand.as_ref());
        if let Some(h) = report.hint {
            hint = h;
        }

        /* 3) Ask the recognizer about the canvas while the board is up. */
        if let Some(r) = recognition.as_mut() {
            r.update(&session.canvas, session.tools.board_visible);
        }

        /* 4) Compose board, canvas, buttons and HUD over the live frame. */
        let hud = Hud {
            hint,
            result: recognition.as_ref().and_then(|r| r.last_result()),
            fps: &hud_fps_text,
        };
        overlay::compose(&mut screen, &session, &report, &hud);

        /* 5) Present to the window. */
        drawer.present(&screen)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("stopped");
    Ok(())
}
