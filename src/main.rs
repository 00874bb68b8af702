//! Merry Brickfall entry point
//!
//! Browser build: wires the canvas, keyboard and animation frames to the
//! simulation. Native build: runs a headless autoplay session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use merry_brickfall::platform::{FrameClock, KeyboardState};
    use merry_brickfall::renderer::{CanvasSurface, draw};
    use merry_brickfall::sim::{GameEvent, GamePhase, GameState, tick};
    use merry_brickfall::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        surface: CanvasSurface,
        clock: FrameClock,
        keyboard: KeyboardState,
    }

    impl Game {
        fn new(tuning: Tuning, surface: CanvasSurface) -> Self {
            Self {
                clock: FrameClock::new(tuning.max_frame_dt),
                state: GameState::new(tuning),
                settings: Settings::default(),
                surface,
                keyboard: KeyboardState::new(),
            }
        }

        /// Run one simulation tick for this frame
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.keyboard.take_tick_input();
            for event in tick(&mut self.state, &input, dt) {
                log_event(&event);
            }
        }

        fn render(&mut self) {
            draw(&self.state, &self.settings, &mut self.surface);
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::BrickDestroyed { row, col } => {
                log::debug!("Brick ({}, {}) destroyed", row, col)
            }
            GameEvent::GridCleared => log::info!("All bricks cleared"),
            GameEvent::BallRespawned => log::debug!("Ball fell out, respawned"),
            GameEvent::Restarted => log::info!("Game restarted"),
            GameEvent::PhaseChanged(phase) => log::info!("Phase -> {:?}", phase),
            GameEvent::WallBounce | GameEvent::CeilingBounce | GameEvent::PaddleBounce => {
                log::trace!("{:?}", event)
            }
        }
    }

    /// Surface size from the canvas, overrides from its `data-tuning` attribute.
    /// Resizes the canvas when the layout does not fit it.
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);
        let overrides = canvas.get_attribute("data-tuning");
        let tuning = Tuning::for_canvas(width, height, overrides.as_deref());

        if tuning.surface_width != width || tuning.surface_height != height {
            canvas.set_width(tuning.surface_width as u32);
            canvas.set_height(tuning.surface_height as u32);
            log::info!(
                "Canvas resized to {}x{}",
                tuning.surface_width,
                tuning.surface_height
            );
        }
        tuning
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Merry Brickfall starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let tuning = load_tuning(&canvas);
        log::info!(
            "Surface {}x{}, {}x{} bricks",
            tuning.surface_width,
            tuning.surface_height,
            tuning.brick_rows,
            tuning.brick_cols
        );

        let surface = CanvasSurface::new(canvas)?;
        let game = Rc::new(RefCell::new(Game::new(tuning, surface)));

        setup_input_handlers(game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game);

        log::info!("Merry Brickfall running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keyboard.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.keyboard.release_all();
                    g.clock.reset();
                    if g.state.phase == GamePhase::Running {
                        g.keyboard.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside): key-up events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keyboard.release_all();
                if g.state.phase == GamePhase::Running {
                    g.keyboard.request_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, frame loop not scheduled");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();

            if g.state.phase == GamePhase::Stopped {
                log::info!("Stopped after {} ticks", g.state.ticks);
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Merry Brickfall (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the browser version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => headless::load_tuning(&path)?,
        None => merry_brickfall::Tuning::default(),
    };

    let summary = headless::autoplay(tuning, headless::AUTOPLAY_TICKS);
    println!(
        "{} ticks, {} frames drawn, {} bricks left, {} respawns",
        summary.ticks, summary.frames, summary.bricks_left, summary.respawns
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;

    use merry_brickfall::consts::NOMINAL_DT;
    use merry_brickfall::renderer::{RecordingSurface, draw};
    use merry_brickfall::sim::{GameEvent, GameState, TickInput, tick};
    use merry_brickfall::{Settings, Tuning};

    /// One minute at 60 fps
    pub const AUTOPLAY_TICKS: u64 = 60 * 60;

    pub struct Summary {
        pub ticks: u64,
        pub frames: u64,
        pub bricks_left: usize,
        pub respawns: u32,
    }

    pub fn load_tuning(path: &str) -> anyhow::Result<Tuning> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {path}"))?;
        let tuning =
            Tuning::from_json(&json).with_context(|| format!("loading tuning from {path}"))?;
        log::info!("Loaded tuning from {}", path);
        Ok(tuning)
    }

    /// Paddle chases the ball's x; draws every frame into a recorder
    pub fn autoplay(tuning: Tuning, ticks: u64) -> Summary {
        let settings = Settings {
            show_stats: true,
            ..Settings::default()
        };
        let mut surface = RecordingSurface::new(tuning.surface_width, tuning.surface_height);
        let mut state = GameState::new(tuning);

        for _ in 0..ticks {
            let paddle_center = state.paddle.pos.x + state.paddle.width / 2.0;
            let offset = state.ball.pos.x - paddle_center;
            let input = TickInput::held(offset < -4.0, offset > 4.0);

            for event in tick(&mut state, &input, NOMINAL_DT) {
                match event {
                    GameEvent::BrickDestroyed { row, col } => {
                        log::debug!("tick {}: brick ({}, {}) destroyed", state.ticks, row, col)
                    }
                    GameEvent::GridCleared => log::info!("tick {}: all bricks cleared", state.ticks),
                    GameEvent::BallRespawned => log::info!("tick {}: ball respawned", state.ticks),
                    _ => {}
                }
            }
            draw(&state, &settings, &mut surface);
        }

        if let Some(line) = surface.texts().last() {
            log::info!("{}", line);
        }

        Summary {
            ticks: state.ticks,
            frames: surface.frames(),
            bricks_left: state.bricks.alive_count(),
            respawns: state.respawns,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_breaks_bricks() {
            let summary = autoplay(Tuning::default(), AUTOPLAY_TICKS);
            assert_eq!(summary.ticks, AUTOPLAY_TICKS);
            assert_eq!(summary.frames, AUTOPLAY_TICKS);
            assert!(summary.bricks_left < 40);
        }

        #[test]
        fn test_load_tuning_missing_file() {
            assert!(load_tuning("/nonexistent/tuning.json").is_err());
        }
    }
}
