//! Ocean Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use ocean_dash::Leaderboard;
    use ocean_dash::Tuning;
    use ocean_dash::consts::*;
    use ocean_dash::platform;
    use ocean_dash::render::ScenePainter;
    use ocean_dash::sim::{GameEvent, GamePhase, GameState, TickInput, start, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: ScenePainter,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        field: Vec2,
        tuning: Tuning,
        reported_asset_failure: bool,
    }

    impl Game {
        fn new(seed: u64, field: Vec2, tuning: Tuning, painter: ScenePainter) -> Self {
            Self {
                state: GameState::new(seed, field, tuning.clone()),
                painter,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                field,
                tuning,
                reported_asset_failure: false,
            }
        }

        /// Run simulation ticks and react to what they produced
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.take_events() {
                if let GameEvent::Ended { score, time } = event {
                    let board = Leaderboard::record(score, time);
                    show_leaderboard(&board);
                }
            }
        }

        /// Start the session once every sprite has loaded; a failed sprite
        /// keeps the game in Ready
        fn gate_on_assets(&mut self) {
            if self.state.phase != GamePhase::Ready {
                return;
            }
            if self.painter.assets().any_failed() {
                if !self.reported_asset_failure {
                    log::error!("Asset load failed, game will not start");
                    self.reported_asset_failure = true;
                }
            } else if self.painter.assets().ready() {
                log::info!("All assets loaded, starting game");
                start(&mut self.state);
            }
        }

        /// Update HUD text in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("timer") {
                el.set_text_content(Some(&format!("Time: {}", self.state.elapsed_secs)));
            }
        }

        /// Discard the session and build a fresh one; the asset gate restarts
        /// it on the next frame
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, self.field, self.tuning.clone());
            self.input = TickInput::default();
            self.accumulator = 0.0;
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    /// Render the stored board into the leaderboard panel and reveal it
    fn show_leaderboard(board: &Leaderboard) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(list) = document.get_element_by_id("leaderboard-list") {
            list.set_inner_html("");
            for (i, entry) in board.entries.iter().enumerate() {
                if let Ok(item) = document.create_element("li") {
                    item.set_text_content(Some(&format!(
                        "#{}: {} points in {} seconds",
                        i + 1,
                        entry.score,
                        entry.time
                    )));
                    let _ = list.append_child(&item);
                }
            }
        }
        if let Some(panel) = document.get_element_by_id("leaderboard") {
            let _ = panel.set_attribute("class", "");
        }
    }

    fn hide_leaderboard() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(panel) = document.get_element_by_id("leaderboard") {
            let _ = panel.set_attribute("class", "hidden");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ocean Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Field dimensions come from the viewport at startup and are not
        // resized afterward
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let painter = ScenePainter::new(&canvas).expect("canvas 2d context");

        let seed = platform::now_ms() as u64;
        let tuning = Tuning::load();
        let field = Vec2::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, field, tuning, painter)));

        log::info!("Game initialized with seed: {}", seed);

        setup_key_handlers(game.clone());
        setup_touch_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Ocean Dash running!");
    }

    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown holds a direction
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let held = match event.key().as_str() {
                    "ArrowUp" => {
                        g.input.up = true;
                        true
                    }
                    "ArrowDown" => {
                        g.input.down = true;
                        true
                    }
                    "ArrowLeft" => {
                        g.input.left = true;
                        true
                    }
                    "ArrowRight" => {
                        g.input.right = true;
                        true
                    }
                    _ => false,
                };
                if held {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any arrow keyup stops the player, matching press/release semantics
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(
                    event.key().as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
                ) {
                    event.prevent_default();
                    game.borrow_mut().input = TickInput::default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Map a touch point to held directions relative to the player
    fn apply_touch(game: &mut Game, x: f32, y: f32) {
        let player = game.state.player.rect;
        let mut input = TickInput::default();
        if y < player.top() {
            input.up = true;
        } else if y > player.bottom() {
            input.down = true;
        }
        if x < player.left() {
            input.left = true;
        } else if x > player.right() {
            input.right = true;
        }
        game.input = input;
    }

    fn setup_touch_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    apply_touch(&mut game.borrow_mut(), x, y);
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input = TickInput::default();
            });
            let _ =
                canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                hide_leaderboard();
                let seed = platform::now_ms() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.gate_on_assets();
            g.update(dt);
            g.painter.draw(&g.state);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use ocean_dash::Tuning;
    use ocean_dash::consts::SIM_DT;
    use ocean_dash::sim::{GamePhase, GameState, TickInput, start, tick};

    env_logger::init();
    log::info!("Ocean Dash (native) starting...");
    log::info!("Native mode is a headless smoke run - build for wasm32 for the web version");

    let mut state = GameState::new(0xC0FFEE, Vec2::new(1280.0, 720.0), Tuning::default());
    start(&mut state);

    // Drift left for up to thirty simulated seconds
    let input = TickInput {
        left: true,
        ..Default::default()
    };
    for _ in 0..(30 * 60) {
        tick(&mut state, &input, SIM_DT);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Headless run finished: {:?}, {} points in {}s",
        state.phase,
        state.score,
        state.elapsed_secs
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
