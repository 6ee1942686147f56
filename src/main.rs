//! Hungry Cat entry point
//!
//! Web builds wire the DOM to a `GameSession` and run it from
//! `requestAnimationFrame`. Native builds run a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement};

    use hungry_cat::audio::AudioManager;
    use hungry_cat::feedback::LogSink;
    use hungry_cat::highscores::LocalStorageStore;
    use hungry_cat::input::{Direction, InputState};
    use hungry_cat::platform::{self, HapticSink};
    use hungry_cat::renderer::CanvasRenderer;
    use hungry_cat::sim::GamePhase;
    use hungry_cat::{GameSession, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: Option<CanvasRenderer>,
        input: InputState,
        settings: Settings,
        audio: Rc<RefCell<AudioManager>>,
        haptics: Rc<Cell<bool>>,
        // Orientation listener attached (only after permission)
        tilt_listening: bool,
        last_time: f64,
        // Track phase to toggle screens once per transition
        last_phase: GamePhase,
        last_hud: (u32, u32),
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut session = GameSession::new(seed, Box::new(LocalStorageStore));
            session.slow_motion = !settings.reduced_motion;

            let audio = Rc::new(RefCell::new(AudioManager::new()));
            audio.borrow_mut().apply_settings(&settings);
            let haptics = Rc::new(Cell::new(settings.haptics));

            session.add_sink(Box::new(LogSink));
            session.add_sink(Box::new(audio.clone()));
            session.add_sink(Box::new(HapticSink {
                enabled: haptics.clone(),
            }));

            Self {
                session,
                renderer: None,
                input: InputState::new(),
                settings,
                audio,
                haptics,
                tilt_listening: false,
                last_time: 0.0,
                last_phase: GamePhase::Idle,
                last_hud: (u32::MAX, u32::MAX),
            }
        }

        fn start(&mut self) {
            hide("overlay");
            hide("gameover");
            self.audio.borrow().resume();
            self.session.start();
        }

        fn frame(&mut self, time: f64) {
            let raw_dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input.tick_input();
            self.session.frame(raw_dt, &input);

            if let Some(renderer) = &self.renderer {
                renderer.render(self.session.state());
            }
            self.update_hud();
        }

        /// Reflect score/best/phase into the DOM
        fn update_hud(&mut self) {
            let hud = (self.session.score(), self.session.best());
            if hud != self.last_hud {
                set_text("score", &hud.0.to_string());
                set_text("highscore", &hud.1.to_string());
                self.last_hud = hud;
            }

            let phase = self.session.phase();
            if phase != self.last_phase {
                if phase == GamePhase::GameOver {
                    set_text("finalScore", &hud.0.to_string());
                    set_text("finalHigh", &hud.1.to_string());
                    show("gameover");
                }
                self.last_phase = phase;
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.borrow_mut().set_muted(muted);
            self.settings.save();
            update_mute_icon(muted);
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(450.0);
            let dpr = window.device_pixel_ratio();
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(w, h, dpr);
            }
        }
    }

    fn element(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn show(id: &str) {
        if let Some(el) = element(id) {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide(id: &str) {
        if let Some(el) = element(id) {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn update_mute_icon(muted: bool) {
        set_text("mute", if muted { "🔇" } else { "🔊" });
    }

    /// Attach a closure as a DOM event listener for the lifetime of the page
    fn listen(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hungry Cat starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = platform::time_seed();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        match CanvasRenderer::new(canvas) {
            Ok(mut renderer) => {
                let mut g = game.borrow_mut();
                renderer.particles = g.settings.particles;
                renderer.lean = !g.settings.reduced_motion;
                g.renderer = Some(renderer);
            }
            Err(e) => log::error!("Canvas unavailable: {}", e),
        }
        game.borrow_mut().resize();
        {
            let g = game.borrow();
            set_text("highscore", &g.session.best().to_string());
            update_mute_icon(g.settings.muted);
        }

        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_window_events(game.clone());

        show("overlay");
        request_animation_frame(game);

        log::info!("Hungry Cat running!");
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        // Hold-to-move touch/mouse buttons
        for (id, direction) in [("left", Direction::Left), ("right", Direction::Right)] {
            let Some(btn) = element(id) else { continue };
            for (event, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                listen(&btn, event, move |e: web_sys::Event| {
                    e.prevent_default();
                    game.borrow_mut().input.set(direction, pressed);
                });
            }
        }

        for id in ["play", "restart"] {
            if let Some(btn) = element(id) {
                let game = game.clone();
                listen(&btn, "click", move |_: web_sys::Event| {
                    enable_tilt(&game);
                    game.borrow_mut().start();
                });
            }
        }

        if let Some(btn) = element("share") {
            let game = game.clone();
            listen(&btn, "click", move |_: web_sys::Event| {
                let text = game.borrow().session.share_text();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = platform::share(&text).await;
                    log::debug!("Share: {:?}", outcome);
                    if let Some(label) = outcome.confirmation() {
                        if let Some(btn) = element("share") {
                            btn.set_text_content(Some(label));
                            platform::reset_label_after(
                                &btn,
                                platform::SHARE_LABEL,
                                platform::SHARE_LABEL_RESET_MS,
                            );
                        }
                    }
                });
            });
        }

        if let Some(btn) = element("mute") {
            let game = game.clone();
            listen(&btn, "click", move |_: web_sys::Event| {
                game.borrow_mut().toggle_mute();
            });
        }

        // Haptics toggle is optional in the page
        if let Some(btn) = element("haptics") {
            listen(&btn, "click", move |_: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.haptics = !g.settings.haptics;
                g.haptics.set(g.settings.haptics);
                g.settings.save();
            });
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            listen(&window, "keydown", move |e: web_sys::Event| {
                if let Some(e) = e.dyn_ref::<web_sys::KeyboardEvent>() {
                    game.borrow_mut().input.handle_key(&e.key(), true);
                }
            });
        }
        listen(&window, "keyup", move |e: web_sys::Event| {
            if let Some(e) = e.dyn_ref::<web_sys::KeyboardEvent>() {
                game.borrow_mut().input.handle_key(&e.key(), false);
            }
        });
    }

    /// Ask for orientation access from the Play/Restart click, then listen
    fn enable_tilt(game: &Rc<RefCell<Game>>) {
        {
            let g = game.borrow();
            if !g.settings.tilt_controls || g.tilt_listening {
                return;
            }
        }
        let permission = platform::request_tilt_permission();
        let game = game.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let permission = permission.await;
            log::info!("Tilt permission: {:?}", permission);
            if !permission.allows_tilt() {
                return;
            }
            let Some(window) = web_sys::window() else { return };
            {
                let mut g = game.borrow_mut();
                if g.tilt_listening {
                    return;
                }
                g.tilt_listening = true;
                g.input.tilt.active = true;
            }
            listen(&window, "deviceorientation", move |e: web_sys::Event| {
                let Some(e) = e.dyn_ref::<web_sys::DeviceOrientationEvent>() else {
                    return;
                };
                if let Some(gamma) = e.gamma() {
                    game.borrow_mut().input.tilt.set_gamma(gamma as f32);
                }
            });
        });
    }

    fn setup_window_events(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        for event in ["resize", "orientationchange"] {
            let game = game.clone();
            listen(&window, event, move |_: web_sys::Event| {
                game.borrow_mut().resize();
            });
        }

        // Held buttons never see their release when focus leaves
        listen(&window, "blur", move |_: web_sys::Event| {
            game.borrow_mut().input.release_all();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hungry Cat (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` to play");

    let runs = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(3);
    demo::run(runs);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use hungry_cat::feedback::LogSink;
    use hungry_cat::sim::autopilot;
    use hungry_cat::{FileStore, GameSession, Settings, platform};

    /// Frame time the demo pretends the display runs at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Stop a run that the bot survives this long (seconds)
    const MAX_RUN_SECS: f32 = 180.0;

    fn data_dir() -> PathBuf {
        std::env::var_os("HUNGRY_CAT_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("hungry-cat"))
    }

    pub fn run(runs: u32) {
        let dir = data_dir();
        let settings_path = dir.join("settings.json");
        let settings = Settings::load_file(&settings_path);
        if !settings_path.exists() {
            // Leave an editable file behind for the next run
            if let Err(e) = settings.save_file(&settings_path) {
                log::warn!("Could not write {}: {}", settings_path.display(), e);
            }
        }
        let store = FileStore::new(dir.join("scores.json"));
        log::info!("Best score file: {}", store.path().display());

        let seed = platform::time_seed();
        let mut session = GameSession::new(seed, Box::new(store));
        session.slow_motion = !settings.reduced_motion;
        session.add_sink(Box::new(LogSink));
        log::info!("Seed {} / best so far {}", seed, session.best());

        for run in 1..=runs {
            session.start();
            let mut elapsed = 0.0;
            while session.state().is_playing() && elapsed < MAX_RUN_SECS {
                let input = autopilot::steer(session.state());
                session.frame(FRAME_DT, &input);
                elapsed += FRAME_DT;
            }
            println!(
                "run {}: score {:>3}  best {:>3}  ({:.1}s)  {}",
                run,
                session.score(),
                session.best(),
                elapsed,
                session.share_text()
            );
        }
    }
}
