//! Homerun Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use homerun_dodge::audio::{AudioManager, WebAudio};
    use homerun_dodge::persistence::{LocalStorage, MemoryStorage, Storage};
    use homerun_dodge::platform::{Clock, DateClock};
    use homerun_dodge::renderer::{RenderState, build_scene};
    use homerun_dodge::sim::{Arena, Autopilot, Control, FrameStatus, Game, KeyState};
    use homerun_dodge::ui::Hud;
    use homerun_dodge::{BestTime, Settings, Tuning};

    /// Browser session holding all state
    struct App {
        game: Game,
        keys: KeyState,
        arena: Arena,
        storage: Box<dyn Storage>,
        settings: Settings,
        audio: AudioManager<WebAudio>,
        render_state: Option<RenderState>,
        /// Idle mode: the autopilot holds the keys
        autopilot: Option<Autopilot>,
        clock: DateClock,
    }

    impl App {
        fn on_key_down(&mut self, key: &str) {
            if key.eq_ignore_ascii_case("i") {
                self.autopilot = match self.autopilot.take() {
                    Some(_) => {
                        for control in [
                            Control::Up,
                            Control::Down,
                            Control::Left,
                            Control::Right,
                            Control::Boost,
                        ] {
                            self.keys.set(control, false);
                        }
                        None
                    }
                    None => Some(Autopilot::new()),
                };
                log::info!("Idle mode: {}", self.autopilot.is_some());
            }

            if key.eq_ignore_ascii_case("m") {
                self.settings.muted = !self.settings.muted;
                self.audio.set_muted(self.settings.muted);
                self.settings.save(self.storage.as_mut());
                log::info!("Muted: {}", self.settings.muted);
            }

            if self.keys.key_down(key) {
                self.audio.start_music();
            }
        }

        fn on_key_up(&mut self, key: &str) {
            self.keys.key_up(key);
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.arena = Arena::new(width as f32, height as f32);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height);
            }
        }

        /// One display refresh
        fn frame(&mut self) -> FrameStatus {
            let now = self.clock.now_ms();

            if let Some(pilot) = &self.autopilot {
                if pilot.drive(&self.game.state, self.arena, &mut self.keys) {
                    self.audio.start_music();
                }
            }

            let status = self
                .game
                .tick(&self.keys, now, self.arena, self.storage.as_mut());
            for event in self.game.drain_events() {
                self.audio.handle_event(&event);
            }
            self.audio.poll();

            self.render();
            self.update_hud(now);
            status
        }

        fn render(&mut self) {
            let vertices = build_scene(&self.game.state, self.arena, &self.settings);
            let view = (self.arena.width, self.arena.height);
            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&vertices, view) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = Hud::from_game(&self.game, now, &self.settings);

            if let Some(el) = document.get_element_by_id("hud-time") {
                el.set_text_content(Some(&hud.time));
            }
            if let Some(el) = document.get_element_by_id("hud-high-score") {
                el.set_text_content(Some(&hud.high_score));
            }
            if let Some(el) = document.get_element_by_id("hud-bat") {
                el.set_text_content(Some(hud.power_up.as_deref().unwrap_or("")));
            }
            if self.game.is_over() {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Homerun Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Canvas fills the window
        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);
        let arena = Arena::new(width as f32, height as f32);

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, scores will not persist");
                Box::new(MemoryStorage::new())
            }
        };
        let settings = Settings::load(storage.as_ref());
        let best = BestTime::load(storage.as_ref());

        let clock = DateClock;
        let seed = clock.now_ms() as u64;
        let game = Game::new(seed, Tuning::default(), arena, clock.now_ms(), best);
        let audio = AudioManager::new(WebAudio::new("assets/"), seed, &settings);

        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            keys: KeyState::new(),
            arena,
            storage,
            settings,
            audio,
            render_state: None,
            autopilot: None,
            clock,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer unavailable: {}", e),
                        }
                    }
                    Err(e) => log::error!("No GPU adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&window, app.clone());
        setup_resize_handler(&window, canvas, app.clone());

        request_animation_frame(app);

        log::info!("Homerun Dodge running!");
        Ok(())
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as u32, h as u32)
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                app.borrow_mut().on_key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().on_key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = window_size(&window);
            canvas.set_width(width);
            canvas.set_height(height);
            app.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let status = app.borrow_mut().frame();
        match status {
            FrameStatus::Continue => request_animation_frame(app),
            FrameStatus::Halted => log::info!("Game loop stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `wasm_main`
}

/// Headless autopilot session on a simulated 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    use homerun_dodge::audio::{AudioManager, LogSink};
    use homerun_dodge::consts::NATIVE_FRAME_MS;
    use homerun_dodge::persistence::FileStorage;
    use homerun_dodge::platform::{Clock, ManualClock, SystemClock};
    use homerun_dodge::sim::{Arena, Autopilot, FrameStatus, Game, KeyState};
    use homerun_dodge::ui::Hud;
    use homerun_dodge::{BestTime, Settings, Tuning};

    /// Five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Homerun Dodge (native) starting...");

    let path = FileStorage::default_path();
    let mut storage = FileStorage::open(&path)
        .with_context(|| format!("opening save file {}", path.display()))?;
    log::info!("Saving scores to {}", storage.path().display());

    let tuning = match std::env::var("HOMERUN_DODGE_TUNING") {
        Ok(tuning_path) => {
            let json = std::fs::read_to_string(&tuning_path)
                .with_context(|| format!("reading tuning file {}", tuning_path))?;
            Tuning::from_json(&json).with_context(|| format!("parsing tuning file {}", tuning_path))?
        }
        Err(_) => Tuning::default(),
    };
    let seed = match std::env::var("HOMERUN_DODGE_SEED") {
        Ok(raw) => raw.parse().context("HOMERUN_DODGE_SEED must be an integer")?,
        Err(_) => SystemClock.now_ms() as u64,
    };

    let settings = Settings::load(&storage);
    let best = BestTime::load(&storage);
    let arena = Arena::new(1280.0, 720.0);
    let clock = ManualClock::new(0.0);

    let mut game = Game::new(seed, tuning, arena, clock.now_ms(), best);
    let mut keys = KeyState::new();
    let pilot = Autopilot::new();
    let mut audio = AudioManager::new(LogSink, seed, &settings);

    for _ in 0..MAX_FRAMES {
        clock.advance(NATIVE_FRAME_MS);
        if pilot.drive(&game.state, arena, &mut keys) {
            audio.start_music();
        }

        let status = game.tick(&keys, clock.now_ms(), arena, &mut storage);
        for event in game.drain_events() {
            log::debug!("{:?}", event);
            audio.handle_event(&event);
        }
        if status == FrameStatus::Halted {
            break;
        }
    }

    if !game.is_over() {
        log::info!("Frame cap reached after {} frames", game.frame());
    }
    for line in Hud::from_game(&game, clock.now_ms(), &settings).lines() {
        log::info!("{}", line);
    }
    Ok(())
}
