//! Coin Dodge entry point
//!
//! The web build runs on a 2D canvas driven by `requestAnimationFrame`.
//! The native build runs a headless autopilot session and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use coin_dodge::platform::canvas::CanvasSurface;
    use coin_dodge::platform::normalize_key;
    use coin_dodge::sim::input::is_bound;
    use coin_dodge::sim::{Session, SessionPhase};
    use coin_dodge::{FrameRequest, FrameScheduler, GameConfig, GameLoop};

    /// `requestAnimationFrame` backed scheduler
    struct AnimationFrames {
        window: web_sys::Window,
        callback: Option<js_sys::Function>,
    }

    impl FrameScheduler for AnimationFrames {
        fn request_frame(&mut self) -> Option<FrameRequest> {
            let callback = self.callback.as_ref()?;
            match self.window.request_animation_frame(callback) {
                Ok(id) => Some(FrameRequest(id)),
                Err(e) => {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            if let Err(e) = self.window.cancel_animation_frame(request.0) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// Everything a frame callback touches
    struct WebGame {
        game_loop: GameLoop,
        surface: CanvasSurface,
        scheduler: AnimationFrames,
    }

    impl WebGame {
        fn frame(&mut self, timestamp_ms: f64) {
            let WebGame {
                game_loop,
                surface,
                scheduler,
            } = self;
            game_loop.on_frame(timestamp_ms, surface, scheduler);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Coin Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            ..GameConfig::default()
        };
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Canvas size unusable ({}), using default arena", e);
                canvas.set_width(coin_dodge::consts::ARENA_WIDTH as u32);
                canvas.set_height(coin_dodge::consts::ARENA_HEIGHT as u32);
                GameConfig::default()
            }
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(WebGame {
            game_loop: GameLoop::new(Session::new(config, seed)),
            surface: CanvasSurface::new(ctx),
            scheduler: AnimationFrames {
                window: window.clone(),
                callback: None,
            },
        }));

        // One long-lived frame callback, re-requested every frame
        {
            let game_ref = game.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game_ref.borrow_mut().frame(time);
            });
            game.borrow_mut().scheduler.callback =
                Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        setup_keyboard(&window, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        {
            let mut g = game.borrow_mut();
            let WebGame {
                game_loop,
                scheduler,
                ..
            } = &mut *g;
            game_loop.start(scheduler);
        }

        log::info!("Coin Dodge running (seed {})", seed);
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<WebGame>>) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = normalize_key(&event.key());
                if is_bound(&key) {
                    event.prevent_default();
                }
                game.borrow_mut().game_loop.handle_key(&key, pressed);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<WebGame>>,
    ) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    let session = g.game_loop.session_mut();
                    session.engine_mut().release_all_keys();
                    if session.phase() == SessionPhase::Playing {
                        session.toggle_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: keyup never arrives, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut()
                    .game_loop
                    .session_mut()
                    .engine_mut()
                    .release_all_keys();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

/// Frames simulated by the headless run when no count is given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u32 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use coin_dodge::renderer::CommandBuffer;
    use coin_dodge::sim::Session;
    use coin_dodge::{GameConfig, GameLoop, ManualScheduler, QualityPreset, Settings};

    env_logger::init();
    log::info!("Coin Dodge (native) starting...");

    // Usage: coin-dodge [config.json] [frames]
    // COIN_DODGE_QUALITY=low|medium|high picks the visual preset
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring config {}: {}", path, e);
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };
    let frames = args
        .next()
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });

    let settings = match std::env::var("COIN_DODGE_QUALITY") {
        Ok(value) => match value.parse::<QualityPreset>() {
            Ok(preset) => Settings::from_preset(preset),
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    log::info!("Quality preset: {}", settings.quality);

    let mut session = Session::with_settings(config, settings, seed);
    session.set_autopilot(true);

    let mut game = GameLoop::new(session);
    let mut scheduler = ManualScheduler::new();
    let mut surface = CommandBuffer::new();
    game.start(&mut scheduler);

    // Simulated 60 Hz display
    let mut timestamp_ms = 0.0;
    for _ in 0..frames {
        if scheduler.take_pending().is_none() {
            break;
        }
        surface.clear();
        game.on_frame(timestamp_ms, &mut surface, &mut scheduler);
        timestamp_ms += 1000.0 / 60.0;
        if game.session().is_terminal() {
            break;
        }
    }
    game.stop(&mut scheduler);

    let session = game.session();
    log::info!(
        "Finished: {:?} with score {}/{} after {} frames ({} draw calls in last frame)",
        session.phase(),
        session.score(),
        session.config().win_score,
        session.frame_count(),
        surface.draw_count()
    );
}
