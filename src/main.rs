//! Bubble Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlCanvasElement, HtmlElement,
        HtmlInputElement, MouseEvent, TouchEvent,
    };

    use bubble_pop::audio::{SoundManager, WebAudioEngine};
    use bubble_pop::effects::{COMBO_PULSE_CLASS, COMBO_PULSE_MS, Overlay};
    use bubble_pop::persistence::LocalStore;
    use bubble_pop::renderer::{RenderState, build_scene};
    use bubble_pop::sim::{GameState, Phase, Session};
    use bubble_pop::{BestScore, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        sound: SoundManager<WebAudioEngine>,
        render_state: Option<RenderState>,
        store: LocalStore,
        settings: Settings,
        best: BestScore,
        canvas: HtmlCanvasElement,
        // Phase the DOM controls were last drawn for
        shown_phase: Option<Phase>,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, width: f32, height: f32) -> Self {
            let store = LocalStore::open();
            let settings = Settings::load(&store);
            let best = BestScore::load(&store);

            let state = GameState::new(seed, width, height, best.get());
            let session = Session::new(state, settings.spawn_params());

            let mut sound = SoundManager::new(seed.rotate_left(17));
            sound.toggle(settings.sound_enabled);

            Self {
                session,
                sound,
                render_state: None,
                store,
                settings,
                best,
                canvas,
                shown_phase: None,
            }
        }

        /// Pop whatever is under the pointer and fire the feedback
        fn tap(&mut self, x: f32, y: f32, now_ms: f64) {
            let Some(event) = self.session.tap(x, y, now_ms) else {
                return;
            };
            self.sound.play_pop_event(&event);
            if event.new_best && self.best.raise(event.pop_count) {
                if let Err(e) = self.best.save(&mut self.store) {
                    log::warn!("Best score not saved: {e}");
                }
            }
            for overlay in Overlay::for_pop(Vec2::new(x, y), &event) {
                show_overlay(&self.canvas, overlay);
            }
            if event.pulses_combo() {
                pulse_combo_counter();
            }
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(&mut self.store) {
                log::warn!("Settings not saved: {e}");
            }
        }

        /// Match the drawing buffer to the canvas' CSS size
        fn resize(&mut self) {
            let (width, height, dpr) = canvas_metrics(&self.canvas);
            let (px_w, px_h) = ((width * dpr) as u32, (height * dpr) as u32);
            self.canvas.set_width(px_w);
            self.canvas.set_height(px_h);
            self.session.state.resize(width as f32, height as f32);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(px_w, px_h, (width as f32, height as f32));
            }
            log::debug!("Canvas resized to {}x{} css px", width, height);
        }

        /// Render the current frame
        fn render(&mut self) {
            let phase = self.session.phase();
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.session.state, phase);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let score = &self.session.state.score;
            set_text(document, "popCount", &score.pop_count.to_string());
            set_text(document, "comboCount", &format!("x{}", score.combo));
            set_text(document, "bestScore", &score.best.to_string());

            let phase = self.session.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            set_hidden(document, "instructions", phase != Phase::Idle);
            set_hidden(document, "pausedOverlay", phase != Phase::Paused);

            if let Some(btn) = document.get_element_by_id("startBtn") {
                btn.set_inner_html(match phase {
                    Phase::Idle => "<span class=\"btn-icon\">▶</span> Start Game",
                    _ => "<span class=\"btn-icon\">■</span> Stop Game",
                });
            }
            if let Some(btn) = document.get_element_by_id("pauseBtn") {
                btn.set_inner_html(match phase {
                    Phase::Paused => "<span class=\"btn-icon\">▶</span> Resume",
                    _ => "<span class=\"btn-icon\">⏸</span> Pause",
                });
                let _ = if phase == Phase::Idle {
                    btn.set_attribute("disabled", "")
                } else {
                    btn.remove_attribute("disabled")
                };
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// CSS size and device pixel ratio
    fn canvas_metrics(canvas: &HtmlCanvasElement) -> (f64, f64, f64) {
        let rect = canvas.get_bounding_client_rect();
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        (rect.width(), rect.height(), dpr)
    }

    /// Run `f` once after `ms` milliseconds
    fn after_ms(window: &web_sys::Window, ms: i32, f: impl FnOnce() + 'static) {
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    /// Add an overlay element over the canvas and drop it when it expires
    fn show_overlay(canvas: &HtmlCanvasElement, overlay: Overlay) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(wrapper) = canvas.parent_element() else {
            return;
        };
        let Ok(el) = document
            .create_element("div")
            .and_then(|el| el.dyn_into::<HtmlElement>().map_err(JsValue::from))
        else {
            return;
        };

        el.set_class_name(overlay.class);
        if let Some(text) = overlay.text.as_deref() {
            el.set_text_content(Some(text));
        }
        let style = el.style();
        for (name, value) in &overlay.styles {
            let _ = style.set_property(name, value);
        }
        if wrapper.append_child(&el).is_err() {
            return;
        }

        after_ms(&window, overlay.lifetime_ms, move || el.remove());
    }

    /// Briefly flag the combo counter; the stylesheet scales and glows it
    fn pulse_combo_counter() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(el) = window
            .document()
            .and_then(|d| d.get_element_by_id("comboCount"))
        else {
            return;
        };
        let _ = el.class_list().add_1(COMBO_PULSE_CLASS);
        after_ms(&window, COMBO_PULSE_MS, move || {
            let _ = el.class_list().remove_1(COMBO_PULSE_CLASS);
        });
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bubble Pop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let (css_w, css_h, dpr) = canvas_metrics(&canvas);
        let width = (css_w * dpr) as u32;
        let height = (css_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            canvas.clone(),
            css_w as f32,
            css_h as f32,
        )));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (css_w as f32, css_h as f32))
                .await
                .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        sync_controls(&document, &game.borrow().settings);
        setup_input_handlers(&canvas, game.clone());
        setup_audio_unlock(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_settings(&document, game.clone());
        setup_resize(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bubble Pop running!");
        Ok(())
    }

    /// Reflect loaded settings in the form controls
    fn sync_controls(document: &Document, settings: &Settings) {
        if let Some(input) = input_by_id(document, "speedSlider") {
            input.set_value(&settings.speed.to_string());
        }
        if let Some(input) = input_by_id(document, "sizeSlider") {
            input.set_value(&settings.size.to_string());
        }
        if let Some(input) = input_by_id(document, "soundToggle") {
            input.set_checked(settings.sound_enabled);
        }
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().tap(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    event.time_stamp(),
                );
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().tap(x, y, event.time_stamp());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Browsers only allow an AudioContext after a user gesture
    fn setup_audio_unlock(document: &Document, game: Rc<RefCell<Game>>) {
        let options = AddEventListenerOptions::new();
        options.set_once(true);

        for event_type in ["click", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().sound.init(WebAudioEngine::new);
            });
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn on_click<F>(element: &Element, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            on_click(&btn, move |event| {
                game.borrow_mut().session.toggle_start(event.time_stamp());
            });
        }

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            on_click(&btn, move |event| {
                game.borrow_mut().session.toggle_pause(event.time_stamp());
            });
        }
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        // Sliders
        for (id, apply) in [
            ("speedSlider", Settings::set_speed as fn(&mut Settings, u32)),
            ("sizeSlider", Settings::set_size as fn(&mut Settings, u32)),
        ] {
            let Some(input) = input_by_id(document, id) else {
                continue;
            };
            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(value) = input_clone.value().parse::<u32>() else {
                    return;
                };
                let g = &mut *game.borrow_mut();
                apply(&mut g.settings, value);
                g.session.set_params(g.settings.spawn_params());
                g.save_settings();
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound toggle
        if let Some(input) = input_by_id(document, "soundToggle") {
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let enabled = input_clone.checked();
                let mut g = game.borrow_mut();
                g.settings.sound_enabled = enabled;
                g.sound.toggle(enabled);
                g.save_settings();
                log::info!("Sound {}", if enabled { "on" } else { "off" });
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.session.advance(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Bubble Pop failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: play a seeded session with an auto-clicker and report
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bubble_pop::audio::{AudioEngine, AudioError, NoiseBurst, SoundManager, Tone};
    use bubble_pop::consts::FRAME_MS;
    use bubble_pop::persistence::MemoryStore;
    use bubble_pop::sim::{GameState, Session};
    use bubble_pop::{BestScore, Settings};

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;
    const DEMO_FRAMES: u32 = 60 * 30;
    /// Auto-click cadence in frames
    const CLICK_EVERY: u32 = 24;

    /// Logs voices instead of playing them
    struct LogEngine;

    impl AudioEngine for LogEngine {
        fn sample_rate(&self) -> f32 {
            44_100.0
        }

        fn resume(&self) {}

        fn play_tone(&self, tone: &Tone) {
            log::trace!("tone {:?} at +{:.3}s", tone.waveform, tone.offset);
        }

        fn play_noise(&self, burst: &NoiseBurst) {
            log::trace!("noise {} samples @ {} Hz", burst.samples.len(), burst.center_hz);
        }
    }

    pub fn run(seed: u64) {
        let mut store = MemoryStore::new();
        let settings = Settings::default();
        let mut best = BestScore::load(&store);

        let state = GameState::new(seed, WIDTH, HEIGHT, best.get());
        let mut session = Session::new(state, settings.spawn_params());
        let mut sound = SoundManager::new(seed);
        sound.init(|| Ok::<_, AudioError>(LogEngine));

        session.start(0.0);
        let mut max_combo = 1;
        for frame in 1..=DEMO_FRAMES {
            let now = frame as f64 * FRAME_MS;
            session.advance(now);
            if frame % CLICK_EVERY != 0 {
                continue;
            }
            let Some(target) = session.state.bubbles.last().map(|b| b.pos) else {
                continue;
            };
            if let Some(event) = session.tap(target.x, target.y, now) {
                sound.play_pop_event(&event);
                max_combo = max_combo.max(event.combo);
                if event.new_best && best.raise(event.pop_count) {
                    if let Err(e) = best.save(&mut store) {
                        log::warn!("Best score not saved: {e}");
                    }
                }
            }
        }

        log::info!(
            "Popped {} bubbles, best combo x{}, {} still floating",
            session.state.score.pop_count,
            max_combo,
            session.state.bubbles.len()
        );
        session.stop();
        log::info!("Stored best score: {}", BestScore::load(&store).get());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bubble Pop (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB0B_B1E5);
    demo::run(seed);
}
