//! Fish Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use fish_drift::platform::DomScene;
    use fish_drift::sim::{InputBuffer, SimState, ViewportMetrics, tick};
    use fish_drift::{Features, Tuning};

    /// Game instance holding all state
    struct Game {
        state: SimState,
        input: InputBuffer,
        scene: DomScene,
        features: Features,
    }

    impl Game {
        fn new(seed: u64, scene: DomScene, features: Features, tuning: Tuning) -> Self {
            let metrics = ViewportMetrics::from_probe(&scene);
            Self {
                state: SimState::new(seed, features, tuning, &metrics),
                input: InputBuffer::new(),
                scene,
                features,
            }
        }

        /// Step the simulation and draw the result
        fn frame(&mut self, time: f64) {
            let frame = tick(&mut self.state, &mut self.input, &self.scene, time);
            self.scene.render(&frame);

            if frame.relayout {
                self.scene.request_relayout();
            }

            if let Some(casting) = frame.casting_toggled {
                self.features.casting = casting;
                self.features.save();
                self.scene.set_casting(casting);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Fish Drift starting...");

        let features = Features::load();
        let tuning = Tuning::load();

        let Some(scene) = DomScene::bind(features.casting) else {
            log::warn!("No #fish element on the page, nothing to animate");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, scene, features, tuning)));
        log::info!("Simulation initialized with seed: {}", seed);

        setup_input_handlers(game.clone());

        // Start frame loop
        request_animation_frame(game);

        log::info!("Fish Drift running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.resized();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fish Drift (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the web version");

    let casting = std::env::args().any(|arg| arg == "--cast");
    headless::run(casting);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use fish_drift::sim::{
        CastPhase, InputBuffer, InputEvent, Key, SimState, StaticProbe, ViewportMetrics, tick,
    };
    use fish_drift::{Features, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u64 = 600;

    /// Scripted inputs: (frame, event)
    const SCRIPT: &[(u64, InputEvent)] = &[
        (30, InputEvent::KeyDown(Key::StepRight)),
        (60, InputEvent::KeyDown(Key::Surge)),
        (61, InputEvent::KeyDown(Key::Surge)),
        (90, InputEvent::KeyUp(Key::Surge)),
        (150, InputEvent::KeyDown(Key::StepLeft)),
        (151, InputEvent::KeyDown(Key::StepLeft)),
        (152, InputEvent::KeyDown(Key::StepLeft)),
        (300, InputEvent::KeyDown(Key::Pause)),
        (330, InputEvent::KeyDown(Key::Pause)),
        (400, InputEvent::KeyDown(Key::StepRight)),
        (420, InputEvent::KeyDown(Key::Surge)),
        (460, InputEvent::KeyUp(Key::Surge)),
    ];

    pub fn run(casting: bool) {
        let probe = StaticProbe::new(1200.0, 800.0).with_boat_center(320.0);
        let metrics = ViewportMetrics::from_probe(&probe);
        let mut state = SimState::new(2024, Features { casting }, Tuning::load(), &metrics);
        let mut input = InputBuffer::new();
        let mut cast_frames = 0u32;

        for frame_no in 0..FRAMES {
            for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame_no) {
                input.push(*event);
            }

            let frame = tick(&mut state, &mut input, &probe, frame_no as f64 * FRAME_MS);
            if state.cast.phase != CastPhase::Idle {
                cast_frames += 1;
            }

            if frame_no % 60 == 0 {
                log::info!(
                    "t={:>5.0}ms fish=({:>6.1}, {:>5.1}) {:?} speed={:+.1} hook_y={} rod={}{}",
                    frame.sim_ms,
                    frame.fish.pos.x,
                    frame.fish.pos.y,
                    frame.fish.facing,
                    state.fish.speed,
                    frame
                        .hook
                        .map(|h| format!("{:.1}", h.center_y))
                        .unwrap_or_else(|| "-".into()),
                    frame
                        .rod_rotation
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".into()),
                    if frame.paused { " [paused]" } else { "" },
                );
            }
        }

        log::info!(
            "Done: {} frames simulated, hook {:?} at y={:.1}, cast fired: {} ({} frames)",
            state.frame_count,
            state.hook.phase,
            state.hook.y,
            state.cast.fired,
            cast_frames,
        );
    }
}
