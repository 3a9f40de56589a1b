//! Swarm Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use swarm_shooter::audio::{AudioManager, SoundEffect};
    use swarm_shooter::platform::{PlatformError, dom, tuning_from_attr};
    use swarm_shooter::renderer::{RenderError, RenderState, build_frame};
    use swarm_shooter::sim::{InputEvent, KeyBinding, pointer_to_world};
    use swarm_shooter::{FrameOutcome, FrameScheduler, GameSession};

    #[derive(Debug, Error)]
    enum StartupError {
        #[error(transparent)]
        Platform(#[from] PlatformError),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: RenderState,
        scheduler: FrameScheduler,
        audio: AudioManager,
        document: Document,
    }

    impl Game {
        /// World extent the canvas displays
        fn world_size(&self) -> Vec2 {
            let tuning = self.session.tuning();
            Vec2::new(tuning.world_width, tuning.world_height)
        }

        /// Run one scheduled frame; returns whether to request another
        fn frame(&mut self, now_ms: f64) -> bool {
            self.scheduler.begin_frame();
            let outcome = self.session.frame(now_ms);

            if outcome.simulated() {
                self.render();
                dom::update_hud(&self.document, &self.session.hud());
            }

            for event in self.session.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            if let FrameOutcome::Ended { .. } = outcome {
                dom::show_game_over(&self.document, &self.session.hud());
            }

            outcome.reschedule()
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_frame(self.session.world(), self.session.pointer());
            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Start or restart a run and hide the overlays
        fn begin_run(&mut self, restart: bool) {
            self.audio.resume();
            let now = dom::now_ms();
            if restart {
                self.session.restart(now);
            } else {
                self.session.start(now);
            }
            dom::show_running(&self.document);
            dom::update_hud(&self.document, &self.session.hud());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Swarm Shooter starting...");

        match start().await {
            Ok(()) => log::info!("Swarm Shooter ready"),
            Err(e) => log::error!("startup failed: {e}"),
        }
    }

    async fn start() -> Result<(), StartupError> {
        let document = dom::document()?;
        let canvas = dom::canvas(&document)?;

        let tuning = tuning_from_attr(dom::tuning_attr(&canvas).as_deref());
        let world_size = (tuning.world_width, tuning.world_height);
        let width = tuning.world_width as u32;
        let height = tuning.world_height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world_size).await?;

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state,
            scheduler: FrameScheduler::new(),
            audio: AudioManager::new(),
            document: document.clone(),
        }));

        // Draw the empty arena behind the start screen
        {
            let mut g = game.borrow_mut();
            g.render();
            dom::update_hud(&document, &g.session.hud());
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_session_buttons(&document, game)?;

        dom::set_visible(&document, dom::START_SCREEN_ID, true);
        Ok(())
    }

    /// Map a mouse event onto world coordinates
    fn pointer_position(canvas: &HtmlCanvasElement, event: &MouseEvent, world: Vec2) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        pointer_to_world(
            Vec2::new(event.client_x() as f32, event.client_y() as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
            world,
        )
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), PlatformError> {
        let window = dom::window()?;

        // Keyboard down: movement, fire, mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(binding) = KeyBinding::from_key(&event.key()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                match binding {
                    KeyBinding::Move(dir) => g.session.push_event(InputEvent::KeyDown(dir)),
                    KeyBinding::Fire => {
                        // Keep Space from scrolling the page
                        event.prevent_default();
                        g.session.push_event(InputEvent::Fire);
                    }
                    KeyBinding::Mute => {
                        if !event.repeat() {
                            g.audio.toggle_mute();
                        }
                    }
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(KeyBinding::Move(dir)) = KeyBinding::from_key(&event.key()) {
                    game.borrow_mut()
                        .session
                        .push_event(InputEvent::KeyUp(dir));
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        // Mouse move - aim
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = pointer_position(&canvas_clone, &event, g.world_size());
                g.session.push_event(InputEvent::PointerMove(pos));
            });
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        // Mouse down - aim and fire once
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let pos = pointer_position(&canvas_clone, &event, g.world_size());
                g.session.push_event(InputEvent::PointerMove(pos));
                g.session.push_event(InputEvent::PointerDown);
                g.session.push_event(InputEvent::Fire);
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        // Mouse up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.push_event(InputEvent::PointerUp);
            });
            canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_session_buttons(
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), PlatformError> {
        let buttons = [
            (dom::START_BUTTON_ID, false),
            (dom::RESTART_BUTTON_ID, true),
            (dom::GAME_OVER_RESTART_ID, true),
        ];

        for (id, restart) in buttons {
            let btn = dom::by_id(document, id)?;
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().begin_run(restart);
                schedule_frame(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(dom::js_error)?;
            closure.forget();
        }

        Ok(())
    }

    /// Request a frame unless one is already pending
    fn schedule_frame(game: &Rc<RefCell<Game>>) {
        if !game.borrow_mut().scheduler.try_schedule() {
            return;
        }
        if let Err(e) = request_animation_frame(game.clone()) {
            log::error!("failed to schedule frame: {e}");
            game.borrow_mut().scheduler.begin_frame();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        let window = dom::window()?;
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(dom::js_error)?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        // Same clock as session start, so the first delta is measured from the click
        let reschedule = game.borrow_mut().frame(dom::now_ms());
        if reschedule {
            schedule_frame(&game);
        }
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
    log::info!("Swarm Shooter (native) starting...");
    log::info!("Rendering needs the web build - run with `trunk serve`; running a headless session");

    headless::run(30.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session without a window: stand still and shoot at the nearest enemy
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use swarm_shooter::consts::DEFAULT_SEED;
    use swarm_shooter::sim::{GameEvent, InputEvent};
    use swarm_shooter::{FrameOutcome, GameSession, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FIRE_EVERY: u64 = 10;

    pub fn run(seconds: f64) {
        let mut session = GameSession::new(Tuning::default(), DEFAULT_SEED);
        session.start(0.0);

        let frames = (seconds * 1000.0 / FRAME_MS) as u64;
        let mut shots = 0u32;
        let mut kills = 0u32;
        let mut hits_taken = 0u32;
        let mut played = 0u64;

        for i in 1..=frames {
            if i % FIRE_EVERY == 0 {
                let world = session.world();
                let player = world.player.pos;
                let nearest = world
                    .enemies
                    .iter()
                    .min_by(|a, b| player.distance(a.pos).total_cmp(&player.distance(b.pos)));
                if let Some(target) = nearest {
                    let aim = target.pos;
                    session.push_event(InputEvent::PointerMove(aim));
                    session.push_event(InputEvent::Fire);
                }
            }

            let outcome = session.frame(i as f64 * FRAME_MS);
            played = i;

            for event in session.drain_events() {
                match event {
                    GameEvent::Shot => shots += 1,
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::PlayerHit { .. } => hits_taken += 1,
                    _ => {}
                }
            }

            if let FrameOutcome::Ended { final_score } = outcome {
                log::info!("player defeated after {:.1}s", i as f64 * FRAME_MS / 1000.0);
                log::info!("final score: {}", final_score);
                break;
            }
        }

        let hud = session.hud();
        log::info!(
            "headless run: {} frames, {} shots, {} kills, {} hits taken, {} enemies alive",
            played,
            shots,
            kills,
            hits_taken,
            session.world().enemies.len()
        );
        log::info!("{} | {}", hud.score_text(), hud.health_text());
    }
}
