//! ChargeJump - charge-and-release precision platformer
//!
//! Opens a window, feeds keyboard input to the simulation once per redraw
//! and shows the run status in the title bar.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use chargejump::config::{AppConfig, ConfigError};
use chargejump::input::{InputAction, InputMapper};
use chargejump::systems::{SimulationSystem, WindowSystem};
use chargejump_core::{FileStore, GameSession, Level};
use chargejump_input::KeyboardController;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    session: GameSession,
    controller: KeyboardController,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let level = Level::load_or_sample(&config.level.path);
        let store = FileStore::new(&config.save.dir);
        let session = GameSession::new(
            &level,
            config.movement.clone(),
            config.gameplay.clone(),
            Box::new(store),
        );

        Self {
            config,
            window: None,
            session,
            controller: KeyboardController::new(),
            simulation: SimulationSystem::new(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
                self.simulation.reset_clock();
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                self.controller.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(InputAction::Exit) => {
                            event_loop.exit();
                            return;
                        }
                        Some(InputAction::ToggleFullscreen) => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.simulation.update(&mut self.session, &mut self.controller);

                if let Some(run) = &result.report.finished {
                    if run.new_best {
                        log::info!("New best time!");
                    }
                }

                if let Some(window) = &mut self.window {
                    window.update_title(&result.snapshot.hud_line());
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn load_config() -> (AppConfig, Option<ConfigError>) {
    match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

fn main() {
    let (config, config_error) = load_config();

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting ChargeJump");
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
