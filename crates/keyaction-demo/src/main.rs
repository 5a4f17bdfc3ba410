//! Interactive demo: opens a window, feeds keyboard events through an
//! [`ActionInput`], and logs every action that fires together with its
//! shortcut label. The `escape` action closes the window.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use keyaction::action_map::ESCAPE;
use keyaction::{ActionInput, ActionMap, KeyNotification, shortcut_label};
use keyaction_config::{CliArgs, Config};
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowAttributes, WindowId};

const WINDOW_TITLE: &str = "keyaction demo";
/// Wake-up interval between checks, well inside the just-pressed window.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Actions whose `just_pressed` is true at `now`, paired with their label.
fn fired_actions(input: &ActionInput, now: Instant) -> Vec<(String, String)> {
    input
        .actions()
        .names()
        .filter(|name| input.just_pressed_at(name, now).unwrap_or(false))
        .map(|name| {
            let label = shortcut_label(input.actions(), name).unwrap_or_default();
            (name.to_string(), label)
        })
        .collect()
}

fn log_conflicts(actions: &ActionMap) {
    for conflict in actions.detect_conflicts() {
        warn!(
            "Shortcut {} is bound to several actions: {}",
            conflict.chord,
            conflict.actions.join(", ")
        );
    }
}

struct DemoApp {
    window: Option<Window>,
    input: ActionInput,
    modifiers: ModifiersState,
    /// Actions logged on the previous check, so one press logs once.
    last_reported: Vec<String>,
}

impl DemoApp {
    fn new(actions: ActionMap) -> Self {
        let mut input = ActionInput::with_actions(actions);
        input.events_mut().on_input_pressed(|n: &mut KeyNotification| {
            debug!(key = %n.key, "input pressed");
        });
        input.events_mut().on_actions_updated(|actions| {
            info!("Action map now has {} entries", actions.len());
        });
        log_conflicts(input.actions());
        Self {
            window: None,
            input,
            modifiers: ModifiersState::empty(),
            last_reported: Vec::new(),
        }
    }

    fn report(&mut self, event_loop: &ActiveEventLoop) {
        let fired = fired_actions(&self.input, Instant::now());
        for (name, label) in &fired {
            if !self.last_reported.contains(name) {
                info!("Action {name} ({label})");
            }
        }
        if fired.iter().any(|(name, _)| name == ESCAPE) {
            info!("Escape action fired, shutting down");
            event_loop.exit();
        }
        self.last_reported = fired.into_iter().map(|(name, _)| name).collect();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(640.0, 360.0));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!("Window created, press keys to trigger actions");
                for name in self.input.actions().names() {
                    if let Some(label) = shortcut_label(self.input.actions(), name) {
                        info!("  {name}: {label}");
                    }
                }
                self.window = Some(window);
            }
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                let dispatch = self.input.process_event(&event, self.modifiers);
                if dispatch.default_prevented() {
                    debug!(key = ?event.logical_key, "default prevented");
                }
                if pressed {
                    self.report(event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.report(event_loop);
        event_loop.set_control_flow(ControlFlow::wait_duration(POLL_INTERVAL));
    }
}

fn config_dir(args: &CliArgs) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| Config::default_dir().ok())
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = config_dir(&args);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => {
            eprintln!("No config directory available, using defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    keyaction_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    info!("Starting {WINDOW_TITLE}");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {e}");
            return;
        }
    };
    let mut app = DemoApp::new(config.input.actions);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop failed: {e}");
    }
}
