#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use log::{error, info, warn};
use simple_logger::SimpleLogger;
use winit::event_loop::EventLoop;

use learnopengl::{
    config::{load_from_path, load_or_create_config, AppConfig},
    input::WindowEvents,
    render::{program_from_config, BootstrapError, GlContext, GlFrame, Mesh, MeshData, RenderLoop},
    render::shaders::ShaderProgram,
    utils::LearnGlError,
};

struct App {
    // GL objects must be released while the context is still alive.
    mesh: Mesh,
    program: ShaderProgram,
    context: GlContext,
    events: WindowEvents,
    render_loop: RenderLoop,
}

impl App {
    fn new(config: &AppConfig) -> Result<Self, LearnGlError> {
        info!("Initializing application...");

        let event_loop = EventLoop::new().map_err(BootstrapError::from)?;
        let context = GlContext::create(&event_loop, &config.window)?;

        let program = program_from_config(&config.shaders)?;
        let mesh = Mesh::upload(&MeshData::for_scene(config.rendering.scene));

        Ok(Self {
            mesh,
            program,
            context,
            events: WindowEvents::new(event_loop),
            render_loop: RenderLoop::new(config.rendering.clear_color),
        })
    }

    fn run(&mut self) -> Result<u64, LearnGlError> {
        let mut frame = GlFrame::new(&self.context, &self.program, &self.mesh);
        Ok(self.render_loop.run(&mut self.events, &mut frame)?)
    }
}

/// The first command-line argument names a config file; otherwise the per-user one is used.
fn load_config() -> (AppConfig, Option<anyhow::Error>) {
    let result = match std::env::args_os().nth(1) {
        Some(path) => load_from_path(path),
        None => load_or_create_config(),
    };

    match result {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

fn run() -> i32 {
    let (config, config_error) = load_config();

    if let Err(e) = SimpleLogger::new()
        .with_level(config.effective_log_level())
        .init()
    {
        eprintln!("Failed to install logger: {}", e);
    }

    if let Some(e) = config_error {
        warn!("Using default configuration: {:#}", e);
    }

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("{}", e);
            return e.exit_code();
        }
    };

    match app.run() {
        Ok(frames) => {
            info!("Exited normally after {} frames", frames);
            0
        }
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}

fn main() {
    let code = run();
    std::process::exit(code);
}
