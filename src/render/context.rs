use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, info};
use raw_window_handle::HasRawWindowHandle;
use std::ffi::CString;
use std::ptr;
use thiserror::Error;
use winit::{dpi::LogicalSize, event_loop::EventLoop, window::Window, window::WindowBuilder};

use crate::config::window::WindowConfig;
use crate::render::pipeline::RenderError;

/// Core profile version the built-in `#version 330 core` shaders need.
pub const GL_VERSION: (u8, u8) = (3, 3);

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("Failed to create OpenGL context: {0}")]
    Context(#[source] glutin::error::Error),
    #[error("Failed to create window surface: {0}")]
    Surface(#[source] glutin::error::Error),
    #[error("Failed to make OpenGL context current: {0}")]
    MakeCurrent(#[source] glutin::error::Error),
    #[error("Failed to load OpenGL function: {0}")]
    Loader(&'static str),
}

/// The window, its surface and the current OpenGL context. Owned by `main` for the life of
/// the process; dropping it tears the context down.
pub struct GlContext {
    // Field order is drop order: surface and context go before the window.
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl GlContext {
    pub fn create(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self, BootstrapError> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, pick_config)
            .map_err(|e| BootstrapError::Window(e.to_string()))?;

        let window =
            window.ok_or_else(|| BootstrapError::Window("no window was created".to_string()))?;
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = GL_VERSION;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(BootstrapError::Context)?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(BootstrapError::Surface)?
        };

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(BootstrapError::MakeCurrent)?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        });
        check_loaded()?;

        let context = Self {
            gl_surface,
            gl_context,
            window,
        };

        let (width, height) = context.framebuffer_size();
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }

        info!(
            "Created {}x{} window with OpenGL {}.{} core context",
            config.width, config.height, major, minor
        );
        Ok(context)
    }

    /// Size of the drawable area in physical pixels.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn swap_buffers(&self) -> Result<(), RenderError> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(RenderError::Swap)
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|accum, config| {
            if config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .expect("glutin reports an error instead of offering zero configs")
}

/// Entry points every frame depends on. A missing one means the loader found no usable driver.
fn check_loaded() -> Result<(), BootstrapError> {
    let required: [(&'static str, bool); 8] = [
        ("glClearColor", gl::ClearColor::is_loaded()),
        ("glClear", gl::Clear::is_loaded()),
        ("glViewport", gl::Viewport::is_loaded()),
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glDrawElements", gl::DrawElements::is_loaded()),
    ];

    match required.iter().find(|(_, loaded)| !*loaded) {
        Some(&(name, _)) => Err(BootstrapError::Loader(name)),
        None => {
            debug!("OpenGL functions loaded");
            Ok(())
        }
    }
}
