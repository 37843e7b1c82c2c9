use log::{debug, info};
use thiserror::Error;
use winit::keyboard::KeyCode;

use crate::input::{EventQueue, EventSource, InputEvent};
use crate::render::{context::GlContext, mesh::Mesh, shaders::ShaderProgram};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to swap buffers: {0}")]
    Swap(#[source] glutin::error::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    ClosingRequested,
    Terminated,
}

/// Where a frame goes: cleared, drawn into once, then presented.
pub trait FrameTarget {
    fn clear(&mut self, color: [f32; 4]);
    fn draw(&mut self);
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draws one mesh with one program into the window's back buffer.
pub struct GlFrame<'a> {
    context: &'a GlContext,
    program: &'a ShaderProgram,
    mesh: &'a Mesh,
}

impl<'a> GlFrame<'a> {
    pub fn new(context: &'a GlContext, program: &'a ShaderProgram, mesh: &'a Mesh) -> Self {
        Self {
            context,
            program,
            mesh,
        }
    }
}

impl FrameTarget for GlFrame<'_> {
    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn draw(&mut self) {
        self.program.set_used();
        self.mesh.draw();
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.context.swap_buffers()
    }
}

/// Poll, clear, draw, present until Escape or a close request ends the loop.
pub struct RenderLoop {
    state: LoopState,
    clear_color: [f32; 4],
    queue: EventQueue,
    frames: u64,
}

impl RenderLoop {
    pub fn new(clear_color: [f32; 4]) -> Self {
        Self {
            state: LoopState::Running,
            clear_color,
            queue: EventQueue::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs until closing is requested and returns the number of presented frames.
    ///
    /// The close check happens at the top of each iteration, so the frame during which Escape
    /// arrives is still drawn and presented.
    pub fn run<E, F>(&mut self, events: &mut E, target: &mut F) -> Result<u64, RenderError>
    where
        E: EventSource,
        F: FrameTarget,
    {
        info!("Commencing");

        while self.state == LoopState::Running {
            events.poll_events(&mut self.queue);
            while let Some(event) = self.queue.pop() {
                self.handle_event(event);
            }

            target.clear(self.clear_color);
            target.draw();
            target.present()?;
            self.frames += 1;
        }

        self.state = LoopState::Terminated;
        debug!("Render loop terminated after {} frames", self.frames);
        Ok(self.frames)
    }

    fn handle_event(&mut self, event: InputEvent) {
        if self.state != LoopState::Running {
            return;
        }

        match event {
            InputEvent::KeyPressed(KeyCode::Escape) => {
                info!("Complete");
                self.state = LoopState::ClosingRequested;
            }
            InputEvent::CloseRequested => {
                debug!("Close requested by window manager");
                self.state = LoopState::ClosingRequested;
            }
            InputEvent::KeyPressed(_) => {}
        }
    }
}
