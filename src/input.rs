use log::debug;
use std::collections::VecDeque;
use std::time::Duration;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

/// Window input the render loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    CloseRequested,
}

impl InputEvent {
    /// Key releases and auto-repeats produce nothing, so one physical press yields one event.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => Some(InputEvent::KeyPressed(*code)),
            _ => None,
        }
    }
}

/// Events collected during one poll, consumed in arrival order.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<InputEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// Anything that can fill the queue with pending input once per frame.
pub trait EventSource {
    fn poll_events(&mut self, queue: &mut EventQueue);
}

/// Pumps the winit event loop without blocking, translating window events as they arrive.
pub struct WindowEvents {
    event_loop: EventLoop<()>,
}

impl WindowEvents {
    pub fn new(event_loop: EventLoop<()>) -> Self {
        Self { event_loop }
    }
}

impl EventSource for WindowEvents {
    fn poll_events(&mut self, queue: &mut EventQueue) {
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                if let Event::WindowEvent { event, .. } = event {
                    if let Some(input) = InputEvent::from_window_event(&event) {
                        queue.push(input);
                    }
                }
            });

        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with code {}", code);
            queue.push(InputEvent::CloseRequested);
        }
    }
}
