//! Runs against a real window and OpenGL driver, so it is ignored by default:
//! `cargo test -- --ignored` on a machine with a display.
#![cfg(target_os = "linux")]

use std::path::Path;

use learnopengl::assets::shaders::{ShaderSource, SourceText};
use learnopengl::config::{ShaderConfig, ShaderSourceMode, WindowConfig};
use learnopengl::input::{EventQueue, EventSource, InputEvent};
use learnopengl::render::shaders::{builtin, program_from_config};
use learnopengl::render::{
    build_program, FrameTarget, GlContext, GlFrame, LoopState, Mesh, MeshData, RenderLoop, Scene,
    ShaderError, ShaderKind, ShaderUnit,
};
use winit::event_loop::{EventLoop, EventLoopBuilder};
use winit::keyboard::KeyCode;
use winit::platform::x11::EventLoopBuilderExtX11;

const BACKGROUND: [f32; 4] = [0.2, 0.3, 0.3, 1.0];
const ORANGE: [u8; 4] = [255, 128, 51, 255];

fn event_loop() -> EventLoop<()> {
    let mut builder = EventLoopBuilder::new();
    EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
    builder.build().unwrap()
}

fn pixel_at_ndc(context: &GlContext, x: f32, y: f32) -> [u8; 4] {
    let (width, height) = context.framebuffer_size();
    let px = ((x + 1.0) / 2.0 * width as f32) as i32;
    let py = ((y + 1.0) / 2.0 * height as f32) as i32;
    let mut pixel = [0u8; 4];
    unsafe {
        gl::ReadPixels(
            px,
            py,
            1,
            1,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixel.as_mut_ptr() as *mut _,
        );
    }
    pixel
}

fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (*a as i32 - *e as i32).abs() <= 2,
            "pixel {:?} differs from {:?}",
            actual,
            expected
        );
    }
}

struct EscapeAfter {
    polls_left: usize,
}

impl EventSource for EscapeAfter {
    fn poll_events(&mut self, queue: &mut EventQueue) {
        if self.polls_left == 0 {
            queue.push(InputEvent::KeyPressed(KeyCode::Escape));
        } else {
            self.polls_left -= 1;
        }
    }
}

// One test function: winit allows a single event loop per process.
#[test]
#[ignore = "needs a display and an OpenGL 3.3 driver"]
fn test_gl_pipeline_end_to_end() {
    let event_loop = event_loop();
    let context = GlContext::create(&event_loop, &WindowConfig::default()).unwrap();

    let mut major = 0;
    let mut minor = 0;
    unsafe {
        gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
        gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
    }
    assert!((major, minor) >= (3, 3));

    // A valid pair links and becomes the current program.
    let program = build_program(
        ShaderSource::Inline(builtin::VERTEX_SRC),
        ShaderSource::Inline(builtin::FRAGMENT_SRC),
        true,
    )
    .unwrap();
    assert!(program.is_linked());
    let mut current = 0;
    unsafe { gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut current) };
    assert_eq!(current as u32, program.id());

    // The same sources loaded from disk.
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let from_files = program_from_config(&ShaderConfig {
        source: ShaderSourceMode::Files,
        vertex_path: root.join("assets/shaders/basic.vert"),
        fragment_path: root.join("assets/shaders/basic.frag"),
        strict: true,
    })
    .unwrap();
    assert!(from_files.is_linked());

    // Broken source: compile fails with a log, and by default the failure only propagates.
    let broken_src = "#version 330 core\nvoid main() { this is not glsl }\n";
    let broken = ShaderUnit::compile(&SourceText::from(broken_src), ShaderKind::Fragment);
    assert!(!broken.is_compiled());
    assert!(!broken.info_log().is_empty());
    drop(broken);

    let lenient = build_program(
        ShaderSource::Inline(builtin::VERTEX_SRC),
        ShaderSource::Inline(broken_src),
        false,
    )
    .unwrap();
    assert!(!lenient.is_linked());
    drop(lenient);

    let strict = build_program(
        ShaderSource::Inline(builtin::VERTEX_SRC),
        ShaderSource::Inline(broken_src),
        true,
    );
    assert!(matches!(
        strict,
        Err(ShaderError::Compilation {
            kind: ShaderKind::Fragment,
            ..
        })
    ));

    let missing = root.join("assets/shaders/missing.frag");
    let strict_missing = build_program(
        ShaderSource::Inline(builtin::VERTEX_SRC),
        ShaderSource::File(&missing),
        true,
    );
    assert!(matches!(strict_missing, Err(ShaderError::MissingSource(_))));

    // Triangle: the centre is covered, the upper right quadrant at (0.4, 0.4) is not.
    let triangle = Mesh::upload(&MeshData::for_scene(Scene::Triangle));
    let mut frame = GlFrame::new(&context, &program, &triangle);
    frame.clear(BACKGROUND);
    frame.draw();
    assert_close(pixel_at_ndc(&context, 0.0, -0.1), ORANGE);
    assert_close(pixel_at_ndc(&context, 0.4, 0.4), [51, 77, 77, 255]);
    assert_close(pixel_at_ndc(&context, 0.9, 0.9), [51, 77, 77, 255]);
    frame.present().unwrap();

    // Quad: fills the square spanned by (+-0.5, +-0.5).
    let quad = Mesh::upload(&MeshData::for_scene(Scene::Quad));
    let mut frame = GlFrame::new(&context, &program, &quad);
    frame.clear(BACKGROUND);
    frame.draw();
    assert_close(pixel_at_ndc(&context, 0.4, 0.4), ORANGE);
    assert_close(pixel_at_ndc(&context, -0.4, 0.4), ORANGE);
    assert_close(pixel_at_ndc(&context, -0.4, -0.4), ORANGE);
    assert_close(pixel_at_ndc(&context, 0.6, 0.6), [51, 77, 77, 255]);
    frame.present().unwrap();

    // The loop drives the same frame until Escape.
    let mut render_loop = RenderLoop::new(BACKGROUND);
    let mut events = EscapeAfter { polls_left: 2 };
    let mut frame = GlFrame::new(&context, &program, &quad);
    assert_eq!(render_loop.run(&mut events, &mut frame).unwrap(), 3);
    assert_eq!(render_loop.state(), LoopState::Terminated);
}
