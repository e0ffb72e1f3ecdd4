/// Terminal previewer for converted binary meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use obj2bin_core::{Camera, Mesh, Orbit, Triangle};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod shadow;

pub use renderer::AsciiRenderer;

/// Orbit step per key press, in radians
const ORBIT_STEP: f32 = 0.1;

/// Main application struct for previewing a mesh in the terminal
pub struct TerminalApp {
    mesh: Mesh,
    shadows: Vec<Triangle>,
    show_shadows: bool,
    orbit: Orbit,
    renderer: AsciiRenderer,
    running: bool,
}

impl TerminalApp {
    /// Size the preview to the current terminal, leaving a row for the status line
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(
            mesh,
            width as usize,
            height.saturating_sub(1) as usize,
        ))
    }

    pub fn with_size(mesh: Mesh, width: usize, height: usize) -> Self {
        let shadows = shadow::cast_shadows(&mesh, &shadow::default_light());
        Self {
            mesh,
            shadows,
            show_shadows: true,
            orbit: Orbit::default(),
            renderer: AsciiRenderer::new(width, height),
            running: true,
        }
    }

    pub fn with_light(mut self, light: Point3<f32>) -> Self {
        self.shadows = shadow::cast_shadows(&self.mesh, &light);
        self
    }

    pub fn show_shadows(mut self, show: bool) -> Self {
        self.show_shadows = show;
        self
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();
        let cleanup = restore_terminal(&mut stdout(), terminal::disable_raw_mode());

        result.and(cleanup)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut dirty = true;

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press | KeyEventKind::Repeat,
                        ..
                    }) => {
                        self.handle_key(code);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        self.renderer =
                            AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            // The scene only changes on input
            if dirty {
                self.render()?;
                dirty = false;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.orbit.rotate(ORBIT_STEP);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.orbit.rotate(-ORBIT_STEP);
            }
            KeyCode::Char('s') => {
                self.show_shadows = !self.show_shadows;
            }
            _ => {}
        }
    }

    /// Rasterize the current view into the renderer's buffers
    pub fn render_frame(&mut self) -> &AsciiRenderer {
        let camera = Camera::orbiting(&self.orbit, self.renderer.aspect());

        self.renderer.clear();
        if self.show_shadows {
            self.renderer.render_shadows(&self.shadows, &camera);
        }
        self.renderer.render_mesh(&self.mesh, &camera);

        &self.renderer
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "obj2bin-view | {} triangles | orbit {:.0}° | ←/→ orbit  S shadows  Q quit\r\n",
                self.mesh.len(),
                self.orbit.angle.to_degrees(),
            )),
            ResetColor
        )?;
        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

/// Leave the alternate screen and show the cursor whatever `raw_mode` reports
fn restore_terminal<W: Write>(out: &mut W, raw_mode: io::Result<()>) -> io::Result<()> {
    let screen = execute!(out, terminal::LeaveAlternateScreen, cursor::Show);
    raw_mode.and(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj2bin_core::Vertex;

    fn app() -> TerminalApp {
        let mesh = Mesh::from(vec![Triangle::new(
            Vertex::new(-6.0, -8.0, 0.0),
            Vertex::new(6.0, -8.0, 0.0),
            Vertex::new(0.0, 4.0, 0.0),
        )]);
        TerminalApp::with_size(mesh, 40, 20)
    }

    #[test]
    fn test_orbit_keys() {
        let mut app = app();
        let start = app.orbit().angle;

        app.handle_key(KeyCode::Right);
        assert!((app.orbit().angle - (start + ORBIT_STEP)).abs() < 1e-6);

        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Char('a'));
        assert!((app.orbit().angle - (start - ORBIT_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_restore_terminal_after_raw_mode_failure() {
        let mut out = Vec::new();
        let raw_mode = Err(io::Error::new(io::ErrorKind::Other, "raw mode"));
        let err = restore_terminal(&mut out, raw_mode).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[?1049l"), "{text:?}");
        assert!(text.contains("\x1b[?25h"), "{text:?}");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('x'));
        assert!(app.is_running());
        app.handle_key(KeyCode::Esc);
        assert!(!app.is_running());
    }

    #[test]
    fn test_render_frame_draws_mesh() {
        let mut app = app();
        let renderer = app.render_frame();
        let drawn: usize = (0..renderer.height())
            .map(|y| renderer.row(y).chars().filter(|&c| c != ' ' && c != '.').count())
            .sum();
        assert!(drawn > 0);
    }

    #[test]
    fn test_shadow_toggle_only_affects_shadow_cells() {
        let mut with = app();
        let mut without = app().show_shadows(false);
        let a = with.render_frame();
        let b = without.render_frame();
        for y in 0..a.height() {
            for (ca, cb) in a.row(y).chars().zip(b.row(y).chars()) {
                if ca != '.' {
                    assert_eq!(ca, cb);
                }
            }
        }
        assert!((0..b.height()).all(|y| !b.row(y).contains('.')));
    }
}
