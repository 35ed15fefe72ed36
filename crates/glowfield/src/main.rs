use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glowfield_config::{Config, DisplayConfig};
use glowfield_core::{DisplaySurface, Size, Surface};
use glowfield_scene::{Animation, AnimationHandle, DisplayListWidget, FrameStatus, ResizeObserver};
use ratatui::{DefaultTerminal, Frame};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    if let Some(path) = &log_path {
        tracing::info!(path = %path.display(), "logging enabled");
    }
    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = App::new(config, &terminal).and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}

/// The main application which owns the animation and terminal plumbing.
#[derive(Debug)]
pub struct App {
    /// Terminal presentation settings.
    display: DisplayConfig,
    /// The running background animation.
    animation: Animation<DisplaySurface>,
    /// Stops the animation loop.
    handle: AnimationHandle,
    /// Feeds terminal resizes into the animation.
    resize: ResizeObserver,
}

impl App {
    /// Construct a new instance of [`App`] sized to the terminal.
    pub fn new(config: Config, terminal: &DefaultTerminal) -> color_eyre::Result<Self> {
        let area = terminal.size()?;
        let display = config.display;
        let surface = DisplaySurface::new(pixel_size(&display, area.width, area.height));
        let animation = glowfield_scene::start(surface, &config.resolved_scene());
        let handle = animation.handle();
        let resize = animation.resize_observer();
        Ok(Self {
            display,
            animation,
            handle,
            resize,
        })
    }

    /// Run the application's main loop until the animation stops.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        loop {
            match self.animation.poll(Instant::now()) {
                FrameStatus::Rendered => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                FrameStatus::Waiting(wait) => self.handle_crossterm_events(wait)?,
                FrameStatus::Stopped => break,
            }
        }
        tracing::info!(frames = self.animation.scene().frame_count(), "exiting");
        Ok(())
    }

    /// Paints the most recent frame.
    fn render(&self, frame: &mut Frame) {
        let surface = self.animation.surface();
        let widget = DisplayListWidget::new(surface.display_list(), surface.size())
            .background(self.display.background);
        frame.render_widget(widget, frame.area());
    }

    /// Reads the crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => {
                    self.resize.notify(pixel_size(&self.display, cols, rows));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.handle.stop()
            }
            (_, KeyCode::Char('v')) => {
                self.animation.scene_mut().spawn_vortex();
            }
            _ => {}
        }
    }
}

/// Surface size in pixels for a terminal of `cols` x `rows` cells.
fn pixel_size(display: &DisplayConfig, cols: u16, rows: u16) -> Size {
    Size::new(
        cols as f64 * display.cell_width_px,
        rows as f64 * display.cell_height_px,
    )
}
