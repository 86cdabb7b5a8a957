//! The dashboard application: state, event handling and rendering.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tally_config::Config;
use tally_core::{
    BALANCE_ELEMENT_ID, BalanceAnimator, Element, Page, Schedule, VALUE_ATTRIBUTE, format_amount,
    initialize,
};
use tally_fonts::{ART_HEIGHT, build_amount_art, group_thousands};
use tally_particles::ParticleField;
use tracing::{info, warn};

/// How long to wait for input before drawing the next frame.
const FRAME_POLL: Duration = Duration::from_millis(8);

/// Build the dashboard page. Without a balance the page has no balance element.
pub fn build_page(balance: Option<&str>) -> Page {
    let page = Page::new().with_element(Element::new("label").with_text("Available balance"));
    match balance {
        Some(value) => page.with_element(
            Element::new(BALANCE_ELEMENT_ID)
                .with_data(VALUE_ATTRIBUTE, value)
                .with_text(format_amount(0.0)),
        ),
        None => page,
    }
}

/// The main application which holds the state and logic of the dashboard.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Effective settings (file plus command-line overrides).
    config: Config,
    /// Settings as loaded from disk, written back when the theme changes.
    saved: Config,
    /// Where `saved` is persisted, if anywhere.
    config_path: Option<PathBuf>,
    /// Loaded page; the animation renders into its balance element.
    page: Page,
    /// Current animation run, if the page has a usable balance.
    animator: Option<BalanceAnimator>,
    /// Tick schedule of the current run.
    schedule: Schedule,
    /// When the current run was triggered.
    loaded_at: Instant,
    /// Why the balance could not be animated.
    balance_error: Option<String>,
    /// Particle background.
    particles: ParticleField,
    /// When the application started.
    started_at: Instant,
}

impl App {
    /// Construct a new instance of [`App`] and trigger the first page load.
    pub fn new(config: Config, saved: Config, config_path: Option<PathBuf>) -> Self {
        let page = build_page(config.balance.as_deref());
        let particles = ParticleField::new(config.particles.clone());
        let mut app = Self {
            running: false,
            schedule: Schedule::new(config.tick_period()),
            config,
            saved,
            config_path,
            page,
            animator: None,
            loaded_at: Instant::now(),
            balance_error: None,
            particles,
            started_at: Instant::now(),
        };
        app.load_page();
        app
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.advance_animation(self.loaded_at.elapsed());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Fire the page-load trigger: start a fresh animation run.
    fn load_page(&mut self) {
        self.schedule.cancel();
        self.schedule = Schedule::new(self.config.tick_period());
        self.loaded_at = Instant::now();
        self.balance_error = None;

        if let Some(element) = self.page.element_mut(BALANCE_ELEMENT_ID) {
            element.set_text_content(&format_amount(0.0));
        }

        self.animator = match initialize(&self.page) {
            Ok(animator) => animator,
            Err(e) => {
                warn!(error = %e, "balance animation skipped");
                self.balance_error = Some(e.to_string());
                None
            }
        };
    }

    /// Run the ticks that fell due `elapsed` after the page load.
    fn advance_animation(&mut self, elapsed: Duration) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        let due = self.schedule.due_ticks(elapsed);
        if due == 0 {
            return;
        }
        let Some(element) = self.page.element_mut(BALANCE_ELEMENT_ID) else {
            return;
        };

        animator.advance(due, |text| element.set_text_content(text));
        if animator.is_done() && self.schedule.cancel() {
            info!(ticks = animator.ticks(), text = element.text_content(), "balance settled");
        }
    }

    /// Text currently shown in the balance element.
    fn balance_text(&self) -> Option<&str> {
        self.page
            .element(BALANCE_ELEMENT_ID)
            .map(Element::text_content)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        if self.config.particles_enabled {
            let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
            self.particles.render(frame, elapsed_ms);
        }

        let color = self.config.color_theme.color();
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Fill(1),                   // Top padding
            Constraint::Length(1),                 // Label
            Constraint::Length(1),                 // Spacing
            Constraint::Length(ART_HEIGHT as u16), // Big digits
            Constraint::Length(1),                 // Spacing
            Constraint::Length(1),                 // Date
            Constraint::Fill(1),                   // Bottom padding
            Constraint::Length(1),                 // Help text
        ])
        .split(area);

        let label = self
            .page
            .element("label")
            .map(Element::text_content)
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(label.to_string())
                .style(Style::new().fg(color).bold())
                .alignment(Alignment::Center),
            chunks[1],
        );

        self.render_balance(frame, chunks[3]);

        let date = Local::now().format("%A, %B %d, %Y").to_string();
        frame.render_widget(
            Paragraph::new(date)
                .style(Style::new().fg(color))
                .alignment(Alignment::Center),
            chunks[5],
        );

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "r".bold().fg(color),
            " replay  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "p".bold().fg(color),
            " particles".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[7]);
    }

    /// Draw the balance as block digits, or as plain text when too narrow.
    fn render_balance(&self, frame: &mut Frame, area: Rect) {
        let color = self.config.color_theme.color();

        let text = match (self.balance_error.as_deref(), self.balance_text()) {
            (None, Some(text)) => text,
            (error, _) => {
                let message = error.unwrap_or("No balance to show");
                frame.render_widget(
                    Paragraph::new(message.to_string())
                        .dark_gray()
                        .alignment(Alignment::Center),
                    area,
                );
                return;
            }
        };

        let grouped = group_thousands(text);
        let art = build_amount_art(&grouped);
        let art_width = art.first().map_or(0, |line| line.chars().count());

        let widget = if art_width <= area.width as usize {
            let lines: Vec<Line> = art
                .into_iter()
                .map(|s| Line::from(s).style(Style::new().fg(color)))
                .collect();
            Paragraph::new(lines)
        } else {
            Paragraph::new(grouped).style(Style::new().fg(color).bold())
        };
        frame.render_widget(widget.alignment(Alignment::Center), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so animation ticks are drawn promptly.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.particles.set_pointer(None),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.load_page(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('p')) => self.toggle_particles(),
            _ => {}
        }
    }

    /// Feed pointer movement to the particle field.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.particles.set_pointer(Some((mouse.column, mouse.row)));
        }
    }

    /// Cycle through color themes and remember the choice.
    fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        self.saved.color_theme = self.config.color_theme;

        if let Some(path) = &self.config_path {
            if let Err(e) = self.saved.save_to(path) {
                warn!(error = %e, "failed to save color theme");
            }
        }
    }

    fn toggle_particles(&mut self) {
        self.config.particles_enabled = !self.config.particles_enabled;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
