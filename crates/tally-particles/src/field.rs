//! Particle field state management.

use ratatui::{Frame, widgets::Paragraph};
use tally_core::{HoverMode, ParticleConfig};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::chars::particle_char;
use crate::color::{fade, parse_hex_color};
use crate::particle::Particle;

/// Virtual pixels per terminal column.
pub const PX_PER_COL: f64 = 8.0;

/// Virtual pixels per terminal row.
pub const PX_PER_ROW: f64 = 16.0;

/// Duration of one 60 Hz frame in milliseconds.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest step taken in one update, in frames. Keeps particles from jumping
/// after a stalled frame.
const MAX_FRAMES_PER_UPDATE: f64 = 3.0;

/// Pointer radius for repulse mode, in pixels.
const REPULSE_DISTANCE: f64 = 200.0;

/// Pointer radius for grab mode, in pixels.
const GRAB_DISTANCE: f64 = 140.0;

/// Links dimmer than this are not drawn.
const MIN_LINK_ALPHA: f64 = 0.02;

/// Color used when the configured one cannot be parsed.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

/// Particle network background state.
#[derive(Debug)]
pub struct ParticleField {
    /// Configuration the field was created with.
    config: ParticleConfig,
    /// Parsed particle color.
    particle_rgb: (u8, u8, u8),
    /// Parsed link color.
    link_rgb: (u8, u8, u8),
    /// Live particles, in canvas pixels.
    particles: Vec<Particle>,
    /// Pointer position in canvas pixels.
    pointer: Option<(f64, f64)>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Last update time in milliseconds.
    last_update_ms: u64,
    rng: fastrand::Rng,
}

impl ParticleField {
    /// Create a field with a random seed.
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_seed(config, fastrand::u64(..))
    }

    /// Create a field with a fixed seed, for reproducible layouts.
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        let particle_rgb = parse_color_or_fallback(&config.particles.color.value);
        let link_rgb = parse_color_or_fallback(&config.particles.line_linked.color);

        Self {
            config,
            particle_rgb,
            link_rgb,
            particles: Vec::new(),
            pointer: None,
            last_width: 0,
            last_height: 0,
            last_update_ms: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particle positions in canvas pixels.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.particles.iter().map(|p| (p.x, p.y))
    }

    fn canvas_size(&self) -> (f64, f64) {
        (
            self.last_width as f64 * PX_PER_COL,
            self.last_height as f64 * PX_PER_ROW,
        )
    }

    /// Respawn all particles for a terminal of `width` x `height` cells.
    ///
    /// Does nothing if the size is unchanged and particles already exist.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.last_width && height == self.last_height && !self.particles.is_empty() {
            return;
        }

        self.last_width = width;
        self.last_height = height;
        self.pointer = None;

        let (w, h) = self.canvas_size();
        let count = if width == 0 || height == 0 {
            0
        } else {
            self.config.particles.number.value
        };
        let radius = self.config.particles.size.value;
        self.particles = (0..count)
            .map(|_| Particle::spawn(&mut self.rng, w, h, radius))
            .collect();

        debug!(width, height, count, "particle field resized");
    }

    /// Track the pointer at a terminal cell, or clear it with `None`.
    pub fn set_pointer(&mut self, cell: Option<(u16, u16)>) {
        self.pointer = cell.map(|(col, row)| {
            (
                (col as f64 + 0.5) * PX_PER_COL,
                (row as f64 + 0.5) * PX_PER_ROW,
            )
        });
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Advance the simulation by `delta_ms` milliseconds.
    pub fn update(&mut self, delta_ms: u64) {
        let frames = (delta_ms as f64 / FRAME_MS).min(MAX_FRAMES_PER_UPDATE);
        if frames <= 0.0 {
            return;
        }

        let (w, h) = self.canvas_size();
        let speed = self.config.particles.movement.speed;
        let repulse_from = self.pointer.filter(|_| self.hover_mode() == Some(HoverMode::Repulse));

        for p in &mut self.particles {
            p.drift(speed, frames, w, h);
            if let Some((px, py)) = repulse_from {
                p.repulse(px, py, REPULSE_DISTANCE, frames, w, h);
            }
        }
    }

    fn hover_mode(&self) -> Option<HoverMode> {
        let hover = &self.config.interactivity.events.onhover;
        hover.enable.then_some(hover.mode)
    }

    /// Render the field to the frame, advancing it to `elapsed_ms`.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        let area = frame.area();
        self.resize(area.width, area.height);

        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        self.update(delta_ms);

        frame.render_widget(Paragraph::new(self.draw().into_lines()), area);
    }

    /// Draw links, pointer links and particles into a fresh canvas.
    fn draw(&self) -> Canvas {
        let mut canvas = Canvas::new(self.last_width, self.last_height);
        let links = &self.config.particles.line_linked;

        if links.enable && links.distance > 0.0 {
            for (i, a) in self.particles.iter().enumerate() {
                for b in &self.particles[i + 1..] {
                    let dist = a.distance_to(b.x, b.y);
                    let alpha = links.opacity * (1.0 - dist / links.distance);
                    if dist <= links.distance && alpha > MIN_LINK_ALPHA {
                        canvas.link(to_cell(a.x, a.y), to_cell(b.x, b.y), self.link_rgb, alpha);
                    }
                }
            }
        }

        if let (Some(HoverMode::Grab), Some((px, py))) = (self.hover_mode(), self.pointer) {
            for p in &self.particles {
                let alpha = 1.0 - p.distance_to(px, py) / GRAB_DISTANCE;
                if alpha > MIN_LINK_ALPHA {
                    canvas.link(to_cell(px, py), to_cell(p.x, p.y), self.link_rgb, alpha);
                }
            }
        }

        let color = fade(self.particle_rgb, 1.0);
        for p in &self.particles {
            let (col, row) = to_cell(p.x, p.y);
            canvas.put(col, row, particle_char(p.radius), color);
        }

        canvas
    }
}

fn to_cell(x: f64, y: f64) -> (i32, i32) {
    ((x / PX_PER_COL).floor() as i32, (y / PX_PER_ROW).floor() as i32)
}

fn parse_color_or_fallback(hex: &str) -> (u8, u8, u8) {
    parse_hex_color(hex).unwrap_or_else(|| {
        warn!(color = hex, "invalid particle color, using white");
        FALLBACK_RGB
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use tally_core::ValueConfig;

    use crate::chars::{LINK_CHAR, PARTICLE_CHARS};

    fn config_with(count: u32) -> ParticleConfig {
        let mut config = ParticleConfig::default();
        config.particles.number = ValueConfig::new(count);
        config
    }

    #[test]
    fn test_resize_spawns_configured_count() {
        let mut field = ParticleField::with_seed(ParticleConfig::default(), 1);
        assert!(field.is_empty());
        field.resize(80, 24);
        assert_eq!(field.len(), 80);
        for (x, y) in field.positions() {
            assert!((0.0..80.0 * PX_PER_COL).contains(&x));
            assert!((0.0..24.0 * PX_PER_ROW).contains(&y));
        }
    }

    #[test]
    fn test_same_size_keeps_particles() {
        let mut field = ParticleField::with_seed(config_with(5), 1);
        field.resize(40, 10);
        let before: Vec<_> = field.positions().collect();
        field.resize(40, 10);
        assert_eq!(field.positions().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_zero_area_has_no_particles() {
        let mut field = ParticleField::with_seed(ParticleConfig::default(), 1);
        field.resize(0, 0);
        assert!(field.is_empty());
        field.update(16);
    }

    #[test]
    fn test_new_fields_get_their_own_layout() {
        let mut a = ParticleField::new(ParticleConfig::default());
        let mut b = ParticleField::new(ParticleConfig::default());
        a.resize(60, 20);
        b.resize(60, 20);
        assert_eq!(a.len(), b.len());
        assert_ne!(
            a.positions().collect::<Vec<_>>(),
            b.positions().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = ParticleField::with_seed(ParticleConfig::default(), 42);
        let mut b = ParticleField::with_seed(ParticleConfig::default(), 42);
        a.resize(60, 20);
        b.resize(60, 20);
        assert_eq!(
            a.positions().collect::<Vec<_>>(),
            b.positions().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_update_moves_particles() {
        let mut field = ParticleField::with_seed(config_with(10), 3);
        field.resize(40, 10);
        let before: Vec<_> = field.positions().collect();
        field.update(50);
        assert_ne!(field.positions().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_repulse_clears_area_around_pointer() {
        let mut field = ParticleField::with_seed(config_with(200), 9);
        field.resize(80, 24);
        field.set_pointer(Some((40, 12)));
        let (px, py) = field.pointer().expect("pointer set");

        for _ in 0..30 {
            field.update(16);
        }
        let near = field
            .positions()
            .filter(|&(x, y)| (x - px).hypot(y - py) < 20.0)
            .count();
        assert_eq!(near, 0);
    }

    #[test]
    fn test_resize_clears_pointer() {
        let mut field = ParticleField::with_seed(config_with(3), 1);
        field.resize(10, 10);
        field.set_pointer(Some((1, 1)));
        field.resize(20, 10);
        assert_eq!(field.pointer(), None);
    }

    #[test]
    fn test_invalid_color_falls_back_to_white() {
        let mut config = ParticleConfig::default();
        config.particles.color = ValueConfig::new("white".to_string());
        let field = ParticleField::with_seed(config, 1);
        assert_eq!(field.particle_rgb, FALLBACK_RGB);
    }

    #[test]
    fn test_render_draws_particles_and_links() {
        let mut field = ParticleField::with_seed(ParticleConfig::default(), 5);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal
            .draw(|frame| field.render(frame, 0))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let symbols: Vec<&str> = buffer.content().iter().map(|cell| cell.symbol()).collect();
        let particle = PARTICLE_CHARS[1].to_string();
        let link = LINK_CHAR.to_string();
        assert!(symbols.iter().any(|s| *s == particle));
        assert!(symbols.iter().any(|s| *s == link));
    }

    #[test]
    fn test_links_disabled_draws_only_particles() {
        let mut config = config_with(10);
        config.particles.line_linked.enable = false;
        let mut field = ParticleField::with_seed(config, 5);
        field.resize(40, 12);

        let canvas = field.draw();
        let mut drawn = 0;
        for row in 0..12 {
            for col in 0..40 {
                if let Some((ch, _)) = canvas.get(col, row) {
                    assert_eq!(ch, PARTICLE_CHARS[1]);
                    drawn += 1;
                }
            }
        }
        assert!(drawn > 0 && drawn <= 10);
    }

    #[test]
    fn test_grab_links_to_pointer() {
        let mut config = config_with(1);
        config.particles.line_linked.enable = false;
        config.interactivity.events.onhover.mode = HoverMode::Grab;
        let mut field = ParticleField::with_seed(config, 5);
        field.resize(40, 12);
        field.particles[0].x = 10.0 * PX_PER_COL + 1.0;
        field.particles[0].y = 5.0 * PX_PER_ROW + 1.0;
        field.set_pointer(Some((15, 5)));

        let canvas = field.draw();
        assert_eq!(canvas.get(10, 5).map(|(ch, _)| ch), Some(PARTICLE_CHARS[1]));
        assert_eq!(canvas.get(13, 5).map(|(ch, _)| ch), Some(LINK_CHAR));
        assert_eq!(canvas.get(15, 5).map(|(ch, _)| ch), Some(LINK_CHAR));
    }
}
