//! Particle network background for the tally dashboard.
//!
//! Renders a particles.js-style field into the terminal: particles drift across
//! a virtual pixel canvas, nearby particles are joined by fading links, and the
//! pointer can push particles away or grab them with links of its own.

mod canvas;
mod chars;
mod color;
mod field;
mod particle;

pub use color::{fade, parse_hex_color};
pub use field::{PX_PER_COL, PX_PER_ROW, ParticleField};
