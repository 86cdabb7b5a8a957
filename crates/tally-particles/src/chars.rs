//! Character constants for the particle field.

/// Glyph for a link segment.
pub const LINK_CHAR: char = '·';

/// Particle glyphs by radius: up to 1px, up to 3px, larger.
pub const PARTICLE_CHARS: [char; 3] = ['·', '•', '●'];

/// Pick the glyph for a particle of the given radius in pixels.
pub fn particle_char(radius: f64) -> char {
    if radius <= 1.0 {
        PARTICLE_CHARS[0]
    } else if radius <= 3.0 {
        PARTICLE_CHARS[1]
    } else {
        PARTICLE_CHARS[2]
    }
}
