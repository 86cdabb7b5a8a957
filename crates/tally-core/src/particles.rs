//! Particle background configuration.
//!
//! The record mirrors the particles.js configuration object field for field,
//! so it serializes to the same JSON a web page would hand to that library.

use serde::{Deserialize, Serialize};

/// A single `{ "value": ... }` setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueConfig<T> {
    pub value: T,
}

impl<T> ValueConfig<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Configuration handed unchanged to the particle background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub particles: ParticlesSection,
    pub interactivity: InteractivityConfig,
}

/// Appearance and motion of the particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesSection {
    /// How many particles to spawn.
    pub number: ValueConfig<u32>,
    /// Particle radius in pixels.
    pub size: ValueConfig<f64>,
    /// Particle color as `#rrggbb`.
    pub color: ValueConfig<String>,
    pub line_linked: LineLinkedConfig,
    #[serde(rename = "move")]
    pub movement: MoveConfig,
}

impl Default for ParticlesSection {
    fn default() -> Self {
        Self {
            number: ValueConfig::new(80),
            size: ValueConfig::new(3.0),
            color: ValueConfig::new("#ffffff".to_string()),
            line_linked: LineLinkedConfig::default(),
            movement: MoveConfig::default(),
        }
    }
}

/// Lines drawn between nearby particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLinkedConfig {
    pub enable: bool,
    /// Maximum link length in pixels.
    pub distance: f64,
    pub color: String,
    /// Opacity of a zero-length link; longer links fade out linearly.
    pub opacity: f64,
}

impl Default for LineLinkedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            distance: 150.0,
            color: "#ffffff".to_string(),
            opacity: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    /// Particles drift up to `speed / 2` pixels per 60 Hz frame.
    pub speed: f64,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self { speed: 2.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractivityConfig {
    pub events: InteractivityEvents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractivityEvents {
    pub onhover: HoverEvent,
}

/// What happens to particles near the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: HoverMode,
}

impl Default for HoverEvent {
    fn default() -> Self {
        Self {
            enable: true,
            mode: HoverMode::Repulse,
        }
    }
}

/// Pointer interaction modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Push nearby particles away from the pointer.
    #[default]
    Repulse,
    /// Draw links from the pointer to nearby particles.
    Grab,
}
