use std::f32::consts::TAU;

use crate::systems::effects::Hue;

/// When an emitter releases particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmissionMode {
    /// `rate` particles per second; fractions carry over to the next tick.
    Continuous { rate: f32 },
    /// `count` particles every `interval` seconds, or once when `interval` is zero.
    Burst { count: u32, interval: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticleColorMode {
    /// Any hue.
    Random,
    Fixed(Hue),
    /// A random hue from the list.
    Palette(Vec<Hue>),
}

/// Spawns particles at its entity's position (confetti, candle sparks).
#[derive(Debug, Clone)]
pub struct EmitterComponent {
    pub active: bool,
    pub mode: EmissionMode,
    /// Initial speed range, world units per second.
    pub speed_range: (f32, f32),
    /// Direction in radians; particles leave within `spread` around it.
    pub direction: f32,
    pub spread: f32,
    /// Particles start anywhere on a horizontal line this wide, centered on the entity.
    pub spawn_width: f32,
    pub width: f32,
    pub lifetime: f32,
    pub color_mode: ParticleColorMode,
    /// Fraction of velocity lost per second.
    pub drag: f32,
    /// Downward acceleration, world units per second squared.
    pub gravity: f32,
    // Pending fraction of a particle (continuous) or time since the last burst.
    carry: f32,
    fired: bool,
}

impl EmitterComponent {
    fn with_emission(mode: EmissionMode) -> Self {
        Self {
            active: true,
            mode,
            speed_range: (40.0, 120.0),
            direction: 0.0,
            spread: TAU,
            spawn_width: 0.0,
            width: 4.0,
            lifetime: 1.0,
            color_mode: ParticleColorMode::Random,
            drag: 0.6,
            gravity: 0.0,
            carry: 0.0,
            fired: false,
        }
    }

    pub fn continuous(rate: f32) -> Self {
        Self::with_emission(EmissionMode::Continuous { rate })
    }

    pub fn burst(count: u32, interval: f32) -> Self {
        Self::with_emission(EmissionMode::Burst { count, interval })
    }

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    pub fn with_direction(mut self, direction: f32, spread: f32) -> Self {
        self.direction = direction;
        self.spread = spread;
        self
    }

    pub fn with_spawn_width(mut self, width: f32) -> Self {
        self.spawn_width = width;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_color_mode(mut self, mode: ParticleColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Particles per second, or zero for burst emitters.
    pub fn rate(&self) -> f32 {
        match self.mode {
            EmissionMode::Continuous { rate } => rate,
            EmissionMode::Burst { .. } => 0.0,
        }
    }

    /// Advance by `dt` seconds and return how many particles are due.
    pub fn tick(&mut self, dt: f32) -> usize {
        if !self.active {
            return 0;
        }
        match self.mode {
            EmissionMode::Continuous { rate } => {
                self.carry += rate * dt;
                let due = self.carry.floor();
                self.carry -= due;
                due as usize
            }
            EmissionMode::Burst { count, interval } if interval <= 0.0 => {
                if std::mem::replace(&mut self.fired, true) {
                    0
                } else {
                    count as usize
                }
            }
            EmissionMode::Burst { count, interval } => {
                self.carry += dt;
                if self.carry < interval {
                    return 0;
                }
                self.carry -= interval;
                count as usize
            }
        }
    }
}

impl Default for EmitterComponent {
    fn default() -> Self {
        Self::continuous(10.0)
    }
}
