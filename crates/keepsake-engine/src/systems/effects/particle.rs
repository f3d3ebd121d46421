//! Free particles: confetti, sparks, burst fragments.

use glam::Vec2;
use super::geometry::build_strip_vertices;
use super::palette::Hue;

/// A single particle with physics and rendering state.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    /// World units per second.
    pub velocity: Vec2,
    pub width: f32,
    pub hue: Hue,
    pub lifetime: f32,
    pub age: f32,
    /// Fraction of velocity lost per second.
    pub drag: f32,
    /// Downward acceleration (y grows downward).
    pub gravity: f32,
}

impl Particle {
    pub const DEFAULT_DRAG: f32 = 0.6;
    /// Seconds of travel drawn as the particle's streak.
    const STREAK: f32 = 0.04;

    pub fn new(position: Vec2, velocity: Vec2, width: f32, hue: Hue, lifetime: f32) -> Self {
        Particle {
            position,
            velocity,
            width,
            hue,
            lifetime,
            age: 0.0,
            drag: Self::DEFAULT_DRAG,
            gravity: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Advance particle physics. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.velocity.y += self.gravity * dt;
        self.position += self.velocity * dt;
        true
    }

    /// Remaining life in [0, 1]. Drives the fade-out.
    pub fn life_fraction(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }

    /// Generate vertices for this particle (2-point segment strip).
    pub fn to_vertices(&self) -> Vec<f32> {
        let tail = self.position - self.velocity * Self::STREAK;
        let tail = if tail.distance_squared(self.position) < 0.01 {
            self.position - Vec2::Y * 0.1
        } else {
            tail
        };
        build_strip_vertices(&[tail, self.position], self.width * self.life_fraction(), self.hue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 4.0, Hue::Rose, 0.1);
        assert!(!p.tick(0.2), "particle should expire");
    }

    #[test]
    fn particle_lives_while_lifetime_positive() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 4.0, Hue::Rose, 1.0);
        assert!(p.tick(0.1));
        assert!(p.position.x > 0.0);
    }

    #[test]
    fn gravity_pulls_down() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 4.0, Hue::Gold, 5.0).with_gravity(100.0);
        for _ in 0..10 {
            p.tick(0.1);
        }
        assert!(p.position.y > 0.0);
    }

    #[test]
    fn drag_slows_particles() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 4.0, Hue::Gold, 5.0).with_drag(0.5);
        p.tick(0.5);
        assert!(p.velocity.x < 100.0);
    }

    #[test]
    fn fades_with_age() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 4.0, Hue::Sky, 1.0);
        assert_eq!(p.life_fraction(), 1.0);
        p.tick(0.5);
        assert!((p.life_fraction() - 0.5).abs() < 1e-5);
        assert!(!p.to_vertices().is_empty());
    }
}
