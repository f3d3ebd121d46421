//! Firework shells: a bright head rising until its fuse burns out, then bursting.

use glam::Vec2;
use super::geometry::build_strip_vertices;
use super::palette::Hue;

/// A rising shell. When the fuse runs out the owner turns it into a burst.
#[derive(Debug, Clone)]
pub struct Shell {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds until the shell bursts.
    pub fuse: f32,
    pub hue: Hue,
    /// Number of fragments released at the burst.
    pub fragments: u32,
    trail: Vec<Vec2>,
}

impl Shell {
    /// Gravity acting on a rising shell, world units per second squared.
    pub const GRAVITY: f32 = 180.0;
    const TRAIL_LEN: usize = 6;

    pub fn new(origin: Vec2, velocity: Vec2, fuse: f32, hue: Hue, fragments: u32) -> Self {
        Self {
            position: origin,
            velocity,
            fuse,
            hue,
            fragments,
            trail: vec![origin],
        }
    }

    /// Advance the shell. Returns false once the fuse has burnt out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.fuse -= dt;
        if self.fuse <= 0.0 {
            return false;
        }
        self.velocity.y += Self::GRAVITY * dt;
        self.position += self.velocity * dt;
        self.trail.push(self.position);
        if self.trail.len() > Self::TRAIL_LEN {
            self.trail.remove(0);
        }
        true
    }

    pub fn to_vertices(&self) -> Vec<f32> {
        build_strip_vertices(&self.trail, 2.0, self.hue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_rises_then_bursts() {
        let mut shell = Shell::new(Vec2::new(0.0, 700.0), Vec2::new(0.0, -500.0), 0.5, Hue::Gold, 40);
        assert!(shell.tick(0.1));
        assert!(shell.position.y < 700.0);
        assert!(!shell.tick(0.5));
    }

    #[test]
    fn trail_is_bounded() {
        let mut shell = Shell::new(Vec2::ZERO, Vec2::new(0.0, -300.0), 10.0, Hue::Rose, 10);
        for _ in 0..50 {
            shell.tick(0.01);
        }
        assert!(shell.trail.len() <= Shell::TRAIL_LEN);
        assert!(!shell.to_vertices().is_empty());
    }
}
