//! Visual effects: free particles and firework shells.
//!
//! `EffectsState` owns every live effect and rebuilds one triangle-list
//! vertex buffer per frame (5 floats per vertex) for the host's effects pass.

mod firework;
mod geometry;
mod palette;
mod particle;
mod rng;

pub use firework::Shell;
pub use geometry::{build_strip_vertices, strip_to_triangles, FLOATS_PER_VERTEX};
pub use palette::Hue;
pub use particle::Particle;
pub use rng::Rng;

use glam::Vec2;
use crate::components::emitter::{EmitterComponent, ParticleColorMode};

/// Every live shell and particle, plus the vertex buffer rebuilt from them.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub shells: Vec<Shell>,
    pub effects_buffer: Vec<f32>,
    pub rng: Rng,
    max_vertices: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 16384)
    }

    /// Create a new EffectsState with a vertex budget for the rebuilt buffer.
    pub fn with_capacity(seed: u64, max_vertices: usize) -> Self {
        EffectsState {
            particles: Vec::new(),
            shells: Vec::new(),
            effects_buffer: Vec::with_capacity(max_vertices * FLOATS_PER_VERTEX),
            rng: Rng::new(seed),
            max_vertices,
        }
    }

    /// Radial burst of fragments at `center`, colored from `palette`
    /// (every hue when the palette is empty).
    pub fn spawn_burst(&mut self, center: Vec2, count: usize, palette: &[Hue]) {
        for _ in 0..count {
            let angle = self.rng.next_f32() * std::f32::consts::TAU;
            let speed = self.rng.range(80.0, 260.0);
            let hue = Hue::pick(&mut self.rng, palette);
            let lifetime = self.rng.range(0.9, 1.6);
            self.particles.push(
                Particle::new(center, Vec2::from_angle(angle) * speed, 3.0, hue, lifetime)
                    .with_gravity(60.0)
                    .with_drag(1.2),
            );
        }
    }

    /// Spawn particles shaped by an emitter's parameters.
    pub fn spawn_from_emitter(&mut self, center: Vec2, count: usize, emitter: &EmitterComponent) {
        for _ in 0..count {
            let half = emitter.spread * 0.5;
            let angle = emitter.direction + self.rng.range(-half, half);
            let speed = self.rng.range(emitter.speed_range.0, emitter.speed_range.1);
            let offset = if emitter.spawn_width > 0.0 {
                let half_width = emitter.spawn_width * 0.5;
                Vec2::new(self.rng.range(-half_width, half_width), 0.0)
            } else {
                Vec2::ZERO
            };
            let hue = match &emitter.color_mode {
                ParticleColorMode::Random => Hue::random(&mut self.rng),
                ParticleColorMode::Fixed(hue) => *hue,
                ParticleColorMode::Palette(hues) => Hue::pick(&mut self.rng, hues),
            };
            self.particles.push(
                Particle::new(
                    center + offset,
                    Vec2::from_angle(angle) * speed,
                    emitter.width,
                    hue,
                    emitter.lifetime,
                )
                .with_drag(emitter.drag)
                .with_gravity(emitter.gravity),
            );
        }
    }

    /// Launch a shell from `origin`. It bursts into `fragments` particles after `fuse` seconds.
    pub fn launch_shell(&mut self, origin: Vec2, velocity: Vec2, fuse: f32, hue: Hue, fragments: u32) {
        self.shells.push(Shell::new(origin, velocity, fuse, hue, fragments));
    }

    /// Advance effects. Returns how many shells burst during this tick.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.particles.retain_mut(|p| p.tick(dt));

        let mut burst: Vec<Shell> = Vec::new();
        self.shells.retain_mut(|shell| {
            if shell.tick(dt) {
                true
            } else {
                burst.push(shell.clone());
                false
            }
        });

        for shell in &burst {
            let palette = [shell.hue, Hue::White];
            self.spawn_burst(shell.position, shell.fragments as usize, &palette);
        }
        burst.len() as u32
    }

    /// Rebuild the effects vertex buffer (triangle list, 5 floats per vertex).
    /// Stops adding geometry once the vertex budget is reached.
    pub fn rebuild_effects_buffer(&mut self) {
        self.effects_buffer.clear();
        let budget = self.max_vertices * FLOATS_PER_VERTEX;

        let strips = self
            .shells
            .iter()
            .map(Shell::to_vertices)
            .chain(self.particles.iter().map(Particle::to_vertices));

        for strip in strips {
            let tris = strip_to_triangles(&strip, FLOATS_PER_VERTEX);
            if self.effects_buffer.len() + tris.len() > budget {
                log::debug!("effects buffer full at {} vertices", self.effects_vertex_count());
                break;
            }
            self.effects_buffer.extend_from_slice(&tris);
        }
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.shells.clear();
        self.effects_buffer.clear();
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    pub fn effects_vertex_count(&self) -> usize {
        self.effects_buffer.len() / FLOATS_PER_VERTEX
    }

    pub fn effects_buffer_ptr(&self) -> *const f32 {
        self.effects_buffer.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_requested_count() {
        let mut effects = EffectsState::new(42);
        effects.spawn_burst(Vec2::new(50.0, 50.0), 10, &Hue::CELEBRATION);
        assert_eq!(effects.particle_count(), 10);
        assert!(effects.particles.iter().all(|p| Hue::CELEBRATION.contains(&p.hue)));
    }

    #[test]
    fn shells_burst_into_fragments() {
        let mut effects = EffectsState::new(1);
        effects.launch_shell(Vec2::new(100.0, 700.0), Vec2::new(0.0, -400.0), 0.2, Hue::Gold, 30);
        assert_eq!(effects.tick(0.1), 0);
        assert_eq!(effects.tick(0.15), 1);
        assert_eq!(effects.shell_count(), 0);
        assert_eq!(effects.particle_count(), 30);
    }

    #[test]
    fn emitter_parameters_shape_particles() {
        let mut effects = EffectsState::new(9);
        let emitter = EmitterComponent::burst(5, 0.0)
            .with_color_mode(ParticleColorMode::Fixed(Hue::Mint))
            .with_lifetime(2.5)
            .with_gravity(40.0);
        effects.spawn_from_emitter(Vec2::ZERO, 5, &emitter);
        assert_eq!(effects.particle_count(), 5);
        assert!(effects.particles.iter().all(|p| p.hue == Hue::Mint && p.lifetime == 2.5));
    }

    #[test]
    fn rebuild_respects_vertex_budget() {
        let mut effects = EffectsState::with_capacity(42, 20);
        effects.spawn_burst(Vec2::ZERO, 50, &[]);
        effects.rebuild_effects_buffer();
        assert!(effects.effects_vertex_count() <= 20);
        assert!(effects.effects_vertex_count() > 0);
    }

    #[test]
    fn clear_removes_everything() {
        let mut effects = EffectsState::new(42);
        effects.spawn_burst(Vec2::ZERO, 5, &[]);
        effects.launch_shell(Vec2::ZERO, Vec2::ZERO, 1.0, Hue::Rose, 5);
        effects.rebuild_effects_buffer();

        effects.clear();

        assert_eq!(effects.particle_count(), 0);
        assert_eq!(effects.shell_count(), 0);
        assert_eq!(effects.effects_vertex_count(), 0);
    }
}
