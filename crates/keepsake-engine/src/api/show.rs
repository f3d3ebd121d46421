use crate::api::types::{EntityId, HostEvent, SoundEvent};
use crate::core::scene::Scene;
use crate::core::time::Clock;
use crate::error;
use crate::input::queue::InputQueue;
use crate::systems::effects::EffectsState;

/// Engine sizing a show asks for before it starts.
///
/// The `max_*` budgets size the shared buffer sections the host reads, so
/// they are fixed for the lifetime of the runner.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub fixed_dt: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub max_instances: usize,
    pub max_effects_vertices: usize,
    pub max_sounds: usize,
    pub max_events: usize,
    /// Seeds the effects RNG so shells and bursts replay identically.
    pub seed: u64,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1280.0,
            world_height: 720.0,
            max_instances: 512,
            max_effects_vertices: 16384,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// A staged presentation driven by the runner.
///
/// `update` runs once per fixed step with that step's input. Everything a
/// show wants the host to see goes through the [`EngineContext`]: entities
/// in `scene`, particles in `effects`, and the per-frame sound and event
/// lists.
pub trait Show {
    /// Read once, before `init`.
    fn config(&self) -> ShowConfig {
        ShowConfig::default()
    }

    /// Settings JSON pushed by the host, possibly mid-show.
    fn configure(&mut self, _json: &str) -> error::Result<()> {
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext);

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Published in the frame header.
    fn stage_index(&self) -> u32 {
        0
    }
}

/// Engine state a show reads and writes during `init` and `update`.
pub struct EngineContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<HostEvent>,
    pub clock: Clock,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&ShowConfig::default())
    }

    pub fn with_config(config: &ShowConfig) -> Self {
        Self {
            scene: Scene::new(),
            effects: EffectsState::with_capacity(config.seed, config.max_effects_vertices),
            sounds: Vec::new(),
            events: Vec::new(),
            clock: Clock::new(config.fixed_dt),
            next_id: 1,
        }
    }

    /// Ids are never reused, even across stage resets.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn dt(&self) -> f32 {
        self.clock.dt()
    }

    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    pub fn emit_event(&mut self, event: HostEvent) {
        self.events.push(event);
    }

    /// Called by the runner once the host has been handed the frame.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Wipes the scene and live particles between stages. Sounds and
    /// events queued this frame survive so the hand-off is still reported.
    pub fn reset_stage(&mut self) {
        let dropped = self.scene.len();
        self.scene.clear();
        self.effects.clear();
        log::debug!("stage reset cleared {dropped} entities");
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use glam::Vec2;

    #[test]
    fn ids_survive_stage_resets() {
        let mut ctx = EngineContext::new();
        let first = ctx.next_id();
        ctx.reset_stage();
        assert!(ctx.next_id().0 > first.0);
    }

    #[test]
    fn reset_stage_clears_visuals_only() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        ctx.effects.spawn_burst(Vec2::new(640.0, 360.0), 24, &[]);
        ctx.emit_sound(SoundEvent(3));
        ctx.emit_event(HostEvent::new(2, 1.0, 0.0, 0.0));

        ctx.reset_stage();

        assert!(ctx.scene.is_empty());
        assert_eq!(ctx.effects.particle_count(), 0);
        assert_eq!((ctx.sounds.len(), ctx.events.len()), (1, 1));

        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty() && ctx.events.is_empty());
    }

    #[test]
    fn context_follows_config() {
        let config = ShowConfig { fixed_dt: 1.0 / 30.0, ..ShowConfig::default() };
        let ctx = EngineContext::with_config(&config);
        assert!((ctx.dt() - 1.0 / 30.0).abs() < f32::EPSILON);
    }
}
