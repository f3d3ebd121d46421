use crate::core::scene::Scene;
use crate::systems::effects::EffectsState;

/// Run every emitter on an active entity for one step, spawning into `effects`.
pub fn tick_emitters(scene: &mut Scene, effects: &mut EffectsState, dt: f32) {
    let emitting = scene
        .iter_mut()
        .filter(|entity| entity.active)
        .filter_map(|entity| Some((entity.pos, entity.emitter.as_mut()?)));
    for (pos, emitter) in emitting {
        let due = emitter.tick(dt);
        if due > 0 {
            effects.spawn_from_emitter(pos, due, emitter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::emitter::EmitterComponent;
    use crate::components::entity::Entity;
    use glam::Vec2;

    fn one_shot(count: u32) -> EmitterComponent {
        EmitterComponent::burst(count, 0.0)
    }

    #[test]
    fn tick_emitters_spawns_at_entity_pos() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(100.0, 200.0))
                .with_emitter(one_shot(5)),
        );

        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects, 0.016);

        assert_eq!(effects.particle_count(), 5);
        for p in &effects.particles {
            assert_eq!(p.position, Vec2::new(100.0, 200.0));
        }
    }

    #[test]
    fn spawn_width_scatters_horizontally() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(640.0, -10.0))
                .with_emitter(one_shot(20).with_spawn_width(1280.0)),
        );

        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects, 0.016);

        assert!(effects.particles.iter().all(|p| p.position.y == -10.0));
        assert!(effects.particles.iter().any(|p| p.position.x != 640.0));
    }

    #[test]
    fn tick_emitters_skips_inactive_entity() {
        let mut scene = Scene::new();
        let mut entity = Entity::new(EntityId(1)).with_emitter(one_shot(5));
        entity.active = false;
        scene.spawn(entity);

        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects, 0.016);

        assert_eq!(effects.particle_count(), 0);
    }
}
