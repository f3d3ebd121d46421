use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::BlendMode;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Rebuilds `buffer` from the visible entities.
///
/// Each blend group is drawn back to front by render layer. Inside a layer
/// entities keep their scene order. Overflow past the buffer's capacity is
/// logged and dropped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    let mut alpha: Vec<(RenderLayer, RenderInstance)> = Vec::new();
    let mut additive: Vec<(RenderLayer, RenderInstance)> = Vec::new();

    for entity in entities.filter(|e| e.active) {
        let Some(sprite) = entity.sprite.as_ref().filter(|s| s.alpha > 0.0) else {
            continue;
        };
        let group = match sprite.blend {
            BlendMode::Alpha => &mut alpha,
            BlendMode::Additive => &mut additive,
        };
        group.push((entity.layer, RenderInstance::from_entity(entity, sprite)));
    }

    // stable: same-layer entities stay in scene order
    alpha.sort_by_key(|(layer, _)| *layer);
    additive.sort_by_key(|(layer, _)| *layer);

    let dropped = buffer.fill(
        alpha.into_iter().map(|(_, i)| i),
        additive.into_iter().map(|(_, i)| i),
    );
    if dropped > 0 {
        log::warn!("render buffer full, dropped {dropped} instance(s)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::SpriteComponent;
    use glam::Vec2;

    fn quad(id: u32, x: f32, layer: RenderLayer, blend: BlendMode) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(Vec2::new(x, 0.0))
            .with_layer(layer)
            .with_sprite(SpriteComponent::default().with_blend(blend))
    }

    fn xs(buffer: &RenderBuffer) -> Vec<f32> {
        buffer.instances().iter().map(|i| i.x).collect()
    }

    #[test]
    fn additive_sprites_follow_the_split() {
        let entities = [
            quad(1, 1.0, RenderLayer::Decor, BlendMode::Additive),
            quad(2, 2.0, RenderLayer::Content, BlendMode::Alpha),
            quad(3, 3.0, RenderLayer::Backdrop, BlendMode::Alpha),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.atlas_split(), 2);
        assert_eq!(xs(&buffer), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn same_layer_keeps_scene_order() {
        let entities = [
            quad(1, 1.0, RenderLayer::Overlay, BlendMode::Alpha),
            quad(2, 2.0, RenderLayer::Content, BlendMode::Alpha),
            quad(3, 3.0, RenderLayer::Overlay, BlendMode::Alpha),
            quad(4, 4.0, RenderLayer::Content, BlendMode::Alpha),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(xs(&buffer), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn hidden_entities_are_skipped() {
        let mut parked = quad(1, 1.0, RenderLayer::Content, BlendMode::Alpha);
        parked.active = false;
        let mut faded = quad(2, 2.0, RenderLayer::Content, BlendMode::Alpha);
        if let Some(s) = faded.sprite.as_mut() {
            s.alpha = 0.0;
        }
        let marker = Entity::new(EntityId(3));

        let mut buffer = RenderBuffer::new();
        build_render_buffer([parked, faded, marker].iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn overflow_is_truncated() {
        let entities: Vec<Entity> = (0..10)
            .map(|i| quad(i, i as f32, RenderLayer::Content, BlendMode::Alpha))
            .collect();
        let mut buffer = RenderBuffer::with_capacity(4);
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 4);
        assert_eq!(buffer.atlas_split(), 4);
    }
}
