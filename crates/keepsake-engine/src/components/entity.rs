use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::emitter::EmitterComponent;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;

/// Everything on screen is one of these: a transform plus optional sprite
/// and particle emitter. Stages find their own entities again by `tag`.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub tag: String,
    /// Cleared to park an entity without despawning it.
    pub active: bool,
    pub pos: Vec2,
    pub rotation: f32,
    /// Rendered size in world units.
    pub scale: Vec2,
    pub layer: RenderLayer,
    pub sprite: Option<SpriteComponent>,
    pub emitter: Option<EmitterComponent>,
}

impl Entity {
    /// A bare, active entity at the origin with unit scale.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            layer: RenderLayer::default(),
            sprite: None,
            emitter: None,
        }
    }

    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..self }
    }

    pub fn with_pos(self, pos: Vec2) -> Self {
        Self { pos, ..self }
    }

    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vec2) -> Self {
        Self { scale, ..self }
    }

    pub fn with_layer(self, layer: RenderLayer) -> Self {
        Self { layer, ..self }
    }

    pub fn with_sprite(self, sprite: SpriteComponent) -> Self {
        Self { sprite: Some(sprite), ..self }
    }

    pub fn with_emitter(self, emitter: EmitterComponent) -> Self {
        Self { emitter: Some(emitter), ..self }
    }

    /// Sprite alpha, or 0 for entities that draw nothing.
    pub fn alpha(&self) -> f32 {
        self.sprite.as_ref().map_or(0.0, |s| s.alpha)
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.alpha = alpha;
        }
    }
}
