//! Decorative sprites: backdrops, floating hearts and sparkles, the cake.

use glam::Vec2;
use keepsake_engine::{
    AtlasId, BlendMode, Easing, EngineContext, Entity, EntityId, RenderLayer, SpriteComponent,
    Tween, TweenLoop, TweenState,
};

/// Cells of the decor atlas (atlas 0).
pub mod sprites {
    pub const PANEL: (f32, f32) = (0.0, 0.0);
    pub const HEART: (f32, f32) = (1.0, 0.0);
    pub const SPARKLE: (f32, f32) = (2.0, 0.0);
    pub const STAR: (f32, f32) = (3.0, 0.0);
    pub const BALLOON: (f32, f32) = (4.0, 0.0);
    pub const CARD: (f32, f32) = (0.0, 1.0);
    pub const PHOTO_TILE: (f32, f32) = (1.0, 1.0);
    pub const CAKE: (f32, f32) = (2.0, 1.0);
    pub const FLAME: (f32, f32) = (3.0, 1.0);
    pub const GLOW: (f32, f32) = (4.0, 1.0);
}

pub const WORLD: Vec2 = Vec2::new(1280.0, 720.0);

pub fn sprite(cell: (f32, f32)) -> SpriteComponent {
    SpriteComponent::cell(AtlasId(0), cell.0, cell.1)
}

/// Spawn one decor sprite and return its id.
pub fn spawn_sprite(
    ctx: &mut EngineContext,
    cell: (f32, f32),
    pos: Vec2,
    size: f32,
    layer: RenderLayer,
    tag: &str,
) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(tag)
            .with_pos(pos)
            .with_scale(Vec2::splat(size))
            .with_layer(layer)
            .with_sprite(sprite(cell)),
    );
    id
}

/// A full-screen panel behind everything else.
pub fn spawn_backdrop(ctx: &mut EngineContext, alpha: f32) -> EntityId {
    let id = spawn_sprite(ctx, sprites::PANEL, WORLD / 2.0, WORLD.x, RenderLayer::Backdrop, "backdrop");
    if let Some(panel) = ctx.scene.get_mut(id) {
        panel.set_alpha(alpha);
    }
    id
}

/// Scatter `count` sprites that fade in and bob up and down forever.
pub fn scatter_floaters(
    ctx: &mut EngineContext,
    tweens: &mut TweenState,
    cell: (f32, f32),
    count: usize,
    tag: &str,
) {
    for _ in 0..count {
        let pos = Vec2::new(
            ctx.effects.rng.range(0.0, WORLD.x),
            ctx.effects.rng.range(0.0, WORLD.y),
        );
        let size = ctx.effects.rng.range(16.0, 40.0);
        let opacity = ctx.effects.rng.range(0.1, 0.4);
        let bob = ctx.effects.rng.range(3.0, 5.0);
        let delay = ctx.effects.rng.range(0.0, 5.0);

        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(tag)
                .with_pos(pos)
                .with_scale(Vec2::splat(size))
                .with_layer(RenderLayer::Decor)
                .with_sprite(sprite(cell).with_alpha(0.0).with_blend(BlendMode::Additive)),
        );
        tweens.add(id, Tween::alpha(0.0, opacity, 1.0, Easing::QuadOut).with_delay(delay));
        tweens.add(
            id,
            Tween::position_y(pos.y, pos.y - 20.0, bob, Easing::SineInOut)
                .with_delay(delay)
                .with_loop(TweenLoop::PingPong),
        );
    }
}

/// Set the alpha of every sprite carrying `tag`.
pub fn set_alpha_tagged(ctx: &mut EngineContext, tag: &str, alpha: f32) {
    for entity in ctx.scene.iter_mut().filter(|e| e.tag == tag) {
        entity.set_alpha(alpha);
    }
}

/// Fade in every sprite carrying `tag`.
pub fn fade_in_tagged(
    ctx: &mut EngineContext,
    tweens: &mut TweenState,
    tag: &str,
    duration: f32,
) {
    let ids: Vec<EntityId> = ctx.scene.tagged(tag).map(|e| e.id).collect();
    for id in ids {
        tweens.add(id, Tween::fade_in(duration, Easing::QuadOut));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floaters_start_invisible_and_fade_in() {
        let mut ctx = EngineContext::new();
        let mut tweens = TweenState::new();
        scatter_floaters(&mut ctx, &mut tweens, sprites::HEART, 6, "hearts");

        assert_eq!(ctx.scene.count_tagged("hearts"), 6);
        assert_eq!(tweens.len(), 12);
        assert!(ctx.scene.iter().all(|e| e.alpha() == 0.0));

        for _ in 0..60 * 7 {
            tweens.tick(1.0 / 60.0, &mut ctx.scene);
        }
        assert!(ctx.scene.iter().all(|e| e.alpha() > 0.0));
        // bobbing keeps going
        assert_eq!(tweens.len(), 6);
    }

    #[test]
    fn tagged_alpha_helpers() {
        let mut ctx = EngineContext::new();
        let mut tweens = TweenState::new();
        spawn_sprite(&mut ctx, sprites::CAKE, WORLD / 2.0, 200.0, RenderLayer::Content, "cake");
        spawn_backdrop(&mut ctx, 1.0);

        set_alpha_tagged(&mut ctx, "cake", 0.0);
        fade_in_tagged(&mut ctx, &mut tweens, "cake", 0.5);
        tweens.tick(0.5, &mut ctx.scene);

        let cake = ctx.scene.find_by_tag("cake").unwrap();
        assert_eq!(cake.sprite.as_ref().unwrap().alpha, 1.0);
        assert_eq!(cake.layer, RenderLayer::Content);
        assert_eq!(ctx.scene.find_by_tag("backdrop").unwrap().layer, RenderLayer::Backdrop);
    }
}
