//! Bitmap font text.
//!
//! One entity per visible glyph, sampled from a font atlas laid out in
//! code-point order from `FontConfig::first`. Text that changes (countdown
//! digits, the PIN mask, the letter) is despawned by tag with
//! `Scene::despawn_tagged` and rebuilt.

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::{AtlasId, SpriteComponent};
use glam::Vec2;

#[derive(Debug, Clone)]
pub struct FontConfig {
    pub atlas: AtlasId,
    pub cols: u32,
    pub rows: u32,
    /// Character in cell (0, 0).
    pub first: char,
    /// Pen advance per character as a fraction of the glyph size.
    pub spacing: f32,
}

impl Default for FontConfig {
    /// Printable ASCII on a 16 x 6 grid in atlas 1.
    fn default() -> Self {
        Self {
            atlas: AtlasId(1),
            cols: 16,
            rows: 6,
            first: ' ',
            spacing: 0.55,
        }
    }
}

impl FontConfig {
    /// Atlas cell for `c`, or None when the font has no glyph for it.
    pub fn glyph(&self, c: char) -> Option<(f32, f32)> {
        let index = (c as u32).checked_sub(self.first as u32)?;
        (index < self.cols * self.rows)
            .then(|| ((index % self.cols) as f32, (index / self.cols) as f32))
    }

    pub fn advance(&self, size: f32) -> f32 {
        size * self.spacing
    }

    /// Width of `text` on a single line.
    pub fn line_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance(size)
    }
}

/// Glyph entities for `text` with the first glyph's top-left at `top_left`.
///
/// Whitespace and characters missing from the font produce no entity but
/// still move the pen.
pub fn build_text_entities(
    text: &str,
    top_left: Vec2,
    size: f32,
    font: &FontConfig,
    layer: RenderLayer,
    tag: &str,
    mut next_id: impl FnMut() -> EntityId,
) -> Vec<Entity> {
    let half = size / 2.0;
    let step = font.advance(size);
    text.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .filter_map(|(i, c)| font.glyph(c).map(|cell| (i, cell)))
        .map(|(i, (col, row))| {
            let center = Vec2::new(top_left.x + (i as f32 + 0.5) * step, top_left.y + half);
            Entity::new(next_id())
                .with_tag(tag)
                .with_pos(center)
                .with_scale(Vec2::splat(size))
                .with_layer(layer)
                .with_sprite(SpriteComponent::cell(font.atlas, col, row))
        })
        .collect()
}

/// [`build_text_entities`] for a line centered on `center` in both axes.
pub fn build_centered_text(
    text: &str,
    center: Vec2,
    size: f32,
    font: &FontConfig,
    layer: RenderLayer,
    tag: &str,
    next_id: impl FnMut() -> EntityId,
) -> Vec<Entity> {
    let top_left = center - Vec2::new(font.line_width(text, size), size) / 2.0;
    build_text_entities(text, top_left, size, font, layer, tag, next_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> impl FnMut() -> EntityId {
        let mut n = 100;
        move || {
            n += 1;
            EntityId(n)
        }
    }

    #[test]
    fn glyph_cells_follow_ascii() {
        let font = FontConfig::default();
        // '0' is 48: index 16, so the first cell of row 1
        assert_eq!(font.glyph('0'), Some((0.0, 1.0)));
        assert_eq!(font.glyph('H'), Some((8.0, 2.0)));
        assert_eq!(font.glyph('~'), Some((14.0, 5.0)));
        assert_eq!(font.glyph('\n'), None);
        assert_eq!(font.glyph('ü'), None);
    }

    #[test]
    fn spaces_advance_without_a_glyph() {
        let font = FontConfig::default();
        let glyphs = build_text_entities("10 days", Vec2::ZERO, 40.0, &font, RenderLayer::Overlay, "count", counter());

        assert_eq!(glyphs.len(), 6);
        assert!(glyphs.iter().all(|g| g.tag == "count" && g.layer == RenderLayer::Overlay));
        assert_eq!(glyphs[0].id, EntityId(101));
        let gap = glyphs[2].pos.x - glyphs[1].pos.x;
        assert!((gap - 2.0 * font.advance(40.0)).abs() < 1e-4);
    }

    #[test]
    fn centered_line_straddles_center() {
        let font = FontConfig::default();
        let center = Vec2::new(640.0, 200.0);
        let glyphs = build_centered_text("****", center, 20.0, &font, RenderLayer::Content, "mask", counter());

        let left = center.x - glyphs[0].pos.x;
        let right = glyphs[3].pos.x - center.x;
        assert!((left - right).abs() < 1e-3);
        assert!(glyphs.iter().all(|g| (g.pos.y - center.y).abs() < 1e-4));
    }

    #[test]
    fn glyph_centers_sit_half_an_advance_in() {
        let font = FontConfig::default();
        let step = font.advance(20.0);
        let glyphs = build_text_entities("ab", Vec2::new(100.0, 0.0), 20.0, &font, RenderLayer::Content, "t", counter());

        assert!((glyphs[0].pos.x - (100.0 + step / 2.0)).abs() < 1e-4);
        assert!((glyphs[1].pos.x - (100.0 + 1.5 * step)).abs() < 1e-4);
        assert!((glyphs[0].pos.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn rebuilt_text_replaces_by_tag() {
        let font = FontConfig::default();
        let mut scene = crate::core::scene::Scene::new();
        scene.spawn_all(build_text_entities("05", Vec2::ZERO, 10.0, &font, RenderLayer::Content, "secs", counter()));
        scene.spawn(Entity::new(EntityId(1)).with_tag("cake"));

        assert_eq!(scene.despawn_tagged("secs"), 2);
        scene.spawn_all(build_text_entities("4", Vec2::ZERO, 10.0, &font, RenderLayer::Content, "secs", counter()));
        assert_eq!(scene.count_tagged("secs"), 1);
        assert_eq!(scene.len(), 2);
    }
}
