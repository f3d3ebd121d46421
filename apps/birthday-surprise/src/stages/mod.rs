//! The eleven screens of the show and the helpers they share.

pub mod auth;
pub mod blackout;
pub mod celebration;
pub mod countdown;
pub mod done;
pub mod fireworks;
pub mod fullscreen;
pub mod gallery;
pub mod hero;
pub mod letter;
pub mod memories;

use glam::Vec2;
use keepsake_engine::{build_centered_text, EngineContext, FontConfig, RenderLayer};

use crate::config::CelebrationConfig;
use crate::content::{Content, ScreenCopy};
use crate::decor::WORLD;
use crate::sequencer::StageId;
use crate::stage::StageView;

/// Build the view for `stage` from the current settings and content.
pub fn build_view(stage: StageId, config: &CelebrationConfig, content: &Content) -> Box<dyn StageView> {
    match stage {
        StageId::Fullscreen => Box::new(fullscreen::FullscreenGate::new(
            &config.fullscreen,
            content.screens.fullscreen.clone(),
        )),
        StageId::Auth => Box::new(auth::AuthView::new(&config.auth, content.screens.auth.clone())),
        StageId::Blackout => Box::new(blackout::BlackoutView::new(&config.blackout)),
        StageId::Fireworks => Box::new(fireworks::FireworksView::new(
            config.fireworks.clone(),
            content.screens.fireworks.clone(),
        )),
        StageId::Hero => Box::new(hero::HeroView::new(&config.hero, content.screens.hero.clone())),
        StageId::Countdown => Box::new(countdown::CountdownView::new(
            &config.countdown,
            content.screens.countdown.clone(),
            content.screens.countdown_arrived.clone(),
        )),
        StageId::Memories => Box::new(memories::MemoriesView::new(
            &config.memories,
            content.memories.clone(),
            content.screens.memories.clone(),
        )),
        StageId::Gallery => Box::new(gallery::GalleryView::new(
            content.stories.clone(),
            content.screens.gallery.clone(),
        )),
        StageId::Celebration => Box::new(celebration::CelebrationView::new(
            &config.celebration,
            content.screens.celebration.clone(),
            content.screens.wishes.clone(),
        )),
        StageId::Letter => Box::new(letter::LetterView::new(
            &config.letter,
            &content.letter,
            content.screens.letter.clone(),
        )),
        StageId::Done => Box::new(done::DoneView::new(content.screens.farewell.clone())),
    }
}

pub(crate) const TITLE_SIZE: f32 = 40.0;
pub(crate) const SUBTITLE_SIZE: f32 = 20.0;
pub(crate) const BODY_SIZE: f32 = 14.0;

/// Spawn one line of glyphs centered on `center`. Returns the glyph count.
pub(crate) fn spawn_line(ctx: &mut EngineContext, text: &str, center: Vec2, size: f32, tag: &str) -> usize {
    let font = FontConfig::default();
    let glyphs = build_centered_text(text, center, size, &font, RenderLayer::Overlay, tag, || ctx.next_id());
    let count = glyphs.len();
    ctx.scene.spawn_all(glyphs);
    count
}

/// Greedy word wrap to at most `max_cols` characters per line.
/// Explicit newlines are kept; a single word longer than a line overflows it.
pub(crate) fn wrap(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_cols && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Spawn a wrapped paragraph whose first line is centered on `top_center`.
/// Returns the y just below the last line.
pub(crate) fn spawn_paragraph(
    ctx: &mut EngineContext,
    text: &str,
    top_center: Vec2,
    size: f32,
    tag: &str,
) -> f32 {
    let font = FontConfig::default();
    let max_cols = ((WORLD.x * 0.8) / font.advance(size)) as usize;
    let line_height = size * 1.4;
    let mut y = top_center.y;
    for line in wrap(text, max_cols.max(1)) {
        spawn_line(ctx, &line, Vec2::new(top_center.x, y), size, tag);
        y += line_height;
    }
    y
}

/// Title, subtitle and body of a screen stacked from `top`. Returns the y below the block.
pub(crate) fn spawn_copy(ctx: &mut EngineContext, copy: &ScreenCopy, top: f32, tag: &str) -> f32 {
    let center_x = WORLD.x / 2.0;
    let mut y = top;
    if !copy.title.is_empty() {
        spawn_line(ctx, &copy.title, Vec2::new(center_x, y), TITLE_SIZE, tag);
        y += TITLE_SIZE * 1.5;
    }
    if !copy.subtitle.is_empty() {
        y = spawn_paragraph(ctx, &copy.subtitle, Vec2::new(center_x, y), SUBTITLE_SIZE, tag);
        y += SUBTITLE_SIZE * 0.5;
    }
    if !copy.body.is_empty() {
        y = spawn_paragraph(ctx, &copy.body, Vec2::new(center_x, y), BODY_SIZE, tag);
    }
    y
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width_and_newlines() {
        let lines = wrap("one two three four\n\nfive", 9);
        assert_eq!(lines, vec!["one two", "three", "four", "", "five"]);
        assert!(wrap("unbreakableword", 4) == vec!["unbreakableword"]);
    }

    #[test]
    fn copy_block_spawns_overlay_glyphs() {
        let mut ctx = EngineContext::new();
        let copy = ScreenCopy {
            title: "Hi".to_string(),
            subtitle: "a b".to_string(),
            body: String::new(),
        };
        let bottom = spawn_copy(&mut ctx, &copy, 100.0, "heading");
        assert!(bottom > 100.0);
        assert_eq!(ctx.scene.count_tagged("heading"), 4);
        assert!(ctx.scene.iter().all(|e| e.layer == RenderLayer::Overlay));
    }

    #[test]
    fn every_stage_has_a_view() {
        let config = CelebrationConfig::default();
        let content = Content::embedded();
        for stage in StageId::ALL {
            assert_eq!(build_view(stage, &config, &content).stage(), stage);
        }
    }
}
