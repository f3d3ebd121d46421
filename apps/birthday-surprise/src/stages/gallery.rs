use glam::Vec2;
use keepsake_engine::{keys, EngineContext, HostEvent, InputEvent, RenderLayer, TweenState};

use crate::content::{ScreenCopy, Story};
use crate::decor::{self, sprites, WORLD};
use crate::events::{custom_kind, host, input, is_custom, is_key};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// Full-size viewer over the gallery photos. Moving past either end wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    open: Option<usize>,
    loading: bool,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self { len, open: None, loading: false }
    }

    pub fn current(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Open on `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.open = Some(index);
        self.loading = true;
        true
    }

    pub fn close(&mut self) -> bool {
        self.loading = false;
        self.open.take().is_some()
    }

    pub fn next(&mut self) -> bool {
        self.shift(1)
    }

    pub fn prev(&mut self) -> bool {
        self.shift(self.len.saturating_sub(1))
    }

    fn shift(&mut self, by: usize) -> bool {
        let Some(index) = self.open else {
            return false;
        };
        self.open = Some((index + by) % self.len);
        self.loading = true;
        true
    }

    /// The host finished loading the shown image.
    pub fn loaded(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }
}

/// A grid of story photos; continue is only taken while the lightbox is closed.
pub struct GalleryView {
    stories: Vec<Story>,
    copy: ScreenCopy,
    lightbox: Lightbox,
    tweens: TweenState,
}

impl GalleryView {
    pub fn new(stories: Vec<Story>, copy: ScreenCopy) -> Self {
        Self {
            lightbox: Lightbox::new(stories.len()),
            stories,
            copy,
            tweens: TweenState::new(),
        }
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    fn publish(&self, ctx: &mut EngineContext) {
        let (open, index) = match self.lightbox.current() {
            Some(index) => (1.0, index as f32),
            None => (0.0, 0.0),
        };
        let loading = if self.lightbox.is_loading() { 1.0 } else { 0.0 };
        ctx.emit_event(HostEvent::new(host::LIGHTBOX, open, index, loading));
    }

    fn spawn_grid(&self, ctx: &mut EngineContext) {
        let columns = self.stories.len().clamp(1, 3);
        let spacing = WORLD.x / (columns as f32 + 1.0);
        for (i, story) in self.stories.iter().enumerate() {
            let col = i % columns;
            let row = i / columns;
            let center = Vec2::new(spacing * (col as f32 + 1.0), 380.0 + row as f32 * 300.0);
            decor::spawn_sprite(ctx, sprites::PHOTO_TILE, center, 240.0, RenderLayer::Content, "tile");
            super::spawn_line(ctx, &story.caption, center + Vec2::new(0.0, 145.0), 16.0, "tile-caption");
            super::spawn_line(ctx, &story.date, center + Vec2::new(0.0, 168.0), 12.0, "tile-caption");
        }
    }
}

impl StageView for GalleryView {
    fn stage(&self) -> StageId {
        StageId::Gallery
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::SPARKLE, 10, "sparkles");
        super::spawn_copy(ctx, &self.copy, 80.0, "heading");
        self.spawn_grid(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        self.tweens.tick(ctx.dt(), &mut ctx.scene);

        for event in input {
            let changed = match custom_kind(event) {
                Some((input::LIGHTBOX_OPEN, index)) if index >= 0.0 => self.lightbox.open(index as usize),
                Some((input::LIGHTBOX_CLOSE, _)) => self.lightbox.close(),
                Some((input::LIGHTBOX_NEXT, _)) => self.lightbox.next(),
                Some((input::LIGHTBOX_PREV, _)) => self.lightbox.prev(),
                Some((input::IMAGE_LOADED, _)) => self.lightbox.loaded(),
                Some((input::CONTINUE, _)) if !self.lightbox.is_open() => {
                    return StageSignal::Complete;
                }
                _ if self.lightbox.is_open() => {
                    if is_key(event, keys::ESCAPE) {
                        self.lightbox.close()
                    } else if is_key(event, keys::ARROW_RIGHT) {
                        self.lightbox.next()
                    } else if is_key(event, keys::ARROW_LEFT) {
                        self.lightbox.prev()
                    } else {
                        if is_custom(event, input::CONTINUE) {
                            log::debug!("continue ignored while the lightbox is open");
                        }
                        false
                    }
                }
                _ => false,
            };
            if changed {
                self.publish(ctx);
            }
        }
        StageSignal::Running
    }
}
