use glam::Vec2;
use keepsake_engine::{
    keys, Easing, EmitterComponent, Entity, EngineContext, HostEvent, Hue, InputEvent,
    ParticleColorMode, RenderLayer, Timers, Tween, TweenState,
};

use crate::config::MemorySettings;
use crate::content::{Memory, ScreenCopy};
use crate::decor::{self, sprites, WORLD};
use crate::events::{element, host, input, is_custom, is_key, reveal};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// Result of a carousel move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    /// Already at the start; nothing happened.
    Stayed,
    /// Moved past the last item.
    Finished,
}

/// A forward-only-at-the-end, clamped-at-the-start index over `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    pub fn next(&mut self) -> Step {
        if self.is_last() {
            return Step::Finished;
        }
        self.index += 1;
        Step::Moved(self.index)
    }

    pub fn back(&mut self) -> Step {
        if self.index == 0 {
            return Step::Stayed;
        }
        self.index -= 1;
        Step::Moved(self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    AutoAdvance,
}

const CARD_TAG: &str = "memory-card";
const CARD_SIZE: f32 = 320.0;
const CARD_POP_FROM: f32 = CARD_SIZE * 0.6;
const CONFETTI_LIFETIME: f32 = 5.0;

/// Polaroid carousel over the memories, with confetti falling behind it.
pub struct MemoriesView {
    memories: Vec<Memory>,
    auto_advance: f32,
    confetti_pieces: u32,
    copy: ScreenCopy,
    carousel: Carousel,
    timers: Timers<Cue>,
    tweens: TweenState,
    next_shown: bool,
}

impl MemoriesView {
    pub fn new(settings: &MemorySettings, memories: Vec<Memory>, copy: ScreenCopy) -> Self {
        Self {
            carousel: Carousel::new(memories.len()),
            memories,
            auto_advance: settings.auto_advance_secs,
            confetti_pieces: settings.confetti_pieces,
            copy,
            timers: Timers::new(),
            tweens: TweenState::new(),
            next_shown: false,
        }
    }

    pub fn index(&self) -> usize {
        self.carousel.index()
    }

    fn spawn_confetti(&self, ctx: &mut EngineContext) {
        // Enough pieces per second to keep roughly `confetti_pieces` in the air.
        let rate = self.confetti_pieces as f32 / CONFETTI_LIFETIME;
        let emitter = EmitterComponent::continuous(rate)
            .with_speed_range(40.0, 90.0)
            .with_direction(std::f32::consts::FRAC_PI_2, 0.8)
            .with_spawn_width(WORLD.x)
            .with_width(6.0)
            .with_lifetime(CONFETTI_LIFETIME)
            .with_color_mode(ParticleColorMode::Palette(Hue::CONFETTI.to_vec()))
            .with_gravity(40.0);
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("confetti")
                .with_pos(Vec2::new(WORLD.x / 2.0, -10.0))
                .with_emitter(emitter),
        );
    }

    fn show_card(&mut self, ctx: &mut EngineContext) {
        ctx.scene.despawn_tagged(CARD_TAG);
        let index = self.carousel.index();
        ctx.emit_event(HostEvent::new(
            host::CAROUSEL_INDEX,
            index as f32,
            self.memories.len() as f32,
            0.0,
        ));
        let Some(memory) = self.memories.get(index) else {
            return;
        };

        let center = Vec2::new(WORLD.x / 2.0, 400.0);
        let card = decor::spawn_sprite(ctx, sprites::CARD, center, CARD_SIZE, RenderLayer::Content, CARD_TAG);
        if let Some(entity) = ctx.scene.get_mut(card) {
            entity.rotation = memory.rotate.to_radians();
            entity.scale = Vec2::splat(CARD_POP_FROM);
        }
        self.tweens.add(card, Tween::scale(CARD_POP_FROM, CARD_SIZE, 0.35, Easing::BackOut));
        let caption = memory.caption.clone();
        super::spawn_paragraph(ctx, &caption, Vec2::new(center.x, center.y + 190.0), 16.0, CARD_TAG);
    }

    fn on_index_changed(&mut self, ctx: &mut EngineContext) {
        self.show_card(ctx);
        self.timers.schedule(Cue::AutoAdvance, self.auto_advance);
    }

    /// One auto-advance interval on the last card brings up "next".
    fn on_auto_advance(&mut self, ctx: &mut EngineContext) {
        if !self.carousel.is_last() {
            let step = self.carousel.next();
            self.step(ctx, step);
        } else if !self.next_shown {
            self.next_shown = true;
            ctx.emit_event(reveal(element::MEMORY_NEXT));
        }
    }

    fn step(&mut self, ctx: &mut EngineContext, step: Step) -> StageSignal {
        match step {
            Step::Moved(_) => {
                self.on_index_changed(ctx);
                StageSignal::Running
            }
            Step::Stayed => StageSignal::Running,
            Step::Finished => StageSignal::Complete,
        }
    }
}

impl StageView for MemoriesView {
    fn stage(&self) -> StageId {
        StageId::Memories
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        self.spawn_confetti(ctx);
        super::spawn_copy(ctx, &self.copy, 70.0, "heading");
        self.on_index_changed(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        self.tweens.tick(ctx.dt(), &mut ctx.scene);
        if self.timers.tick(ctx.dt()).contains(&Cue::AutoAdvance) {
            self.on_auto_advance(ctx);
        }

        for event in input {
            let step = if is_custom(event, input::CONTINUE) || is_key(event, keys::ARROW_RIGHT) {
                self.carousel.next()
            } else if is_custom(event, input::BACK) || is_key(event, keys::ARROW_LEFT) {
                self.carousel.back()
            } else if is_key(event, keys::ESCAPE) {
                Step::Finished
            } else {
                continue;
            };
            if self.step(ctx, step) == StageSignal::Complete {
                return StageSignal::Complete;
            }
        }
        StageSignal::Running
    }
}
