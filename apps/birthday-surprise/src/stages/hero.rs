use keepsake_engine::{EngineContext, InputEvent, Timers, TweenState};

use crate::config::HeroSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, sprites};
use crate::events::{element, input, is_custom, reveal};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Reveal,
}

const COPY_TAG: &str = "hero-copy";

/// The greeting, with a "Begin" button once it has faded in.
pub struct HeroView {
    reveal_delay: f32,
    copy: ScreenCopy,
    timers: Timers<Cue>,
    tweens: TweenState,
    revealed: bool,
}

impl HeroView {
    pub fn new(settings: &HeroSettings, copy: ScreenCopy) -> Self {
        Self {
            reveal_delay: settings.reveal_delay_secs,
            copy,
            timers: Timers::new(),
            tweens: TweenState::new(),
            revealed: false,
        }
    }
}

impl StageView for HeroView {
    fn stage(&self) -> StageId {
        StageId::Hero
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::HEART, 20, "hearts");
        super::spawn_copy(ctx, &self.copy, 220.0, COPY_TAG);
        decor::set_alpha_tagged(ctx, COPY_TAG, 0.0);
        self.timers.schedule(Cue::Reveal, self.reveal_delay);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        let dt = ctx.dt();
        self.tweens.tick(dt, &mut ctx.scene);
        if self.timers.tick(dt).contains(&Cue::Reveal) {
            self.revealed = true;
            decor::fade_in_tagged(ctx, &mut self.tweens, COPY_TAG, 1.0);
            ctx.emit_event(reveal(element::HERO_CONTENT));
        }

        if self.revealed && input.iter().any(|e| is_custom(e, input::CONTINUE)) {
            return StageSignal::Complete;
        }
        StageSignal::Running
    }
}
