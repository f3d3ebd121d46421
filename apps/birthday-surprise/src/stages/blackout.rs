use keepsake_engine::{EngineContext, InputEvent, Timers};

use crate::config::BlackoutSettings;
use crate::decor;
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Done,
}

/// A moment of darkness before the fireworks.
pub struct BlackoutView {
    hold: f32,
    timers: Timers<Cue>,
}

impl BlackoutView {
    pub fn new(settings: &BlackoutSettings) -> Self {
        Self {
            hold: settings.hold_secs,
            timers: Timers::new(),
        }
    }
}

impl StageView for BlackoutView {
    fn stage(&self) -> StageId {
        StageId::Blackout
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        self.timers.schedule(Cue::Done, self.hold);
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &[InputEvent]) -> StageSignal {
        if self.timers.tick(ctx.dt()).contains(&Cue::Done) {
            StageSignal::Complete
        } else {
            StageSignal::Running
        }
    }
}
