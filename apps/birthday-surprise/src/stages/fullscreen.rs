use keepsake_engine::{EngineContext, HostEvent, InputEvent, Timers, TweenState};

use crate::config::FullscreenSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, sprites};
use crate::events::{custom_kind, host, input};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Advance,
}

/// Asks the viewer to go fullscreen and waits for the browser to confirm.
///
/// The request itself has to come from a user gesture, so the host forwards
/// the button click as `ENTER_FULLSCREEN`; the view answers with
/// `REQUEST_FULLSCREEN` and the host reports the outcome.
pub struct FullscreenGate {
    delay: f32,
    copy: ScreenCopy,
    timers: Timers<Cue>,
    tweens: TweenState,
}

impl FullscreenGate {
    pub fn new(settings: &FullscreenSettings, copy: ScreenCopy) -> Self {
        Self {
            delay: settings.enter_delay_secs,
            copy,
            timers: Timers::new(),
            tweens: TweenState::new(),
        }
    }
}

impl StageView for FullscreenGate {
    fn stage(&self) -> StageId {
        StageId::Fullscreen
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::HEART, 12, "hearts");
        super::spawn_copy(ctx, &self.copy, 280.0, "heading");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        self.tweens.tick(ctx.dt(), &mut ctx.scene);
        if self.timers.tick(ctx.dt()).contains(&Cue::Advance) {
            return StageSignal::Complete;
        }

        for event in input {
            match custom_kind(event) {
                Some((input::ENTER_FULLSCREEN, _)) => {
                    ctx.emit_event(HostEvent::signal(host::REQUEST_FULLSCREEN));
                }
                Some((input::FULLSCREEN_CHANGED, active)) if active > 0.5 => {
                    if self.timers.schedule_once(Cue::Advance, self.delay) {
                        log::info!("fullscreen entered, continuing in {}s", self.delay);
                    }
                }
                Some((input::FULLSCREEN_CHANGED, _)) => {
                    log::debug!("fullscreen left before the show started");
                }
                Some((input::FULLSCREEN_FAILED, _)) => {
                    log::error!("fullscreen request was refused by the browser");
                }
                _ => {}
            }
        }
        StageSignal::Running
    }
}
