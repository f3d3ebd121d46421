use glam::Vec2;
use keepsake_engine::{EngineContext, HostEvent, InputEvent, Timers, TweenState};

use crate::config::CountdownSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, sprites, WORLD};
use crate::events::{element, host, input, is_custom, reveal};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// Time left until the target, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Remaining {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Remaining {
    /// Whole seconds from `now_ms` to `target_ms`, floored and clamped at zero.
    pub fn between(now_ms: f64, target_ms: f64) -> Self {
        let left = ((target_ms - now_ms) / 1000.0).floor();
        let total = if left.is_finite() && left > 0.0 { left as u64 } else { 0 };
        Self::from_seconds(total)
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u32,
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours as u64 * 3_600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Seconds within the current day, for the host's compact encoding.
    pub fn seconds_of_day(&self) -> u32 {
        self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    pub fn label(&self) -> String {
        format!("{:02} : {:02} : {:02} : {:02}", self.days, self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Arrived,
    Finish,
}

const DIGITS_TAG: &str = "countdown-digits";

pub struct CountdownView {
    target_ms: f64,
    arrived_delay: f32,
    complete_delay: f32,
    copy: ScreenCopy,
    arrived_copy: ScreenCopy,
    timers: Timers<Cue>,
    tweens: TweenState,
    shown: Option<Remaining>,
    reached_zero: bool,
}

impl CountdownView {
    pub fn new(settings: &CountdownSettings, copy: ScreenCopy, arrived_copy: ScreenCopy) -> Self {
        Self {
            target_ms: settings.target_ms(),
            arrived_delay: settings.arrived_delay_secs,
            complete_delay: settings.complete_delay_secs,
            copy,
            arrived_copy,
            timers: Timers::new(),
            tweens: TweenState::new(),
            shown: None,
            reached_zero: false,
        }
    }

    pub fn shown(&self) -> Option<Remaining> {
        self.shown
    }

    fn refresh(&mut self, ctx: &mut EngineContext) {
        let remaining = Remaining::between(ctx.clock.local_ms(), self.target_ms);
        if self.shown == Some(remaining) {
            return;
        }
        self.shown = Some(remaining);

        ctx.scene.despawn_tagged(DIGITS_TAG);
        super::spawn_line(ctx, &remaining.label(), Vec2::new(WORLD.x / 2.0, 420.0), 48.0, DIGITS_TAG);
        ctx.emit_event(HostEvent::new(
            host::COUNTDOWN,
            remaining.days as f32,
            remaining.seconds_of_day() as f32,
            0.0,
        ));

        if remaining.is_zero() && !self.reached_zero {
            self.reached_zero = true;
            log::info!("countdown reached zero");
            self.timers.schedule_once(Cue::Arrived, self.arrived_delay);
        }
    }
}

impl StageView for CountdownView {
    fn stage(&self) -> StageId {
        StageId::Countdown
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::STAR, 16, "stars");
        super::spawn_copy(ctx, &self.copy, 160.0, "heading");
        self.refresh(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        let dt = ctx.dt();
        self.tweens.tick(dt, &mut ctx.scene);

        for cue in self.timers.tick(dt) {
            match cue {
                Cue::Arrived => {
                    ctx.scene.despawn_tagged("heading");
                    super::spawn_copy(ctx, &self.arrived_copy, 200.0, "heading");
                    ctx.emit_event(reveal(element::COUNTDOWN_ARRIVED));
                    self.timers.schedule_once(Cue::Finish, self.complete_delay);
                }
                Cue::Finish => return StageSignal::Complete,
            }
        }

        self.refresh(ctx);

        if self.reached_zero && input.iter().any(|e| is_custom(e, input::CONTINUE)) {
            return StageSignal::Complete;
        }
        StageSignal::Running
    }
}
