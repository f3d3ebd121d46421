// extensions/tween.rs
//
// Property animation keyed by EntityId. A view owns a TweenState, adds
// tweens as it spawns things and ticks the state against ctx.scene once
// per step. Tweens for an entity that no longer exists are dropped.

use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec2};

/// Entity property driven by a tween, with its start and end values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Position(Vec2, Vec2),
    /// Vertical bob that leaves x alone.
    PositionY(f32, f32),
    Rotation(f32, f32),
    Scale(Vec2, Vec2),
    /// Sprite alpha. No-op on entities without a sprite.
    Alpha(f32, f32),
}

impl TweenTarget {
    fn write(&self, entity: &mut Entity, t: f32, easing: Easing) {
        match *self {
            Self::Position(a, b) => entity.pos = ease_vec2(a, b, t, easing),
            Self::PositionY(a, b) => entity.pos.y = ease(a, b, t, easing),
            Self::Rotation(a, b) => entity.rotation = ease(a, b, t, easing),
            Self::Scale(a, b) => entity.scale = ease_vec2(a, b, t, easing),
            Self::Alpha(a, b) => {
                if let Some(sprite) = entity.sprite.as_mut() {
                    sprite.alpha = ease(a, b, t, easing);
                }
            }
        }
    }
}

/// Behaviour once a tween reaches the end of its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    #[default]
    Once,
    /// Jump back to the start value.
    Loop,
    /// Run back toward the start value, then forward again.
    PingPong,
}

#[derive(Debug, Clone)]
pub struct Tween {
    target: TweenTarget,
    duration: f32,
    delay: f32,
    easing: Easing,
    repeat: TweenLoop,
    clock: f32,
    reversed: bool,
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration: duration.max(0.0),
            delay: 0.0,
            easing,
            repeat: TweenLoop::Once,
            clock: 0.0,
            reversed: false,
        }
    }

    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Position(from, to), duration, easing)
    }

    pub fn position_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::PositionY(from, to), duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Rotation(from, to), duration, easing)
    }

    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale(Vec2::splat(from), Vec2::splat(to)), duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Alpha(from, to), duration, easing)
    }

    pub fn fade_in(duration: f32, easing: Easing) -> Self {
        Self::alpha(0.0, 1.0, duration, easing)
    }

    pub fn fade_out(duration: f32, easing: Easing) -> Self {
        Self::alpha(1.0, 0.0, duration, easing)
    }

    pub fn with_loop(mut self, repeat: TweenLoop) -> Self {
        self.repeat = repeat;
        self
    }

    /// Hold the start for `secs` before the clock runs. Nothing is written
    /// to the entity during the hold.
    pub fn with_delay(mut self, secs: f32) -> Self {
        self.delay = secs.max(0.0);
        self
    }

    pub fn target(&self) -> TweenTarget {
        self.target
    }

    /// Progress through the current pass in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.clock / self.duration).min(1.0)
    }

    /// Moves the clock by `dt`. Returns the curve position to write, or
    /// None while the delay is still running.
    fn advance(&mut self, dt: f32) -> Option<f32> {
        let mut dt = dt;
        if self.delay > 0.0 {
            if dt < self.delay {
                self.delay -= dt;
                return None;
            }
            dt -= self.delay;
            self.delay = 0.0;
        }
        self.clock += dt;
        let t = self.progress();
        Some(if self.reversed { 1.0 - t } else { t })
    }

    /// Called after a pass ends. False means the tween is done.
    fn rewind(&mut self) -> bool {
        match self.repeat {
            TweenLoop::Once => return false,
            TweenLoop::Loop => {}
            TweenLoop::PingPong => self.reversed = !self.reversed,
        }
        self.clock = 0.0;
        true
    }

    fn pass_ended(&self) -> bool {
        self.clock >= self.duration
    }
}

#[derive(Debug)]
struct Running {
    entity: EntityId,
    tween: Tween,
}

/// Running tweens, applied in the order they were added.
#[derive(Debug, Default)]
pub struct TweenState {
    running: Vec<Running>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) {
        self.running.push(Running { entity, tween });
    }

    pub fn remove_entity(&mut self, entity: EntityId) {
        self.running.retain(|r| r.entity != entity);
    }

    pub fn targets(&self, entity: EntityId) -> impl Iterator<Item = TweenTarget> + '_ {
        self.running
            .iter()
            .filter(move |r| r.entity == entity)
            .map(|r| r.tween.target())
    }

    /// Advances every tween by `dt` and writes the results into `scene`.
    /// Returns how many one-shot tweens finished during this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let before = self.running.len();
        let mut finished = 0;
        self.running.retain_mut(|r| {
            let Some(entity) = scene.get_mut(r.entity) else {
                return false;
            };
            let Some(t) = r.tween.advance(dt) else {
                return true;
            };
            r.tween.target.write(entity, t, r.tween.easing);
            if !r.tween.pass_ended() || r.tween.rewind() {
                return true;
            }
            finished += 1;
            false
        });
        let orphaned = before - self.running.len() - finished;
        if orphaned > 0 {
            log::trace!("dropped {orphaned} tween(s) for despawned entities");
        }
        finished
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}
