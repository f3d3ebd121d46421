use glam::Vec2;
use keepsake_engine::{keys, EngineContext, HostEvent, InputEvent, Timers, TweenState};

use crate::config::AuthSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, sprites, WORLD};
use crate::error::PinError;
use crate::events::{host, input, pin_feedback, sound};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// Result of submitting a complete code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinOutcome {
    Accepted,
    Rejected { attempts_left: u32 },
    /// The last attempt failed; input is locked for `secs`.
    LockedOut { secs: f32 },
}

/// The code check, with attempt counting and the cooldown.
#[derive(Debug, Clone)]
pub struct PinGate {
    secret: String,
    entered: String,
    attempts: u32,
    max_attempts: u32,
    cooldown: f32,
    lock_left: Option<f32>,
    accepted: bool,
}

impl PinGate {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            secret: settings.pin.clone(),
            entered: String::with_capacity(settings.pin.len()),
            attempts: 0,
            max_attempts: settings.max_attempts,
            cooldown: settings.cooldown_secs,
            lock_left: None,
            accepted: false,
        }
    }

    pub fn code_len(&self) -> usize {
        self.secret.len()
    }

    pub fn entered_len(&self) -> usize {
        self.entered.len()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_locked(&self) -> bool {
        self.lock_left.is_some()
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Whole seconds left in the cooldown, rounded up.
    pub fn lock_remaining_secs(&self) -> Option<u32> {
        self.lock_left.map(|left| left.max(0.0).ceil() as u32)
    }

    /// One `*` per entered digit.
    pub fn masked(&self) -> String {
        "*".repeat(self.entered.len())
    }

    fn check_open(&self) -> Result<(), PinError> {
        if self.accepted {
            return Err(PinError::AlreadyAccepted);
        }
        if let Some(remaining_secs) = self.lock_remaining_secs() {
            return Err(PinError::Locked { remaining_secs });
        }
        Ok(())
    }

    /// Append a digit (0-9). Returns the new entry length.
    pub fn push_digit(&mut self, digit: u8) -> Result<usize, PinError> {
        self.check_open()?;
        if self.entered.len() >= self.code_len() {
            return Err(PinError::Full);
        }
        self.entered.push(char::from(b'0' + digit.min(9)));
        Ok(self.entered.len())
    }

    pub fn backspace(&mut self) -> Result<usize, PinError> {
        self.check_open()?;
        self.entered.pop().ok_or(PinError::Empty)?;
        Ok(self.entered.len())
    }

    pub fn submit(&mut self) -> Result<PinOutcome, PinError> {
        self.check_open()?;
        if self.entered.len() < self.code_len() {
            return Err(PinError::Incomplete {
                entered: self.entered.len(),
                required: self.code_len(),
            });
        }

        let matched = self.entered == self.secret;
        self.entered.clear();
        if matched {
            self.accepted = true;
            self.attempts = 0;
            return Ok(PinOutcome::Accepted);
        }

        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            self.lock_left = Some(self.cooldown);
            Ok(PinOutcome::LockedOut { secs: self.cooldown })
        } else {
            Ok(PinOutcome::Rejected {
                attempts_left: self.max_attempts - self.attempts,
            })
        }
    }

    /// Run down the cooldown. Returns true on the tick that unlocks input.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(left) = self.lock_left.as_mut() else {
            return false;
        };
        *left -= dt;
        if *left > 0.0 {
            return false;
        }
        self.lock_left = None;
        self.attempts = 0;
        self.entered.clear();
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Advance,
}

/// What a single input asks the gate to do.
enum PinKey {
    Digit(u8),
    Backspace,
    Submit,
}

fn pin_key(event: &InputEvent) -> Option<PinKey> {
    match *event {
        InputEvent::KeyDown { key_code: keys::BACKSPACE } => Some(PinKey::Backspace),
        InputEvent::KeyDown { key_code: keys::ENTER } => Some(PinKey::Submit),
        InputEvent::KeyDown { key_code } => keys::digit(key_code).map(PinKey::Digit),
        InputEvent::Custom { kind: input::PIN_DIGIT, a, .. } if (0.0..=9.0).contains(&a) => {
            Some(PinKey::Digit(a as u8))
        }
        InputEvent::Custom { kind: input::PIN_BACKSPACE, .. } => Some(PinKey::Backspace),
        InputEvent::Custom { kind: input::PIN_SUBMIT, .. } => Some(PinKey::Submit),
        _ => None,
    }
}

const MASK_TAG: &str = "pin-mask";
const MASK_CENTER: Vec2 = Vec2::new(WORLD.x / 2.0, 400.0);

/// The secret-code screen.
pub struct AuthView {
    gate: PinGate,
    success_delay: f32,
    copy: ScreenCopy,
    timers: Timers<Cue>,
    tweens: TweenState,
    shown_lock_secs: Option<u32>,
}

impl AuthView {
    pub fn new(settings: &AuthSettings, copy: ScreenCopy) -> Self {
        Self {
            gate: PinGate::new(settings),
            success_delay: settings.success_delay_secs,
            copy,
            timers: Timers::new(),
            tweens: TweenState::new(),
            shown_lock_secs: None,
        }
    }

    pub fn gate(&self) -> &PinGate {
        &self.gate
    }

    fn redraw_mask(&self, ctx: &mut EngineContext) {
        ctx.scene.despawn_tagged(MASK_TAG);
        let masked = self.gate.masked();
        if !masked.is_empty() {
            super::spawn_line(ctx, &masked, MASK_CENTER, 36.0, MASK_TAG);
        }
        ctx.emit_event(HostEvent::new(
            host::PIN_LENGTH,
            self.gate.entered_len() as f32,
            self.gate.code_len() as f32,
            0.0,
        ));
    }

    fn handle(&mut self, ctx: &mut EngineContext, key: PinKey) {
        let result = match key {
            PinKey::Digit(d) => self.gate.push_digit(d).map(|_| ()),
            PinKey::Backspace => self.gate.backspace().map(|_| ()),
            PinKey::Submit => self.gate.submit().map(|outcome| self.report(ctx, outcome)),
        };
        match result {
            Ok(()) => self.redraw_mask(ctx),
            Err(err) => log::debug!("pin input rejected: {}", err),
        }
    }

    fn report(&mut self, ctx: &mut EngineContext, outcome: PinOutcome) {
        match outcome {
            PinOutcome::Accepted => {
                log::info!("pin accepted");
                ctx.emit_event(HostEvent::new(host::PIN_FEEDBACK, pin_feedback::ACCEPTED, 0.0, 0.0));
                ctx.emit_sound(sound::PIN_SUCCESS);
                self.timers.schedule_once(Cue::Advance, self.success_delay);
            }
            PinOutcome::Rejected { attempts_left } => {
                log::info!("wrong pin, {} attempts left", attempts_left);
                ctx.emit_event(HostEvent::new(
                    host::PIN_FEEDBACK,
                    pin_feedback::WRONG,
                    attempts_left as f32,
                    0.0,
                ));
                ctx.emit_sound(sound::PIN_ERROR);
            }
            PinOutcome::LockedOut { secs } => {
                log::warn!("too many wrong pins, locked for {}s", secs);
                self.shown_lock_secs = self.gate.lock_remaining_secs();
                ctx.emit_event(HostEvent::new(host::PIN_FEEDBACK, pin_feedback::LOCKED, secs.ceil(), 0.0));
                ctx.emit_sound(sound::PIN_ERROR);
            }
        }
    }
}

impl StageView for AuthView {
    fn stage(&self) -> StageId {
        StageId::Auth
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::SPARKLE, 10, "sparkles");
        super::spawn_copy(ctx, &self.copy, 220.0, "heading");
        self.redraw_mask(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        let dt = ctx.dt();
        self.tweens.tick(dt, &mut ctx.scene);
        if self.timers.tick(dt).contains(&Cue::Advance) {
            return StageSignal::Complete;
        }

        if self.gate.tick(dt) {
            log::info!("pin cooldown over");
            self.shown_lock_secs = None;
            ctx.emit_event(HostEvent::new(host::PIN_FEEDBACK, pin_feedback::UNLOCKED, 0.0, 0.0));
            self.redraw_mask(ctx);
        } else if let Some(secs) = self.gate.lock_remaining_secs() {
            if self.shown_lock_secs != Some(secs) {
                self.shown_lock_secs = Some(secs);
                ctx.emit_event(HostEvent::new(host::PIN_FEEDBACK, pin_feedback::LOCKED, secs as f32, 0.0));
            }
        }

        for key in input.iter().filter_map(pin_key) {
            self.handle(ctx, key);
        }
        StageSignal::Running
    }
}
