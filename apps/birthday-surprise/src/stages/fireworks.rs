use glam::Vec2;
use keepsake_engine::{keys, Easing, EngineContext, HostEvent, Hue, InputEvent, Timers, Tween, TweenState};

use crate::config::FireworksSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, WORLD};
use crate::events::{custom_kind, element, host, input, is_key, reveal, sound};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// Moments of the fireworks timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowCue {
    /// Crossfade from black to the fireworks canvas.
    Reveal,
    /// Ask the external script to launch less.
    ReduceLoad,
    /// One of the finale bursts, numbered from 0.
    Finale(u32),
    Overlay,
    ContinueButton,
}

/// Handle on the host-side fireworks script and the timeline that drives it.
///
/// Acquiring it asks the host to load and start the script. Releasing it
/// cancels every pending cue and tells the host to stop the audio and tear
/// the script down. Release happens once; later calls are no-ops.
pub struct FireworksSession {
    timers: Timers<ShowCue>,
    started: bool,
    released: bool,
}

impl FireworksSession {
    pub fn acquire(ctx: &mut EngineContext) -> Self {
        log::info!("fireworks session acquired");
        ctx.emit_event(HostEvent::signal(host::FIREWORKS_ACQUIRE));
        Self {
            timers: Timers::new(),
            started: false,
            released: false,
        }
    }

    /// Schedule the timeline. Returns false if it already started or the session is released.
    pub fn start(&mut self, settings: &FireworksSettings) -> bool {
        if self.started || self.released {
            return false;
        }
        self.started = true;
        self.timers.schedule(ShowCue::Reveal, settings.reveal_at);
        self.timers.schedule(ShowCue::ReduceLoad, settings.reduce_load_at);
        for i in 0..settings.finale_bursts {
            let at = settings.finale_at + i as f32 * settings.finale_spacing_secs;
            self.timers.schedule(ShowCue::Finale(i), at);
        }
        self.timers.schedule(ShowCue::Overlay, settings.overlay_at);
        self.timers.schedule(ShowCue::ContinueButton, settings.continue_at);
        true
    }

    pub fn tick(&mut self, dt: f32) -> Vec<ShowCue> {
        if self.released {
            return Vec::new();
        }
        self.timers.tick(dt)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Returns true the first time only.
    pub fn release(&mut self, ctx: &mut EngineContext) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        let cancelled = self.timers.len();
        self.timers.clear();
        ctx.emit_event(HostEvent::signal(host::FIREWORKS_RELEASE));
        log::info!("fireworks session released, {} cues cancelled", cancelled);
        true
    }
}

impl Drop for FireworksSession {
    fn drop(&mut self) {
        if !self.released {
            log::warn!(
                "fireworks session dropped without release ({} cues pending)",
                self.timers.len()
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Launch,
    Exit,
}

const LAUNCH_INTERVAL: f32 = 0.6;
const REDUCED_LAUNCH_INTERVAL: f32 = 1.2;
const NATIVE_LAUNCH_INTERVAL: f32 = 0.35;

pub struct FireworksView {
    settings: FireworksSettings,
    copy: ScreenCopy,
    session: Option<FireworksSession>,
    timers: Timers<Cue>,
    tweens: TweenState,
    /// The external script failed; the native shells carry the show alone.
    native_only: bool,
    reduced: bool,
    overlay_visible: bool,
    continue_visible: bool,
    leaving: bool,
}

impl FireworksView {
    pub fn new(settings: FireworksSettings, copy: ScreenCopy) -> Self {
        Self {
            settings,
            copy,
            session: None,
            timers: Timers::new(),
            tweens: TweenState::new(),
            native_only: false,
            reduced: false,
            overlay_visible: false,
            continue_visible: false,
            leaving: false,
        }
    }

    pub fn session(&self) -> Option<&FireworksSession> {
        self.session.as_ref()
    }

    fn launch_interval(&self) -> f32 {
        if self.native_only {
            NATIVE_LAUNCH_INTERVAL
        } else if self.reduced {
            REDUCED_LAUNCH_INTERVAL
        } else {
            LAUNCH_INTERVAL
        }
    }

    fn start_show(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.start(&self.settings) {
            self.timers.schedule(Cue::Launch, 0.0);
        }
    }

    fn launch_shell(&mut self, ctx: &mut EngineContext) {
        let rng = &mut ctx.effects.rng;
        let origin = Vec2::new(rng.range(200.0, WORLD.x - 200.0), WORLD.y + 10.0);
        let velocity = Vec2::new(rng.range(-40.0, 40.0), -rng.range(380.0, 480.0));
        let fuse = rng.range(1.0, 1.6);
        let hue = Hue::random(rng);
        ctx.effects.launch_shell(origin, velocity, fuse, hue, 60);
        ctx.emit_sound(sound::BURST);
    }

    fn on_cue(&mut self, ctx: &mut EngineContext, cue: ShowCue) {
        log::debug!("fireworks cue {:?}", cue);
        match cue {
            ShowCue::Reveal => {
                ctx.emit_event(reveal(element::FIREWORKS_CANVAS));
                if let Some(backdrop) = ctx.scene.find_by_tag("backdrop").map(|e| e.id) {
                    self.tweens.add(backdrop, Tween::alpha(1.0, 0.6, 1.0, Easing::SineInOut));
                }
            }
            ShowCue::ReduceLoad => {
                self.reduced = true;
                ctx.emit_event(HostEvent::signal(host::FIREWORKS_REDUCE_LOAD));
            }
            ShowCue::Finale(i) => {
                let x = WORLD.x * (i as f32 + 1.0) / (self.settings.finale_bursts as f32 + 1.0);
                ctx.effects.spawn_burst(Vec2::new(x, 240.0), 120, &Hue::CELEBRATION);
                ctx.emit_event(HostEvent::new(host::FIREWORKS_FINALE, i as f32, 0.0, 0.0));
                ctx.emit_sound(sound::BURST);
            }
            ShowCue::Overlay => {
                self.overlay_visible = true;
                super::spawn_copy(ctx, &self.copy, 260.0, "overlay");
                decor::set_alpha_tagged(ctx, "overlay", 0.0);
                decor::fade_in_tagged(ctx, &mut self.tweens, "overlay", 0.8);
                ctx.emit_event(reveal(element::FIREWORKS_OVERLAY));
            }
            ShowCue::ContinueButton => {
                self.continue_visible = true;
                ctx.emit_event(reveal(element::FIREWORKS_CONTINUE));
            }
        }
    }

    fn leave(&mut self, ctx: &mut EngineContext) {
        if self.leaving {
            return;
        }
        self.leaving = true;
        if let Some(session) = self.session.as_mut() {
            session.release(ctx);
        }
        self.timers.cancel(Cue::Launch);
        self.timers.schedule(Cue::Exit, self.settings.exit_delay_secs);
    }
}

impl StageView for FireworksView {
    fn stage(&self) -> StageId {
        StageId::Fireworks
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        self.session = Some(FireworksSession::acquire(ctx));
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        let dt = ctx.dt();
        self.tweens.tick(dt, &mut ctx.scene);

        for cue in self.timers.tick(dt) {
            match cue {
                Cue::Exit => return StageSignal::Complete,
                Cue::Launch => {
                    self.launch_shell(ctx);
                    self.timers.schedule(Cue::Launch, self.launch_interval());
                }
            }
        }

        let cues = self.session.as_mut().map(|s| s.tick(dt)).unwrap_or_default();
        for cue in cues {
            self.on_cue(ctx, cue);
        }

        for event in input {
            match custom_kind(event) {
                Some((input::SCRIPT_LOADED, _)) => self.start_show(),
                Some((input::SCRIPT_FAILED, _)) => {
                    log::error!(
                        "fireworks script {} failed to load, using native shells",
                        self.settings.script_url
                    );
                    self.native_only = true;
                    self.start_show();
                }
                Some((input::CONTINUE, _)) if self.continue_visible => self.leave(ctx),
                _ => {
                    let keyboard = [keys::ENTER, keys::SPACE, keys::ESCAPE]
                        .iter()
                        .any(|&k| is_key(event, k));
                    if keyboard && self.overlay_visible {
                        self.leave(ctx);
                    }
                }
            }
        }
        StageSignal::Running
    }

    fn exit(&mut self, ctx: &mut EngineContext) {
        if let Some(session) = self.session.as_mut() {
            session.release(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{run_for, send, take_events};

    fn started(event: u32) -> (FireworksView, EngineContext) {
        let mut ctx = EngineContext::new();
        let mut view = FireworksView::new(FireworksSettings::default(), ScreenCopy::default());
        view.enter(&mut ctx);
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_ACQUIRE).len(), 1);
        send(&mut view, &mut ctx, &[InputEvent::custom(event)]);
        (view, ctx)
    }

    fn revealed(ctx: &mut EngineContext) -> Vec<f32> {
        take_events(ctx, host::REVEAL).iter().map(|e| e.a).collect()
    }

    #[test]
    fn session_release_is_idempotent() {
        let mut ctx = EngineContext::new();
        let mut session = FireworksSession::acquire(&mut ctx);
        assert!(session.start(&FireworksSettings::default()));
        assert!(!session.start(&FireworksSettings::default()));
        assert_eq!(session.pending(), 7);

        assert!(session.release(&mut ctx));
        assert!(!session.release(&mut ctx));
        assert_eq!(session.pending(), 0);
        assert!(session.tick(20.0).is_empty());
        assert!(!session.start(&FireworksSettings::default()));
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_RELEASE).len(), 1);
    }

    #[test]
    fn timeline_waits_for_the_script() {
        let mut ctx = EngineContext::new();
        let mut view = FireworksView::new(FireworksSettings::default(), ScreenCopy::default());
        view.enter(&mut ctx);
        run_for(&mut view, &mut ctx, 3.0);
        assert!(revealed(&mut ctx).is_empty());
        assert_eq!(ctx.effects.shell_count(), 0);
    }

    #[test]
    fn timeline_runs_in_order() {
        let (mut view, mut ctx) = started(input::SCRIPT_LOADED);

        run_for(&mut view, &mut ctx, 0.2);
        assert_eq!(revealed(&mut ctx), vec![element::FIREWORKS_CANVAS]);
        assert!(ctx.effects.shell_count() > 0);

        run_for(&mut view, &mut ctx, 3.5);
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_REDUCE_LOAD).len(), 1);

        run_for(&mut view, &mut ctx, 0.9);
        let finale: Vec<f32> = take_events(&mut ctx, host::FIREWORKS_FINALE).iter().map(|e| e.a).collect();
        assert_eq!(finale, vec![0.0, 1.0, 2.0]);

        run_for(&mut view, &mut ctx, 0.5);
        assert_eq!(revealed(&mut ctx), vec![element::FIREWORKS_OVERLAY]);

        run_for(&mut view, &mut ctx, 10.0);
        assert_eq!(revealed(&mut ctx), vec![element::FIREWORKS_CONTINUE]);
    }

    #[test]
    fn continue_button_only_after_it_appears() {
        let (mut view, mut ctx) = started(input::SCRIPT_LOADED);
        run_for(&mut view, &mut ctx, 6.0);
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]);
        assert!(!view.session().unwrap().is_released());

        run_for(&mut view, &mut ctx, 9.5);
        ctx.clear_frame_data();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]);
        assert!(view.session().unwrap().is_released());
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_RELEASE).len(), 1);
        assert!(run_for(&mut view, &mut ctx, 0.2).is_some());
    }

    #[test]
    fn keyboard_continues_once_overlay_shows() {
        let (mut view, mut ctx) = started(input::SCRIPT_LOADED);
        run_for(&mut view, &mut ctx, 1.0);
        send(&mut view, &mut ctx, &[InputEvent::key(keys::SPACE)]);
        assert!(!view.session().unwrap().is_released());

        run_for(&mut view, &mut ctx, 4.5);
        ctx.clear_frame_data();
        send(&mut view, &mut ctx, &[InputEvent::key(keys::ESCAPE), InputEvent::key(keys::ENTER)]);
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_RELEASE).len(), 1);
        // No more cues after release, and the stage finishes shortly.
        let step = run_for(&mut view, &mut ctx, 1.0);
        assert!(step.is_some_and(|s| s <= 6));
        assert!(revealed(&mut ctx).is_empty());

        view.exit(&mut ctx);
        assert!(take_events(&mut ctx, host::FIREWORKS_RELEASE).is_empty());
    }

    #[test]
    fn script_failure_falls_back_to_native_show() {
        let (mut view, mut ctx) = started(input::SCRIPT_FAILED);
        assert!(view.session().unwrap().is_started());
        run_for(&mut view, &mut ctx, 5.1);
        let shown = revealed(&mut ctx);
        assert!(shown.contains(&element::FIREWORKS_OVERLAY));
        assert!(ctx.effects.shell_count() > 10);
    }

    #[test]
    fn exit_releases_an_unfinished_session() {
        let (mut view, mut ctx) = started(input::SCRIPT_LOADED);
        run_for(&mut view, &mut ctx, 1.0);
        view.exit(&mut ctx);
        assert!(view.session().unwrap().is_released());
        assert_eq!(take_events(&mut ctx, host::FIREWORKS_RELEASE).len(), 1);
    }
}
