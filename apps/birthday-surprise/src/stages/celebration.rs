use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use keepsake_engine::{
    BlendMode, EmitterComponent, Easing, EngineContext, Entity, HostEvent, Hue,
    InputEvent, ParticleColorMode, RenderLayer, Timers, Tween, TweenLoop, TweenState,
};

use crate::candle::CandleTrigger;
use crate::config::CakeSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, sprites, WORLD};
use crate::events::{custom_kind, element, host, input, reveal, sound};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Text,
    Cake,
    Finish,
}

const TEXT_TAG: &str = "celebration-text";
const FLAME_TAG: &str = "flame";
const CAKE_CENTER: Vec2 = Vec2::new(WORLD.x / 2.0, 480.0);
const FLAME_POS: Vec2 = Vec2::new(WORLD.x / 2.0, 330.0);

/// Music, a cake, and a candle to blow out.
pub struct CelebrationView {
    settings: CakeSettings,
    copy: ScreenCopy,
    wishes: ScreenCopy,
    candle: CandleTrigger,
    timers: Timers<Cue>,
    tweens: TweenState,
    cake_visible: bool,
}

impl CelebrationView {
    pub fn new(settings: &CakeSettings, copy: ScreenCopy, wishes: ScreenCopy) -> Self {
        Self {
            settings: settings.clone(),
            copy,
            wishes,
            candle: CandleTrigger::new(settings.blow_threshold),
            timers: Timers::new(),
            tweens: TweenState::new(),
            cake_visible: false,
        }
    }

    pub fn candle(&self) -> &CandleTrigger {
        &self.candle
    }

    fn show_cake(&mut self, ctx: &mut EngineContext) {
        self.cake_visible = true;
        let cake = decor::spawn_sprite(ctx, sprites::CAKE, CAKE_CENTER, 260.0, RenderLayer::Content, "cake");
        self.tweens.add(cake, Tween::fade_in(0.8, Easing::QuadOut));

        let flame = decor::spawn_sprite(ctx, sprites::FLAME, FLAME_POS, 36.0, RenderLayer::Glow, FLAME_TAG);
        if let Some(sprite) = ctx.scene.get_mut(flame).and_then(|e| e.sprite.as_mut()) {
            sprite.blend = BlendMode::Additive;
        }
        self.tweens.add(
            flame,
            Tween::alpha(0.6, 1.0, 0.15, Easing::SineInOut).with_loop(TweenLoop::PingPong),
        );

        let sparks = EmitterComponent::continuous(12.0)
            .with_speed_range(20.0, 50.0)
            .with_direction(-FRAC_PI_2, 0.6)
            .with_width(2.0)
            .with_lifetime(0.8)
            .with_color_mode(ParticleColorMode::Fixed(Hue::Gold));
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(FLAME_TAG)
                .with_pos(FLAME_POS)
                .with_emitter(sparks),
        );
        ctx.emit_event(reveal(element::CAKE));
    }

    fn blow_out(&mut self, ctx: &mut EngineContext, mic_open: bool) {
        log::info!("candle blown out");
        if mic_open {
            ctx.emit_event(HostEvent::signal(host::MIC_STOP));
        }
        let flames: Vec<_> = ctx.scene.tagged(FLAME_TAG).map(|e| e.id).collect();
        for id in flames {
            self.tweens.remove_entity(id);
            ctx.scene.despawn(id);
        }
        ctx.effects.spawn_burst(FLAME_POS, 80, &Hue::CELEBRATION);

        ctx.emit_event(HostEvent::signal(host::CANDLE_BLOWN));
        ctx.emit_sound(sound::CANDLE_OUT);
        super::spawn_copy(ctx, &self.wishes, 640.0, "wishes");
        ctx.emit_event(reveal(element::WISHES));
        self.timers.schedule_once(Cue::Finish, self.settings.complete_delay_secs);
    }
}

impl StageView for CelebrationView {
    fn stage(&self) -> StageId {
        StageId::Celebration
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::BALLOON, 8, "balloons");
        ctx.emit_sound(sound::MUSIC_START);
        self.timers.schedule(Cue::Text, self.settings.text_delay_secs);
        self.timers.schedule(Cue::Cake, self.settings.cake_delay_secs);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        let dt = ctx.dt();
        self.tweens.tick(dt, &mut ctx.scene);

        for cue in self.timers.tick(dt) {
            match cue {
                Cue::Text => {
                    super::spawn_copy(ctx, &self.copy, 80.0, TEXT_TAG);
                    decor::set_alpha_tagged(ctx, TEXT_TAG, 0.0);
                    decor::fade_in_tagged(ctx, &mut self.tweens, TEXT_TAG, 1.0);
                    ctx.emit_event(reveal(element::CELEBRATION_TEXT));
                }
                Cue::Cake => self.show_cake(ctx),
                Cue::Finish => return StageSignal::Complete,
            }
        }

        for event in input {
            match custom_kind(event) {
                Some((input::CAKE_CLICK, _)) if self.cake_visible => {
                    if self.candle.start() {
                        log::info!("listening for the candle");
                        ctx.emit_event(HostEvent::signal(host::MIC_START));
                    }
                }
                Some((input::MIC_LEVEL, level)) => {
                    if self.candle.feed(level) {
                        self.blow_out(ctx, true);
                    }
                }
                Some((input::MIC_DENIED, _)) => {
                    if self.candle.deny() {
                        log::warn!("microphone unavailable, blowing the candle out anyway");
                        self.blow_out(ctx, false);
                    } else {
                        log::debug!("microphone denial ignored, candle not listening");
                    }
                }
                Some((input::CONTINUE, _)) if self.candle.is_blown() => return StageSignal::Complete,
                _ => {}
            }
        }
        StageSignal::Running
    }

    fn exit(&mut self, ctx: &mut EngineContext) {
        ctx.emit_sound(sound::MUSIC_STOP);
        if self.candle.is_listening() {
            ctx.emit_event(HostEvent::signal(host::MIC_STOP));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{run_for, send, take_events};

    fn level(value: f32) -> InputEvent {
        InputEvent::Custom { kind: input::MIC_LEVEL, a: value, b: 0.0, c: 0.0 }
    }

    fn entered() -> (CelebrationView, EngineContext) {
        let mut ctx = EngineContext::new();
        let mut view = CelebrationView::new(&CakeSettings::default(), ScreenCopy::default(), ScreenCopy::default());
        view.enter(&mut ctx);
        assert_eq!(ctx.sounds, vec![sound::MUSIC_START]);
        (view, ctx)
    }

    fn with_cake() -> (CelebrationView, EngineContext) {
        let (mut view, mut ctx) = entered();
        run_for(&mut view, &mut ctx, 3.1);
        ctx.clear_frame_data();
        (view, ctx)
    }

    #[test]
    fn text_then_cake_on_schedule() {
        let (mut view, mut ctx) = entered();
        let click = [InputEvent::custom(input::CAKE_CLICK)];
        send(&mut view, &mut ctx, &click);
        assert!(take_events(&mut ctx, host::MIC_START).is_empty());

        run_for(&mut view, &mut ctx, 0.5);
        let reveals: Vec<f32> = take_events(&mut ctx, host::REVEAL).iter().map(|e| e.a).collect();
        assert_eq!(reveals, vec![element::CELEBRATION_TEXT]);

        run_for(&mut view, &mut ctx, 2.5);
        let reveals: Vec<f32> = take_events(&mut ctx, host::REVEAL).iter().map(|e| e.a).collect();
        assert_eq!(reveals, vec![element::CAKE]);
        assert_eq!(ctx.scene.count_tagged(FLAME_TAG), 2);

        send(&mut view, &mut ctx, &click);
        send(&mut view, &mut ctx, &click);
        assert_eq!(take_events(&mut ctx, host::MIC_START).len(), 1);
    }

    #[test]
    fn loud_blow_puts_the_candle_out_once() {
        let (mut view, mut ctx) = with_cake();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CAKE_CLICK), level(30.0)]);
        assert!(view.candle().is_listening());

        send(&mut view, &mut ctx, &[level(180.0), level(220.0)]);
        assert_eq!(take_events(&mut ctx, host::CANDLE_BLOWN).len(), 1);
        assert_eq!(ctx.scene.count_tagged(FLAME_TAG), 0);
        assert!(ctx.effects.particle_count() >= 80);

        assert_eq!(run_for(&mut view, &mut ctx, 4.9), None);
        assert!(run_for(&mut view, &mut ctx, 0.2).is_some());
    }

    #[test]
    fn blow_releases_the_microphone() {
        let (mut view, mut ctx) = with_cake();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CAKE_CLICK)]);
        send(&mut view, &mut ctx, &[level(150.0)]);
        assert_eq!(take_events(&mut ctx, host::MIC_STOP).len(), 1);
        view.exit(&mut ctx);
        assert!(take_events(&mut ctx, host::MIC_STOP).is_empty());
    }

    #[test]
    fn denied_microphone_falls_back() {
        let (mut view, mut ctx) = with_cake();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CAKE_CLICK), InputEvent::custom(input::MIC_DENIED)]);
        assert!(view.candle().is_blown());
        assert_eq!(ctx.sounds, vec![sound::CANDLE_OUT]);
        assert!(take_events(&mut ctx, host::MIC_STOP).is_empty());
        assert_eq!(send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]), StageSignal::Complete);
    }

    #[test]
    fn stray_denial_before_cake_click_is_ignored() {
        let (mut view, mut ctx) = with_cake();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::MIC_DENIED)]);
        assert!(!view.candle().is_blown());
        assert!(ctx.sounds.is_empty());
        assert_eq!(send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]), StageSignal::Running);
    }

    #[test]
    fn continue_needs_the_candle_out() {
        let (mut view, mut ctx) = with_cake();
        assert_eq!(send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]), StageSignal::Running);
    }

    #[test]
    fn exit_stops_music_and_listening_microphone() {
        let (mut view, mut ctx) = with_cake();
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CAKE_CLICK)]);
        ctx.clear_frame_data();
        view.exit(&mut ctx);
        assert_eq!(ctx.sounds, vec![sound::MUSIC_STOP]);
        assert_eq!(take_events(&mut ctx, host::MIC_STOP).len(), 1);
    }
}
