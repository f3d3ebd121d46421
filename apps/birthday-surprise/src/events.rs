//! Numbered messages exchanged with the host page.
//! Must stay in sync with the host's `events.ts`.

use keepsake_engine::{HostEvent, InputEvent};

/// Custom input kinds (host → show), delivered through `game_custom_event`.
pub mod input {
    /// A continue / begin / reveal button was pressed.
    pub const CONTINUE: u32 = 1;
    /// A back button was pressed.
    pub const BACK: u32 = 2;
    /// `document.fullscreenElement` changed. a = 1 when entered, 0 when left.
    pub const FULLSCREEN_CHANGED: u32 = 3;
    /// `requestFullscreen()` rejected or is unsupported.
    pub const FULLSCREEN_FAILED: u32 = 4;
    /// Keypad digit. a = digit 0-9.
    pub const PIN_DIGIT: u32 = 5;
    pub const PIN_BACKSPACE: u32 = 6;
    pub const PIN_SUBMIT: u32 = 7;
    /// The fireworks script finished loading.
    pub const SCRIPT_LOADED: u32 = 8;
    /// The fireworks script failed to load.
    pub const SCRIPT_FAILED: u32 = 9;
    /// A gallery tile was clicked. a = story index.
    pub const LIGHTBOX_OPEN: u32 = 10;
    pub const LIGHTBOX_CLOSE: u32 = 11;
    pub const LIGHTBOX_NEXT: u32 = 12;
    pub const LIGHTBOX_PREV: u32 = 13;
    /// The lightbox image finished loading.
    pub const IMAGE_LOADED: u32 = 14;
    pub const CAKE_CLICK: u32 = 15;
    /// Microphone sample. a = average frequency magnitude (0-255).
    pub const MIC_LEVEL: u32 = 16;
    /// Microphone permission denied or no device.
    pub const MIC_DENIED: u32 = 17;
    /// The "enter fullscreen" button was pressed.
    pub const ENTER_FULLSCREEN: u32 = 18;
}

/// Host event kinds (show → host).
pub mod host {
    /// a = new stage index.
    pub const STAGE_CHANGED: u32 = 1;
    /// Call `requestFullscreen()` (needs the user gesture that triggered it).
    pub const REQUEST_FULLSCREEN: u32 = 2;
    /// a = one of [`super::pin_feedback`], b = payload (attempts left or seconds locked).
    pub const PIN_FEEDBACK: u32 = 3;
    /// a = digits currently entered.
    pub const PIN_LENGTH: u32 = 4;
    /// Load and start the fireworks script.
    pub const FIREWORKS_ACQUIRE: u32 = 5;
    /// Stop fireworks audio and tear the script down.
    pub const FIREWORKS_RELEASE: u32 = 6;
    /// a = finale burst number (0-based).
    pub const FIREWORKS_FINALE: u32 = 7;
    /// Switch the script to its lighter settings.
    pub const FIREWORKS_REDUCE_LOAD: u32 = 8;
    /// Show a DOM element. a = one of [`super::element`].
    pub const REVEAL: u32 = 9;
    /// a = days, b = seconds within the day (h * 3600 + m * 60 + s).
    pub const COUNTDOWN: u32 = 10;
    /// a = memory index, b = 1 when it is the last memory.
    pub const CAROUSEL_INDEX: u32 = 11;
    /// a = 1 open / 0 closed, b = story index, c = 1 while the image loads.
    pub const LIGHTBOX: u32 = 12;
    /// Start streaming microphone levels.
    pub const MIC_START: u32 = 13;
    /// Stop the microphone and close its audio context.
    pub const MIC_STOP: u32 = 14;
    pub const CANDLE_BLOWN: u32 = 15;
    /// a = characters revealed, b = total characters.
    pub const LETTER_PROGRESS: u32 = 16;
}

/// Payload `a` of [`host::PIN_FEEDBACK`].
pub mod pin_feedback {
    pub const ACCEPTED: f32 = 1.0;
    /// b = attempts left. The host shakes the keypad.
    pub const WRONG: f32 = 2.0;
    /// b = whole seconds until input unlocks.
    pub const LOCKED: f32 = 3.0;
    pub const UNLOCKED: f32 = 4.0;
}

/// DOM elements revealed through [`host::REVEAL`].
pub mod element {
    pub const HERO_CONTENT: f32 = 1.0;
    pub const FIREWORKS_CANVAS: f32 = 2.0;
    pub const FIREWORKS_OVERLAY: f32 = 3.0;
    pub const FIREWORKS_CONTINUE: f32 = 4.0;
    pub const COUNTDOWN_ARRIVED: f32 = 5.0;
    pub const MEMORY_NEXT: f32 = 6.0;
    pub const CELEBRATION_TEXT: f32 = 7.0;
    pub const CAKE: f32 = 8.0;
    pub const WISHES: f32 = 9.0;
    pub const LETTER_FOOTER: f32 = 10.0;
}

/// Sound cues, mapped to clips by the host's audio player.
pub mod sound {
    use keepsake_engine::SoundEvent;

    pub const MUSIC_START: SoundEvent = SoundEvent(1);
    pub const MUSIC_STOP: SoundEvent = SoundEvent(2);
    pub const BURST: SoundEvent = SoundEvent(3);
    pub const PIN_ERROR: SoundEvent = SoundEvent(4);
    pub const PIN_SUCCESS: SoundEvent = SoundEvent(5);
    pub const CANDLE_OUT: SoundEvent = SoundEvent(6);
}

pub fn reveal(element: f32) -> HostEvent {
    HostEvent::new(host::REVEAL, element, 0.0, 0.0)
}

/// A custom input of `kind`, with its first payload value.
pub fn custom_kind(event: &InputEvent) -> Option<(u32, f32)> {
    match *event {
        InputEvent::Custom { kind, a, .. } => Some((kind, a)),
        _ => None,
    }
}

/// Whether `event` is the custom input `kind`.
pub fn is_custom(event: &InputEvent, kind: u32) -> bool {
    matches!(custom_kind(event), Some((k, _)) if k == kind)
}

/// Whether `event` is a key press of `key_code`.
pub fn is_key(event: &InputEvent, key_code: u32) -> bool {
    matches!(*event, InputEvent::KeyDown { key_code: k } if k == key_code)
}


#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_engine::keys;

    #[test]
    fn custom_helpers_match_kind() {
        let open = InputEvent::Custom { kind: input::LIGHTBOX_OPEN, a: 2.0, b: 0.0, c: 0.0 };
        assert_eq!(custom_kind(&open), Some((input::LIGHTBOX_OPEN, 2.0)));
        assert!(is_custom(&open, input::LIGHTBOX_OPEN));
        assert!(!is_custom(&open, input::LIGHTBOX_CLOSE));
        assert!(!is_custom(&InputEvent::key(keys::ENTER), input::CONTINUE));
    }

    #[test]
    fn key_helper_matches_key_down_only() {
        assert!(is_key(&InputEvent::key(keys::ESCAPE), keys::ESCAPE));
        assert!(!is_key(&InputEvent::KeyUp { key_code: keys::ESCAPE }, keys::ESCAPE));
    }

    #[test]
    fn reveal_carries_element() {
        let e = reveal(element::CAKE);
        assert_eq!(e.kind_id(), host::REVEAL);
        assert_eq!(e.a, element::CAKE);
    }
}
