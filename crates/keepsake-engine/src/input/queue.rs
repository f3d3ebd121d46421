/// DOM `keyCode` numbers used by the stage views.
pub mod keys {
    pub const BACKSPACE: u32 = 8;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_RIGHT: u32 = 39;
    pub const DIGIT_0: u32 = 48;
    pub const DIGIT_9: u32 = 57;
    pub const NUMPAD_0: u32 = 96;
    pub const NUMPAD_9: u32 = 105;

    /// Top-row and numpad digits both map to 0..=9.
    pub fn digit(key_code: u32) -> Option<u8> {
        let base = match key_code {
            DIGIT_0..=DIGIT_9 => DIGIT_0,
            NUMPAD_0..=NUMPAD_9 => NUMPAD_0,
            _ => return None,
        };
        Some((key_code - base) as u8)
    }
}

/// Input forwarded by the host. Pointer coordinates are already in world
/// units. `Custom` carries everything that is not a raw pointer or key:
/// DOM button clicks, browser API results, microphone levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    pub fn custom(kind: u32) -> Self {
        Self::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    /// A key press.
    pub fn key(key_code: u32) -> Self {
        Self::KeyDown { key_code }
    }

    /// Key code of a press. Releases are not reported.
    pub fn pressed(&self) -> Option<u32> {
        match *self {
            Self::KeyDown { key_code } => Some(key_code),
            _ => None,
        }
    }
}

/// Events collected between fixed steps. The runner fills one per frame
/// and hands it to the show by reference.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { events: Vec::with_capacity(32) }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Takes the pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}
