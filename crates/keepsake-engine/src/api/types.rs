use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A sound cue emitted by the show.
/// The numeric value maps to a show-defined clip in the host's audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A record published from Rust to the host each frame.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HostEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl HostEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self { kind: kind as f32, a, b, c }
    }

    /// An event with no payload.
    pub fn signal(kind: u32) -> Self {
        Self::new(kind, 0.0, 0.0, 0.0)
    }

    pub fn kind_id(&self) -> u32 {
        self.kind as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<HostEvent>(), HostEvent::FLOATS * 4);
    }

    #[test]
    fn signal_has_empty_payload() {
        let e = HostEvent::signal(9);
        assert_eq!(e.kind_id(), 9);
        assert_eq!((e.a, e.b, e.c), (0.0, 0.0, 0.0));
    }
}
