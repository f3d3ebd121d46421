//! Layout of the float buffer the host reads each frame.
//!
//! ```text
//! header    16 floats
//! instances max_instances        x 8  (x, y, rotation, scale, col, row, alpha, cell_span)
//! effects   max_effects_vertices x 5  (x, y, hue, u, v)
//! sounds    max_sounds           x 1  (sound id)
//! events    max_events           x 4  (kind, a, b, c)
//! ```
//!
//! The host's `protocol.ts` mirrors these numbers. Capacities go into the
//! header so the host can derive every offset from it.

use crate::api::show::ShowConfig;

pub const HEADER_FLOATS: usize = 16;

pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_ATLAS_SPLIT: usize = 4;
pub const HEADER_MAX_EFFECTS_VERTICES: usize = 5;
pub const HEADER_EFFECTS_VERTEX_COUNT: usize = 6;
pub const HEADER_WORLD_WIDTH: usize = 7;
pub const HEADER_WORLD_HEIGHT: usize = 8;
pub const HEADER_MAX_SOUNDS: usize = 9;
pub const HEADER_SOUND_COUNT: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;
pub const HEADER_PROTOCOL_VERSION: usize = 13;
pub const HEADER_STAGE_INDEX: usize = 14;
/// Show time in seconds.
pub const HEADER_ELAPSED: usize = 15;

pub const PROTOCOL_VERSION: f32 = 1.0;

pub const INSTANCE_FLOATS: usize = 8;
pub const EFFECTS_VERTEX_FLOATS: usize = 5;
pub const SOUND_FLOATS: usize = 1;
pub const EVENT_FLOATS: usize = 4;

/// One fixed-capacity region of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// First float of the region.
    pub offset: usize,
    /// Maximum number of records.
    pub capacity: usize,
    /// Floats per record.
    pub stride: usize,
}

impl Section {
    pub fn floats(&self) -> usize {
        self.capacity * self.stride
    }

    /// One past the last float of the region.
    pub fn end(&self) -> usize {
        self.offset + self.floats()
    }

    fn after(previous_end: usize, capacity: usize, stride: usize) -> Self {
        Self { offset: previous_end, capacity, stride }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolLayout {
    pub instances: Section,
    pub effects: Section,
    pub sounds: Section,
    pub events: Section,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_effects_vertices: usize, max_sounds: usize, max_events: usize) -> Self {
        let instances = Section::after(HEADER_FLOATS, max_instances, INSTANCE_FLOATS);
        let effects = Section::after(instances.end(), max_effects_vertices, EFFECTS_VERTEX_FLOATS);
        let sounds = Section::after(effects.end(), max_sounds, SOUND_FLOATS);
        let events = Section::after(sounds.end(), max_events, EVENT_FLOATS);
        Self { instances, effects, sounds, events }
    }

    pub fn from_config(config: &ShowConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_effects_vertices,
            config.max_sounds,
            config.max_events,
        )
    }

    pub fn total_floats(&self) -> usize {
        self.events.end()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_floats() * std::mem::size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_show_buffer_size() {
        let layout = ProtocolLayout::from_config(&ShowConfig::default());
        assert_eq!(layout.instances.capacity, 512);
        assert_eq!(layout.effects.floats(), 16384 * 5);
        let expected = HEADER_FLOATS + 512 * 8 + 16384 * 5 + 32 + 32 * 4;
        assert_eq!(layout.total_floats(), expected);
        assert_eq!(layout.total_bytes(), expected * 4);
    }

    #[test]
    fn sections_follow_each_other() {
        let layout = ProtocolLayout::new(100, 200, 10, 20);
        assert_eq!(layout.instances.offset, HEADER_FLOATS);
        assert_eq!(layout.effects.offset, layout.instances.end());
        assert_eq!(layout.sounds.offset, layout.effects.end());
        assert_eq!(layout.events.offset, layout.sounds.end());
        assert_eq!(layout.events.floats(), 80);
    }

    #[test]
    fn empty_sections_take_no_space() {
        let layout = ProtocolLayout::new(0, 0, 0, 0);
        assert_eq!(layout.total_floats(), HEADER_FLOATS);
    }
}
