use bytemuck::{Pod, Zeroable};
use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;

/// One sprite as the host renderer reads it: 8 floats, 32-byte stride.
/// Field order is part of the shared-buffer protocol.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    /// Radians.
    pub rotation: f32,
    /// Rendered edge length in world units. Only `Entity.scale.x` is used.
    pub scale: f32,
    pub sprite_col: f32,
    pub alpha: f32,
    pub cell_span: f32,
    pub atlas_row: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_entity(entity: &Entity, sprite: &SpriteComponent) -> Self {
        Self {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            scale: entity.scale.x,
            sprite_col: sprite.col,
            alpha: sprite.alpha,
            cell_span: sprite.cell_span,
            atlas_row: sprite.row,
        }
    }
}

/// Fixed-capacity instance list rebuilt every frame.
///
/// Alpha-blended instances occupy `[0, atlas_split)`, additive ones the
/// rest, so the host can draw both ranges with one bind each.
#[derive(Debug)]
pub struct RenderBuffer {
    instances: Vec<RenderInstance>,
    atlas_split: u32,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            atlas_split: 0,
            capacity,
        }
    }

    /// Replaces the contents with `alpha` followed by `additive`, truncated
    /// to capacity. Returns how many instances did not fit.
    pub fn fill(
        &mut self,
        alpha: impl IntoIterator<Item = RenderInstance>,
        additive: impl IntoIterator<Item = RenderInstance>,
    ) -> usize {
        self.instances.clear();
        let mut dropped = 0;
        for inst in alpha {
            if self.instances.len() < self.capacity {
                self.instances.push(inst);
            } else {
                dropped += 1;
            }
        }
        self.atlas_split = self.instances.len() as u32;
        for inst in additive {
            if self.instances.len() < self.capacity {
                self.instances.push(inst);
            } else {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.atlas_split = 0;
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn atlas_split(&self) -> u32 {
        self.atlas_split
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
