/// Texture atlas index. The host binds atlas 0 to the decor sheet and
/// atlas 1 to the bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Alpha,
    /// Drawn after every alpha-blended sprite. Used for flames, glows and sparkles.
    Additive,
}

/// A cell (or square block of cells) of an atlas grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    pub atlas: AtlasId,
    pub col: f32,
    pub row: f32,
    /// Side of the sampled block in cells.
    pub cell_span: f32,
    /// Values above 1 brighten additive sprites.
    pub alpha: f32,
    pub blend: BlendMode,
}

impl SpriteComponent {
    pub fn cell(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self { atlas, col, row, cell_span: 1.0, alpha: 1.0, blend: BlendMode::Alpha }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    pub fn with_blend(self, blend: BlendMode) -> Self {
        Self { blend, ..self }
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::cell(AtlasId(0), 0.0, 0.0)
    }
}
