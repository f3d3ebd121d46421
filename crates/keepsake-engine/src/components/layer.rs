/// Draw order bucket. Layers render back to front, Backdrop first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    /// Full-screen gradients and blackout panels.
    Backdrop = 0,
    /// Floating hearts, sparkles, balloons.
    Decor = 1,
    /// Cards, cake, countdown digits.
    #[default]
    Content = 2,
    /// Glows drawn over content.
    Glow = 3,
    /// Fades and crossfades over everything.
    Overlay = 4,
}
