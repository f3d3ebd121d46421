//! Effect hues. The discriminant indexes a row of the host's palette texture.

use super::rng::Rng;

/// Colors available to particles and shells. The host builds its palette
/// texture from [`Hue::rgb`] over [`Hue::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Hue {
    Rose = 0,
    Pink,
    Coral,
    Gold,
    Peach,
    Lavender,
    Violet,
    Sky,
    Mint,
    White,
}

impl Hue {
    pub const ALL: [Hue; 10] = [
        Self::Rose, Self::Pink, Self::Coral, Self::Gold, Self::Peach,
        Self::Lavender, Self::Violet, Self::Sky, Self::Mint, Self::White,
    ];

    /// Confetti falling over the memory carousel.
    pub const CONFETTI: [Hue; 6] = [
        Self::Pink, Self::Gold, Self::Sky, Self::Mint, Self::Lavender, Self::Coral,
    ];

    /// Warm tones for the birthday bursts and candle sparks.
    pub const CELEBRATION: [Hue; 5] = [
        Self::Rose, Self::Pink, Self::Gold, Self::Peach, Self::White,
    ];

    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.next_int(Self::ALL.len() as u32) as usize]
    }

    /// Pick from `palette`, or from every hue when it is empty.
    pub fn pick(rng: &mut Rng, palette: &[Hue]) -> Self {
        if palette.is_empty() {
            return Self::random(rng);
        }
        palette[rng.next_int(palette.len() as u32) as usize]
    }

    /// sRGB value of the hue, `0xRRGGBB`.
    pub fn rgb(self) -> u32 {
        match self {
            Self::Rose => 0xff4d6d,
            Self::Pink => 0xff8fab,
            Self::Coral => 0xff7f50,
            Self::Gold => 0xffd166,
            Self::Peach => 0xffb38a,
            Self::Lavender => 0xc8b6ff,
            Self::Violet => 0x9d4edd,
            Self::Sky => 0x72ddf7,
            Self::Mint => 0x95d5b2,
            Self::White => 0xfff8f0,
        }
    }

    /// Palette texture row, written into the vertex z channel.
    pub fn index(self) -> f32 {
        self as u8 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_valid() {
        let mut rng = Rng::new(42);
        for _ in 0..100 {
            assert!(Hue::ALL.contains(&Hue::random(&mut rng)));
        }
    }

    #[test]
    fn pick_respects_palette() {
        let mut rng = Rng::new(3);
        for _ in 0..100 {
            assert!(Hue::CONFETTI.contains(&Hue::pick(&mut rng, &Hue::CONFETTI)));
        }
    }

    #[test]
    fn palette_colors_are_distinct() {
        let mut colors: Vec<u32> = Hue::ALL.iter().map(|h| h.rgb()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), Hue::ALL.len());
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (i, hue) in Hue::ALL.iter().enumerate() {
            assert_eq!(hue.index(), i as f32);
        }
    }
}
