// extensions/easing.rs
//
// Curves used by the stage animations. `apply` clamps its input, so tweens
// never extrapolate past their end values except through BackOut's overshoot.

use glam::Vec2;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Decelerating. Fades and reveals.
    QuadOut,
    /// Slow at both ends. Floating decor and the candle flicker.
    SineInOut,
    /// Overshoots slightly before settling. Cards popping in.
    BackOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => t * (2.0 - t),
            Self::SineInOut => 0.5 - 0.5 * (PI * t).cos(),
            Self::BackOut => {
                const OVERSHOOT: f32 = 1.70158;
                let u = t - 1.0;
                1.0 + u * u * ((OVERSHOOT + 1.0) * u + OVERSHOOT)
            }
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t)
}

pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

pub fn ease_vec2(a: Vec2, b: Vec2, t: f32, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 4] = [Easing::Linear, Easing::QuadOut, Easing::SineInOut, Easing::BackOut];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-5, "{curve:?}");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-5, "{curve:?}");
        }
    }

    #[test]
    fn shapes() {
        assert!((Easing::QuadOut.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::SineInOut.apply(0.1) < 0.1);
        assert!(Easing::BackOut.apply(0.7) > 1.0);
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(3.0), 1.0);
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
    }

    #[test]
    fn eased_values() {
        assert_eq!(ease(10.0, 30.0, 0.5, Easing::Linear), 20.0);
        let mid = ease_vec2(Vec2::ZERO, Vec2::new(100.0, 40.0), 0.5, Easing::QuadOut);
        assert!((mid - Vec2::new(75.0, 30.0)).length() < 1e-4);
    }
}
