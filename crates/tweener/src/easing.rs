//! Easing functions for tweens

/// Easing function type
///
/// Maps normalized progress to eased progress. Input is nominally in
/// 0.0..=1.0 and is not clamped before or after application; callers are
/// responsible for passing normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    /// Caller-supplied curve. Must be pure.
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, v: f32) -> f32 {
        use std::f32::consts::PI;

        match self {
            Easing::Linear => v,
            Easing::EaseInSine => 1.0 - (v * PI / 2.0).cos(),
            Easing::EaseOutSine => (v * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * v).cos() - 1.0) / 2.0,
            Easing::EaseInQuad => v * v,
            Easing::EaseOutQuad => 1.0 - (1.0 - v) * (1.0 - v),
            Easing::EaseInOutQuad => {
                if v < 0.5 {
                    2.0 * v * v
                } else {
                    1.0 - (-2.0 * v + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => v * v * v,
            Easing::EaseOutCubic => 1.0 - (1.0 - v).powi(3),
            Easing::EaseInOutCubic => {
                if v < 0.5 {
                    4.0 * v * v * v
                } else {
                    1.0 - (-2.0 * v + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => v * v * v * v,
            Easing::EaseOutQuart => 1.0 - (1.0 - v).powi(4),
            Easing::EaseInOutQuart => {
                if v < 0.5 {
                    8.0 * v * v * v * v
                } else {
                    1.0 - (-2.0 * v + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => v * v * v * v * v,
            Easing::EaseOutQuint => 1.0 - (1.0 - v).powi(5),
            Easing::EaseInOutQuint => {
                if v < 0.5 {
                    16.0 * v * v * v * v * v
                } else {
                    1.0 - (-2.0 * v + 2.0).powi(5) / 2.0
                }
            }
            Easing::Custom(f) => f(v),
        }
    }
}
