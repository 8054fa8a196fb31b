#[cfg(test)]
#[path = "easing_test.rs"]
mod easing_test;

/// Maps animation progress in `0..=1` to an interpolation factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, exponential settle: `1 - 2^(-10t)`, pinned to 1 at `t = 1`.
    EaseOutExpo,
}

impl Easing {
    /// Apply the curve. Progress outside `0..=1` is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}
