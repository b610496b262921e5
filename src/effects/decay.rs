#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Monotonic easing that maps the remaining fraction of an effect window to a
/// strength factor.
///
/// Every curve maps 0 to 0 and 1 to 1 and never decreases in between.
pub enum Decay {
    /// Strength proportional to the remaining time.
    #[default]
    Linear,
    /// Slow start, fast finish (`t^2`).
    InQuad,
    /// Fast start, slow finish.
    OutQuad,
    /// `t^3`.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
}

impl Decay {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/decay.rs"]
mod tests;
