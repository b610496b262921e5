use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::{
    assets::{discover::default_asset_order, fit::FitMode},
    effects::{decay::Decay, shake::Shake},
    foundation::{
        core::FrameRate,
        error::{JumpscareError, JumpscareResult},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Knobs of the playback loop.
pub struct PlaybackSettings {
    /// Target ticks per second.
    pub frame_rate: u32,
    /// Scaling policy for frames and images.
    pub fit: FitMode,
    /// Length of the shake window at the start of an animation.
    pub shake_window_ms: u64,
    /// Shake amplitude in pixels at the start of the window.
    pub shake_magnitude: u32,
    /// How the amplitude fades over the window.
    pub shake_decay: Decay,
    /// Flash overlays before a still image settles.
    pub flash_count: u32,
    /// How long the last animation frame is held after the nominal duration.
    pub completion_grace_ms: u64,
    /// Close a still image after this long; `None` waits for the user.
    pub static_timeout_ms: Option<u64>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            fit: FitMode::Contain,
            shake_window_ms: 800,
            shake_magnitude: 18,
            shake_decay: Decay::Linear,
            flash_count: 3,
            completion_grace_ms: 1200,
            static_timeout_ms: None,
        }
    }
}

impl PlaybackSettings {
    /// Reject settings the loop cannot run with.
    pub fn validate(&self) -> JumpscareResult<()> {
        FrameRate::new(self.frame_rate)?;
        if self.frame_rate > 1000 {
            return Err(JumpscareError::validation("frame_rate must be <= 1000"));
        }
        Ok(())
    }

    /// Tick rate.
    pub fn frame_rate(&self) -> JumpscareResult<FrameRate> {
        FrameRate::new(self.frame_rate)
    }

    /// Perturbation applied to animations.
    pub fn shake(&self) -> Shake {
        Shake::new(
            Duration::from_millis(self.shake_window_ms),
            self.shake_magnitude,
            self.shake_decay,
        )
    }

    /// Hold time after the last frame.
    pub fn completion_grace(&self) -> Duration {
        Duration::from_millis(self.completion_grace_ms)
    }

    /// Optional lifetime of a still image.
    pub fn static_timeout(&self) -> Option<Duration> {
        self.static_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Full configuration of the `jumpscare` popup. Every field is optional in JSON.
pub struct PrankConfig {
    /// Directory, relative to the base dir, holding the assets.
    pub resources_dir: String,
    /// Rotation state file, relative to the base dir.
    pub state_file: String,
    /// Asset file names in rotation order.
    pub assets: Vec<String>,
    /// Fraction of the terminal covered by the popup.
    pub window_scale: f64,
    /// Shortest random delay before the scare.
    pub preroll_min_ms: u64,
    /// Longest random delay before the scare.
    pub preroll_max_ms: u64,
    /// Pause after playback ends, still cancellable.
    pub post_hold_ms: u64,
    /// Playback loop settings.
    pub playback: PlaybackSettings,
}

impl Default for PrankConfig {
    fn default() -> Self {
        Self {
            resources_dir: "resources".to_string(),
            state_file: "state.json".to_string(),
            assets: default_asset_order(),
            window_scale: 0.6,
            preroll_min_ms: 500,
            preroll_max_ms: 2500,
            post_hold_ms: 600,
            playback: PlaybackSettings::default(),
        }
    }
}

impl PrankConfig {
    /// Read a JSON config file; absent fields take their defaults.
    pub fn load(path: &Path) -> JumpscareResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject inconsistent values.
    pub fn validate(&self) -> JumpscareResult<()> {
        if self.resources_dir.trim().is_empty() {
            return Err(JumpscareError::validation("resources_dir must be non-empty"));
        }
        if self.state_file.trim().is_empty() {
            return Err(JumpscareError::validation("state_file must be non-empty"));
        }
        if self.assets.is_empty() {
            return Err(JumpscareError::validation("assets must list at least one file"));
        }
        if !self.window_scale.is_finite() || self.window_scale <= 0.0 || self.window_scale > 1.0
        {
            return Err(JumpscareError::validation("window_scale must be in (0, 1]"));
        }
        if self.preroll_min_ms > self.preroll_max_ms {
            return Err(JumpscareError::validation(
                "preroll_min_ms must be <= preroll_max_ms",
            ));
        }
        self.playback.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
