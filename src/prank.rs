//! One run of the popup: pick the next asset, pre-roll, play, hold, and
//! remember the choice for the next run.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use rand::{Rng, RngCore};

use crate::{
    assets::{decode::load_asset, discover::discover_assets},
    clock::Clock,
    config::PrankConfig,
    foundation::{
        core::Rgba8Premul,
        error::{JumpscareError, JumpscareResult},
    },
    input::InputSource,
    playback::{self, CANCEL_POLL_INTERVAL, PlaybackReport},
    render::surface::Surface,
    rotation::RotationState,
};

/// Directory holding the running executable.
pub fn default_base_dir() -> JumpscareResult<PathBuf> {
    let exe = std::env::current_exe().context("locate running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| JumpscareError::validation("executable has no parent directory"))
}

#[derive(Clone, Debug, PartialEq)]
/// The asset chosen for this run, and the rotation state to store after it.
pub struct Selection {
    /// File to show.
    pub path: PathBuf,
    /// Position of `path` among the discovered assets.
    pub index: usize,
    /// Number of discovered assets.
    pub count: usize,
    rotation: RotationState,
}

impl Selection {
    /// Rotation state recording this choice.
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a run ended.
pub enum PrankOutcome {
    /// The user cancelled during the pre-roll, nothing was decoded.
    CancelledBeforeStart,
    /// The playback loop ran.
    Played(PlaybackReport),
}

/// A configured popup rooted at a base directory.
#[derive(Clone, Debug)]
pub struct Prank {
    base_dir: PathBuf,
    config: PrankConfig,
}

impl Prank {
    /// Validate `config` and bind it to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, config: PrankConfig) -> JumpscareResult<Self> {
        config.validate()?;
        Ok(Self {
            base_dir: base_dir.into(),
            config,
        })
    }

    /// Directory the relative paths of the config resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Active configuration.
    pub fn config(&self) -> &PrankConfig {
        &self.config
    }

    /// Where the assets live.
    pub fn resources_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.resources_dir)
    }

    /// Where the rotation state is stored.
    pub fn state_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.state_file)
    }

    /// Discover the assets and pick the one after the previously shown one.
    pub fn select_next(&self) -> JumpscareResult<Selection> {
        let assets = discover_assets(&self.resources_dir(), &self.config.assets)?;
        let mut rotation = RotationState::load(&self.state_path());
        let index = rotation
            .advance(assets.len())
            .ok_or_else(|| JumpscareError::resource_missing("no assets to rotate through"))?;
        let count = assets.len();
        let path = assets
            .into_iter()
            .nth(index)
            .ok_or_else(|| JumpscareError::resource_missing("rotation index out of range"))?;

        tracing::info!(index, count, path = %path.display(), "selected asset");
        Ok(Selection {
            path,
            index,
            count,
            rotation,
        })
    }

    /// Store the rotation state of `selection`. Failures are only logged.
    pub fn commit(&self, selection: &Selection) {
        let path = self.state_path();
        if let Err(e) = selection.rotation.save(&path) {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "could not save rotation state");
        }
    }

    /// Show `selection` on `surface`.
    ///
    /// Blanks the surface, waits a random pre-roll, decodes the asset, runs the
    /// playback loop and holds the last picture briefly. Every wait can be
    /// cancelled through `input`.
    pub fn play(
        &self,
        selection: &Selection,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
        clock: &mut dyn Clock,
        rng: &mut dyn RngCore,
    ) -> JumpscareResult<PrankOutcome> {
        surface.clear(Rgba8Premul::BLACK);
        surface.present()?;

        let preroll = Duration::from_millis(
            rng.gen_range(self.config.preroll_min_ms..=self.config.preroll_max_ms),
        );
        tracing::debug!(?preroll, "pre-roll");
        if playback::wait_for_cancel_or_timeout(input, clock, preroll, CANCEL_POLL_INTERVAL)? {
            tracing::info!("cancelled before start");
            return Ok(PrankOutcome::CancelledBeforeStart);
        }

        let asset = load_asset(&selection.path)?;
        let report = playback::run(
            &asset,
            surface,
            input,
            clock,
            &mut *rng,
            &self.config.playback,
        )?;

        let hold = Duration::from_millis(self.config.post_hold_ms);
        playback::wait_for_cancel_or_timeout(input, clock, hold, CANCEL_POLL_INTERVAL)?;
        Ok(PrankOutcome::Played(report))
    }
}

#[cfg(test)]
#[path = "../tests/unit/prank.rs"]
mod tests;
