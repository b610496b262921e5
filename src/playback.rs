//! The playback loop: one session of showing an [`Asset`] on a [`Surface`].
//!
//! Each tick the loop samples the clock once, drains pending input, draws,
//! presents, advances animation state and sleeps out the rest of the tick
//! budget. Time, input and randomness are injected so a session can be
//! replayed deterministically.

use std::time::Duration;

use rand::RngCore;
use rayon::prelude::*;

use crate::{
    assets::{
        fit::{center_offset, fit_raster},
        model::{Asset, Raster},
    },
    clock::Clock,
    config::PlaybackSettings,
    effects::{flash::FlashSchedule, shake::Shake},
    foundation::{
        core::{Offset, Rgba8Premul, SurfaceSize},
        error::{JumpscareError, JumpscareResult},
    },
    input::InputSource,
    render::surface::Surface,
};

/// Polling period of [`wait_for_cancel_or_timeout`] in the popup.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a session ended.
pub enum ExitReason {
    /// The asset ran its course (or a still image timed out).
    Completed,
    /// A quit, escape or click arrived.
    UserCancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Summary of a finished session.
pub struct PlaybackReport {
    /// Why the loop stopped.
    pub reason: ExitReason,
    /// Ticks started, including the one that stopped the loop.
    pub ticks: u64,
    /// Frame index shown last.
    pub frame_index: usize,
    /// Frame advances performed.
    pub frames_advanced: u64,
    /// Session time from the first tick to the stop.
    pub elapsed: Duration,
}

struct ScaledFrame {
    raster: Raster,
    at: Offset,
    duration: Duration,
}

enum Prepared {
    Animated(Vec<ScaledFrame>),
    Static { raster: Raster, at: Offset },
}

fn prepare(
    asset: &Asset,
    size: SurfaceSize,
    settings: &PlaybackSettings,
) -> JumpscareResult<Prepared> {
    let place = |raster: &Raster| {
        let scaled = fit_raster(raster, size, settings.fit);
        let at = center_offset(scaled.width, scaled.height, size);
        (scaled, at)
    };

    match asset {
        Asset::Animated(frames) => {
            if frames.is_empty() {
                return Err(JumpscareError::NoFrames);
            }
            let scaled = frames
                .par_iter()
                .map(|f| {
                    let (raster, at) = place(&f.raster);
                    ScaledFrame {
                        raster,
                        at,
                        duration: f.duration,
                    }
                })
                .collect::<Vec<_>>();
            Ok(Prepared::Animated(scaled))
        }
        Asset::Static(raster) => {
            let (raster, at) = place(raster);
            Ok(Prepared::Static { raster, at })
        }
    }
}

/// Mutable state of one session.
struct PlaybackSession {
    started_at: Duration,
    last_tick: Duration,
    frame_index: usize,
    accumulator: Duration,
    frames_advanced: u64,
    holding_last: bool,
    flash: FlashSchedule,
    ticks: u64,
}

impl PlaybackSession {
    fn new(now: Duration, flash_count: u32) -> Self {
        Self {
            started_at: now,
            last_tick: now,
            frame_index: 0,
            accumulator: Duration::ZERO,
            frames_advanced: 0,
            holding_last: false,
            flash: FlashSchedule::new(flash_count),
            ticks: 0,
        }
    }

    /// Add `dt` and step through every frame whose duration has elapsed.
    ///
    /// The final frame is never left; reaching its end marks the session as
    /// holding.
    fn advance(&mut self, frames: &[ScaledFrame], dt: Duration) {
        self.accumulator += dt;
        while !self.holding_last {
            let dur = frames[self.frame_index].duration;
            if self.accumulator < dur {
                break;
            }
            if self.frame_index + 1 < frames.len() {
                self.accumulator -= dur;
                self.frame_index += 1;
                self.frames_advanced += 1;
            } else {
                self.holding_last = true;
            }
        }
    }

    fn report(&self, reason: ExitReason, now: Duration) -> PlaybackReport {
        PlaybackReport {
            reason,
            ticks: self.ticks,
            frame_index: self.frame_index,
            frames_advanced: self.frames_advanced,
            elapsed: now.saturating_sub(self.started_at),
        }
    }
}

fn cancel_requested(input: &mut dyn InputSource) -> JumpscareResult<bool> {
    Ok(input.poll_pending()?.iter().any(|ev| ev.is_cancel()))
}

/// Play `asset` on `surface` until it completes or the user cancels.
///
/// Animations are shaken during the configured window, advance by their
/// frame durations and hold the last frame for the completion grace. Still
/// images flash first, then stay until cancelled or the optional timeout.
#[tracing::instrument(skip(asset, surface, input, clock, rng, settings), fields(frames = asset.frame_count()))]
pub fn run(
    asset: &Asset,
    surface: &mut dyn Surface,
    input: &mut dyn InputSource,
    clock: &mut dyn Clock,
    rng: &mut dyn RngCore,
    settings: &PlaybackSettings,
) -> JumpscareResult<PlaybackReport> {
    settings.validate()?;
    let size = surface.size();
    size.validate()?;
    let prepared = prepare(asset, size, settings)?;

    let budget = settings.frame_rate()?.tick_budget();
    let shake: Shake = settings.shake();
    let nominal = asset.nominal_duration();
    let completes_at = nominal + settings.completion_grace();
    let static_timeout = settings.static_timeout();

    let mut session = PlaybackSession::new(clock.now(), settings.flash_count);
    tracing::debug!(?budget, ?nominal, "playback started");

    loop {
        let now = clock.now();
        let elapsed = now.saturating_sub(session.started_at);
        let dt = now.saturating_sub(session.last_tick);
        session.last_tick = now;
        session.ticks += 1;

        if cancel_requested(input)? {
            tracing::info!(tick = session.ticks, "playback cancelled");
            return Ok(session.report(ExitReason::UserCancelled, now));
        }

        surface.clear(Rgba8Premul::BLACK);
        match &prepared {
            Prepared::Animated(frames) => {
                let frame = &frames[session.frame_index];
                let jitter = shake.offset_at(elapsed, &mut *rng);
                surface.draw_raster(&frame.raster, frame.at.translate(jitter));
                surface.present()?;

                session.advance(frames, dt);
                if session.holding_last && elapsed >= completes_at {
                    tracing::info!(tick = session.ticks, "playback completed");
                    return Ok(session.report(ExitReason::Completed, now));
                }
            }
            Prepared::Static { raster, at } => {
                match session.flash.next_alpha() {
                    Some(alpha) => surface.fill(Rgba8Premul::WHITE, f32::from(alpha) / 255.0),
                    None => surface.draw_raster(raster, *at),
                }
                surface.present()?;

                if let Some(timeout) = static_timeout
                    && !session.flash.is_active()
                    && elapsed >= timeout
                {
                    tracing::info!(tick = session.ticks, "still image timed out");
                    return Ok(session.report(ExitReason::Completed, now));
                }
            }
        }

        clock.sleep_until(now + budget);
    }
}

/// Poll `input` every `poll_interval` until `timeout` elapses.
///
/// Returns `true` as soon as a cancel event arrives.
pub fn wait_for_cancel_or_timeout(
    input: &mut dyn InputSource,
    clock: &mut dyn Clock,
    timeout: Duration,
    poll_interval: Duration,
) -> JumpscareResult<bool> {
    let end = clock.now() + timeout;
    let step = poll_interval.max(Duration::from_millis(1));
    loop {
        let now = clock.now();
        if now >= end {
            return Ok(false);
        }
        if cancel_requested(input)? {
            return Ok(true);
        }
        clock.sleep_until((now + step).min(end));
    }
}

#[cfg(test)]
#[path = "../tests/unit/playback.rs"]
mod tests;
