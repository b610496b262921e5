//! Jumpscare is a terminal popup that shows a rotating GIF or PNG "scare", plus
//! a confetti animation and a small audio helper.
//!
//! # Pipeline overview
//!
//! 1. **Select**: discover assets in the resources directory and pick the one after
//!    the previously shown one ([`Prank::select_next`], [`RotationState`]).
//! 2. **Decode**: turn the file into an [`Asset`], either timed frames or one raster.
//! 3. **Play**: the [`playback`] loop scales frames to the [`Surface`], shakes or
//!    flashes them and ends on completion or user cancel.
//! 4. **Present**: a [`TerminalSurface`] draws half-block truecolor cells; a
//!    [`PngDumpSurface`] writes frames to disk for headless runs.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic when asked**: time ([`Clock`]), input ([`InputSource`]) and
//!   randomness are injected, so sessions replay exactly under test.
//! - **Premultiplied RGBA8** end-to-end for every raster and surface.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod render;

/// The `play-audio` helper: system audio players found on `PATH`.
pub mod audio;
/// Time source of the render loops.
pub mod clock;
/// The `hakuna` terminal confetti animation.
pub mod confetti;
/// JSON configuration of the popup and its playback loop.
pub mod config;
/// User input abstraction shared by the terminal and scripted tests.
pub mod input;
pub mod playback;
pub mod prank;
/// Persistent rotation counter.
pub mod rotation;

pub use assets::decode::{decode_asset, decode_gif_frames, decode_still, load_asset};
pub use assets::discover::{DEFAULT_ASSET_ORDER, default_asset_order, discover_assets};
pub use assets::fit::{FitMode, center_offset, fit_raster, fit_size, scale_raster};
pub use assets::model::{
    AnimationFrame, Asset, AssetKind, MIN_FRAME_DURATION, Raster, frame_duration_from_ms,
};
pub use audio::{AudioBackend, AudioHandle, available_backends, play_blocking, spawn_background};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{PlaybackSettings, PrankConfig};
pub use effects::decay::Decay;
pub use effects::flash::FlashSchedule;
pub use effects::shake::Shake;
pub use foundation::core::{FrameRate, Offset, Rgba8Premul, SurfaceSize};
pub use foundation::error::{JumpscareError, JumpscareResult};
pub use foundation::logging::{LOG_ENV, init_logging};
pub use input::{InputEvent, InputSource, ScriptedInput, TerminalInput};
pub use playback::{ExitReason, PlaybackReport};
pub use prank::{Prank, PrankOutcome, Selection, default_base_dir};
pub use render::surface::{PixelSurface, PngDumpSurface, Surface};
pub use render::terminal::{HalfBlock, TerminalGuard, TerminalSurface, half_block_cells};
pub use rotation::RotationState;
