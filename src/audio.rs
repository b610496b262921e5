//! Audio playback through whatever command-line player the system has.
//!
//! Nothing is decoded in-process: a backend is a program found on `PATH`
//! (`ffplay`, `mpv`, ...) that is spawned with the file as argument.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
};

use crate::foundation::error::{JumpscareError, JumpscareResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A system audio player, in preference order.
pub enum AudioBackend {
    /// FFmpeg's `ffplay`.
    Ffplay,
    /// `mpv`.
    Mpv,
    /// `mpg123`, MPEG audio only.
    Mpg123,
    /// PulseAudio `paplay`.
    Paplay,
    /// ALSA `aplay`, WAV only.
    Aplay,
    /// macOS `afplay`.
    Afplay,
    /// `System.Media.SoundPlayer` through PowerShell, WAV only, Windows.
    PowerShell,
}

impl AudioBackend {
    /// Every backend, most preferred first.
    pub const ALL: [Self; 7] = [
        Self::Ffplay,
        Self::Mpv,
        Self::Mpg123,
        Self::Paplay,
        Self::Aplay,
        Self::Afplay,
        Self::PowerShell,
    ];

    /// Executable name looked up on `PATH`.
    pub fn program(self) -> &'static str {
        match self {
            Self::Ffplay => "ffplay",
            Self::Mpv => "mpv",
            Self::Mpg123 => "mpg123",
            Self::Paplay => "paplay",
            Self::Aplay => "aplay",
            Self::Afplay => "afplay",
            Self::PowerShell => "powershell",
        }
    }

    /// Whether this backend can play the file at `path`, judged by extension.
    pub fn supports(self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match self {
            Self::Aplay | Self::PowerShell => ext == "wav",
            Self::Mpg123 => matches!(ext.as_str(), "mp3" | "mp2" | "mp1"),
            Self::Paplay => ext != "mp3",
            Self::Ffplay | Self::Mpv | Self::Afplay => true,
        }
    }

    /// Whether the backend exists on the current platform at all.
    pub fn native_here(self) -> bool {
        match self {
            Self::Afplay => cfg!(target_os = "macos"),
            Self::PowerShell => cfg!(windows),
            _ => true,
        }
    }

    /// Command playing `path` once, silently, with no window.
    pub fn command(self, path: &Path) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            Self::Ffplay => {
                cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet"]);
                cmd.arg(path);
            }
            Self::Mpv => {
                cmd.args(["--no-video", "--really-quiet"]);
                cmd.arg(path);
            }
            Self::Mpg123 | Self::Aplay => {
                cmd.arg("-q").arg(path);
            }
            Self::Paplay | Self::Afplay => {
                cmd.arg(path);
            }
            Self::PowerShell => {
                let quoted = path.to_string_lossy().replace('\'', "''");
                cmd.args(["-NoProfile", "-NonInteractive", "-Command"]);
                cmd.arg(format!(
                    "(New-Object Media.SoundPlayer '{quoted}').PlaySync()"
                ));
            }
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// Locate `program` in the directories of a `PATH`-style list.
pub fn find_in_path_list(program: &str, path_list: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_list).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{program}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Locate `program` on the process `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let path_list = std::env::var_os("PATH")?;
    find_in_path_list(program, &path_list)
}

/// Backends installed here that can play `path`, most preferred first.
pub fn available_backends(path: &Path) -> Vec<AudioBackend> {
    AudioBackend::ALL
        .into_iter()
        .filter(|b| b.native_here() && b.supports(path))
        .filter(|b| find_on_path(b.program()).is_some())
        .collect()
}

fn ensure_file(path: &Path) -> JumpscareResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(JumpscareError::resource_missing(format!(
            "file not found: {}",
            path.display()
        )))
    }
}

fn no_backend() -> JumpscareError {
    JumpscareError::backend_unavailable("no working audio backend found")
}

/// Play `path` to the end, trying backends until one exits successfully.
///
/// Returns the backend that played the file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn play_blocking(path: &Path) -> JumpscareResult<AudioBackend> {
    ensure_file(path)?;
    for backend in available_backends(path) {
        match backend.command(path).status() {
            Ok(status) if status.success() => return Ok(backend),
            Ok(status) => tracing::warn!(backend = backend.program(), %status, "player failed"),
            Err(e) => tracing::warn!(backend = backend.program(), error = %e, "player did not start"),
        }
    }
    Err(no_backend())
}

/// A player running in the background. Dropping it stops the sound.
#[derive(Debug)]
pub struct AudioHandle {
    backend: AudioBackend,
    child: Child,
}

impl AudioHandle {
    /// Backend that is playing.
    pub fn backend(&self) -> AudioBackend {
        self.backend
    }

    /// Whether the player has exited on its own.
    pub fn is_finished(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        if !self.is_finished() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        tracing::debug!(backend = self.backend.program(), "audio stopped");
    }
}

/// Start playing `path` without waiting for it.
///
/// Uses the first backend that can be spawned.
pub fn spawn_background(path: &Path) -> JumpscareResult<AudioHandle> {
    ensure_file(path)?;
    for backend in available_backends(path) {
        match backend.command(path).spawn() {
            Ok(child) => {
                tracing::debug!(backend = backend.program(), "audio started");
                return Ok(AudioHandle { backend, child });
            }
            Err(e) => tracing::warn!(backend = backend.program(), error = %e, "player did not start"),
        }
    }
    Err(no_backend())
}

#[cfg(test)]
#[path = "../tests/unit/audio.rs"]
mod tests;
