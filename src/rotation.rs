use std::path::Path;

use anyhow::Context;

use crate::foundation::error::JumpscareResult;

fn default_last_index() -> i64 {
    -1
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// File-backed rotation counter, stored as `{"last_index": n}`.
///
/// Unknown keys in the file are carried through a load/save cycle.
pub struct RotationState {
    /// Index chosen by the previous run; `-1` when nothing was chosen yet.
    #[serde(default = "default_last_index")]
    pub last_index: i64,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            last_index: default_last_index(),
            extra: serde_json::Map::new(),
        }
    }
}

impl RotationState {
    /// State with an explicit last index.
    pub fn with_last_index(last_index: i64) -> Self {
        Self {
            last_index,
            ..Self::default()
        }
    }

    /// Read the state file. A missing or unparsable file yields the default.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no rotation state, starting fresh");
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt rotation state, starting fresh");
                Self::default()
            }
        }
    }

    /// Write the state file.
    pub fn save(&self, path: &Path) -> JumpscareResult<()> {
        let json = serde_json::to_string(self).context("serialize rotation state")?;
        std::fs::write(path, json)
            .with_context(|| format!("write rotation state '{}'", path.display()))?;
        Ok(())
    }

    /// Index following `last_index` among `count` assets, `None` if `count == 0`.
    pub fn next_index(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let next = (i128::from(self.last_index) + 1).rem_euclid(count as i128);
        Some(next as usize)
    }

    /// Select the next index and record it as the last one.
    pub fn advance(&mut self, count: usize) -> Option<usize> {
        let next = self.next_index(count)?;
        self.last_index = next as i64;
        Some(next)
    }
}

#[cfg(test)]
#[path = "../tests/unit/rotation.rs"]
mod tests;
