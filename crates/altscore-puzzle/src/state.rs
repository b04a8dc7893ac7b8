//! The damaged-system state holder.
//!
//! [`DamagedSystemState`] is created once at startup and shared with the
//! two puzzle handlers. Writers race last-write-wins; the puzzle is a
//! single-player aid so no further coordination is needed.

use tokio::sync::RwLock;

use crate::error::PuzzleError;
use crate::system::SystemCode;

/// JSON body returned by `GET /status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DamagedSystemReport {
    /// The system that is currently damaged.
    pub damaged_system: SystemCode,
}

/// Holds the most recently reported damaged system, if any.
#[derive(Debug, Default)]
pub struct DamagedSystemState {
    current: RwLock<Option<SystemCode>>,
}

impl DamagedSystemState {
    /// Create an empty holder. No system is damaged until [`select`] runs.
    ///
    /// [`select`]: Self::select
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a new damaged system at random and remember it.
    pub async fn select(&self) -> DamagedSystemReport {
        let system = SystemCode::random(&mut rand::rng());
        self.set(system).await;
        DamagedSystemReport {
            damaged_system: system,
        }
    }

    /// Overwrite the damaged system.
    pub async fn set(&self, system: SystemCode) {
        *self.current.write().await = Some(system);
    }

    /// The currently damaged system, if one has been selected.
    pub async fn current(&self) -> Option<SystemCode> {
        *self.current.read().await
    }

    /// The repair code for the currently damaged system.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::NoDamagedSystem`] if [`select`](Self::select)
    /// has never been called.
    pub async fn repair_code(&self) -> Result<&'static str, PuzzleError> {
        self.current()
            .await
            .map(SystemCode::repair_code)
            .ok_or(PuzzleError::NoDamagedSystem)
    }
}
