//! Regeneration controller: the generate/clear workflow.
//!
//! The controller is the only writer of the persisted entry set. It exposes
//! two operations, `generate` and `clear`, serialized behind one lock so a
//! second call observes either the prior result or waits; the two never
//! interleave. Replacing an existing timetable is deliberately a three-call
//! protocol - `generate` (detect conflict), `clear`, `generate` - so the
//! caller can abort after seeing the conflict.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::Mutex;

use crate::db::services as db_services;
use crate::db::{CatalogLoadError, FullRepository, RepositoryError, TimetableRepository};
use crate::engine::{fill_grid, ConstraintSet, GenerationParams};
use crate::models::{CatalogError, TimetableEntry};

/// Controller-level settings for generation runs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    /// Upper bound on one grid-filling run. On expiry the staged result is
    /// discarded and persisted state stays untouched.
    pub timeout: Duration,
    /// Optional recorded seed for candidate shuffling.
    pub shuffle_seed: Option<u64>,
    /// Preferred per-day repetition limit for one subject in one course.
    pub daily_repeat_limit: u32,
    /// Enforce the repetition limit as a hard rule instead of relaxing it.
    pub strict_daily_limit: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            shuffle_seed: None,
            daily_repeat_limit: 1,
            strict_daily_limit: false,
        }
    }
}

/// Result of a `generate` call. A conflict is an expected outcome, not an
/// error: the caller must clear explicitly before regenerating.
#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    /// The grid was generated and persisted.
    Generated {
        entries: Vec<TimetableEntry>,
        unfilled_slot_count: usize,
    },
    /// Entries already exist; nothing was changed.
    Conflict { existing_count: usize },
}

/// A `generate` request that could not produce a persisted grid.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Reference data violates an invariant; nothing was written.
    #[error("reference data validation failed: {0}")]
    Validation(#[from] CatalogError),

    /// The run exceeded its time budget; persisted state is unchanged.
    #[error("generation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The store failed; for a failed swap the prior state is intact.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<CatalogLoadError> for GenerateError {
    fn from(err: CatalogLoadError) -> Self {
        match err {
            CatalogLoadError::Repository(e) => GenerateError::Repository(e),
            CatalogLoadError::Invalid(e) => GenerateError::Validation(e),
        }
    }
}

/// Orchestrates generation and clearing of the persisted timetable.
pub struct RegenerationController {
    repository: Arc<dyn FullRepository>,
    config: GenerationConfig,
    /// Serializes generate/clear; the entry store itself is lock-free for readers.
    gate: Mutex<()>,
}

impl RegenerationController {
    pub fn new(repository: Arc<dyn FullRepository>, config: GenerationConfig) -> Self {
        Self {
            repository,
            config,
            gate: Mutex::new(()),
        }
    }

    /// Generate and persist a full grid, or report a conflict when entries
    /// already exist.
    ///
    /// The grid fill runs on the blocking pool under a timeout; the persisted
    /// set is only touched by the final atomic replace, so any failure before
    /// that leaves the previous state intact.
    pub async fn generate(&self) -> Result<GenerateOutcome, GenerateError> {
        let _guard = self.gate.lock().await;

        let existing = self.repository.count_entries().await?;
        if existing > 0 {
            info!("generate: {existing} entries already persisted, reporting conflict");
            return Ok(GenerateOutcome::Conflict {
                existing_count: existing,
            });
        }

        let catalog = db_services::load_catalog(self.repository.as_ref()).await?;
        let params = GenerationParams {
            constraints: ConstraintSet {
                daily_repeat_limit: self.config.daily_repeat_limit,
            },
            strict_daily_limit: self.config.strict_daily_limit,
            shuffle_seed: self.config.shuffle_seed,
        };

        info!(
            "generate: filling {} slots (seed {:?})",
            catalog.slot_capacity(),
            params.shuffle_seed
        );

        let timeout = self.config.timeout;
        let run = tokio::task::spawn_blocking(move || fill_grid(&catalog, &params));
        let report = match tokio::time::timeout(timeout, run).await {
            Ok(joined) => joined.map_err(|e| {
                RepositoryError::internal(format!("generation task failed: {e}"))
            })?,
            Err(_) => {
                // The detached task's result is dropped; nothing was staged
                // into the store.
                warn!("generate: timed out after {timeout:?}, discarding staged run");
                return Err(GenerateError::Timeout { timeout });
            }
        };

        let stored = self
            .repository
            .replace_entries(report.entries.clone())
            .await?;
        info!(
            "generate: persisted {stored} entries, {} slots unfilled",
            report.unfilled_slot_count()
        );

        let unfilled_slot_count = report.unfilled_slot_count();
        Ok(GenerateOutcome::Generated {
            entries: report.entries,
            unfilled_slot_count,
        })
    }

    /// Delete every persisted entry. Idempotent: clearing an empty store is a
    /// no-op success.
    ///
    /// # Returns
    /// * `Ok(usize)` - number of entries removed
    pub async fn clear(&self) -> Result<usize, RepositoryError> {
        let _guard = self.gate.lock().await;
        let removed = self.repository.clear_entries().await?;
        info!("clear: removed {removed} entries");
        Ok(removed)
    }
}
