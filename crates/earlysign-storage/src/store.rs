use earlysign_core::models::result::AssessmentResult;
use earlysign_core::storage_keys;

use crate::backend::SlotBackend;
use crate::error::StorageError;

/// Holds at most one [`AssessmentResult`]: the most recent one saved.
///
/// All access to the slot goes through [`save`](Self::save) and
/// [`load`](Self::load).
pub struct ResultStore<B> {
    backend: B,
    key: String,
}

impl<B: SlotBackend> ResultStore<B> {
    /// Store bound to the standard `assessmentResults` slot.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, storage_keys::ASSESSMENT_RESULTS)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize `result` and replace the stored record with it.
    ///
    /// On failure the previously stored record, if any, is untouched.
    pub fn save(&self, result: &AssessmentResult) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(result)?;
        self.backend.put(&self.key, body)?;

        tracing::info!(
            key = %self.key,
            risk_level = %result.risk_level,
            risk_percentage = result.risk_percentage,
            completed_at = %result.completed_at,
            "assessment result saved"
        );
        Ok(())
    }

    /// Read back the stored record. `Ok(None)` when nothing has been saved.
    pub fn load(&self) -> Result<Option<AssessmentResult>, StorageError> {
        let Some(bytes) = self.backend.get(&self.key)? else {
            tracing::debug!(key = %self.key, "no stored assessment result");
            return Ok(None);
        };

        let result: AssessmentResult =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::CorruptRecord {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;

        result
            .check_consistency()
            .map_err(|reason| StorageError::CorruptRecord {
                key: self.key.clone(),
                reason,
            })?;

        Ok(Some(result))
    }

    /// Like [`load`](Self::load), but any failure reads as "no result".
    /// Failures are logged so they remain distinguishable from an empty slot.
    pub fn load_for_display(&self) -> Option<AssessmentResult> {
        match self.load() {
            Ok(result) => result,
            Err(e @ StorageError::CorruptRecord { .. }) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring corrupt assessment result");
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load assessment result");
                None
            }
        }
    }
}
