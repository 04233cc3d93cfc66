//! Key conventions for the local key-value medium.
//!
//! There is exactly one slot: the most recent assessment result. A new
//! result replaces whatever is stored under it.

/// Slot holding the latest [`AssessmentResult`](crate::models::result::AssessmentResult).
pub const ASSESSMENT_RESULTS: &str = "assessmentResults";

/// File name used by file-backed media for a given key.
pub fn file_name(key: &str) -> String {
    format!("{key}.json")
}
