//! Content change detection
//!
//! Decides whether an in-flight file matches its previously stored version,
//! so unchanged content is not sent to the compression service again.

use crate::models::FileFingerprint;

/// Returns true when the candidate's content is considered identical to the
/// baseline's.
///
/// - Either side absent: treated as changed, so first saves always compress.
/// - Both sides carrying a non-blank content hash: hashes decide.
/// - Otherwise the recorded byte sizes decide. Different content of the same
///   size therefore reads as unchanged and is not recompressed; a known,
///   accepted trade-off inherited from the size-only comparison the CMS
///   providers expose.
pub fn is_unchanged(
    candidate: Option<&FileFingerprint>,
    baseline: Option<&FileFingerprint>,
) -> bool {
    let (candidate, baseline) = match (candidate, baseline) {
        (Some(c), Some(b)) => (c, b),
        _ => return false,
    };

    match (
        non_blank(candidate.content_hash.as_deref()),
        non_blank(baseline.content_hash.as_deref()),
    ) {
        (Some(candidate_hash), Some(baseline_hash)) => candidate_hash == baseline_hash,
        _ => candidate.size == baseline.size,
    }
}

fn non_blank(hash: Option<&str>) -> Option<&str> {
    hash.filter(|h| !h.trim().is_empty())
}
