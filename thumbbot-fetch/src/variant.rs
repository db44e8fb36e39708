//! Best-variant selection under a size budget.
//!
//! Messaging platforms cap uploads, so among the encodings of a video the
//! engine re-posts the largest one whose estimated size still fits.

use thumbbot_core::VariantCandidate;

/// Default upload budget: 20 MiB.
pub const DEFAULT_SIZE_BUDGET: u64 = 20 * 1024 * 1024;

/// Estimates the encoded size in bytes from bitrate and duration.
///
/// Bytes per second are computed with integer division before scaling by
/// the duration; the product is truncated toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn estimate_size(bitrate_bps: u64, duration_secs: f64) -> u64 {
    let bytes_per_sec = (bitrate_bps / 8) as f64;
    (bytes_per_sec * duration_secs.max(0.0)) as u64
}

/// Picks the candidate with the largest estimated size not above `budget`.
///
/// Candidates without a bitrate are skipped. Ties keep input order and the
/// later one wins.
pub fn select_best_variant(
    candidates: &[VariantCandidate],
    duration_secs: f64,
    budget: u64,
) -> Option<&VariantCandidate> {
    let mut sized: Vec<(u64, &VariantCandidate)> = candidates
        .iter()
        .filter_map(|c| c.bitrate_bps.map(|b| (estimate_size(b, duration_secs), c)))
        .collect();

    sized.sort_by_key(|(size, _)| *size);

    sized
        .into_iter()
        .take_while(|(size, _)| *size <= budget)
        .last()
        .map(|(_, candidate)| candidate)
}

// ============================================================================
// Tests
// ============================================================================
