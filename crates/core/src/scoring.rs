//! Scoring module - classic fixed line-clear awards
//!
//! Points depend only on how many rows a single landing cleared. There is no
//! level multiplier, no drop bonus and no combo.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in one landing.
///
/// Anything outside 0..=4 scores nothing.
pub fn score_for(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}
