//! Duration accounting
//!
//! Pure helpers shared by pre-commit preview and post-assembly reporting;
//! identical input always yields identical output.

use super::assembler::AssembledEntry;
use crate::model::Track;

/// Total duration of a track sequence in milliseconds
pub fn total_duration_ms<'a, I>(tracks: I) -> u64
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks.into_iter().map(|t| t.duration_ms).sum()
}

/// Per-block achieved durations for block-indexed entries.
///
/// Returns one slot per request block, indexed by the block's request
/// position; blocks that contributed no tracks report zero.
pub fn block_durations_ms(entries: &[AssembledEntry], block_count: usize) -> Vec<u64> {
    let mut durations = vec![0u64; block_count];
    for entry in entries {
        durations[entry.block_index] += entry.track.duration_ms;
    }
    durations
}
