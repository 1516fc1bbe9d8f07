//! Track selection for a single block
//!
//! Approximates a target duration by greedily taking candidates until the
//! running total reaches it. The first track that reaches or crosses the
//! target is still taken, so a block overshoots by at most that one track.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::dedup::DedupTracker;
use super::request::SelectionMode;
use crate::model::Track;

/// Outcome of selecting tracks for one block
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected tracks in playback order
    pub tracks: Vec<Track>,

    /// Summed duration of the selected tracks in milliseconds
    pub achieved_ms: u64,

    /// True when the candidate pool ran out before the target was reached.
    /// Not an error; the caller decides what to do with a short block.
    pub underfilled: bool,
}

/// Select tracks from `pool` to approximate `target_ms`.
///
/// The candidate pool excludes ids already consumed by `dedup` (when given)
/// and collapses repeated ids within the source itself, so a track id never
/// appears twice in one selection. Accepted tracks are marked in `dedup`
/// immediately, making them invisible to later blocks of the same run.
pub fn select_tracks<R: Rng>(
    pool: &[Track],
    target_ms: u64,
    mode: SelectionMode,
    mut dedup: Option<&mut DedupTracker>,
    rng: &mut R,
) -> Selection {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates: Vec<&Track> = pool
        .iter()
        .filter(|t| seen.insert(t.id.as_str()))
        .filter(|t| dedup.as_ref().map_or(true, |d| !d.is_used(&t.id)))
        .collect();

    if mode == SelectionMode::Random {
        candidates.shuffle(rng);
    }

    let mut tracks = Vec::new();
    let mut achieved_ms = 0u64;

    for candidate in candidates {
        if achieved_ms >= target_ms {
            break;
        }
        if let Some(tracker) = dedup.as_deref_mut() {
            tracker.mark_used(&candidate.id);
        }
        achieved_ms += candidate.duration_ms;
        tracks.push(candidate.clone());
    }

    Selection {
        tracks,
        achieved_ms,
        underfilled: achieved_ms < target_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track(id: &str, duration_ms: u64) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artists: vec!["Artist".to_string()],
            album: None,
            duration_ms,
        }
    }

    fn pool(count: usize, duration_ms: u64) -> Vec<Track> {
        (0..count)
            .map(|i| track(&format!("t{i}"), duration_ms))
            .collect()
    }

    #[test]
    fn sequential_fills_to_first_crossing() {
        // 10 tracks of 200s each, target 900s: the 5th track crosses
        let pool = pool(10, 200_000);
        let mut rng = StdRng::seed_from_u64(0);

        let selection =
            select_tracks(&pool, 900_000, SelectionMode::Sequential, None, &mut rng);

        assert_eq!(selection.tracks.len(), 5);
        assert_eq!(selection.achieved_ms, 1_000_000);
        assert!(!selection.underfilled);
        let ids: Vec<&str> = selection.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn zero_target_selects_nothing() {
        let pool = pool(3, 200_000);
        let mut rng = StdRng::seed_from_u64(0);

        let selection = select_tracks(&pool, 0, SelectionMode::Random, None, &mut rng);

        assert!(selection.tracks.is_empty());
        assert_eq!(selection.achieved_ms, 0);
        assert!(!selection.underfilled);
    }

    #[test]
    fn exhausted_pool_reports_underfill() {
        // 3 tracks totaling 600s against a 5000s target
        let pool = pool(3, 200_000);
        let mut rng = StdRng::seed_from_u64(0);

        let selection =
            select_tracks(&pool, 5_000_000, SelectionMode::Random, None, &mut rng);

        assert_eq!(selection.tracks.len(), 3);
        assert_eq!(selection.achieved_ms, 600_000);
        assert!(selection.underfilled);
    }

    #[test]
    fn empty_pool_reports_underfill() {
        let mut rng = StdRng::seed_from_u64(0);

        let selection =
            select_tracks(&[], 100_000, SelectionMode::Sequential, None, &mut rng);

        assert!(selection.tracks.is_empty());
        assert!(selection.underfilled);
    }

    #[test]
    fn single_oversized_track_is_taken_alone() {
        let pool = vec![track("long", 3_600_000), track("next", 100_000)];
        let mut rng = StdRng::seed_from_u64(0);

        let selection =
            select_tracks(&pool, 200_000, SelectionMode::Sequential, None, &mut rng);

        assert_eq!(selection.tracks.len(), 1);
        assert_eq!(selection.achieved_ms, 3_600_000);
        assert!(!selection.underfilled);
    }

    #[test]
    fn overshoot_is_bounded_by_one_track() {
        let pool = pool(50, 180_000);
        let max_track = 180_000;

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection =
                select_tracks(&pool, 1_000_000, SelectionMode::Random, None, &mut rng);
            assert!(selection.achieved_ms >= 1_000_000);
            assert!(selection.achieved_ms <= 1_000_000 + max_track);
        }
    }

    #[test]
    fn dedup_excludes_earlier_picks() {
        let pool = pool(3, 200_000);
        let mut tracker = DedupTracker::new();
        let mut rng = StdRng::seed_from_u64(7);

        let first = select_tracks(
            &pool,
            400_000,
            SelectionMode::Sequential,
            Some(&mut tracker),
            &mut rng,
        );
        assert_eq!(first.tracks.len(), 2);
        assert_eq!(tracker.len(), 2);

        // Second block over the same pool only sees the leftover track
        let second = select_tracks(
            &pool,
            400_000,
            SelectionMode::Sequential,
            Some(&mut tracker),
            &mut rng,
        );
        assert_eq!(second.tracks.len(), 1);
        assert!(second.underfilled);

        let first_ids: HashSet<&str> = first.tracks.iter().map(|t| t.id.as_str()).collect();
        assert!(second.tracks.iter().all(|t| !first_ids.contains(t.id.as_str())));
    }

    #[test]
    fn repeated_source_ids_collapse_within_block() {
        // The same track listed twice in the source must not be picked twice
        let pool = vec![track("dup", 100_000), track("dup", 100_000), track("t1", 100_000)];
        let mut rng = StdRng::seed_from_u64(0);

        let selection =
            select_tracks(&pool, 1_000_000, SelectionMode::Sequential, None, &mut rng);

        let ids: Vec<&str> = selection.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["dup", "t1"]);
        assert!(selection.underfilled);
    }

    #[test]
    fn random_mode_is_reproducible_per_seed() {
        let pool = pool(20, 150_000);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = select_tracks(&pool, 600_000, SelectionMode::Random, None, &mut rng_a);
        let b = select_tracks(&pool, 600_000, SelectionMode::Random, None, &mut rng_b);

        assert_eq!(a, b);
    }
}
