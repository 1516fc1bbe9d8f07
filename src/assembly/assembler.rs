//! Assembly orchestration
//!
//! Resolves block order, runs the track selector per block with one shared
//! dedup tracker, and concatenates the selections into the final result.
//! Performs no I/O; all randomness comes from the supplied source, consumed
//! in a fixed order (sequencing first, then blocks in resolved order), which
//! is what makes a run reproducible from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dedup::DedupTracker;
use super::duration;
use super::error::{AssemblyError, Result};
use super::request::{AssemblyRequest, SequenceMode};
use super::selector::select_tracks;
use super::sequencer::{sequence_blocks, validate_manual_order};
use crate::model::{Catalog, Track};

/// One track of the assembled output, tagged with the request position of
/// the block that selected it
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledEntry {
    pub block_index: usize,
    pub track: Track,
}

/// Duration accounting for one block of the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    /// Position of the block in the request
    pub block_index: usize,

    /// Source playlist id
    pub playlist_id: String,

    /// Requested duration in milliseconds
    pub target_ms: u64,

    /// Selected duration in milliseconds
    pub achieved_ms: u64,

    /// Number of tracks selected
    pub track_count: usize,

    /// True when the source pool ran out before the target was reached
    pub underfilled: bool,
}

/// The assembled playlist content: ordered tracks plus duration accounting.
/// Immutable once produced; a new invocation produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledResult {
    /// Final track sequence in playback order
    pub entries: Vec<AssembledEntry>,

    /// Total duration in milliseconds
    pub total_ms: u64,

    /// Per-block accounting, in resolved play order
    pub reports: Vec<BlockReport>,
}

impl AssembledResult {
    /// Track ids in playback order, ready to hand to a playlist service
    pub fn track_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.track.id.clone()).collect()
    }

    /// Tracks in playback order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter().map(|e| &e.track)
    }

    /// Number of tracks in the result
    pub fn track_count(&self) -> usize {
        self.entries.len()
    }

    /// Blocks whose source pool was exhausted before their target
    pub fn underfilled_blocks(&self) -> impl Iterator<Item = &BlockReport> {
        self.reports.iter().filter(|r| r.underfilled)
    }
}

/// Runs one assembly request against a catalog
#[derive(Debug)]
pub struct Assembler {
    request: AssemblyRequest,
}

impl Assembler {
    /// Validate a request and wrap it for assembly.
    ///
    /// Request-shape problems (empty source references, malformed manual
    /// orders) are rejected here, before any selection work.
    pub fn new(request: AssemblyRequest) -> Result<Self> {
        for (index, block) in request.blocks.iter().enumerate() {
            if block.playlist_id.is_empty() {
                return Err(AssemblyError::EmptySourceRef { index });
            }
        }

        if let SequenceMode::Manual(order) = &request.sequencing {
            validate_manual_order(order, request.blocks.len())?;
        }

        Ok(Self { request })
    }

    /// The request this assembler was built from
    pub fn request(&self) -> &AssemblyRequest {
        &self.request
    }

    /// Assemble with a random source seeded from the request
    pub fn assemble(&self, catalog: &Catalog) -> Result<AssembledResult> {
        let mut rng = StdRng::seed_from_u64(self.request.seed);
        self.assemble_with(catalog, &mut rng)
    }

    /// Assemble with an explicit random source.
    ///
    /// Given the same request, catalog contents, and random source state,
    /// the result is identical, including track order.
    pub fn assemble_with<R: Rng>(&self, catalog: &Catalog, rng: &mut R) -> Result<AssembledResult> {
        // Every referenced playlist must be present before selection starts
        for (index, block) in self.request.blocks.iter().enumerate() {
            if !catalog.contains(&block.playlist_id) {
                return Err(AssemblyError::MissingPlaylist {
                    index,
                    playlist_id: block.playlist_id.clone(),
                });
            }
        }

        let order = sequence_blocks(self.request.blocks.len(), &self.request.sequencing, rng)?;

        let mut tracker = DedupTracker::new();
        let mut entries = Vec::new();
        let mut reports = Vec::new();

        for &block_index in &order {
            let block = &self.request.blocks[block_index];
            let pool = catalog.tracks(&block.playlist_id).ok_or_else(|| {
                AssemblyError::MissingPlaylist {
                    index: block_index,
                    playlist_id: block.playlist_id.clone(),
                }
            })?;

            let dedup = self.request.dedup.then_some(&mut tracker);
            let selection = select_tracks(pool, block.target_ms, block.mode, dedup, rng);

            log::debug!(
                "block {}: {} tracks, {} ms of {} ms requested from '{}'",
                block_index + 1,
                selection.tracks.len(),
                selection.achieved_ms,
                block.target_ms,
                block.playlist_id
            );

            reports.push(BlockReport {
                block_index,
                playlist_id: block.playlist_id.clone(),
                target_ms: block.target_ms,
                achieved_ms: selection.achieved_ms,
                track_count: selection.tracks.len(),
                underfilled: selection.underfilled,
            });

            entries.extend(selection.tracks.into_iter().map(|track| AssembledEntry {
                block_index,
                track,
            }));
        }

        let total_ms = duration::total_duration_ms(entries.iter().map(|e| &e.track));

        Ok(AssembledResult {
            entries,
            total_ms,
            reports,
        })
    }
}
