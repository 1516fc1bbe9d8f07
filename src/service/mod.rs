//! Playlist service boundary
//!
//! The provider is reached through a trait so the rest of the tool never
//! depends on a concrete client. [`MemoryService`] is the in-memory
//! implementation used by the offline CLI flow and the tests.

mod memory;
mod traits;

pub use memory::MemoryService;
pub use traits::PlaylistService;

use anyhow::Result;

use crate::assembly::AssembledResult;

/// Providers cap how many tracks one add call may carry
const ADD_TRACKS_BATCH: usize = 100;

/// Maximum playlist name length accepted by the provider
const MAX_NAME_LEN: usize = 40;

/// Commit an assembled result as a new playlist, returning its id.
///
/// Creates the playlist (name truncated to the provider limit) and appends
/// the result's tracks in playback order, batched per the provider cap.
pub fn commit_assembled(
    service: &mut dyn PlaylistService,
    result: &AssembledResult,
    name: &str,
    public: bool,
) -> Result<String> {
    let name: String = name.chars().take(MAX_NAME_LEN).collect();
    let playlist_id = service.create_playlist(&name, public)?;

    let track_ids = result.track_ids();
    for batch in track_ids.chunks(ADD_TRACKS_BATCH) {
        service.add_tracks(&playlist_id, batch)?;
    }

    log::info!(
        "committed '{}' with {} tracks as {}",
        name,
        track_ids.len(),
        playlist_id
    );
    Ok(playlist_id)
}
