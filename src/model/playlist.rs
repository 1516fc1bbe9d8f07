use serde::{Deserialize, Serialize};

use super::Track;

/// A playlist with its full track list, in provider-supplied order.
///
/// Owned by the catalog for the duration of a session; the assembly engine
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Provider-assigned playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Display name of the owning user
    pub owner: String,

    /// Whether the playlist is publicly visible
    pub public: bool,

    /// Tracks in provider order
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(id: String, name: String, owner: String, public: bool) -> Self {
        Self {
            id,
            name,
            owner,
            public,
            tracks: Vec::new(),
        }
    }

    /// Number of tracks in this playlist
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Summed duration of all tracks in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.tracks.iter().map(|t| t.duration_ms).sum()
    }
}
