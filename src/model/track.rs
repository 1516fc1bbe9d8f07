use serde::{Deserialize, Serialize};

/// A single track as delivered by the playlist provider.
///
/// The assembly engine only interprets `id` and `duration_ms`; everything
/// else is display metadata carried along for tables and backup files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Provider-assigned identifier, unique within a playlist's track pool
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist names, in provider order
    pub artists: Vec<String>,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track duration in milliseconds
    pub duration_ms: u64,
}

impl Track {
    /// Artists joined for single-line display
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}
