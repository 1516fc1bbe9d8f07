//! Playlist service trait definition

use anyhow::Result;

use crate::model::{Playlist, Track};

/// Boundary to the playlist provider.
///
/// The assembly engine never talks to a service itself; the caller populates
/// the catalog from `fetch_*` before assembly and commits the finished
/// result through `create_playlist`/`add_tracks` afterwards. A network
/// client for a real provider implements this trait; tests and the offline
/// CLI flow use [`MemoryService`](super::MemoryService).
pub trait PlaylistService {
    /// Display name of the authenticated user
    fn current_user(&self) -> Result<String>;

    /// All playlists in the user's library, tracks included
    fn fetch_playlists(&self) -> Result<Vec<Playlist>>;

    /// Track list of one playlist, in provider order
    fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<Track>>;

    /// Create an empty playlist owned by the current user, returning its id
    fn create_playlist(&mut self, name: &str, public: bool) -> Result<String>;

    /// Append tracks to a playlist, in the given order
    fn add_tracks(&mut self, playlist_id: &str, track_ids: &[String]) -> Result<()>;

    /// Add an existing provider playlist to the user's library
    fn follow_playlist(&mut self, playlist_id: &str) -> Result<()>;

    /// Remove a playlist from the user's library
    fn unfollow_playlist(&mut self, playlist_id: &str) -> Result<()>;
}
