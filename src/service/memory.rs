//! In-memory playlist service
//!
//! Models the provider as a directory of known playlists plus the set of
//! ids saved in the user's library. Follow/unfollow only touch the library;
//! unknown ids fail the way a provider returns 404.

use anyhow::{anyhow, Result};

use super::traits::PlaylistService;
use crate::model::{Catalog, Playlist, Track};

/// Playlist service backed by in-memory state
pub struct MemoryService {
    user: String,
    playlists: Vec<Playlist>,
    library: Vec<String>,
    next_id: u64,
}

impl MemoryService {
    /// Create a service for `user` with an empty directory
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            playlists: Vec::new(),
            library: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a service whose directory and library mirror a catalog
    pub fn from_catalog(user: impl Into<String>, catalog: &Catalog) -> Self {
        let mut service = Self::new(user);
        for playlist in catalog.playlists() {
            service.library.push(playlist.id.clone());
            service.playlists.push(playlist.clone());
        }
        service
    }

    /// Register a playlist in the provider directory without following it
    pub fn publish(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    fn find(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == playlist_id)
    }

    fn resolve_track(&self, track_id: &str) -> Option<Track> {
        self.playlists
            .iter()
            .flat_map(|p| p.tracks.iter())
            .find(|t| t.id == track_id)
            .cloned()
    }
}

impl PlaylistService for MemoryService {
    fn current_user(&self) -> Result<String> {
        Ok(self.user.clone())
    }

    fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
        self.library
            .iter()
            .map(|id| {
                self.find(id)
                    .cloned()
                    .ok_or_else(|| anyhow!("playlist not found: {id}"))
            })
            .collect()
    }

    fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        self.find(playlist_id)
            .map(|p| p.tracks.clone())
            .ok_or_else(|| anyhow!("playlist not found: {playlist_id}"))
    }

    fn create_playlist(&mut self, name: &str, public: bool) -> Result<String> {
        let id = format!("mem{:05}", self.next_id);
        self.next_id += 1;

        self.playlists
            .push(Playlist::new(id.clone(), name.to_string(), self.user.clone(), public));
        self.library.push(id.clone());

        log::debug!("created playlist '{name}' as {id}");
        Ok(id)
    }

    fn add_tracks(&mut self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let resolved: Vec<Track> = track_ids
            .iter()
            .map(|id| {
                self.resolve_track(id)
                    .ok_or_else(|| anyhow!("track not found: {id}"))
            })
            .collect::<Result<_>>()?;

        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| anyhow!("playlist not found: {playlist_id}"))?;

        playlist.tracks.extend(resolved);
        Ok(())
    }

    fn follow_playlist(&mut self, playlist_id: &str) -> Result<()> {
        if self.find(playlist_id).is_none() {
            return Err(anyhow!("playlist not found or private: {playlist_id}"));
        }
        if !self.library.iter().any(|id| id == playlist_id) {
            self.library.push(playlist_id.to_string());
        }
        Ok(())
    }

    fn unfollow_playlist(&mut self, playlist_id: &str) -> Result<()> {
        if self.find(playlist_id).is_none() {
            return Err(anyhow!("playlist not found: {playlist_id}"));
        }
        self.library.retain(|id| id != playlist_id);
        Ok(())
    }
}
