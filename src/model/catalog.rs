use super::{Playlist, Track};

/// In-memory collection of the source playlists available to one session.
///
/// Populated from the catalog cache file or a playlist service before
/// assembly begins; the engine treats it as read-only. Insertion order is
/// preserved for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    playlists: Vec<Playlist>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an already-ordered playlist list
    pub fn from_playlists(playlists: Vec<Playlist>) -> Self {
        let mut catalog = Self::new();
        for playlist in playlists {
            catalog.insert(playlist);
        }
        catalog
    }

    /// Add a playlist, replacing any existing entry with the same id
    pub fn insert(&mut self, playlist: Playlist) {
        match self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(existing) => *existing = playlist,
            None => self.playlists.push(playlist),
        }
    }

    /// Remove a playlist by id
    pub fn remove(&mut self, id: &str) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| p.id == id)?;
        Some(self.playlists.remove(index))
    }

    /// Look up a playlist by id
    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Check whether a playlist id is present
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All playlists in insertion order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Tracks of one playlist, if present
    pub fn tracks(&self, id: &str) -> Option<&[Track]> {
        self.get(id).map(|p| p.tracks.as_slice())
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Check if the catalog holds no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Total track count across all playlists
    pub fn total_tracks(&self) -> usize {
        self.playlists.iter().map(|p| p.track_count()).sum()
    }

    /// Total duration across all playlists in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.playlists.iter().map(|p| p.duration_ms()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, duration_ms: u64) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artists: vec!["Artist".to_string()],
            album: None,
            duration_ms,
        }
    }

    fn playlist(id: &str, tracks: Vec<Track>) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: format!("Playlist {id}"),
            owner: "tester".to_string(),
            public: true,
            tracks,
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut catalog = Catalog::new();
        catalog.insert(playlist("p1", vec![track("t1", 1000)]));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("p1"));
        assert_eq!(catalog.get("p1").unwrap().track_count(), 1);
        assert!(catalog.get("p2").is_none());
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut catalog = Catalog::new();
        catalog.insert(playlist("p1", vec![track("t1", 1000)]));
        catalog.insert(playlist("p1", vec![track("t1", 1000), track("t2", 2000)]));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("p1").unwrap().track_count(), 2);
    }

    #[test]
    fn remove_keeps_order() {
        let mut catalog = Catalog::from_playlists(vec![
            playlist("p1", vec![]),
            playlist("p2", vec![]),
            playlist("p3", vec![]),
        ]);

        assert!(catalog.remove("p2").is_some());
        assert!(catalog.remove("p2").is_none());

        let ids: Vec<&str> = catalog.playlists().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);
    }

    #[test]
    fn totals() {
        let catalog = Catalog::from_playlists(vec![
            playlist("p1", vec![track("t1", 1000), track("t2", 2000)]),
            playlist("p2", vec![track("t3", 500)]),
        ]);

        assert_eq!(catalog.total_tracks(), 3);
        assert_eq!(catalog.total_duration_ms(), 3500);
    }
}
