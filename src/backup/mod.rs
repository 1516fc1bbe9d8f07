//! Playlist backup and restore
//!
//! Backups are self-contained JSON files: every exported playlist carries
//! its full track list, so a restore can recreate it even when the provider
//! copy is gone. Restore runs one of three reconciliation policies against
//! the playlist service and skips anything already cached.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::model::{Catalog, Playlist};
use crate::service::PlaylistService;

/// On-disk backup format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupFile {
    /// When the backup was written
    pub exported_at: DateTime<Utc>,

    /// Exported playlists, tracks included
    pub playlists: Vec<Playlist>,
}

/// How a restored playlist is reconciled with the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestorePolicy {
    /// Recreate every playlist under the current user's account
    Recreate,

    /// Follow the original playlist when it still exists, recreate otherwise
    FollowElseRecreate,

    /// Follow originals only; skip playlists that cannot be followed
    FollowOnly,
}

impl FromStr for RestorePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "recreate" => Ok(Self::Recreate),
            "follow-else-recreate" => Ok(Self::FollowElseRecreate),
            "follow-only" => Ok(Self::FollowOnly),
            other => bail!(
                "unknown restore policy '{other}' \
                 (expected recreate, follow-else-recreate, or follow-only)"
            ),
        }
    }
}

/// Counts of what a restore did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Playlists added to the catalog
    pub added: usize,

    /// Playlists skipped because their id was already cached
    pub skipped: usize,

    /// Playlists followed at the provider
    pub followed: usize,

    /// Playlists recreated under the current user
    pub recreated: usize,

    /// Playlists that could not be restored under the policy
    pub failed: usize,
}

/// Write selected playlists (or all of them when `ids` is `None`) to `path`.
/// Returns how many playlists were exported.
pub fn export_backup(path: &Path, catalog: &Catalog, ids: Option<&[String]>) -> Result<usize> {
    let playlists: Vec<Playlist> = match ids {
        Some(ids) => {
            for id in ids {
                if !catalog.contains(id) {
                    bail!("playlist '{id}' is not in the catalog");
                }
            }
            catalog
                .playlists()
                .iter()
                .filter(|p| ids.iter().any(|id| *id == p.id))
                .cloned()
                .collect()
        }
        None => catalog.playlists().to_vec(),
    };

    let backup = BackupFile {
        exported_at: Utc::now(),
        playlists,
    };
    let data = serde_json::to_string_pretty(&backup).context("Failed to serialize backup")?;
    fs::write(path, data).with_context(|| format!("Failed to write backup: {:?}", path))?;

    log::info!("exported {} playlists to {:?}", backup.playlists.len(), path);
    Ok(backup.playlists.len())
}

/// Read a backup file
pub fn read_backup(path: &Path) -> Result<BackupFile> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read backup: {:?}", path))?;
    serde_json::from_str(&data).with_context(|| format!("Malformed backup file: {:?}", path))
}

/// Restore playlists from `path` into the catalog through the service.
///
/// Playlists whose id is already cached are skipped. Under a follow policy
/// the original id is followed at the provider; under recreate the playlist
/// is rebuilt as a new one owned by the current user, keeping the backed-up
/// track order.
pub fn import_backup(
    path: &Path,
    catalog: &mut Catalog,
    service: &mut dyn PlaylistService,
    policy: RestorePolicy,
) -> Result<RestoreSummary> {
    let backup = read_backup(path)?;
    log::info!(
        "restoring {} playlists exported at {}",
        backup.playlists.len(),
        backup.exported_at
    );

    let mut summary = RestoreSummary::default();

    for playlist in backup.playlists {
        if catalog.contains(&playlist.id) {
            log::debug!("'{}' already cached, skipping", playlist.name);
            summary.skipped += 1;
            continue;
        }

        let restored = match policy {
            RestorePolicy::Recreate => recreate_playlist(service, &playlist)?,
            RestorePolicy::FollowElseRecreate => match follow_playlist(service, &playlist) {
                Some(p) => Some(p),
                None => recreate_playlist(service, &playlist)?,
            },
            RestorePolicy::FollowOnly => follow_playlist(service, &playlist),
        };

        match restored {
            Some(p) => {
                if p.id == playlist.id {
                    summary.followed += 1;
                } else {
                    summary.recreated += 1;
                }
                catalog.insert(p);
                summary.added += 1;
            }
            None => summary.failed += 1,
        }
    }

    Ok(summary)
}

/// Try to follow the original playlist; `None` when the provider no longer
/// has it
fn follow_playlist(service: &mut dyn PlaylistService, playlist: &Playlist) -> Option<Playlist> {
    match service.follow_playlist(&playlist.id) {
        Ok(()) => {
            log::info!("followed playlist '{}'", playlist.name);
            Some(playlist.clone())
        }
        Err(e) => {
            log::warn!("could not follow playlist '{}': {e}", playlist.name);
            None
        }
    }
}

/// Rebuild the playlist under the current user, preserving track order
fn recreate_playlist(
    service: &mut dyn PlaylistService,
    playlist: &Playlist,
) -> Result<Option<Playlist>> {
    let new_id = service.create_playlist(&playlist.name, playlist.public)?;

    let track_ids: Vec<String> = playlist.tracks.iter().map(|t| t.id.clone()).collect();
    for batch in track_ids.chunks(100) {
        service.add_tracks(&new_id, batch)?;
    }

    log::info!(
        "recreated playlist '{}' with {} tracks",
        playlist.name,
        track_ids.len()
    );
    Ok(Some(Playlist {
        id: new_id,
        name: playlist.name.clone(),
        owner: service.current_user()?,
        public: playlist.public,
        tracks: playlist.tracks.clone(),
    }))
}
