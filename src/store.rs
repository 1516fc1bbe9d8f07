//! Catalog cache persistence
//!
//! The catalog lives in a JSON file between runs. Saves go through a
//! sibling temp file and a rename, so a crash mid-write never clobbers the
//! previous cache.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::{Catalog, Playlist};

/// Load the catalog from `path`. A missing file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        log::debug!("no catalog cache at {:?}, starting empty", path);
        return Ok(Catalog::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog cache: {:?}", path))?;
    let playlists: Vec<Playlist> = serde_json::from_str(&data)
        .with_context(|| format!("Malformed catalog cache: {:?}", path))?;

    log::debug!("loaded {} playlists from {:?}", playlists.len(), path);
    Ok(Catalog::from_playlists(playlists))
}

/// Save the catalog to `path` atomically.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let data = serde_json::to_string_pretty(catalog.playlists())
        .context("Failed to serialize catalog")?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, data)
        .with_context(|| format!("Failed to write catalog cache: {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace catalog cache: {:?}", path))?;

    log::debug!("saved {} playlists to {:?}", catalog.len(), path);
    Ok(())
}
