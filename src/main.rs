use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use playlist_architect::assembly::{Assembler, AssemblyRequest, Block, SelectionMode, SequenceMode};
use playlist_architect::model::{Catalog, Playlist};
use playlist_architect::service::{commit_assembled, MemoryService, PlaylistService};
use playlist_architect::{backup, display, store, timefmt};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playlist-architect")]
#[command(about = "Assemble new playlists from timed blocks of existing ones", long_about = None)]
struct Args {
    /// Path to the catalog cache file
    #[arg(short = 'c', long, default_value = "playlists_data.json")]
    catalog: PathBuf,

    /// Track block "ID[:HH:MM[:SS]][:sequential|random]" (can be specified
    /// multiple times; omitted time takes the full playlist)
    #[arg(short = 'b', long = "block")]
    blocks: Vec<String>,

    /// Name for the assembled playlist
    #[arg(short = 'n', long, default_value = "New mix")]
    name: String,

    /// Create the assembled playlist as private
    #[arg(long)]
    private: bool,

    /// Manual block order: 1-based block numbers in play order (e.g. "2,1,3")
    #[arg(long)]
    block_order: Option<String>,

    /// Shuffle the order of the blocks
    #[arg(long)]
    shuffle_blocks: bool,

    /// Allow a track to be picked by more than one block
    #[arg(long)]
    allow_repeats: bool,

    /// Seed for the random source (random when omitted; logged for reruns)
    #[arg(long)]
    seed: Option<u64>,

    /// Report the assembly without committing it
    #[arg(long)]
    preview: bool,

    /// Also write the assembled playlist to a backup file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Show the cached playlists and exit
    #[arg(long)]
    show_catalog: bool,

    /// Export playlists to a backup file and exit
    #[arg(long)]
    backup: Option<PathBuf>,

    /// Playlist ids for --backup (comma-separated; all when omitted)
    #[arg(long)]
    ids: Option<String>,

    /// Restore playlists from a backup file and exit
    #[arg(long)]
    restore: Option<PathBuf>,

    /// Restore policy: recreate, follow-else-recreate, follow-only
    #[arg(long, default_value = "follow-else-recreate")]
    restore_policy: String,

    /// Unfollow playlists (comma-separated ids) and drop them from the
    /// catalog, then exit
    #[arg(long)]
    remove: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut catalog = store::load_catalog(&args.catalog)?;
    log::info!(
        "Catalog loaded: {} playlists, {} tracks",
        catalog.len(),
        catalog.total_tracks()
    );

    if args.show_catalog {
        print!("{}", display::catalog_table(&catalog));
        return Ok(());
    }

    if let Some(ref path) = args.backup {
        let ids = args.ids.as_deref().map(parse_id_list);
        let count = backup::export_backup(path, &catalog, ids.as_deref())?;
        println!("Exported {count} playlists to {path:?}");
        return Ok(());
    }

    if let Some(ref path) = args.restore {
        let policy: backup::RestorePolicy = args.restore_policy.parse()?;
        let mut service = MemoryService::from_catalog("local", &catalog);
        let summary = backup::import_backup(path, &mut catalog, &mut service, policy)?;
        store::save_catalog(&args.catalog, &catalog)?;
        println!(
            "Import complete: {} added ({} followed, {} recreated), {} skipped, {} failed.",
            summary.added, summary.followed, summary.recreated, summary.skipped, summary.failed
        );
        return Ok(());
    }

    if let Some(ref ids) = args.remove {
        remove_playlists(&mut catalog, &parse_id_list(ids))?;
        store::save_catalog(&args.catalog, &catalog)?;
        return Ok(());
    }

    if args.blocks.is_empty() {
        bail!("nothing to do: pass at least one --block, or a mode flag (see --help)");
    }

    assemble(&args, &mut catalog)
}

/// Run the default operation: assemble, report, and (unless previewing)
/// commit the new playlist and update the catalog cache
fn assemble(args: &Args, catalog: &mut Catalog) -> Result<()> {
    let blocks = args
        .blocks
        .iter()
        .map(|spec| parse_block_spec(spec, catalog))
        .collect::<Result<Vec<_>>>()?;

    let sequencing = match (&args.block_order, args.shuffle_blocks) {
        (Some(_), true) => bail!("--block-order and --shuffle-blocks are mutually exclusive"),
        (Some(order), false) => SequenceMode::Manual(parse_block_order(order)?),
        (None, true) => SequenceMode::Shuffle,
        (None, false) => SequenceMode::Identity,
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    if args.seed.is_none() {
        log::info!("Using seed {seed} (pass --seed {seed} to reproduce this run)");
    }

    let mut request = AssemblyRequest::new(blocks)
        .with_sequencing(sequencing)
        .with_seed(seed);
    if args.allow_repeats {
        request = request.allow_repeats();
    }

    print!("{}", display::plan_table(&request, catalog));

    let assembler = Assembler::new(request)?;
    let result = assembler.assemble(catalog)?;

    for report in result.underfilled_blocks() {
        log::warn!(
            "block {}: playlist '{}' ran out at {} of {} requested",
            report.block_index + 1,
            report.playlist_id,
            timefmt::format_hms(report.achieved_ms),
            timefmt::format_hms(report.target_ms)
        );
    }

    print!("{}", display::report_table(&result, catalog));

    if args.preview {
        log::info!("Preview only, nothing committed");
        return Ok(());
    }

    let mut service = MemoryService::from_catalog("local", catalog);
    let playlist_id = commit_assembled(&mut service, &result, &args.name, !args.private)?;

    let committed = Playlist {
        id: playlist_id.clone(),
        name: args.name.chars().take(40).collect(),
        owner: service.current_user()?,
        public: !args.private,
        tracks: result.tracks().cloned().collect(),
    };
    catalog.insert(committed);
    store::save_catalog(&args.catalog, catalog)?;

    if let Some(ref path) = args.output {
        backup::export_backup(path, catalog, Some(&[playlist_id.clone()]))?;
    }

    println!(
        "\nSuccess! Created playlist '{}' with {} tracks and {} of playback time.",
        args.name,
        result.track_count(),
        timefmt::format_hms(result.total_ms)
    );
    Ok(())
}

/// Unfollow playlists through the service and drop them from the catalog
fn remove_playlists(catalog: &mut Catalog, ids: &[String]) -> Result<()> {
    let mut service = MemoryService::from_catalog("local", catalog);

    for id in ids {
        match service.unfollow_playlist(id) {
            Ok(()) => {
                if let Some(removed) = catalog.remove(id) {
                    println!("Unfollowed playlist: {}", removed.name);
                }
            }
            Err(e) => log::error!("Error unfollowing playlist '{id}': {e}"),
        }
    }
    Ok(())
}

/// Parse one --block value: `ID[:HH:MM[:SS]][:sequential|random]`.
///
/// When the time is omitted the block targets the playlist's full duration,
/// which requires the playlist to be in the catalog at parse time.
fn parse_block_spec(spec: &str, catalog: &Catalog) -> Result<Block> {
    let mut parts: Vec<&str> = spec.split(':').collect();

    let mode = match parts.last().copied() {
        Some("sequential") => {
            parts.pop();
            SelectionMode::Sequential
        }
        Some("random") => {
            parts.pop();
            SelectionMode::Random
        }
        _ => SelectionMode::Random,
    };

    if parts.is_empty() {
        bail!("block spec '{spec}': missing playlist id");
    }
    let id = parts.remove(0).trim();
    if id.is_empty() {
        bail!("block spec '{spec}': missing playlist id");
    }

    let target_ms = if parts.is_empty() {
        catalog
            .get(id)
            .map(|p| p.duration_ms())
            .ok_or_else(|| anyhow!("block spec '{spec}': playlist '{id}' is not in the catalog"))?
    } else {
        let time = parts.join(":");
        timefmt::parse_duration_ms(&time).ok_or_else(|| {
            anyhow!("block spec '{spec}': invalid duration '{time}' (expected HH:MM or HH:MM:SS)")
        })?
    };

    let mut block = Block::new(id, target_ms);
    if mode == SelectionMode::Sequential {
        block = block.sequential();
    }
    Ok(block)
}

/// Parse "2,1,3" into 0-based block positions
fn parse_block_order(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(|part| {
            let number: usize = part
                .trim()
                .parse()
                .with_context(|| format!("invalid block number '{}'", part.trim()))?;
            if number == 0 {
                bail!("block numbers start at 1");
            }
            Ok(number - 1)
        })
        .collect()
}

/// Split a comma-separated id list
fn parse_id_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
