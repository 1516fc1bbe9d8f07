//! Plain-text tables for terminal reporting

use crate::assembly::{AssembledResult, AssemblyRequest, SelectionMode};
use crate::model::Catalog;
use crate::timefmt::{format_hm, format_hms};

const NAME_COLUMN_WIDTH: usize = 40;

/// Shorten a string to `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Render rows under a header, columns padded to their widest cell
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Catalog listing: one row per cached playlist plus a totals line
pub fn catalog_table(catalog: &Catalog) -> String {
    let rows: Vec<Vec<String>> = catalog
        .playlists()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.id.clone(),
                truncate(&p.owner, NAME_COLUMN_WIDTH),
                truncate(&p.name, NAME_COLUMN_WIDTH),
                p.track_count().to_string(),
                format_hms(p.duration_ms()),
            ]
        })
        .collect();

    let table = render_table(
        &["Count", "ID", "Owner", "Name", "Tracks", "Duration"],
        &rows,
    );
    format!(
        "{table}\n{} playlists, {} tracks, {} playback time.\n",
        catalog.len(),
        catalog.total_tracks(),
        format_hms(catalog.total_duration_ms())
    )
}

/// Block plan: what the request will try to fill, before assembly runs
pub fn plan_table(request: &AssemblyRequest, catalog: &Catalog) -> String {
    let rows: Vec<Vec<String>> = request
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let name = catalog
                .get(&block.playlist_id)
                .map(|p| truncate(&p.name, NAME_COLUMN_WIDTH))
                .unwrap_or_default();
            let mode = match block.mode {
                SelectionMode::Sequential => "sequential",
                SelectionMode::Random => "random",
            };
            vec![
                (i + 1).to_string(),
                block.playlist_id.clone(),
                name,
                mode.to_string(),
                format_hm(block.target_ms),
            ]
        })
        .collect();

    let total_target: u64 = request.blocks.iter().map(|b| b.target_ms).sum();
    let table = render_table(&["Block", "ID", "Name", "Mode", "Target"], &rows);
    format!(
        "{table}\nTotal selected: {} block{}, {} playback time.\n",
        request.blocks.len(),
        if request.blocks.len() == 1 { "" } else { "s" },
        format_hm(total_target)
    )
}

/// Per-block result report, in play order; underfilled blocks are flagged
pub fn report_table(result: &AssembledResult, catalog: &Catalog) -> String {
    let rows: Vec<Vec<String>> = result
        .reports
        .iter()
        .map(|report| {
            let name = catalog
                .get(&report.playlist_id)
                .map(|p| truncate(&p.name, NAME_COLUMN_WIDTH))
                .unwrap_or_default();
            vec![
                if report.underfilled { "!" } else { "" }.to_string(),
                (report.block_index + 1).to_string(),
                name,
                format_hm(report.target_ms),
                format_hms(report.achieved_ms),
                report.track_count.to_string(),
            ]
        })
        .collect();

    let table = render_table(&["", "Block", "Name", "Target", "Achieved", "Tracks"], &rows);
    format!(
        "{table}\n{} tracks, {} playback time.\n",
        result.track_count(),
        format_hms(result.total_ms)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Playlist, Track};

    fn catalog() -> Catalog {
        Catalog::from_playlists(vec![Playlist {
            id: "p1".to_string(),
            name: "A very long playlist name that should get cut somewhere".to_string(),
            owner: "tester".to_string(),
            public: true,
            tracks: vec![Track {
                id: "t1".to_string(),
                title: "Opener".to_string(),
                artists: vec!["Someone".to_string()],
                album: None,
                duration_ms: 3_600_000,
            }],
        }])
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("una canción más larga", 12), "una canción…");
    }

    #[test]
    fn catalog_table_includes_rows_and_totals() {
        let table = catalog_table(&catalog());
        assert!(table.contains("p1"));
        assert!(table.contains("tester"));
        assert!(table.contains("01:00:00"));
        assert!(table.contains("1 playlists, 1 tracks"));
    }

    #[test]
    fn plan_table_shows_mode_and_target() {
        use crate::assembly::{AssemblyRequest, Block};

        let request =
            AssemblyRequest::new(vec![Block::new("p1", 1_800_000).sequential()]);
        let table = plan_table(&request, &catalog());
        assert!(table.contains("sequential"));
        assert!(table.contains("00:30"));
        assert!(table.contains("1 block,"));
    }
}
