//! Network reports as quoted CSV tables.
//!
//! A report is up to four tables (edges, nodes, statistics, isolated notes)
//! returned as text; writing or downloading them is the caller's job.

use crate::core::analytics::NetworkStatistics;
use crate::core::network::{NetworkData, MAX_STEPS};
use crate::core::note::NoteCollection;
use crate::core::settings::GraphSettings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Placeholder written for missing metadata.
pub const UNKNOWN: &str = "Unknown";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What to export and how much detail to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Export the whole corpus instead of an ego network.
    pub full_corpus: bool,
    /// Add folder and timestamp columns to the nodes table.
    pub include_metadata: bool,
    /// Produce the isolated-notes table.
    pub include_isolated: bool,
    /// Ego network radius; ignored for full-corpus exports.
    pub steps: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            full_corpus: false,
            include_metadata: true,
            include_isolated: true,
            steps: 2,
        }
    }
}

impl ExportOptions {
    pub fn from_settings(settings: &GraphSettings) -> Self {
        Self {
            steps: settings.default_steps.clamp(1, MAX_STEPS),
            ..Self::default()
        }
    }
}

/// The rendered tables of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkExport {
    pub edges_table: String,
    pub nodes_table: String,
    pub stats_table: String,
    pub isolated_table: Option<String>,
}

/// Quotes a string for CSV: inner quotes doubled, line breaks removed.
pub fn escape_field(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    format!("\"{}\"", cleaned.replace('"', "\"\""))
}

/// Formats a Unix timestamp (seconds, UTC), or [`UNKNOWN`].
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map_or_else(|| UNKNOWN.to_string(), |dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

// ── Cells and tables ─────────────────────────────────────────────────────────

enum Cell {
    Text(String),
    Int(usize),
    Float(f64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn render(&self) -> String {
        match self {
            Self::Text(s) => escape_field(s),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => format!("{f:.4}"),
        }
    }
}

struct Table {
    lines: Vec<String>,
}

impl Table {
    fn new(header: &[&str]) -> Self {
        Self {
            lines: vec![header.join(",")],
        }
    }

    fn row(&mut self, cells: Vec<Cell>) {
        self.lines
            .push(cells.iter().map(Cell::render).collect::<Vec<_>>().join(","));
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn metadata_or_unknown(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Renders all tables for `network`.
///
/// Returns `None` for an empty network. The isolated-notes table is only
/// produced when `options.include_isolated` is set.
pub fn render_export(
    network: &NetworkData,
    stats: &NetworkStatistics,
    notes: &NoteCollection,
    options: &ExportOptions,
    settings: &GraphSettings,
) -> Option<NetworkExport> {
    if network.is_empty() {
        return None;
    }
    Some(NetworkExport {
        edges_table: edges_table(network, options),
        nodes_table: nodes_table(network, stats, options),
        stats_table: statistics_table(network, stats, notes, options, settings),
        isolated_table: options
            .include_isolated
            .then(|| isolated_table(stats, notes)),
    })
}

fn edges_table(network: &NetworkData, options: &ExportOptions) -> String {
    let titles: HashMap<&str, &str> = network
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.title.as_str()))
        .collect();
    let title = |id: &str| titles.get(id).copied().unwrap_or(UNKNOWN).to_string();

    let mut table = if options.full_corpus {
        Table::new(&["Source", "Target", "Source ID", "Target ID", "Type"])
    } else {
        Table::new(&["Source", "Target", "Source ID", "Target ID", "Direction", "Step"])
    };
    for edge in &network.edges {
        let mut cells = vec![
            Cell::text(title(edge.source.as_str())),
            Cell::text(title(edge.target.as_str())),
            Cell::text(edge.source.as_str()),
            Cell::text(edge.target.as_str()),
            Cell::text(edge.kind.as_str()),
        ];
        if !options.full_corpus {
            cells.push(Cell::Int(edge.step.unwrap_or(0)));
        }
        table.row(cells);
    }
    table.finish()
}

fn nodes_table(
    network: &NetworkData,
    stats: &NetworkStatistics,
    options: &ExportOptions,
) -> String {
    let mut header = vec!["ID", "Title"];
    if !options.full_corpus {
        header.extend(["Step", "Is Focal"]);
    }
    header.extend([
        "Degree",
        "Outgoing Links",
        "Incoming Links",
        "Centrality",
        "Community",
    ]);
    if options.include_metadata {
        header.extend(["Folder", "Created", "Modified"]);
    }

    let mut table = Table::new(&header);
    for node in &network.nodes {
        let metrics = stats.node(&node.id);
        let mut cells = vec![Cell::text(node.id.as_str()), Cell::text(node.title.as_str())];
        if !options.full_corpus {
            cells.push(Cell::Int(node.step));
            cells.push(Cell::text(if node.is_focal { "Yes" } else { "No" }));
        }
        cells.extend([
            Cell::Int(metrics.map_or(0, |m| m.degree)),
            Cell::Int(metrics.map_or(0, |m| m.outgoing_links)),
            Cell::Int(metrics.map_or(0, |m| m.incoming_links)),
            Cell::Float(metrics.map_or(0.0, |m| m.centrality)),
            Cell::Int(metrics.map_or(0, |m| m.community + 1)),
        ]);
        if options.include_metadata {
            cells.extend([
                Cell::text(metadata_or_unknown(node.folder.as_deref())),
                Cell::text(format_timestamp(node.created_at)),
                Cell::text(format_timestamp(node.modified_at)),
            ]);
        }
        table.row(cells);
    }
    table.finish()
}

fn statistics_table(
    network: &NetworkData,
    stats: &NetworkStatistics,
    notes: &NoteCollection,
    options: &ExportOptions,
    settings: &GraphSettings,
) -> String {
    let title_of = |id: &str| {
        network
            .node(id)
            .map(|n| n.title.clone())
            .or_else(|| notes.get(id).map(|n| n.title.clone()))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    let mut table = Table::new(&["metric", "value", "description"]);
    let mut stat = |metric: String, value: Cell, description: String| {
        table.row(vec![Cell::Text(metric), value, Cell::Text(description)]);
    };

    if options.full_corpus {
        stat(
            "Export Mode".into(),
            Cell::text("Full Corpus"),
            "Every note and every resolvable link".into(),
        );
    } else {
        let focal = network
            .focal()
            .map_or_else(|| UNKNOWN.to_string(), |n| n.title.clone());
        stat(
            "Export Mode".into(),
            Cell::text("Ego Network"),
            "Notes within the step budget of the focal note".into(),
        );
        stat("Focal Note".into(), Cell::Text(focal), "Centre of the network".into());
        stat(
            "Max Steps".into(),
            Cell::Int(options.steps.clamp(1, MAX_STEPS)),
            "Link hops explored from the focal note".into(),
        );
    }

    stat(
        "Total Notes".into(),
        Cell::Int(stats.corpus_note_count),
        "Notes in the whole corpus".into(),
    );
    stat(
        "Total Links".into(),
        Cell::Int(stats.corpus_link_count),
        "Distinct resolvable links in the whole corpus".into(),
    );
    stat(
        "Isolated Notes".into(),
        Cell::Int(stats.isolated_note_ids.len()),
        "Notes with no incoming or outgoing links".into(),
    );
    stat("Network Nodes".into(), Cell::Int(stats.node_count), "Notes in this network".into());
    stat(
        "Network Edges".into(),
        Cell::Int(stats.edge_count),
        "Distinct undirected connections".into(),
    );

    if !options.full_corpus {
        let node_steps = network.step_counts();
        let edge_steps = network.edge_step_counts();
        // A step can add edges between known notes without reaching new ones.
        let steps: BTreeSet<usize> = node_steps
            .keys()
            .chain(edge_steps.keys())
            .copied()
            .collect();
        for step in steps {
            stat(
                format!("Step {step} Nodes"),
                Cell::Int(node_steps.get(&step).copied().unwrap_or(0)),
                format!("Notes first reached at step {step}"),
            );
            if step > 0 {
                stat(
                    format!("Step {step} Edges"),
                    Cell::Int(edge_steps.get(&step).copied().unwrap_or(0)),
                    format!("Links recorded at step {step}"),
                );
            }
        }
    }

    stat(
        "Density".into(),
        Cell::Float(stats.density),
        "Share of possible connections present".into(),
    );
    stat(
        "Average Degree".into(),
        Cell::Float(stats.average_degree),
        "Mean connections per note".into(),
    );
    stat(
        "Connected Components".into(),
        Cell::Int(stats.component_count),
        "Separate clusters of linked notes".into(),
    );
    stat(
        "Estimated Diameter".into(),
        Cell::Int(stats.diameter_estimate),
        format!(
            "Longest shortest path seen from up to {} sampled notes (lower bound)",
            settings.diameter_sample_size
        ),
    );
    stat(
        "Communities".into(),
        Cell::Int(stats.communities.count()),
        "Groups found by greedy modularity optimisation".into(),
    );
    stat(
        "Largest Community".into(),
        Cell::Int(stats.communities.largest_size),
        "Notes in the biggest community".into(),
    );
    stat(
        "Modularity Estimate".into(),
        Cell::Float(stats.communities.modularity_estimate),
        "Heuristic community strength, not exact modularity".into(),
    );

    for (rank, score) in stats.top_centrality.iter().enumerate() {
        stat(
            format!("Centrality #{}", rank + 1),
            Cell::Float(score.score),
            title_of(score.id.as_str()),
        );
    }

    for community in &stats.communities.communities {
        let members: Vec<String> = community
            .members
            .iter()
            .map(|id| title_of(id.as_str()))
            .collect();
        stat(
            format!("Community {}", community.id + 1),
            Cell::Int(community.members.len()),
            members.join("; "),
        );
    }

    for (i, id) in stats
        .isolated_note_ids
        .iter()
        .take(settings.isolated_sample_count)
        .enumerate()
    {
        stat(
            format!("Isolated Note {}", i + 1),
            Cell::Text(title_of(id.as_str())),
            "No incoming or outgoing links".into(),
        );
    }

    table.finish()
}

fn isolated_table(stats: &NetworkStatistics, notes: &NoteCollection) -> String {
    let mut table = Table::new(&["ID", "Title", "Folder", "Created", "Modified"]);
    for note in stats.isolated_note_ids.iter().filter_map(|id| notes.get(id)) {
        table.row(vec![
            Cell::text(note.id.as_str()),
            Cell::text(note.title.as_str()),
            Cell::text(metadata_or_unknown(note.folder.as_deref())),
            Cell::text(format_timestamp(note.created_at)),
            Cell::text(format_timestamp(note.modified_at)),
        ]);
    }
    table.finish()
}

// ── File names ───────────────────────────────────────────────────────────────

/// Suggested file names for the four tables of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilenames {
    pub edges: String,
    pub nodes: String,
    pub stats: String,
    pub isolated: String,
}

/// Converts a title into a safe filename stem.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug: String = slug
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "network".to_string()
    } else {
        slug
    }
}

/// Builds `<prefix>-<slug>-<table>.csv` names; a full-corpus export passes no title.
pub fn suggested_filenames(prefix: &str, focal_title: Option<&str>) -> ExportFilenames {
    let stem = match focal_title {
        Some(title) => format!("{}-{}", slugify(prefix), slugify(title)),
        None => format!("{}-full", slugify(prefix)),
    };
    ExportFilenames {
        edges: format!("{stem}-edges.csv"),
        nodes: format!("{stem}-nodes.csv"),
        stats: format!("{stem}-stats.csv"),
        isolated: format!("{stem}-isolated.csv"),
    }
}
