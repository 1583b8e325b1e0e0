//! Core library for Wikigraph, the knowledge-graph engine of a note-taking application.
//!
//! Notes link to each other with `[[Title]]` or `[[id:IDENT]]` wikilinks. The
//! primary entry point is [`GraphEngine`], which holds the latest snapshot of
//! the host's notes and answers graph queries against it: ego networks around
//! a focal note, the full corpus network, backlinks, analytics and CSV
//! reports.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    analytics::{
        analyze, betweenness_centrality, connected_components, detect_communities,
        estimate_diameter, find_isolated_notes, top_centrality, Adjacency, CentralityScore,
        Community, CommunityDetection, NetworkStatistics, NodeMetrics,
    },
    backlinks::{context_snippet, Backlink, BacklinkIndex},
    engine::GraphEngine,
    error::{Result, WikigraphError},
    hooks::{HookRegistry, NodeSelectedHook},
    link::{extract_links, find_occurrences, LinkOccurrence, LinkTarget},
    network::{
        build_ego_network, build_full_network, EdgeKind, GraphEdge, GraphNode, NetworkData,
        MAX_STEPS,
    },
    note::{Note, NoteCollection},
    report::{
        escape_field, format_timestamp, render_export, suggested_filenames, ExportFilenames,
        ExportOptions, NetworkExport,
    },
    settings::{
        load_settings, load_settings_from, save_settings, save_settings_to, settings_file_path,
        GraphSettings,
    },
};
