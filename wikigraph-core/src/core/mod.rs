//! Internal domain modules for the Wikigraph core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod analytics;
pub mod backlinks;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod link;
pub mod network;
pub mod note;
pub mod report;
pub mod settings;

#[doc(inline)]
pub use analytics::{
    analyze, find_isolated_notes, Adjacency, CentralityScore, Community, CommunityDetection,
    NetworkStatistics, NodeMetrics,
};
#[doc(inline)]
pub use backlinks::{Backlink, BacklinkIndex};
#[doc(inline)]
pub use engine::GraphEngine;
#[doc(inline)]
pub use error::{Result, WikigraphError};
#[doc(inline)]
pub use hooks::{HookRegistry, NodeSelectedHook};
#[doc(inline)]
pub use link::{LinkOccurrence, LinkTarget};
#[doc(inline)]
pub use network::{
    build_ego_network, build_full_network, EdgeKind, GraphEdge, GraphNode, NetworkData,
};
#[doc(inline)]
pub use note::{Note, NoteCollection};
#[doc(inline)]
pub use report::{escape_field, ExportFilenames, ExportOptions, NetworkExport};
#[doc(inline)]
pub use settings::GraphSettings;
