//! Network construction: ego networks around a focal note and the full corpus graph.
//!
//! Both builders return a [`NetworkData`] whose edges only ever reference
//! nodes present in the same value.

use crate::core::note::{Note, NoteCollection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Largest step budget an ego network may use.
pub const MAX_STEPS: usize = 3;

/// A note placed in a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub folder: Option<String>,
    pub created_at: Option<i64>,
    pub modified_at: Option<i64>,
    /// Hops from the focal note; always 0 in a full network.
    pub step: usize,
    pub is_focal: bool,
}

impl GraphNode {
    fn from_note(note: &Note, step: usize, is_focal: bool) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            folder: note.folder.clone(),
            created_at: note.created_at,
            modified_at: note.modified_at,
            step,
            is_focal,
        }
    }
}

/// How an edge was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// The source links to the target; found following outgoing links.
    Outgoing,
    /// The source links to the target; found scanning for inbound links.
    Incoming,
    /// Undirected relation in the full corpus graph.
    Wikilink,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
            Self::Wikilink => "wikilink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    /// Discovery step in an ego network; `None` in a full network.
    pub step: Option<usize>,
}

/// Nodes and edges of one network, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl NetworkData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn focal(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.is_focal)
    }

    /// Node count per step, ascending by step.
    pub fn step_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.step).or_insert(0) += 1;
        }
        counts
    }

    /// Edge count per discovery step, ascending. Full-network edges are not counted.
    pub fn edge_step_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for step in self.edges.iter().filter_map(|e| e.step) {
            *counts.entry(step).or_insert(0) += 1;
        }
        counts
    }

    /// Drops every edge whose endpoints are not both nodes of this network.
    ///
    /// Returns the number of edges removed.
    pub fn validate_edges(&mut self) -> usize {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let before = self.edges.len();
        self.edges
            .retain(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
        let dropped = before - self.edges.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} dangling edges from network");
        }
        dropped
    }
}

/// Clamps a requested step budget into `1..=MAX_STEPS`.
pub fn clamp_steps(steps: usize) -> usize {
    let clamped = steps.clamp(1, MAX_STEPS);
    if clamped != steps {
        log::warn!("step budget {steps} out of range, using {clamped}");
    }
    clamped
}

/// Builds the ego network of radius `max_steps` around `focal_id`.
///
/// Each step expands every node discovered in the previous step: first its
/// resolvable outgoing links, then every note in the corpus that links to
/// it. A node keeps the step at which it was first discovered. Edges to
/// already-known nodes are still recorded, but each directed pair at most
/// once. An unknown focal note yields an empty network.
pub fn build_ego_network(notes: &NoteCollection, focal_id: &str, max_steps: usize) -> NetworkData {
    let Some(focal) = notes.get(focal_id) else {
        log::debug!("ego network requested for unknown note {focal_id}");
        return NetworkData::default();
    };
    let max_steps = clamp_steps(max_steps);

    // Resolve every note's links once; the inbound scan reuses them.
    let resolved: HashMap<&str, Vec<String>> = notes
        .iter()
        .map(|n| (n.id.as_str(), notes.resolved_links(n)))
        .collect();

    let mut network = NetworkData {
        nodes: vec![GraphNode::from_note(focal, 0, true)],
        edges: Vec::new(),
    };
    let mut discovered: HashSet<String> = HashSet::from([focal.id.clone()]);
    let mut recorded: HashSet<(String, String)> = HashSet::new();
    let mut frontier: Vec<String> = vec![focal.id.clone()];

    for step in 1..=max_steps {
        let mut next_frontier = Vec::new();

        for current_id in &frontier {
            let outgoing = resolved.get(current_id.as_str()).map_or(&[][..], Vec::as_slice);
            for target_id in outgoing {
                if discovered.insert(target_id.clone()) {
                    if let Some(target) = notes.get(target_id) {
                        network.nodes.push(GraphNode::from_note(target, step, false));
                    }
                    next_frontier.push(target_id.clone());
                }
                if recorded.insert((current_id.clone(), target_id.clone())) {
                    network.edges.push(GraphEdge {
                        source: current_id.clone(),
                        target: target_id.clone(),
                        kind: EdgeKind::Outgoing,
                        step: Some(step),
                    });
                }
            }

            // Full scan of the corpus for inbound links to the current node.
            for source in notes {
                let links_here = resolved
                    .get(source.id.as_str())
                    .is_some_and(|links| links.iter().any(|l| l == current_id));
                if !links_here {
                    continue;
                }
                if discovered.insert(source.id.clone()) {
                    network.nodes.push(GraphNode::from_note(source, step, false));
                    next_frontier.push(source.id.clone());
                }
                if recorded.insert((source.id.clone(), current_id.clone())) {
                    network.edges.push(GraphEdge {
                        source: source.id.clone(),
                        target: current_id.clone(),
                        kind: EdgeKind::Incoming,
                        step: Some(step),
                    });
                }
            }
        }

        frontier = next_frontier;
        if frontier.is_empty() {
            break;
        }
    }

    network.validate_edges();
    log::debug!(
        "ego network for {focal_id} ({max_steps} steps): {} nodes, {} edges",
        network.nodes.len(),
        network.edges.len()
    );
    network
}

/// Builds the whole-corpus network: every note is a node and every linked
/// pair of notes shares exactly one undirected edge.
///
/// The first link seen between two notes fixes the edge's orientation.
pub fn build_full_network(notes: &NoteCollection) -> NetworkData {
    let mut network = NetworkData {
        nodes: notes.iter().map(|n| GraphNode::from_note(n, 0, false)).collect(),
        edges: Vec::new(),
    };
    let mut pairs: HashSet<(String, String)> = HashSet::new();

    for source in notes {
        for target_id in notes.resolved_links(source) {
            if pairs.insert(unordered_pair(&source.id, &target_id)) {
                network.edges.push(GraphEdge {
                    source: source.id.clone(),
                    target: target_id,
                    kind: EdgeKind::Wikilink,
                    step: None,
                });
            }
        }
    }

    network.validate_edges();
    log::debug!(
        "full network: {} nodes, {} edges",
        network.nodes.len(),
        network.edges.len()
    );
    network
}

fn unordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
