//! Graph analytics over a [`NetworkData`].
//!
//! Implements the statistics shown next to a network view:
//! - **Betweenness centrality** on an unweighted, undirected view
//! - **Community detection** by single-level greedy modularity moves
//! - **Connected components** with an explicit-stack DFS
//! - **Diameter estimate** from a fixed sample of BFS sources
//! - **Isolated notes**, always judged against the whole corpus
//!
//! Every function works on node indices into an [`Adjacency`], which keeps
//! the network's node order. "First", "top" and tie-breaking rules all refer
//! to that order.

use crate::core::network::NetworkData;
use crate::core::note::{Note, NoteCollection};
use crate::core::settings::GraphSettings;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

// ============================================================================
// Adjacency
// ============================================================================

/// Undirected adjacency lists for one network, indexed by node position.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Builds adjacency lists in one pass over the edges.
    ///
    /// Direction is ignored, self-loops are skipped and each neighbor appears
    /// once. Edges naming unknown nodes are skipped.
    pub fn from_network(network: &NetworkData) -> Self {
        let ids: Vec<String> = network.nodes.iter().map(|n| n.id.clone()).collect();
        let index: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let mut neighbors = vec![Vec::new(); ids.len()];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for edge in &network.edges {
            let (Some(&a), Some(&b)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            if a == b || !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }

        Self {
            ids,
            index,
            neighbors,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, node: usize) -> &str {
        &self.ids[node]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors[node].len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Hop distances from `source`; `None` for unreachable nodes.
    fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.len()];
        let mut queue = VecDeque::from([source]);
        dist[source] = Some(0);
        while let Some(v) = queue.pop_front() {
            let next = dist[v].map_or(0, |d| d + 1);
            for &w in &self.neighbors[v] {
                if dist[w].is_none() {
                    dist[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }
        dist
    }
}

// ============================================================================
// Betweenness centrality
// ============================================================================

/// Betweenness centrality for every node, in node order.
///
/// One BFS per source records shortest-path predecessors; dependencies are
/// then accumulated in reverse discovery order, each node splitting its
/// share evenly among its predecessors. Scores are normalised by
/// `2 / ((n-1)(n-2))` when `n > 2`.
pub fn betweenness_centrality(adj: &Adjacency) -> Vec<f64> {
    let n = adj.len();
    let mut centrality = vec![0.0; n];

    for source in 0..n {
        let mut dist: Vec<Option<usize>> = vec![None; n];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::from([source]);
        dist[source] = Some(0);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in adj.neighbors(v) {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    predecessors[w].push(v);
                }
            }
        }

        let mut dependency = vec![0.0; n];
        for &w in order.iter().rev() {
            let share = (1.0 + dependency[w]) / predecessors[w].len().max(1) as f64;
            for &v in &predecessors[w] {
                dependency[v] += share;
            }
            if w != source {
                centrality[w] += dependency[w];
            }
        }
    }

    if n > 2 {
        let scale = 2.0 / ((n - 1) * (n - 2)) as f64;
        for c in &mut centrality {
            *c *= scale;
        }
    }
    centrality
}

/// A node's centrality, as listed in rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityScore {
    pub id: String,
    pub score: f64,
}

/// The `limit` highest scores. Equal scores keep node order.
pub fn top_centrality(adj: &Adjacency, scores: &[f64], limit: usize) -> Vec<CentralityScore> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    ranked
        .into_iter()
        .take(limit)
        .map(|i| CentralityScore {
            id: adj.id(i).to_string(),
            score: scores[i],
        })
        .collect()
}

// ============================================================================
// Community detection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Zero-based, numbered by first member in node order.
    pub id: usize,
    pub members: Vec<String>,
}

/// Result of [`detect_communities`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDetection {
    /// Community id per node, in node order.
    pub assignment: Vec<usize>,
    pub communities: Vec<Community>,
    pub largest_size: usize,
    /// Heuristic in `[0, max_modularity_estimate]`; not Newman modularity.
    pub modularity_estimate: f64,
}

impl CommunityDetection {
    pub fn count(&self) -> usize {
        self.communities.len()
    }
}

/// Greedy, single-level modularity optimisation.
///
/// Every node starts alone. Each pass visits nodes in order and moves a node
/// to the neighboring community with the largest strictly positive gain
///
/// ```text
/// gain = (ties_target - ties_current) / 2E
///      - degree * (degree_sum_target - degree_sum_current) / 4E²
/// ```
///
/// where `degree_sum_current` excludes the node itself. This is exactly half
/// of the textbook Louvain gain, so the chosen move and its sign are the
/// same. Passes stop after `max_iterations` or when nothing moves. The
/// result is a local optimum, not a certified maximum.
pub fn detect_communities(
    adj: &Adjacency,
    max_iterations: usize,
    max_modularity_estimate: f64,
) -> CommunityDetection {
    let n = adj.len();
    if n == 0 {
        return CommunityDetection::default();
    }

    let mut community: Vec<usize> = (0..n).collect();
    let edges = adj.edge_count() as f64;

    if edges > 0.0 {
        let two_e = 2.0 * edges;
        let four_e_sq = 4.0 * edges * edges;
        let mut degree_sum: Vec<f64> = (0..n).map(|i| adj.degree(i) as f64).collect();

        for pass in 0..max_iterations {
            let mut moved = false;

            for node in 0..n {
                let current = community[node];
                let degree = adj.degree(node) as f64;

                // Ties per neighboring community, in first-seen order.
                let mut ties: Vec<(usize, f64)> = Vec::new();
                for &neighbor in adj.neighbors(node) {
                    let c = community[neighbor];
                    match ties.iter_mut().find(|(tc, _)| *tc == c) {
                        Some((_, count)) => *count += 1.0,
                        None => ties.push((c, 1.0)),
                    }
                }
                let ties_current = ties
                    .iter()
                    .find(|(c, _)| *c == current)
                    .map_or(0.0, |(_, t)| *t);
                let sum_current = degree_sum[current] - degree;

                let mut best = current;
                let mut best_gain = 0.0;
                for &(target, ties_target) in &ties {
                    if target == current {
                        continue;
                    }
                    let gain = (ties_target - ties_current) / two_e
                        - degree * (degree_sum[target] - sum_current) / four_e_sq;
                    if gain > best_gain {
                        best_gain = gain;
                        best = target;
                    }
                }

                if best != current {
                    degree_sum[current] -= degree;
                    degree_sum[best] += degree;
                    community[node] = best;
                    moved = true;
                }
            }

            if !moved {
                log::trace!("community detection converged after {} passes", pass + 1);
                break;
            }
        }
    }

    // Renumber by first appearance in node order.
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut communities: Vec<Community> = Vec::new();
    let mut assignment = Vec::with_capacity(n);
    for (node, &raw) in community.iter().enumerate() {
        let id = *remap.entry(raw).or_insert_with(|| {
            communities.push(Community {
                id: communities.len(),
                members: Vec::new(),
            });
            communities.len() - 1
        });
        communities[id].members.push(adj.id(node).to_string());
        assignment.push(id);
    }

    let largest_size = communities.iter().map(|c| c.members.len()).max().unwrap_or(0);
    let modularity_estimate =
        estimate_modularity(adj, &assignment, &communities, max_modularity_estimate);

    CommunityDetection {
        assignment,
        communities,
        largest_size,
        modularity_estimate,
    }
}

/// Share of edges inside communities minus the share expected from
/// community sizes alone, clamped to `[0, ceiling]`.
fn estimate_modularity(
    adj: &Adjacency,
    assignment: &[usize],
    communities: &[Community],
    ceiling: f64,
) -> f64 {
    let edges = adj.edge_count();
    if edges == 0 {
        return 0.0;
    }
    let internal = (0..adj.len())
        .flat_map(|v| adj.neighbors(v).iter().map(move |&w| (v, w)))
        .filter(|&(v, w)| v < w && assignment[v] == assignment[w])
        .count();
    let n = adj.len() as f64;
    let expected: f64 = communities
        .iter()
        .map(|c| (c.members.len() as f64 / n).powi(2))
        .sum();
    (internal as f64 / edges as f64 - expected).clamp(0.0, ceiling)
}

// ============================================================================
// Components and diameter
// ============================================================================

/// Number of connected components, using an explicit stack.
pub fn connected_components(adj: &Adjacency) -> usize {
    let mut visited = vec![false; adj.len()];
    let mut components = 0;
    let mut stack = Vec::new();

    for start in 0..adj.len() {
        if visited[start] {
            continue;
        }
        components += 1;
        visited[start] = true;
        stack.push(start);
        while let Some(v) = stack.pop() {
            for &w in adj.neighbors(v) {
                if !visited[w] {
                    visited[w] = true;
                    stack.push(w);
                }
            }
        }
    }
    components
}

/// Lower bound on the diameter: the longest finite BFS distance from the
/// first `sample_size` nodes in node order.
pub fn estimate_diameter(adj: &Adjacency, sample_size: usize) -> usize {
    (0..adj.len().min(sample_size))
        .flat_map(|source| adj.bfs_distances(source))
        .flatten()
        .max()
        .unwrap_or(0)
}

// ============================================================================
// Isolated notes
// ============================================================================

/// Notes with no outgoing link and no inbound link anywhere in the corpus,
/// in collection order.
///
/// Any `[[...]]` in a note counts as outgoing, resolved or not; only
/// resolved links count as inbound.
pub fn find_isolated_notes(notes: &NoteCollection) -> Vec<&Note> {
    let linked_to: HashSet<String> = notes
        .iter()
        .flat_map(|n| notes.resolved_links(n))
        .collect();

    notes
        .iter()
        .filter(|note| note.outgoing_links().is_empty() && !linked_to.contains(&note.id))
        .collect()
}

// ============================================================================
// Aggregate statistics
// ============================================================================

/// Per-node figures, in node order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub id: String,
    pub degree: usize,
    /// Distinct notes this note links to, across the corpus.
    pub outgoing_links: usize,
    /// Distinct notes linking to this note, across the corpus.
    pub incoming_links: usize,
    pub centrality: f64,
    pub community: usize,
}

/// Everything the analytics layer reports for one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatistics {
    pub corpus_note_count: usize,
    pub corpus_link_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_degree: f64,
    pub nodes: Vec<NodeMetrics>,
    pub top_centrality: Vec<CentralityScore>,
    pub communities: CommunityDetection,
    pub component_count: usize,
    pub diameter_estimate: usize,
    pub isolated_note_ids: Vec<String>,
}

impl NetworkStatistics {
    pub fn node(&self, id: &str) -> Option<&NodeMetrics> {
        self.nodes.iter().find(|m| m.id == id)
    }
}

/// Computes all statistics for `network`.
///
/// `full_corpus` selects component counting; an ego network is connected
/// by construction and reports one component. Link counts and isolation
/// are always taken from `notes`.
pub fn analyze(
    network: &NetworkData,
    notes: &NoteCollection,
    full_corpus: bool,
    settings: &GraphSettings,
) -> NetworkStatistics {
    let adj = Adjacency::from_network(network);
    let n = adj.len();
    let edge_count = adj.edge_count();

    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    let mut incoming: HashMap<String, usize> = HashMap::new();
    let mut corpus_link_count = 0;
    for note in notes {
        let links = notes.resolved_links(note);
        corpus_link_count += links.len();
        outgoing.insert(note.id.as_str(), links.len());
        for target in links {
            *incoming.entry(target).or_insert(0) += 1;
        }
    }

    let centrality = betweenness_centrality(&adj);
    let communities = detect_communities(
        &adj,
        settings.community_max_iterations,
        settings.max_modularity_estimate,
    );

    let nodes = (0..n)
        .map(|i| NodeMetrics {
            id: adj.id(i).to_string(),
            degree: adj.degree(i),
            outgoing_links: outgoing.get(adj.id(i)).copied().unwrap_or(0),
            incoming_links: incoming.get(adj.id(i)).copied().unwrap_or(0),
            centrality: centrality[i],
            community: communities.assignment[i],
        })
        .collect();

    let component_count = match (full_corpus, n) {
        (_, 0) => 0,
        (true, _) => connected_components(&adj),
        (false, _) => 1,
    };

    let density = if n > 1 {
        2.0 * edge_count as f64 / (n * (n - 1)) as f64
    } else {
        0.0
    };
    let average_degree = if n > 0 {
        2.0 * edge_count as f64 / n as f64
    } else {
        0.0
    };

    let stats = NetworkStatistics {
        corpus_note_count: notes.len(),
        corpus_link_count,
        node_count: n,
        edge_count,
        density,
        average_degree,
        nodes,
        top_centrality: top_centrality(&adj, &centrality, settings.top_centrality_count),
        component_count,
        diameter_estimate: estimate_diameter(&adj, settings.diameter_sample_size),
        isolated_note_ids: find_isolated_notes(notes)
            .into_iter()
            .map(|note| note.id.clone())
            .collect(),
        communities,
    };
    log::debug!(
        "analyzed network: {} nodes, {} edges, {} communities, {} components",
        stats.node_count,
        stats.edge_count,
        stats.communities.count(),
        stats.component_count
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::network::{
        build_ego_network, build_full_network, EdgeKind, GraphEdge, GraphNode,
    };

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            title: id.to_uppercase(),
            folder: None,
            created_at: None,
            modified_at: None,
            step: 0,
            is_focal: false,
        }
    }

    fn make_network(ids: &[&str], pairs: &[(&str, &str)]) -> NetworkData {
        NetworkData {
            nodes: ids.iter().map(|id| node(id)).collect(),
            edges: pairs
                .iter()
                .map(|(s, t)| GraphEdge {
                    source: s.to_string(),
                    target: t.to_string(),
                    kind: EdgeKind::Wikilink,
                    step: None,
                })
                .collect(),
        }
    }

    fn make_chain(n: usize) -> (Vec<String>, NetworkData) {
        let ids: Vec<String> = (0..n).map(|i| format!("node_{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let pairs: Vec<(&str, &str)> = refs.windows(2).map(|w| (w[0], w[1])).collect();
        let network = make_network(&refs, &pairs);
        (ids, network)
    }

    fn make_clique_pairs<'a>(ids: &[&'a str]) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::new();
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                pairs.push((ids[i], ids[j]));
            }
        }
        pairs
    }

    fn make_two_cliques() -> NetworkData {
        let a = ["a0", "a1", "a2", "a3"];
        let b = ["b0", "b1", "b2", "b3"];
        let mut pairs = make_clique_pairs(&a);
        pairs.extend(make_clique_pairs(&b));
        pairs.push(("a3", "b0"));
        let ids: Vec<&str> = a.iter().chain(b.iter()).copied().collect();
        make_network(&ids, &pairs)
    }

    fn corpus(notes: &[(&str, &str)]) -> NoteCollection {
        notes
            .iter()
            .map(|(id, content)| Note::from_parts(*id, *content, None, None, None))
            .collect()
    }

    // --- Adjacency ---

    #[test]
    fn test_adjacency_dedups_and_skips_self_loops() {
        let network = make_network(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("a", "a"), ("b", "c"), ("c", "ghost")],
        );
        let adj = Adjacency::from_network(&network);
        assert_eq!(adj.neighbors(0), &[1]);
        assert_eq!(adj.neighbors(1), &[0, 2]);
        assert_eq!(adj.edge_count(), 2);
        assert_eq!(adj.index_of("c"), Some(2));
    }

    // --- Betweenness ---

    #[test]
    fn test_betweenness_two_nodes_all_zero() {
        let adj = Adjacency::from_network(&make_network(&["a", "b"], &[("a", "b")]));
        assert_eq!(betweenness_centrality(&adj), vec![0.0, 0.0]);
    }

    #[test]
    fn test_betweenness_path_of_three_normalized() {
        let adj = Adjacency::from_network(&make_network(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c")],
        ));
        let bc = betweenness_centrality(&adj);
        assert_eq!(bc[0], 0.0);
        assert!((bc[1] - 2.0).abs() < 1e-9);
        assert_eq!(bc[2], 0.0);
    }

    #[test]
    fn test_betweenness_chain_middle_highest() {
        let (_, network) = make_chain(5);
        let bc = betweenness_centrality(&Adjacency::from_network(&network));
        assert!(bc[2] > bc[1]);
        assert!(bc[1] > bc[0]);
        assert!(bc.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_betweenness_star_center_highest() {
        let network = make_network(
            &["center", "l0", "l1", "l2", "l3"],
            &[("center", "l0"), ("center", "l1"), ("l2", "center"), ("center", "l3")],
        );
        let bc = betweenness_centrality(&Adjacency::from_network(&network));
        assert!(bc[0] > 0.0);
        assert!(bc[1..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_top_centrality_ties_keep_node_order() {
        let network = make_network(&["x", "y", "z", "w"], &[("x", "y"), ("z", "w")]);
        let adj = Adjacency::from_network(&network);
        let scores = betweenness_centrality(&adj);
        let top = top_centrality(&adj, &scores, 3);
        let ids: Vec<&str> = top.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    // --- Communities ---

    #[test]
    fn test_communities_two_cliques() {
        let adj = Adjacency::from_network(&make_two_cliques());
        let detection = detect_communities(&adj, 10, 0.8);
        assert_eq!(detection.count(), 2);
        assert_eq!(detection.largest_size, 4);
        assert_eq!(detection.assignment, vec![0, 0, 0, 0, 1, 1, 1, 1]);
        assert!(detection.modularity_estimate > 0.0);
        assert!(detection.modularity_estimate <= 0.8);
        assert_eq!(detection.communities[1].members, vec!["b0", "b1", "b2", "b3"]);
    }

    #[test]
    fn test_communities_complete_graph_single() {
        let ids = ["k0", "k1", "k2", "k3", "k4"];
        let adj = Adjacency::from_network(&make_network(&ids, &make_clique_pairs(&ids)));
        let detection = detect_communities(&adj, 10, 0.8);
        assert_eq!(detection.count(), 1);
        assert_eq!(detection.largest_size, 5);
        assert_eq!(detection.modularity_estimate, 0.0);
    }

    #[test]
    fn test_communities_every_node_assigned_once() {
        let (ids, network) = make_chain(6);
        let detection = detect_communities(&Adjacency::from_network(&network), 10, 0.8);
        let mut members: Vec<&String> = detection
            .communities
            .iter()
            .flat_map(|c| &c.members)
            .collect();
        members.sort();
        let mut expected: Vec<&String> = ids.iter().collect();
        expected.sort();
        assert_eq!(members, expected);
        assert_eq!(detection.assignment.len(), 6);
    }

    #[test]
    fn test_communities_without_edges_are_singletons() {
        let adj = Adjacency::from_network(&make_network(&["a", "b", "c"], &[]));
        let detection = detect_communities(&adj, 10, 0.8);
        assert_eq!(detection.count(), 3);
        assert_eq!(detection.largest_size, 1);
        assert_eq!(detection.modularity_estimate, 0.0);
    }

    // --- Components and diameter ---

    #[test]
    fn test_connected_components_disconnected() {
        let network = make_network(&["a", "b", "c", "d", "e"], &[("a", "b"), ("c", "d")]);
        assert_eq!(connected_components(&Adjacency::from_network(&network)), 3);
    }

    #[test]
    fn test_connected_components_deep_chain() {
        let (_, network) = make_chain(20_000);
        assert_eq!(connected_components(&Adjacency::from_network(&network)), 1);
    }

    #[test]
    fn test_diameter_of_chain() {
        let (_, network) = make_chain(6);
        let adj = Adjacency::from_network(&network);
        assert_eq!(estimate_diameter(&adj, 50), 5);
    }

    #[test]
    fn test_diameter_is_sampled_lower_bound() {
        // Sampling only the middle node sees at most half the path.
        let network = make_network(
            &["m", "a", "b", "c", "d"],
            &[("a", "b"), ("b", "m"), ("m", "c"), ("c", "d")],
        );
        let adj = Adjacency::from_network(&network);
        assert_eq!(estimate_diameter(&adj, 1), 2);
        assert_eq!(estimate_diameter(&adj, 5), 4);
    }

    // --- Isolated notes ---

    #[test]
    fn test_isolated_scenario_chain_has_none() {
        let notes = corpus(&[("a", "# A\n[[B]]"), ("b", "# B\n[[C]]"), ("c", "# C")]);
        assert!(find_isolated_notes(&notes).is_empty());
    }

    #[test]
    fn test_isolated_single_note() {
        let notes = corpus(&[("d", "# D\nalone")]);
        let ids: Vec<&str> = find_isolated_notes(&notes).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["d"]);
    }

    #[test]
    fn test_isolated_counts_unresolved_and_self_links_as_outgoing() {
        let notes = corpus(&[
            ("a", "# A\n[[Nowhere]]"),
            ("b", "# B\n[[B]]"),
            ("c", "# C"),
        ]);
        let ids: Vec<&str> = find_isolated_notes(&notes)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c"]);
    }

    // --- Aggregate ---

    #[test]
    fn test_analyze_full_network() {
        let notes = corpus(&[
            ("a", "# A\n[[B]]"),
            ("b", "# B\n[[C]]"),
            ("c", "# C"),
            ("d", "# D"),
        ]);
        let network = build_full_network(&notes);
        let stats = analyze(&network, &notes, true, &GraphSettings::default());
        assert_eq!(stats.corpus_note_count, 4);
        assert_eq!(stats.corpus_link_count, 2);
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.diameter_estimate, 2);
        assert_eq!(stats.isolated_note_ids, vec!["d"]);
        assert_eq!(stats.top_centrality[0].id, "b");
        let b = stats.node("b").unwrap();
        assert_eq!((b.outgoing_links, b.incoming_links, b.degree), (1, 1, 2));
    }

    #[test]
    fn test_analyze_ego_network_reports_one_component() {
        let notes = corpus(&[("a", "# A\n[[B]]"), ("b", "# B"), ("z", "# Z")]);
        let network = build_ego_network(&notes, "a", 2);
        let stats = analyze(&network, &notes, false, &GraphSettings::default());
        assert_eq!(stats.component_count, 1);
        assert_eq!(stats.node_count, 2);
        // Isolation is judged on the whole corpus, not the ego subset.
        assert_eq!(stats.isolated_note_ids, vec!["z"]);
    }

    #[test]
    fn test_analyze_empty_network() {
        let stats = analyze(
            &NetworkData::default(),
            &NoteCollection::new(),
            true,
            &GraphSettings::default(),
        );
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.density, 0.0);
        assert!(stats.top_centrality.is_empty());
    }
}
