// A* over the node graph, filtered by what the camera currently shows.
//
// Unlike textbook A*, edge traversability is not fixed: every relaxation asks
// an `EdgeOracle` whether the edge is active this frame. An edge skipped now
// may be walkable on the next tick once the camera has moved.
//
// Cost of an edge is the Euclidean distance between its endpoints, and the
// heuristic is the straight-line distance to the goal, so the heuristic never
// overestimates and returned paths are optimal over the active edges.

use log::debug;

use super::camera::CameraState;
use super::graph::{NodeGraph, NodeId};
use super::visibility::{EdgeOracle, ProjectionOracle, VisibilityConfig};

// ============================================================================
// PATH
// ============================================================================

/// Ordered node sequence from start to goal, both inclusive. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// `None` for an empty node list.
    pub fn new(nodes: Vec<NodeId>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Start equals goal: nothing to walk.
    pub fn is_stationary(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Sum of edge lengths along the path.
    pub fn cost(&self, graph: &NodeGraph) -> f32 {
        self.nodes
            .windows(2)
            .map(|w| graph.distance(w[0], w[1]))
            .sum()
    }
}

// ============================================================================
// SEARCH STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frontier {
    Unseen,
    Open,
    Closed,
}

/// Per-search scratch, indexed by node id. Built fresh for every search.
struct SearchState {
    /// Best known cost from start. `f32::INFINITY` = not reached.
    g: Vec<f32>,
    /// g + heuristic.
    f: Vec<f32>,
    came_from: Vec<Option<NodeId>>,
    frontier: Vec<Frontier>,
}

impl SearchState {
    fn new(len: usize) -> Self {
        Self {
            g: vec![f32::INFINITY; len],
            f: vec![f32::INFINITY; len],
            came_from: vec![None; len],
            frontier: vec![Frontier::Unseen; len],
        }
    }

    /// Open node with the lowest f. Lowest index wins ties.
    fn best_open(&self) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for (i, state) in self.frontier.iter().enumerate() {
            if *state != Frontier::Open {
                continue;
            }
            match best {
                Some(b) if self.f[i] >= self.f[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    fn reconstruct(&self, goal: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![goal];
        let mut current = goal;
        while let Some(prev) = self.came_from[current] {
            nodes.push(prev);
            current = prev;
        }
        nodes.reverse();
        nodes
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Shortest path from `start` to `goal` over edges active under `camera`.
///
/// Returns `None` when the goal cannot be reached with the current view;
/// callers treat that as "ignore this click".
///
/// # Panics
/// If `start` or `goal` is not a node of `graph`.
pub fn find_path(
    graph: &NodeGraph,
    start: NodeId,
    goal: NodeId,
    camera: &CameraState,
) -> Option<Path> {
    let oracle = ProjectionOracle::new(camera, VisibilityConfig::default());
    find_path_with(graph, start, goal, &oracle)
}

/// Shortest path from `start` to `goal` over edges `oracle` reports active.
///
/// # Panics
/// If `start` or `goal` is not a node of `graph`.
pub fn find_path_with(
    graph: &NodeGraph,
    start: NodeId,
    goal: NodeId,
    oracle: &impl EdgeOracle,
) -> Option<Path> {
    assert!(graph.contains(start), "start node {start} not in graph");
    assert!(graph.contains(goal), "goal node {goal} not in graph");

    let goal_pos = graph.position(goal);
    let heuristic = |n: NodeId| graph.position(n).distance(goal_pos);

    let mut state = SearchState::new(graph.len());
    state.g[start] = 0.0;
    state.f[start] = heuristic(start);
    state.frontier[start] = Frontier::Open;

    let mut expanded = 0usize;
    while let Some(current) = state.best_open() {
        if current == goal {
            let path = Path::new(state.reconstruct(goal));
            debug!(
                "path {start} -> {goal}: {:?} ({expanded} expanded)",
                path.as_ref().map(Path::nodes)
            );
            return path;
        }
        state.frontier[current] = Frontier::Closed;
        expanded += 1;

        for &nb in graph.neighbors(current) {
            if state.frontier[nb] == Frontier::Closed {
                continue;
            }
            if !oracle.is_active(graph, current, nb) {
                continue;
            }
            let tentative = state.g[current] + graph.distance(current, nb);
            if tentative < state.g[nb] {
                state.came_from[nb] = Some(current);
                state.g[nb] = tentative;
                state.f[nb] = tentative + heuristic(nb);
                state.frontier[nb] = Frontier::Open;
            }
        }
    }

    debug!("no path {start} -> {goal} under current view ({expanded} expanded)");
    None
}
