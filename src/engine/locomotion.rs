// Node-to-node locomotion along a found path.
//
// Every edge takes the same wall-clock time (`MOVE_DURATION`) no matter how
// long it is in world space; position is a straight lerp between the edge's
// endpoints. A new path can be assigned at any time, including mid-edge: the
// player snaps to the new path's first node and starts over at progress 0.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, trace};

use super::graph::{NodeGraph, NodeId};
use super::pathfinding::Path;

/// Seconds to cross any single edge.
pub const MOVE_DURATION: f32 = 0.4;

#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Last node the player reached (or was placed on).
    current_node: NodeId,
    path: Vec<NodeId>,
    /// Index into `path` of the next node not yet reached.
    path_index: usize,
    from: NodeId,
    to: NodeId,
    /// Fraction of the active edge crossed, in [0, 1].
    progress: f32,
    position: Vec3,
    moving: bool,
    pub move_duration: f32,
}

impl Player {
    pub fn new(graph: &NodeGraph, node: NodeId) -> Self {
        Self::with_duration(graph, node, MOVE_DURATION)
    }

    /// # Panics
    /// If `node` is not a node of `graph`.
    pub fn with_duration(graph: &NodeGraph, node: NodeId, move_duration: f32) -> Self {
        Self {
            current_node: node,
            path: Vec::new(),
            path_index: 0,
            from: node,
            to: node,
            progress: 0.0,
            position: graph.position(node),
            moving: false,
            move_duration,
        }
    }

    pub fn current_node(&self) -> NodeId {
        self.current_node
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Edge being crossed right now, as `(from, to)`.
    pub fn active_edge(&self) -> Option<(NodeId, NodeId)> {
        self.moving.then_some((self.from, self.to))
    }

    /// Final node of the path in progress.
    pub fn destination(&self) -> Option<NodeId> {
        if self.moving {
            self.path.last().copied()
        } else {
            None
        }
    }

    /// Node a new route toward `goal` should start from.
    ///
    /// Idle: the node the player stands on. Moving: the nearer end of the edge
    /// being crossed, or the other end when the nearer one is `goal` itself,
    /// so a click on either end still yields a walkable route.
    pub fn route_start(&self, goal: NodeId) -> NodeId {
        if !self.moving {
            return self.current_node;
        }
        let (near, far) = if self.progress <= 0.5 {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        if near == goal { far } else { near }
    }

    /// Replace whatever the player is doing with `path`.
    ///
    /// Single-node paths are ignored and `false` is returned. Otherwise the
    /// player snaps to the path's first node and begins its first edge at
    /// progress 0, discarding any progress on the edge it was crossing.
    pub fn set_path(&mut self, path: &Path, graph: &NodeGraph) -> bool {
        if path.len() < 2 {
            return false;
        }
        let nodes = path.nodes();
        if self.moving {
            debug!(
                "path interrupted on {}->{} at {:.2}, new route {:?}",
                self.from, self.to, self.progress, nodes
            );
        } else {
            debug!("new route {:?}", nodes);
        }

        self.path.clear();
        self.path.extend_from_slice(nodes);
        self.current_node = nodes[0];
        self.from = nodes[0];
        self.to = nodes[1];
        self.path_index = 1;
        self.progress = 0.0;
        self.position = graph.position(nodes[0]);
        self.moving = true;
        true
    }

    /// Advance along the current edge by `dt` seconds. No-op while idle.
    ///
    /// Time left over when an edge finishes is dropped; the next edge always
    /// starts at progress 0.
    pub fn update(&mut self, graph: &NodeGraph, dt: f32) {
        if !self.moving {
            return;
        }

        self.progress += dt / self.move_duration;
        if self.progress < 1.0 {
            self.position = graph
                .position(self.from)
                .lerp(graph.position(self.to), self.progress);
            return;
        }

        // Arrived at `to`.
        self.position = graph.position(self.to);
        self.current_node = self.to;
        self.path_index += 1;
        trace!("reached node {}", self.current_node);

        if self.path_index < self.path.len() {
            self.from = self.current_node;
            self.to = self.path[self.path_index];
            self.progress = 0.0;
        } else {
            debug!("arrived at node {}", self.current_node);
            self.progress = 1.0;
            self.moving = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    /// 0 --short-- 1 ----long---- 2, plus 3 off to the side of 0.
    fn line() -> NodeGraph {
        let mut g = NodeGraph::new();
        g.add_node(Vec3::ZERO);
        g.add_node(Vec3::new(1.0, 0.0, 0.0));
        g.add_node(Vec3::new(11.0, 0.0, 0.0));
        g.add_node(Vec3::new(0.0, 0.0, 4.0));
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 3).unwrap();
        g
    }

    fn path(nodes: &[NodeId]) -> Path {
        Path::new(nodes.to_vec()).unwrap()
    }

    #[test]
    fn starts_idle_on_spawn_node() {
        let g = line();
        let p = Player::new(&g, 1);
        assert!(!p.is_moving());
        assert_eq!(p.current_node(), 1);
        assert_eq!(p.position(), g.position(1));
        assert_eq!(p.active_edge(), None);
    }

    #[test]
    fn single_node_path_is_rejected() {
        let g = line();
        let mut p = Player::new(&g, 0);
        assert!(!p.set_path(&path(&[0]), &g));
        assert!(!p.is_moving());
    }

    #[test]
    fn every_edge_takes_move_duration() {
        let g = line();
        for (a, b) in [(0, 1), (1, 2)] {
            let mut p = Player::new(&g, a);
            assert!(p.set_path(&path(&[a, b]), &g));

            p.update(&g, MOVE_DURATION / 2.0);
            assert!((p.progress() - 0.5).abs() < EPS);
            let mid = (g.position(a) + g.position(b)) * 0.5;
            assert!(p.position().distance(mid) < 1e-4);
            assert!(p.is_moving());

            p.update(&g, MOVE_DURATION / 2.0);
            assert!(!p.is_moving());
            assert_eq!(p.current_node(), b);
            assert_eq!(p.position(), g.position(b));
        }
    }

    #[test]
    fn overshoot_is_not_carried_into_next_edge() {
        let g = line();
        let mut p = Player::new(&g, 0);
        p.set_path(&path(&[0, 1, 2]), &g);

        // Far more than one edge's worth of time.
        p.update(&g, MOVE_DURATION * 1.9);
        assert_eq!(p.current_node(), 1);
        assert_eq!(p.active_edge(), Some((1, 2)));
        assert_eq!(p.progress(), 0.0);
        assert_eq!(p.position(), g.position(1));

        p.update(&g, MOVE_DURATION * 0.25);
        assert!((p.progress() - 0.25).abs() < EPS);
        assert_eq!(p.destination(), Some(2));

        p.update(&g, MOVE_DURATION);
        assert!(!p.is_moving());
        assert_eq!(p.current_node(), 2);
        assert_eq!(p.destination(), None);
    }

    #[test]
    fn new_path_mid_edge_restarts_from_its_first_node() {
        let g = line();
        let mut p = Player::new(&g, 0);
        p.set_path(&path(&[0, 1, 2]), &g);
        p.update(&g, MOVE_DURATION / 2.0);
        assert!((p.progress() - 0.5).abs() < EPS);

        assert!(p.set_path(&path(&[0, 3]), &g));
        assert_eq!(p.progress(), 0.0);
        assert_eq!(p.active_edge(), Some((0, 3)));
        assert_eq!(p.position(), g.position(0));

        // Position is along the new edge only, never blended with the old one.
        p.update(&g, MOVE_DURATION / 4.0);
        let expected = g.position(0).lerp(g.position(3), 0.25);
        assert!(p.position().distance(expected) < 1e-4);
    }

    #[test]
    fn route_start_stays_on_current_edge() {
        let g = line();
        let mut p = Player::new(&g, 1);
        assert_eq!(p.route_start(2), 1);

        p.set_path(&path(&[0, 1, 2]), &g);
        p.update(&g, MOVE_DURATION * 0.25);
        assert_eq!(p.route_start(3), 0);
        // Nearer end is the goal: start from the far end instead.
        assert_eq!(p.route_start(0), 1);

        p.update(&g, MOVE_DURATION * 0.5);
        assert_eq!(p.route_start(3), 1);
        assert_eq!(p.route_start(1), 0);
    }

    #[test]
    fn idle_update_changes_nothing() {
        let g = line();
        let mut p = Player::new(&g, 2);
        let before = p.clone();
        for dt in [0.0, 0.016, 1.0, 250.0] {
            p.update(&g, dt);
        }
        assert_eq!(p.position(), before.position());
        assert_eq!(p.current_node(), before.current_node());
        assert_eq!(p.progress(), before.progress());
        assert!(!p.is_moving());
    }
}
