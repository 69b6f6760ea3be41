// Simulation context: owns the level graph and the player, advanced once per
// rendered frame by the environment.
//
// Per tick:
//   1. Resolve an optional pointer pick to a node under the current camera.
//   2. Search from the player's node (or an end of the edge it is crossing)
//      to the picked node, using only edges the camera makes look continuous
//      right now.
//   3. Hand an accepted route to the player (interrupting any walk).
//   4. Advance locomotion by dt and mirror the position into `Transform`.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use log::{debug, info};

use super::camera::CameraState;
use super::components::Transform;
use super::graph::{NodeGraph, NodeId};
use super::locomotion::{MOVE_DURATION, Player};
use super::pathfinding::{Path, find_path_with};
use super::visibility::{PICK_RADIUS, ProjectionOracle, VisibilityConfig, closest_clicked_node};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Seconds per edge.
    pub move_duration: f32,
    pub visibility: VisibilityConfig,
    /// Pixels.
    pub pick_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            move_duration: MOVE_DURATION,
            visibility: VisibilityConfig::default(),
            pick_radius: PICK_RADIUS,
        }
    }
}

/// What a tick's pick request led to.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No pick this tick, or the picked node is where an idle player stands.
    Idle,
    /// Pointer was not over any node.
    Missed,
    /// Picked node cannot be reached with the current view.
    Unreachable(NodeId),
    /// Player was sent along this route.
    Routed(Path),
}

pub struct Simulation {
    graph: NodeGraph,
    world: World,
    player: Entity,
    pub config: SimConfig,
}

impl Simulation {
    /// # Panics
    /// If `spawn` is not a node of `graph`.
    pub fn new(graph: NodeGraph, spawn: NodeId, config: SimConfig) -> Self {
        let player = Player::with_duration(&graph, spawn, config.move_duration);
        let transform = Transform::from_position(player.position());
        let mut world = World::new();
        let player = world.spawn((player, transform)).id();
        info!("simulation ready: {} nodes, player on node {spawn}", graph.len());
        Self {
            graph,
            world,
            player,
            config,
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// # Panics
    /// If the player entity lost its `Player` component. The simulation
    /// never removes it.
    pub fn player(&self) -> &Player {
        self.world
            .get::<Player>(self.player)
            .expect("player entity is never despawned")
    }

    /// # Panics
    /// If the player entity lost its `Transform` component. The simulation
    /// never removes it.
    pub fn player_position(&self) -> Vec3 {
        self.world
            .get::<Transform>(self.player)
            .map(|t| t.position)
            .expect("player entity is never despawned")
    }

    pub fn tick(&mut self, dt: f32, camera: &CameraState, pick: Option<Vec2>) -> TickOutcome {
        let outcome = match pick {
            Some(pointer) => self.handle_pick(camera, pointer),
            None => TickOutcome::Idle,
        };

        let mut query = self.world.query::<(&mut Player, &mut Transform)>();
        for (mut player, mut transform) in query.iter_mut(&mut self.world) {
            player.update(&self.graph, dt);
            transform.position = player.position();
        }

        outcome
    }

    fn handle_pick(&mut self, camera: &CameraState, pointer: Vec2) -> TickOutcome {
        let Some(goal) =
            closest_clicked_node(&self.graph, camera, pointer, self.config.pick_radius)
        else {
            debug!("pick at {pointer:?} hit no node");
            return TickOutcome::Missed;
        };

        let start = self.player().route_start(goal);

        let oracle = ProjectionOracle::new(camera, self.config.visibility);
        let Some(path) = find_path_with(&self.graph, start, goal, &oracle) else {
            info!("node {goal} unreachable from {start} with this view");
            return TickOutcome::Unreachable(goal);
        };

        let Some(mut player) = self.world.get_mut::<Player>(self.player) else {
            return TickOutcome::Idle;
        };
        if player.set_path(&path, &self.graph) {
            info!("walking {:?}", path.nodes());
            TickOutcome::Routed(path)
        } else {
            TickOutcome::Idle
        }
    }
}
