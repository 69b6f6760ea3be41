// Engine module - pathfinding and locomotion core for impossible-geometry levels
// Rendering, windowing and camera controls live outside; they talk to this
// core through `CameraState` in and `Transform` / `NodeGraph` out.

pub mod camera;
pub mod components;
pub mod graph;
pub mod input;
pub mod level;
pub mod locomotion;
pub mod pathfinding;
pub mod sim;
pub mod visibility;

// Re-export commonly used items
pub use camera::{CameraState, OrbitRig, Projection};
pub use components::Transform;
pub use graph::{GraphError, NodeGraph, NodeId};
pub use locomotion::Player;
pub use pathfinding::{Path, find_path, find_path_with};
pub use sim::{SimConfig, Simulation, TickOutcome};
pub use visibility::{EdgeOracle, ProjectionOracle, VisibilityConfig};
