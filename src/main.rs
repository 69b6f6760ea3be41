// Headless driver for the L level.
// Sweeps the camera around the level at a fixed timestep and clicks random
// nodes, logging which routes the current view allows. Run with
// RUST_LOG=debug to see every search.

use glam::Vec2;
use log::info;
use rand::Rng;

use penrose_walk::engine::level::build_l_level;
use penrose_walk::engine::visibility::active_edges;
use penrose_walk::engine::{OrbitRig, ProjectionOracle, SimConfig, Simulation, TickOutcome};

// ============================================================================
// CONSTANTS
// ============================================================================

const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);
/// Fixed simulation step (seconds).
const DT: f32 = 1.0 / 60.0;
/// Total simulated time (seconds).
const RUN_SECONDS: f32 = 30.0;
/// Camera yaw speed (radians per second).
const ORBIT_SPEED: f32 = 0.35;
/// Seconds between random clicks.
const CLICK_INTERVAL: f32 = 1.5;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let level = build_l_level()?;
    let (near, far) = level.illusion_edge;
    let mut rig = OrbitRig::new(level.graph.position(near), 20.0);
    // Start a little off the alignment angle so the sweep passes through it.
    rig.look_along(level.graph.position(far));
    rig.yaw -= 1.0;

    let mut sim = Simulation::new(level.graph, level.spawn, SimConfig::default());
    let mut rng = rand::thread_rng();

    let steps = (RUN_SECONDS / DT) as u32;
    let mut since_click = 0.0;
    let mut shortcut_open = false;
    let mut routed = 0u32;
    let mut blocked = 0u32;

    for step in 0..steps {
        rig.yaw += ORBIT_SPEED * DT;
        let camera = rig.state(VIEWPORT);

        let oracle = ProjectionOracle::new(&camera, sim.config.visibility);
        let open = lists_edge(&active_edges(sim.graph(), &oracle), (near, far));
        if open != shortcut_open {
            info!(
                "t={:.2}s shortcut {near}-{far} {}",
                step as f32 * DT,
                if open { "lined up" } else { "broken" }
            );
            shortcut_open = open;
        }

        since_click += DT;
        let pick = if since_click >= CLICK_INTERVAL {
            since_click = 0.0;
            let node = rng.gen_range(0..sim.graph().len());
            Some(camera.world_to_screen(sim.graph().position(node)))
        } else {
            None
        };

        match sim.tick(DT, &camera, pick) {
            TickOutcome::Routed(_) => routed += 1,
            TickOutcome::Unreachable(_) => blocked += 1,
            TickOutcome::Idle | TickOutcome::Missed => {}
        }
    }

    let player = sim.player();
    info!(
        "done: {routed} routes, {blocked} blocked clicks, player on node {} at {:?}",
        player.current_node(),
        sim.player_position()
    );
    Ok(())
}

fn lists_edge(active: &[(usize, usize)], edge: (usize, usize)) -> bool {
    let key = (edge.0.min(edge.1), edge.0.max(edge.1));
    active.contains(&key)
}
