//! Gate placement from the topology graph.
//!
//! Gates are a projection of the graph: one per edge touching the sector,
//! pointing at that edge's other end. A gate sits at a fixed distance near
//! the sector boundary, in the direction of its destination on the galaxy
//! grid. When either grid position is unknown (or both sectors share a grid
//! cell) the gate falls back to even angular spacing by edge index. This
//! stage draws no randomness.

use std::f64::consts::TAU;

use crate::components::Vec2;
use crate::context::WorldContext;
use crate::factory::GateOptions;
use crate::topology::{GridCoord, SectorInfo};

use super::names::gate_name;
use super::SectorLayout;

/// Stage 3: one gate per topology edge touching this sector.
pub fn place_gates(info: &SectorInfo, ctx: &WorldContext, layout: &mut SectorLayout) {
    if ctx.topology.sector(&info.id).is_none() {
        log::warn!("sector {}: not present in topology, no gates placed", info.id);
        return;
    }
    let connections = ctx.topology.connections(&info.id);
    let loops = ctx.topology.self_loops(&info.id);
    if loops > 0 {
        log::warn!("sector {}: ignoring {} self-loop gate edge(s)", info.id, loops);
    }

    let count = connections.len();
    for (index, conn) in connections.iter().enumerate() {
        let destination_grid = conn.info.and_then(|d| d.grid);
        let angle = gate_angle(info.grid, destination_grid, index, count);

        let destination_name = match conn.info {
            Some(dest) => dest.display_name().to_string(),
            None => {
                log::warn!(
                    "sector {}: gate edge to unknown sector {}",
                    info.id,
                    conn.destination
                );
                conn.destination.to_string()
            }
        };

        layout.entities.push(ctx.factory().gate(GateOptions {
            name: gate_name(&destination_name, conn.wormhole),
            position: Vec2::from_polar(angle, ctx.generator.gate_distance),
            destination: conn.destination.clone(),
            destination_name,
            wormhole: conn.wormhole,
        }));
    }
}

/// Direction of the destination on the grid, or `index`'s slot of `count`
/// evenly spaced angles when that direction is unknown.
pub fn gate_angle(
    from: Option<GridCoord>,
    to: Option<GridCoord>,
    index: usize,
    count: usize,
) -> f64 {
    if let (Some(from), Some(to)) = (from, to) {
        let dx = (to.x - from.x) as f64;
        let dy = (to.y - from.y) as f64;
        if dx != 0.0 || dy != 0.0 {
            return dy.atan2(dx);
        }
    }
    index as f64 * TAU / count.max(1) as f64
}
