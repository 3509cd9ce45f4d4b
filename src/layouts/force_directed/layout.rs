use std::collections::HashMap;

use egui::{Pos2, Rect, Vec2};
use petgraph::{
    stable_graph::NodeIndex,
    visit::{EdgeRef, IntoEdgeReferences},
};
use serde::{Deserialize, Serialize};

use crate::{layouts::clamp_into, GraphModel};

/// Tunables of the spring-electrical relaxation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceDirectedState {
    /// Iterations of one relaxation pass when the caller does not say otherwise
    pub iterations: usize,
    /// Lower bound for distances, avoids division by zero for coincident nodes
    pub epsilon: f32,
    /// Coulomb constant of the pairwise inverse-square repulsion
    pub k_repulse: f32,
    /// Hooke stiffness of the attraction along relations
    pub k_attract: f32,
    /// Net force to displacement factor
    pub step_scale: f32,
    /// Per-axis cap of a single node move
    pub max_move: f32,
}

impl Default for ForceDirectedState {
    fn default() -> Self {
        Self {
            iterations: 50,
            epsilon: 0.1,
            k_repulse: 1000.,
            k_attract: 0.1,
            step_scale: 0.1,
            max_move: 10.,
        }
    }
}

/// Force-directed relaxation of a [`GraphModel`].
///
/// Every iteration takes a snapshot of all locations, accumulates repulsion between every pair
/// and attraction along every relation into per-node displacements, and only then moves the
/// nodes. Results therefore do not depend on node order.
#[derive(Debug, Default)]
pub struct ForceDirected {
    state: ForceDirectedState,
    // Reused between iterations
    scratch_loc: Vec<Pos2>,
    scratch_disp: Vec<Vec2>,
}

impl ForceDirected {
    pub fn from_state(state: ForceDirectedState) -> Self {
        Self {
            state,
            scratch_loc: Vec::new(),
            scratch_disp: Vec::new(),
        }
    }

    pub fn state(&self) -> &ForceDirectedState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ForceDirectedState {
        &mut self.state
    }

    /// Runs `iterations` steps keeping node centers `margin` away from the canvas edges.
    pub fn run(&mut self, g: &mut GraphModel, canvas: Rect, margin: f32, iterations: usize) {
        if g.is_empty() {
            return;
        }
        let indices = g.node_indices();
        let slots: HashMap<NodeIndex, usize> =
            indices.iter().enumerate().map(|(i, idx)| (*idx, i)).collect();
        let bounds = canvas.shrink(margin);

        for _ in 0..iterations {
            self.step_with(g, &indices, &slots, bounds);
        }
    }

    /// One iteration.
    pub fn step(&mut self, g: &mut GraphModel, canvas: Rect, margin: f32) {
        self.run(g, canvas, margin, 1);
    }

    fn step_with(
        &mut self,
        g: &mut GraphModel,
        indices: &[NodeIndex],
        slots: &HashMap<NodeIndex, usize>,
        bounds: Rect,
    ) {
        self.scratch_loc.clear();
        self.scratch_loc
            .extend(indices.iter().filter_map(|idx| g.location_at(*idx)));
        if self.scratch_disp.len() == indices.len() {
            self.scratch_disp.fill(Vec2::ZERO);
        } else {
            self.scratch_disp.resize(indices.len(), Vec2::ZERO);
            self.scratch_disp.fill(Vec2::ZERO);
        }

        let params = &self.state;
        compute_repulsion(
            &self.scratch_loc,
            &mut self.scratch_disp,
            params.epsilon,
            params.k_repulse,
        );
        compute_attraction(
            g,
            slots,
            &self.scratch_loc,
            &mut self.scratch_disp,
            params.epsilon,
            params.k_attract,
        );
        apply_displacements(
            g,
            indices,
            &self.scratch_loc,
            &self.scratch_disp,
            params.step_scale,
            params.max_move,
            bounds,
        );
    }
}

/// Inverse-square repulsion between every pair.
pub(crate) fn compute_repulsion(locs: &[Pos2], disp: &mut [Vec2], epsilon: f32, k_repulse: f32) {
    for i in 0..locs.len() {
        for j in (i + 1)..locs.len() {
            let delta = locs[i] - locs[j];
            let length = delta.length();
            let distance = length.max(epsilon);
            // coincident nodes get a fixed per-pair direction so they can separate
            let dir = if length < epsilon {
                Vec2::angled((i * 31 + j * 17) as f32)
            } else {
                delta / length
            };
            let force = k_repulse / (distance * distance);
            disp[i] += dir * force;
            disp[j] -= dir * force;
        }
    }
}

/// Hookean attraction along every relation, applied to both endpoints.
pub(crate) fn compute_attraction(
    g: &GraphModel,
    slots: &HashMap<NodeIndex, usize>,
    locs: &[Pos2],
    disp: &mut [Vec2],
    epsilon: f32,
    k_attract: f32,
) {
    for e in g.g().edge_references() {
        let (Some(&a), Some(&b)) = (slots.get(&e.source()), slots.get(&e.target())) else {
            continue;
        };
        let delta = locs[b] - locs[a];
        let distance = delta.length().max(epsilon);
        let force = k_attract * distance;
        let pull = delta / distance * force;
        disp[a] += pull;
        disp[b] -= pull;
    }
}

pub(crate) fn apply_displacements(
    g: &mut GraphModel,
    indices: &[NodeIndex],
    locs: &[Pos2],
    disp: &[Vec2],
    step_scale: f32,
    max_move: f32,
    bounds: Rect,
) {
    for (i, &idx) in indices.iter().enumerate() {
        let step = disp[i] * step_scale;
        let step = Vec2::new(
            step.x.max(-max_move).min(max_move),
            step.y.max(-max_move).min(max_move),
        );
        let new_loc = locs[i] + step;
        if !new_loc.x.is_finite() || !new_loc.y.is_finite() {
            continue;
        }
        g.set_location_at(idx, clamp_into(bounds, new_loc));
    }
}
