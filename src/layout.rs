use std::time::Instant;

use glam::Vec3;
use thiserror::Error;

use crate::graph::{Graph, Node};

pub const ITERATIONS: usize = 300;
pub const REPULSION: f32 = 1000.0;
pub const SOFTENING: f32 = 0.1;
pub const ATTRACTION: f32 = 0.1;
pub const DAMPING: f32 = 0.9;

const TRACE_EVERY: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub iterations: usize,
    /// Inverse-square repulsion constant between every pair of nodes.
    pub repulsion: f32,
    /// Added to pair distances before repulsion so coincident nodes stay finite.
    pub softening: f32,
    /// Linear spring constant along edges.
    pub attraction: f32,
    /// Velocity multiplier applied once per iteration.
    pub damping: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            repulsion: REPULSION,
            softening: SOFTENING,
            attraction: ATTRACTION,
            damping: DAMPING,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutParamsError {
    #[error("layout needs at least one iteration")]
    NoIterations,
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("damping must lie strictly between 0 and 1, got {0}")]
    DampingOutOfRange(f32),
}

impl LayoutParams {
    pub fn validate(self) -> Result<Self, LayoutParamsError> {
        if self.iterations == 0 {
            return Err(LayoutParamsError::NoIterations);
        }

        for (name, value) in [
            ("repulsion", self.repulsion),
            ("softening", self.softening),
            ("attraction", self.attraction),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutParamsError::NotPositive { name, value });
            }
        }

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(LayoutParamsError::DampingOutOfRange(self.damping));
        }

        Ok(self)
    }
}

/// Summary of a finished relaxation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutReport {
    pub iterations: usize,
    /// Edge applications skipped because both ends sat on the same point.
    pub skipped_edges: usize,
    /// Sum of `|v|² / 2` over all nodes after the last iteration.
    pub kinetic_energy: f32,
    /// Nodes whose final position has a NaN or infinite coordinate.
    pub diverged_nodes: usize,
}

impl LayoutReport {
    /// The explicit integration blows up once the summed spring constant on one node passes
    /// `2 (1 + damping) / damping` (about 4.2 with the defaults, i.e. 43 or more edges).
    pub fn diverged(&self) -> bool {
        self.diverged_nodes > 0
    }
}

/// One-shot force-directed relaxation over a [`Graph`].
///
/// Every run performs exactly `iterations` steps of pairwise repulsion, edge
/// attraction and damped Euler integration. There is no convergence test.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForceLayout {
    params: LayoutParams,
}

impl ForceLayout {
    pub fn new(params: LayoutParams) -> Result<Self, LayoutParamsError> {
        Ok(Self {
            params: params.validate()?,
        })
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    pub fn run(&self, graph: &mut Graph) -> LayoutReport {
        let started = Instant::now();
        let mut report = LayoutReport::default();

        for iteration in 0..self.params.iterations {
            report.skipped_edges += self.step(graph);
            report.iterations += 1;

            if iteration % TRACE_EVERY == 0 {
                tracing::trace!(
                    iteration,
                    energy = kinetic_energy(graph.nodes()),
                    "relaxation step"
                );
            }
        }

        report.kinetic_energy = kinetic_energy(graph.nodes());
        report.diverged_nodes = graph
            .nodes()
            .iter()
            .filter(|node| !node.position.is_finite())
            .count();

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations = report.iterations,
            skipped_edges = report.skipped_edges,
            energy = report.kinetic_energy,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "layout finished"
        );

        if report.diverged() {
            tracing::warn!(
                diverged_nodes = report.diverged_nodes,
                max_degree = max_degree(graph),
                attraction = self.params.attraction,
                damping = self.params.damping,
                "layout diverged, spring stiffness on a hub node is past the stable limit"
            );
        }

        report
    }

    /// Runs a single relaxation iteration and returns how many edges were skipped.
    fn step(&self, graph: &mut Graph) -> usize {
        let LayoutParams {
            repulsion,
            softening,
            attraction,
            damping,
            ..
        } = self.params;

        for node in graph.nodes_mut().iter_mut() {
            node.force = Vec3::ZERO;
        }

        apply_repulsion(graph.nodes_mut(), repulsion, softening);
        let skipped = apply_attraction(graph, attraction);

        for node in graph.nodes_mut().iter_mut() {
            node.velocity = (node.velocity + node.force) * damping;
            node.position += node.velocity;
        }

        skipped
    }
}

/// O(n²) over all unordered pairs.
fn apply_repulsion(nodes: &mut [Node], repulsion: f32, softening: f32) {
    let node_count = nodes.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = nodes[i].position - nodes[j].position;
            let distance = delta.length() + softening;
            let push = delta / distance * (repulsion / (distance * distance));

            nodes[i].force += push;
            nodes[j].force -= push;
        }
    }
}

fn apply_attraction(graph: &mut Graph, attraction: f32) -> usize {
    let mut skipped = 0usize;

    for index in 0..graph.edge_count() {
        let edge = graph.edges()[index];
        let (source, target) = (edge.source.index(), edge.target.index());
        let nodes = graph.nodes_mut();

        let delta = nodes[target].position - nodes[source].position;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            skipped += 1;
            continue;
        }

        let pull = delta / distance * (attraction * distance);
        nodes[source].force += pull;
        nodes[target].force -= pull;
    }

    skipped
}

fn max_degree(graph: &Graph) -> usize {
    let mut degrees = vec![0usize; graph.node_count()];
    for edge in graph.edges() {
        degrees[edge.source.index()] += 1;
        degrees[edge.target.index()] += 1;
    }
    degrees.into_iter().max().unwrap_or(0)
}

fn kinetic_energy(nodes: &[Node]) -> f32 {
    nodes
        .iter()
        .map(|node| node.velocity.length_squared() * 0.5)
        .sum()
}
