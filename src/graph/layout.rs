//! Seeded force-directed layout (Fruchterman-Reingold)

use super::display::{DisplayGraph, NodeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used unless the caller picks another one
pub const DEFAULT_SEED: u64 = 42;

/// Minimum distance between two nodes when computing forces
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    /// Stop early once the mean displacement falls below this
    pub threshold: f64,
    /// Largest absolute coordinate after rescaling
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: 50,
            threshold: 1e-4,
            scale: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2D coordinates indexed like [`DisplayGraph::nodes`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub positions: Vec<Point>,
}

impl Layout {
    pub fn position(&self, idx: NodeIndex) -> Option<Point> {
        self.positions.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Compute a spring embedding of `graph`
///
/// Initial positions are drawn uniformly from the unit square using
/// `config.seed`, then refined with attractive forces along edges and
/// repulsive forces between every pair, under a linearly cooling
/// temperature. The result is centered on the origin and scaled so the
/// largest absolute coordinate equals `config.scale`. Identical graphs and
/// seeds always produce identical coordinates.
pub fn spring_layout(graph: &DisplayGraph, config: &LayoutConfig) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout { positions: Vec::new() },
        1 => {
            return Layout {
                positions: vec![Point::new(0.0, 0.0)],
            }
        }
        _ => {}
    }

    let adjacency = graph.adjacency();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();

    // Optimal distance between nodes
    let k = (1.0 / n as f64).sqrt();

    let span = |axis: usize, pos: &[[f64; 2]]| {
        let (lo, hi) = pos
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p[axis]), hi.max(p[axis])));
        hi - lo
    };
    let mut temperature = span(0, &pos).max(span(1, &pos)) * 0.1;
    let cooling = temperature / (config.iterations as f64 + 1.0);

    for _ in 0..config.iterations {
        let mut deltas = vec![[0.0_f64; 2]; n];
        let mut total_sq = 0.0;

        for i in 0..n {
            let mut displacement = [0.0_f64; 2];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let attraction = if adjacency[i][j] { distance / k } else { 0.0 };
                let force = k * k / (distance * distance) - attraction;
                displacement[0] += dx * force;
                displacement[1] += dy * force;
            }

            let length = displacement[0].hypot(displacement[1]).max(MIN_DISTANCE);
            deltas[i] = [
                displacement[0] * temperature / length,
                displacement[1] * temperature / length,
            ];
            total_sq += deltas[i][0] * deltas[i][0] + deltas[i][1] * deltas[i][1];
        }

        for (p, d) in pos.iter_mut().zip(&deltas) {
            p[0] += d[0];
            p[1] += d[1];
        }
        temperature -= cooling;

        if total_sq.sqrt() / (n as f64) < config.threshold {
            break;
        }
    }

    Layout {
        positions: rescale(pos, config.scale),
    }
}

/// Center on the origin and fit into `[-scale, scale]`
fn rescale(mut pos: Vec<[f64; 2]>, scale: f64) -> Vec<Point> {
    let n = pos.len() as f64;
    for axis in 0..2 {
        let mean = pos.iter().map(|p| p[axis]).sum::<f64>() / n;
        for p in pos.iter_mut() {
            p[axis] -= mean;
        }
    }

    let limit = pos
        .iter()
        .flat_map(|p| [p[0].abs(), p[1].abs()])
        .fold(0.0_f64, f64::max);
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] *= scale / limit;
            p[1] *= scale / limit;
        }
    }

    pos.into_iter().map(|p| Point::new(p[0], p[1])).collect()
}
