//! Three-node causal graphs under single-node interventions.
//!
//! Intervening on a node clamps it to 1 and cuts its incoming edges. Every
//! other node turns on through a noisy-OR of its active parents
//! (`transmission_rate` each) and a `background_rate` leak. The outcome of an
//! intervention is the joint state of all three nodes, encoded as
//! `4·x0 + 2·x1 + x2`.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use coteach_core::errors::{CoteachError, CoteachResult};
use coteach_core::models::Evaluation;
use coteach_core::traits::IHypothesisSpace;

pub const N_NODES: usize = 3;
pub const N_OBSERVATIONS: usize = 1 << N_NODES;

/// Canonical structure of a 3-node graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    CommonCause,
    CommonEffect,
    Chain,
}

/// A directed acyclic graph over nodes `0..3`.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    name: String,
    kind: GraphKind,
    graph: DiGraph<usize, ()>,
}

impl CausalGraph {
    /// Build a graph from directed edges. Cyclic edge sets are rejected.
    pub fn new(kind: GraphKind, edges: &[(usize, usize)]) -> CoteachResult<Self> {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..N_NODES).map(|i| graph.add_node(i)).collect();
        for &(from, to) in edges {
            if from >= N_NODES || to >= N_NODES || from == to {
                return Err(CoteachError::malformed(format!("invalid edge {from}->{to}")));
            }
            graph.add_edge(nodes[from], nodes[to], ());
        }
        if toposort(&graph, None).is_err() {
            return Err(CoteachError::malformed("causal graph has a cycle"));
        }
        let name = edges
            .iter()
            .map(|(a, b)| format!("{a}->{b}"))
            .collect::<Vec<_>>()
            .join(",");
        Ok(Self { name, kind, graph })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    fn parents(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(node), Direction::Incoming)
            .map(|n| self.graph[n])
    }

    /// Distribution over the 8 joint observations after clamping `action` to 1.
    pub fn intervention_likelihood(
        &self,
        action: usize,
        transmission_rate: f64,
        background_rate: f64,
    ) -> Vec<f64> {
        (0..N_OBSERVATIONS)
            .map(|obs| {
                let state = |node: usize| (obs >> (N_NODES - 1 - node)) & 1 == 1;
                if !state(action) {
                    return 0.0;
                }
                (0..N_NODES)
                    .filter(|&node| node != action)
                    .map(|node| {
                        let active_parents =
                            self.parents(node).filter(|&p| state(p)).count() as i32;
                        let p_on = 1.0
                            - (1.0 - background_rate)
                                * (1.0 - transmission_rate).powi(active_parents);
                        if state(node) {
                            p_on
                        } else {
                            1.0 - p_on
                        }
                    })
                    .product()
            })
            .collect()
    }
}

/// Causal graphs as hypotheses; queries are single-node interventions and
/// outcomes are joint observations.
#[derive(Debug, Clone)]
pub struct CausalGraphSpace {
    graphs: Vec<CausalGraph>,
    transmission_rate: f64,
    background_rate: f64,
    // [hypothesis][action][observation]
    table: Vec<Vec<Vec<f64>>>,
}

impl CausalGraphSpace {
    pub fn new(
        graphs: Vec<CausalGraph>,
        transmission_rate: f64,
        background_rate: f64,
    ) -> CoteachResult<Self> {
        if graphs.is_empty() {
            return Err(CoteachError::malformed("no causal graphs"));
        }
        for (name, rate) in [
            ("transmission", transmission_rate),
            ("background", background_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CoteachError::malformed(format!(
                    "{name} rate {rate} is not a probability"
                )));
            }
        }
        let table = graphs
            .iter()
            .map(|g| {
                (0..N_NODES)
                    .map(|a| g.intervention_likelihood(a, transmission_rate, background_rate))
                    .collect()
            })
            .collect();
        Ok(Self {
            graphs,
            transmission_rate,
            background_rate,
            table,
        })
    }

    pub fn graphs(&self) -> &[CausalGraph] {
        &self.graphs
    }

    pub fn transmission_rate(&self) -> f64 {
        self.transmission_rate
    }

    pub fn background_rate(&self) -> f64 {
        self.background_rate
    }
}

impl IHypothesisSpace for CausalGraphSpace {
    fn n_hypotheses(&self) -> usize {
        self.graphs.len()
    }

    fn n_queries(&self) -> usize {
        N_NODES
    }

    fn n_outcomes(&self) -> usize {
        N_OBSERVATIONS
    }

    fn label(&self, hypothesis: usize) -> String {
        self.graphs[hypothesis].name.clone()
    }

    fn evaluate(&self, hypothesis: usize, query: usize) -> Evaluation {
        Evaluation::Distribution(self.table[hypothesis][query].clone())
    }
}

/// Common cause `0→1, 0→2`, common effect `1→0, 2→0`, chain `0→1→2`.
///
/// # Panics
/// Panics if either rate lies outside `[0, 1]`.
pub fn canonical_graph_space(transmission_rate: f64, background_rate: f64) -> CausalGraphSpace {
    let graphs = vec![
        graph(GraphKind::CommonCause, &[(0, 1), (0, 2)]),
        graph(GraphKind::CommonEffect, &[(1, 0), (2, 0)]),
        graph(GraphKind::Chain, &[(0, 1), (1, 2)]),
    ];
    CausalGraphSpace::new(graphs, transmission_rate, background_rate)
        .expect("canonical graph rates must be probabilities")
}

/// Every labelled 3-node common cause (3), common effect (3) and chain (6).
///
/// # Panics
/// Panics if either rate lies outside `[0, 1]`.
pub fn all_graph_space(transmission_rate: f64, background_rate: f64) -> CausalGraphSpace {
    let mut graphs = Vec::with_capacity(12);
    for root in 0..N_NODES {
        let (a, b) = others(root);
        graphs.push(graph(GraphKind::CommonCause, &[(root, a), (root, b)]));
    }
    for sink in 0..N_NODES {
        let (a, b) = others(sink);
        graphs.push(graph(GraphKind::CommonEffect, &[(a, sink), (b, sink)]));
    }
    for middle in 0..N_NODES {
        let (a, b) = others(middle);
        graphs.push(graph(GraphKind::Chain, &[(a, middle), (middle, b)]));
        graphs.push(graph(GraphKind::Chain, &[(b, middle), (middle, a)]));
    }
    CausalGraphSpace::new(graphs, transmission_rate, background_rate)
        .expect("graph rates must be probabilities")
}

fn others(node: usize) -> (usize, usize) {
    let mut rest = (0..N_NODES).filter(|&n| n != node);
    (
        rest.next().unwrap_or_default(),
        rest.next().unwrap_or_default(),
    )
}

fn graph(kind: GraphKind, edges: &[(usize, usize)]) -> CausalGraph {
    CausalGraph::new(kind, edges).expect("fixture graphs are acyclic")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervention_rows_sum_to_one() {
        let space = all_graph_space(0.9, 0.05);
        assert_eq!(space.n_hypotheses(), 12);
        for h in 0..space.n_hypotheses() {
            for a in 0..N_NODES {
                let Evaluation::Distribution(row) = space.evaluate(h, a) else {
                    panic!("graphs are probabilistic");
                };
                assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn intervened_node_is_always_on() {
        let cc = graph(GraphKind::CommonCause, &[(0, 1), (0, 2)]);
        let row = cc.intervention_likelihood(1, 0.9, 0.05);
        // Observations with x1 = 0: 000, 001, 100, 101.
        for obs in [0b000, 0b001, 0b100, 0b101] {
            assert_eq!(row[obs], 0.0);
        }
    }

    #[test]
    fn common_cause_root_intervention_propagates() {
        let cc = graph(GraphKind::CommonCause, &[(0, 1), (0, 2)]);
        let row = cc.intervention_likelihood(0, 0.9, 0.05);
        let p_on = 1.0 - 0.95 * 0.1;
        assert!((row[0b111] - p_on * p_on).abs() < 1e-12);
    }

    #[test]
    fn cycles_rejected() {
        assert!(CausalGraph::new(GraphKind::Chain, &[(0, 1), (1, 2), (2, 0)]).is_err());
    }

    #[test]
    fn bad_rates_rejected() {
        let g = graph(GraphKind::Chain, &[(0, 1), (1, 2)]);
        assert!(CausalGraphSpace::new(vec![g], 1.5, 0.0).is_err());
    }
}
