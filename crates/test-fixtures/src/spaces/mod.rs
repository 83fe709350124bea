//! Hypothesis-space generators.

mod causal_graph;
mod concepts;

pub use causal_graph::{
    all_graph_space, canonical_graph_space, CausalGraph, CausalGraphSpace, GraphKind, N_NODES,
    N_OBSERVATIONS,
};
pub use concepts::{boundary_space, line_space};
