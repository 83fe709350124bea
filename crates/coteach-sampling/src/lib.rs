//! # coteach-sampling
//!
//! The query sampler: masks already-observed queries out of a weight vector
//! and draws the next query, either uniformly among the maxima or in
//! proportion to the remaining mass.

pub mod sampler;

pub use sampler::{masked_distribution, QuerySampler};
