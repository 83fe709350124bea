//! Dense, explicitly-shaped probability tensors.
//!
//! Broadcasting is never implicit: every expansion of a lower-rank array into
//! a higher-rank one goes through a named constructor on [`Tensor3`].

mod matrix;
mod tensor3;

pub use matrix::Matrix;
pub use tensor3::{Dims3, Tensor3};
