//! Idiomatic Rust representations of permutations and the finite groups they form.

#![deny(clippy::all)]

mod degree;
pub mod extent;
pub mod group;
pub mod matrix;
pub mod perm;
mod point;
mod symmetric;
mod utils;

// Re-export useful data types into the top level of the crate
pub use degree::{Degree, IncompatibleDegrees, ZeroDegreeError};
pub use extent::Extent;
pub use group::{Described, Group, GroupSet};
pub use matrix::{Gf2MatrixGroup, Matrix2, ParseMatrixError};
pub use perm::{CycleNotation, InvalidPermError, Perm, PermAccumulator, PermBuf};
pub use point::{index_to_char, letter_to_index, Point, NUM_LETTERS};
pub use symmetric::SymmetricGroup;
