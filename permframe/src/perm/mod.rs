mod accumulator;
mod borrowed; // Contains `Perm`
mod cycles;
mod errors;
mod owned; // Contains `PermBuf`

pub use accumulator::PermAccumulator;
pub use borrowed::{Perm, PointIter};
pub use cycles::CycleNotation;
pub use errors::InvalidPermError;
pub use owned::PermBuf;
