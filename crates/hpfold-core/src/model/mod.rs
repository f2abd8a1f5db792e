pub mod chain;
pub mod lattice;

pub use chain::{ChainError, HpChain};
pub use lattice::Lattice;
