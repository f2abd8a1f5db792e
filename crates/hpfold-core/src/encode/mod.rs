pub mod clause;
pub mod contact;
pub mod counting;
pub mod embedding;
pub mod formula;
pub mod vars;

pub use clause::{Clause, ClauseFamily};
pub use formula::{CnfFormula, build_formula};
pub use vars::{VarAllocator, VarBlock};
