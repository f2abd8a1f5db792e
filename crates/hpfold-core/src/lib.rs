//! # hpfold Core Library
//!
//! A library for maximizing the number of hydrophobic contacts of a binary-labeled
//! chain (the 2D HP lattice protein model) by reduction to Boolean satisfiability:
//! for a candidate contact count k it builds a CNF formula that is satisfiable iff
//! some self-avoiding folding of the chain onto a square lattice achieves at least
//! k contacts, hands the formula to an external SAT solver, and searches over k for
//! the largest satisfiable value.
//!
//! ## Architectural Philosophy
//!
//! The library is split into layers with a clear separation of concerns:
//!
//! - **[`model`]: The Domain.** Validated input data (`HpChain`) and the square
//!   lattice geometry (`Lattice`) the chain is folded onto.
//!
//! - **[`encode`]: The Encoding Engine.** Pure clause generators (embedding,
//!   contact, cardinality counting) over an explicit variable allocator, plus the
//!   clause-family value type that keeps templated constraint sets compact.
//!
//! - **[`io`]: Serialization.** Writes assembled formulas in the DIMACS CNF
//!   format consumed by SAT solvers.
//!
//! - **[`solver`]: The Oracle.** The `Oracle` trait and its production
//!   implementation, which runs an external solver process and interprets its
//!   exit status.
//!
//! - **[`search`]: The Driver.** The doubling-then-bisection threshold search
//!   with memoization, reporting progress through a callback.
//!
//! - **[`workflows`]: The Public API.** Ties everything together to answer the
//!   question for one chain. This is the entry point for end-users of the
//!   library.

pub mod encode;
pub mod io;
pub mod model;
pub mod search;
pub mod solver;
pub mod workflows;
