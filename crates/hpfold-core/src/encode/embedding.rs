use super::clause::{Clause, ClauseFamily};
use super::vars::{VarAllocator, VarBlock};
use crate::model::Lattice;

/// Clauses forcing the chain-to-lattice mapping to be a total, injective
/// placement with lattice adjacency between chain-consecutive positions.
///
/// Allocates the placement block: one variable per (chain position, cell)
/// pair, numbered `(i-1)·w² + j` within the block for position `i` and cell
/// `j` (both 1-based). Returns four clause families — totality, per-position
/// uniqueness, per-cell injectivity, and chain adjacency — each expressed as
/// one template over its symmetry.
///
/// Precondition: `lattice.cell_count() >= chain_len`. Sizing is the caller's
/// responsibility (see `HpChain::lattice_width`).
pub fn embedding_families(
    chain_len: u32,
    lattice: &Lattice,
    vars: &mut VarAllocator,
) -> (Vec<ClauseFamily>, VarBlock) {
    let n = chain_len;
    let cells = lattice.cell_count();
    let placement = vars.block(n * cells);

    // Position i, cell j, both 1-based.
    let x = |i: u32, j: u32| placement.lit((i - 1) * cells + (j - 1));

    // Every position is placed on some cell.
    let totality_base: Clause = (1..=cells).map(|j| x(1, j)).collect();
    let totality = ClauseFamily::templated(vec![totality_base], n, cells);

    // No position is placed on two cells.
    let mut uniqueness_base = Vec::new();
    for a in 1..=cells {
        for b in (a + 1)..=cells {
            uniqueness_base.push(vec![-x(1, a), -x(1, b)]);
        }
    }
    let uniqueness = ClauseFamily::templated(uniqueness_base, n, cells);

    // No cell holds two positions. The base ranges over positions at cell 1
    // and is replicated across cells with stride 1.
    let mut injectivity_base = Vec::new();
    for i in 1..=n {
        for i2 in (i + 1)..=n {
            injectivity_base.push(vec![-x(i, 1), -x(i2, 1)]);
        }
    }
    let injectivity = ClauseFamily::templated(injectivity_base, cells, 1);

    // Consecutive positions sit on lattice-adjacent cells: one clause per cell
    // for the first chain step, replicated across the remaining n-1 steps.
    let mut adjacency_base = Vec::new();
    for j in 1..=cells {
        let mut clause = vec![-x(1, j)];
        for neighbor in lattice.neighbors(j) {
            clause.push(x(2, neighbor));
        }
        adjacency_base.push(clause);
    }
    let adjacency = ClauseFamily::templated(adjacency_base, n.saturating_sub(1), cells);

    (
        vec![totality, uniqueness, injectivity, adjacency],
        placement,
    )
}
