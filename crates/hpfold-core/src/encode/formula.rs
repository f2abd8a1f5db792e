use super::clause::{Clause, ClauseFamily};
use super::contact::contact_families;
use super::counting::counting_families;
use super::embedding::embedding_families;
use super::vars::VarAllocator;
use crate::model::{HpChain, Lattice};

/// An assembled CNF formula: clause families in emission order plus the
/// variable count for the DIMACS header.
#[derive(Debug, Clone)]
pub struct CnfFormula {
    families: Vec<ClauseFamily>,
    num_vars: u32,
}

impl CnfFormula {
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn clause_count(&self) -> u64 {
        self.families.iter().map(ClauseFamily::clause_count).sum()
    }

    pub fn families(&self) -> &[ClauseFamily] {
        &self.families
    }

    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.families.iter().flat_map(ClauseFamily::expand)
    }
}

/// Builds the decision formula "some self-avoiding folding of `chain` onto
/// `lattice` achieves at least `k` genuine contacts".
///
/// A folding with `k` genuine contacts makes `adjacent + k` of the `2·w²`
/// contact indicators true (chain-adjacent hydrophobic pairs always touch), so
/// the counting network bounds the *false* indicators by
/// `r = 2·w² − adjacent − k`. A `k` beyond that budget cannot be folded at
/// all; the formula then carries the empty clause and is trivially
/// unsatisfiable, keeping the search driver's arithmetic uniform.
pub fn build_formula(chain: &HpChain, lattice: &Lattice, k: u32) -> CnfFormula {
    let mut vars = VarAllocator::new();

    let (embedding, placement) = embedding_families(chain.len() as u32, lattice, &mut vars);
    let (contact, contact_vars) = contact_families(chain, lattice, &placement, &mut vars);

    let mut families = embedding;
    families.extend(contact);

    let budget = 2 * lattice.cell_count();
    match budget.checked_sub(chain.adjacent_hydrophobic_pairs() + k) {
        Some(r) => {
            families.extend(counting_families(r, &contact_vars.indicators, &mut vars));
        }
        None => families.push(ClauseFamily::flat(vec![Clause::new()])),
    }

    CnfFormula {
        families,
        num_vars: vars.allocated(),
    }
}
