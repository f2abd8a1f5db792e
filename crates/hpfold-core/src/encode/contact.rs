use super::clause::ClauseFamily;
use super::vars::{VarAllocator, VarBlock};
use crate::model::{HpChain, Lattice};

/// Variable blocks introduced by the contact encoder.
#[derive(Debug, Clone, Copy)]
pub struct ContactVars {
    /// One variable per cell: the cell holds a hydrophobic residue.
    pub occupancy: VarBlock,
    /// Two variables per cell: a contact across the cell's right edge and one
    /// across its bottom edge (right block first, then down block). These are
    /// the leaves of the cardinality network.
    pub indicators: VarBlock,
}

impl ContactVars {
    fn occupied(&self, cell: u32) -> i32 {
        self.occupancy.lit(cell - 1)
    }

    /// Indicator for a contact between `cell` and its right neighbor.
    pub fn right_contact(&self, lattice: &Lattice, cell: u32) -> i32 {
        debug_assert!(cell <= lattice.cell_count());
        self.indicators.lit(cell - 1)
    }

    /// Indicator for a contact between `cell` and the cell below it.
    pub fn down_contact(&self, lattice: &Lattice, cell: u32) -> i32 {
        self.indicators.lit(lattice.cell_count() + cell - 1)
    }
}

/// Clauses defining cell occupancy and per-edge contact indicators.
///
/// The occupancy variable of a cell is equivalent to the disjunction of the
/// placement variables of the chain's hydrophobic positions on that cell
/// (one template over cells, stride 1). Each contact indicator is equivalent
/// to both edge endpoints being occupied; indicators whose neighbor falls off
/// the lattice are forced false by a unit clause instead.
pub fn contact_families(
    chain: &HpChain,
    lattice: &Lattice,
    placement: &VarBlock,
    vars: &mut VarAllocator,
) -> (Vec<ClauseFamily>, ContactVars) {
    let cells = lattice.cell_count();
    let contact = ContactVars {
        occupancy: vars.block(cells),
        indicators: vars.block(2 * cells),
    };

    // Occupancy equivalence, written for cell 1: every hydrophobic placement
    // on the cell implies occupancy, and occupancy implies one of them. The
    // stride-1 template walks both the occupancy block and the cell offsets of
    // the placement block in lockstep.
    let occupied_1 = contact.occupied(1);
    let mut occupancy_base = Vec::new();
    let mut converse = vec![-occupied_1];
    for p in chain.hydrophobic_positions() {
        let placed = placement.lit(p as u32 * cells);
        occupancy_base.push(vec![occupied_1, -placed]);
        converse.push(placed);
    }
    occupancy_base.push(converse);
    let occupancy = ClauseFamily::templated(occupancy_base, cells, 1);

    let mut indicator_clauses = Vec::new();
    for cell in 1..=cells {
        for (indicator, neighbor) in [
            (
                contact.right_contact(lattice, cell),
                lattice.right_neighbor(cell),
            ),
            (
                contact.down_contact(lattice, cell),
                lattice.down_neighbor(cell),
            ),
        ] {
            match neighbor {
                Some(neighbor) => {
                    let here = contact.occupied(cell);
                    let there = contact.occupied(neighbor);
                    indicator_clauses.push(vec![-indicator, here]);
                    indicator_clauses.push(vec![-indicator, there]);
                    indicator_clauses.push(vec![indicator, -here, -there]);
                }
                None => indicator_clauses.push(vec![-indicator]),
            }
        }
    }
    let indicators = ClauseFamily::flat(indicator_clauses);

    (vec![occupancy, indicators], contact)
}
