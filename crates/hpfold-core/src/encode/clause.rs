/// A disjunction of non-zero signed literals: positive `v` asserts variable
/// `v`, negative `v` asserts its negation.
pub type Clause = Vec<i32>;

/// A set of base clauses meant to be instantiated `repeats` times with a fixed
/// variable-number shift between instantiations.
///
/// Symmetric constraint families (one instance per chain position, per lattice
/// cell, per counting-tree node) are stored once and expanded lazily:
/// instantiation `i` replaces every literal `l` of every base clause with
/// `sign(l) · (|l| + i · stride)`. A flat family (`repeats == 1`) is emitted
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseFamily {
    base: Vec<Clause>,
    repeats: u32,
    stride: u32,
}

impl ClauseFamily {
    pub fn flat(base: Vec<Clause>) -> Self {
        Self {
            base,
            repeats: 1,
            stride: 0,
        }
    }

    pub fn templated(base: Vec<Clause>, repeats: u32, stride: u32) -> Self {
        Self {
            base,
            repeats,
            stride,
        }
    }

    pub fn base_clauses(&self) -> &[Clause] {
        &self.base
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Number of clauses this family contributes to the formula. The DIMACS
    /// header relies on this equalling the length of [`Self::expand`].
    pub fn clause_count(&self) -> u64 {
        self.repeats as u64 * self.base.len() as u64
    }

    /// All instantiations, in instantiation-major order.
    pub fn expand(&self) -> impl Iterator<Item = Clause> + '_ {
        (0..self.repeats).flat_map(move |i| {
            let shift = i * self.stride;
            self.base.iter().map(move |clause| {
                clause
                    .iter()
                    .map(|&lit| {
                        debug_assert!(lit != 0);
                        if lit > 0 {
                            lit + shift as i32
                        } else {
                            lit - shift as i32
                        }
                    })
                    .collect()
            })
        })
    }

    /// Largest variable number referenced by any instantiation.
    pub fn max_var(&self) -> u32 {
        let base_max = self
            .base
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs())
            .max()
            .unwrap_or(0);
        if self.base.is_empty() || self.repeats == 0 {
            0
        } else {
            base_max + (self.repeats - 1) * self.stride
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_family_expands_to_its_base() {
        let family = ClauseFamily::flat(vec![vec![1, -2], vec![3]]);
        let expanded: Vec<Clause> = family.expand().collect();
        assert_eq!(expanded, vec![vec![1, -2], vec![3]]);
        assert_eq!(family.clause_count(), 2);
    }

    #[test]
    fn templated_family_shifts_magnitudes_and_preserves_signs() {
        let family = ClauseFamily::templated(vec![vec![1, -2]], 3, 10);
        let expanded: Vec<Clause> = family.expand().collect();
        assert_eq!(expanded, vec![vec![1, -2], vec![11, -12], vec![21, -22]]);
    }

    #[test]
    fn clause_count_matches_expansion_length() {
        let family = ClauseFamily::templated(vec![vec![1], vec![-1, 2]], 5, 2);
        assert_eq!(family.clause_count(), family.expand().count() as u64);
    }

    #[test]
    fn zero_repeats_contribute_nothing() {
        let family = ClauseFamily::templated(vec![vec![1, 2]], 0, 4);
        assert_eq!(family.clause_count(), 0);
        assert_eq!(family.expand().count(), 0);
        assert_eq!(family.max_var(), 0);
    }

    #[test]
    fn max_var_accounts_for_the_last_instantiation() {
        let family = ClauseFamily::templated(vec![vec![2, -7]], 4, 9);
        assert_eq!(family.max_var(), 7 + 3 * 9);
    }
}
