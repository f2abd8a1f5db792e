use crate::model::{HpChain, Lattice};
use crate::search::{self, ProgressReporter, SearchError, SearchStats};
use crate::solver::Oracle;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Summary of a completed contact-maximization run for one chain.
#[derive(Debug, Clone, Serialize)]
pub struct MaximizeOutcome {
    pub sequence: String,
    pub lattice_width: u32,
    pub max_contacts: u32,
    pub oracle_calls: u32,
    pub oracle_time: Duration,
}

impl MaximizeOutcome {
    fn new(chain: &HpChain, lattice: &Lattice, max_contacts: u32, stats: SearchStats) -> Self {
        Self {
            sequence: chain.to_string(),
            lattice_width: lattice.width(),
            max_contacts,
            oracle_calls: stats.oracle_calls,
            oracle_time: stats.oracle_time,
        }
    }
}

/// Maximizes the contact count for one chain: sizes the lattice from the
/// chain, runs the threshold search against the given oracle, and summarizes
/// the result. The CNF for each candidate threshold is (re)written to
/// `cnf_path`.
pub fn run(
    chain: &HpChain,
    oracle: &mut dyn Oracle,
    cnf_path: &Path,
    reporter: &ProgressReporter,
) -> Result<MaximizeOutcome, SearchError> {
    let lattice = Lattice::new(chain.lattice_width());
    let result = search::maximize_contacts(chain, &lattice, oracle, cnf_path, reporter)?;
    Ok(MaximizeOutcome::new(
        chain,
        &lattice,
        result.max_contacts,
        result.stats,
    ))
}
