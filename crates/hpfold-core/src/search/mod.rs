pub mod progress;

pub use progress::{Progress, ProgressCallback, ProgressReporter};

use crate::encode::build_formula;
use crate::io::dimacs;
use crate::model::{HpChain, Lattice};
use crate::solver::{Oracle, OracleError, Verdict};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to write CNF file '{path}': {source}", path = path.display())]
    CnfWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Accumulated cost of the oracle calls issued by one search run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    pub oracle_calls: u32,
    pub oracle_time: Duration,
}

/// Result of one search run: the largest threshold the oracle certified, the
/// verdicts recorded along the way, and the accumulated oracle cost.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Maximum number of genuine contacts any folding achieves; 0 when even a
    /// single contact is unsatisfiable.
    pub max_contacts: u32,
    pub tried: HashMap<u32, Verdict>,
    pub stats: SearchStats,
}

/// Finds the maximum satisfiable contact threshold for `chain` on `lattice`.
///
/// Doubles the candidate from k = 1 until the first unsatisfiable verdict,
/// then bisects the open interval (k/2, k−1]. Verdicts are memoized and the
/// memo is consulted before any formula is encoded, so no threshold is handed
/// to the oracle twice. The search is synchronous: each candidate waits for
/// the previous verdict. An oracle error aborts the run; unsatisfiability
/// never does.
pub fn maximize_contacts(
    chain: &HpChain,
    lattice: &Lattice,
    oracle: &mut dyn Oracle,
    cnf_path: &Path,
    reporter: &ProgressReporter,
) -> Result<SearchResult, SearchError> {
    let mut run = SearchRun {
        chain,
        lattice,
        oracle,
        cnf_path,
        reporter,
        tried: HashMap::new(),
        stats: SearchStats::default(),
    };

    run.reporter.report(Progress::PhaseStart { name: "doubling" });
    let mut k = 1;
    let bounds = loop {
        match run.probe(k)? {
            Verdict::Satisfiable => k *= 2,
            Verdict::Unsatisfiable if k == 1 => break None,
            Verdict::Unsatisfiable => break Some((k / 2, k - 1)),
        }
    };
    run.reporter.report(Progress::PhaseFinish);

    let max_contacts = match bounds {
        None => 0,
        Some((low, high)) => {
            run.reporter.report(Progress::PhaseStart { name: "bisection" });
            let best = run.bisect(low, high)?;
            run.reporter.report(Progress::PhaseFinish);
            best
        }
    };

    Ok(SearchResult {
        max_contacts,
        tried: run.tried,
        stats: run.stats,
    })
}

struct SearchRun<'a> {
    chain: &'a HpChain,
    lattice: &'a Lattice,
    oracle: &'a mut dyn Oracle,
    cnf_path: &'a Path,
    reporter: &'a ProgressReporter<'a>,
    tried: HashMap<u32, Verdict>,
    stats: SearchStats,
}

impl SearchRun<'_> {
    /// Narrows `[low, high]` to the maximum satisfiable threshold. `low` must
    /// already be known satisfiable and `high + 1` unsatisfiable.
    fn bisect(&mut self, mut low: u32, mut high: u32) -> Result<u32, SearchError> {
        while low < high {
            let mid = low + (high - low + 1) / 2;
            match self.decide(mid)? {
                Verdict::Satisfiable => low = mid,
                Verdict::Unsatisfiable => high = mid - 1,
            }
        }
        Ok(low)
    }

    /// Answers from the memo when possible, otherwise consults the oracle.
    fn decide(&mut self, k: u32) -> Result<Verdict, SearchError> {
        if let Some(&verdict) = self.tried.get(&k) {
            self.reporter.report(Progress::MemoHit { k, verdict });
            return Ok(verdict);
        }
        self.probe(k)
    }

    /// Encodes the formula for threshold `k`, runs the oracle on it, and
    /// records the verdict.
    fn probe(&mut self, k: u32) -> Result<Verdict, SearchError> {
        self.reporter.report(Progress::CandidateStart { k });

        let formula = build_formula(self.chain, self.lattice, k);
        dimacs::write_to_path(self.cnf_path, &formula).map_err(|source| {
            SearchError::CnfWrite {
                path: self.cnf_path.to_path_buf(),
                source,
            }
        })?;

        let started = Instant::now();
        let verdict = self.oracle.decide(self.cnf_path)?;
        let elapsed = started.elapsed();

        self.stats.oracle_calls += 1;
        self.stats.oracle_time += elapsed;
        self.tried.insert(k, verdict);
        self.reporter.report(Progress::CandidateVerdict {
            k,
            verdict,
            elapsed,
        });
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted oracle: satisfiable below a fixed threshold, with a log of
    /// every consulted candidate.
    struct FakeOracle {
        max_satisfiable: u32,
        asked: RefCell<Vec<u32>>,
        pending: u32,
    }

    impl FakeOracle {
        fn new(max_satisfiable: u32) -> Self {
            Self {
                max_satisfiable,
                asked: RefCell::new(Vec::new()),
                pending: 0,
            }
        }
    }

    impl Oracle for FakeOracle {
        fn decide(&mut self, cnf: &Path) -> Result<Verdict, OracleError> {
            assert!(cnf.exists(), "driver must write the CNF before deciding");
            self.asked.borrow_mut().push(self.pending);
            if self.pending <= self.max_satisfiable {
                Ok(Verdict::Satisfiable)
            } else {
                Ok(Verdict::Unsatisfiable)
            }
        }
    }

    /// The fake can't read k from the file, so the driver is observed through
    /// a reporter that tells the oracle which candidate is in flight.
    fn search(max_satisfiable: u32) -> (SearchResult, Vec<u32>) {
        let chain: HpChain = "10101".parse().unwrap();
        let lattice = Lattice::new(chain.lattice_width());
        let dir = tempfile::tempdir().unwrap();
        let cnf_path = dir.path().join("probe.cnf");

        let oracle = RefCell::new(FakeOracle::new(max_satisfiable));
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::CandidateStart { k } = event {
                CURRENT_K.with(|cell| cell.set(k));
            }
        }));

        // Relay the candidate recorded by the reporter into the oracle.
        struct Relay<'a>(&'a RefCell<FakeOracle>);
        impl Oracle for Relay<'_> {
            fn decide(&mut self, cnf: &Path) -> Result<Verdict, OracleError> {
                let mut oracle = self.0.borrow_mut();
                oracle.pending = CURRENT_K.with(|cell| cell.get());
                oracle.decide(cnf)
            }
        }

        let result = maximize_contacts(
            &chain,
            &lattice,
            &mut Relay(&oracle),
            &cnf_path,
            &reporter,
        )
        .unwrap();
        let asked = oracle.borrow().asked.borrow().clone();
        (result, asked)
    }

    thread_local! {
        static CURRENT_K: std::cell::Cell<u32> = const { std::cell::Cell::new(0) };
    }

    #[test]
    fn immediate_unsatisfiability_means_zero_contacts_after_one_call() {
        let (result, asked) = search(0);
        assert_eq!(result.max_contacts, 0);
        assert_eq!(result.stats.oracle_calls, 1);
        assert_eq!(asked, vec![1]);
    }

    #[test]
    fn doubling_then_bisection_finds_the_exact_maximum() {
        let (result, asked) = search(5);
        assert_eq!(result.max_contacts, 5);
        // Doubling visits 1, 2, 4, 8; bisection stays inside [4, 7].
        assert_eq!(&asked[..4], &[1, 2, 4, 8]);
        assert!(asked[4..].iter().all(|k| (4..=7).contains(k)));
    }

    #[test]
    fn exact_powers_of_two_terminate_too() {
        let (result, _) = search(4);
        assert_eq!(result.max_contacts, 4);
    }

    #[test]
    fn no_candidate_is_asked_twice() {
        for max in [0, 1, 3, 4, 5, 6, 7, 11] {
            let (result, asked) = search(max);
            assert_eq!(result.max_contacts, max, "max = {max}");
            let mut seen = asked.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), asked.len(), "duplicate probe for max = {max}");
            assert_eq!(result.stats.oracle_calls as usize, asked.len());
        }
    }

    #[test]
    fn call_count_stays_logarithmic() {
        let (result, asked) = search(11);
        assert_eq!(result.max_contacts, 11);
        // 1, 2, 4, 8, 16 then bisection over [8, 15].
        assert!(asked.len() <= 8, "asked: {asked:?}");
        assert!(result.stats.oracle_calls <= 8);
    }

    #[test]
    fn memoized_verdicts_skip_the_oracle() {
        let chain: HpChain = "101".parse().unwrap();
        let lattice = Lattice::new(3);
        let dir = tempfile::tempdir().unwrap();
        let cnf_path = dir.path().join("probe.cnf");
        let reporter = ProgressReporter::new();
        let mut oracle = FakeOracle::new(2);

        let mut run = SearchRun {
            chain: &chain,
            lattice: &lattice,
            oracle: &mut oracle,
            cnf_path: &cnf_path,
            reporter: &reporter,
            tried: HashMap::from([(2, Verdict::Satisfiable), (3, Verdict::Unsatisfiable)]),
            stats: SearchStats::default(),
        };

        // [1, 3] resolves through the seeded memo alone.
        assert_eq!(run.bisect(1, 3).unwrap(), 2);
        assert_eq!(run.stats.oracle_calls, 0);
        assert!(oracle.asked.borrow().is_empty());
    }
}
