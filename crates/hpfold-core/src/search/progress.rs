use crate::solver::Verdict;
use std::time::Duration;

/// Observable milestones of a threshold search run.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A candidate threshold is being encoded and handed to the oracle.
    CandidateStart { k: u32 },
    /// The oracle returned a verdict for a candidate threshold.
    CandidateVerdict {
        k: u32,
        verdict: Verdict,
        elapsed: Duration,
    },
    /// A candidate was answered from the memo without an oracle call.
    MemoHit { k: u32, verdict: Verdict },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
