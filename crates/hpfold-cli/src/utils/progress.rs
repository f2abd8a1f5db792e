use hpfold::search::{Progress, ProgressCallback};
use hpfold::solver::Verdict;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders core search progress as an indicatif spinner with one printed line
/// per decided candidate.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(format!("Phase: {name}"));
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_and_clear();
                }
                Progress::CandidateStart { k } => {
                    pb.set_message(format!("k = {k}: encoding and solving..."));
                }
                Progress::CandidateVerdict {
                    k,
                    verdict,
                    elapsed,
                } => {
                    pb.println(format!(
                        "  k = {k}: {} in {:.2}s",
                        verdict_word(verdict),
                        elapsed.as_secs_f64()
                    ));
                }
                Progress::MemoHit { k, verdict } => {
                    pb.println(format!(
                        "  k = {k}: {} (memoized)",
                        verdict_word(verdict)
                    ));
                }
                Progress::Message(msg) => {
                    pb.println(format!("  {msg}"));
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn verdict_word(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Satisfiable => "satisfiable",
        Verdict::Unsatisfiable => "unsatisfiable",
    }
}
