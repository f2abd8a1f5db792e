use crate::config::RunConfig;
use crate::error::{CliError, Result};
use crate::report;
use crate::utils::progress::CliProgressHandler;
use hpfold::model::HpChain;
use hpfold::search::ProgressReporter;
use hpfold::solver::ProcessOracle;
use hpfold::workflows::maximize::{self, MaximizeOutcome};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Runs the contact maximization over a batch of chain files. A failure on
/// one input is reported and the batch moves on; only when every input
/// failed does the whole run count as failed.
pub fn run(config: &RunConfig, inputs: &[PathBuf]) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir)?;
    std::fs::create_dir_all(&config.work_dir)?;

    let mut succeeded = 0usize;
    for input in inputs {
        match fold_one(config, input) {
            Ok(outcome) => {
                succeeded += 1;
                println!(
                    "{}: {} contacts ({} solver runs, {:.3}s)",
                    chain_stem(input),
                    outcome.max_contacts,
                    outcome.oracle_calls,
                    outcome.oracle_time.as_secs_f64()
                );
            }
            Err(e) => {
                error!("Skipping '{}': {e}", input.display());
            }
        }
    }

    info!("Finished: {succeeded}/{} input(s) succeeded.", inputs.len());
    if succeeded == 0 && !inputs.is_empty() {
        return Err(anyhow::anyhow!("no input file was processed successfully").into());
    }
    Ok(())
}

fn fold_one(config: &RunConfig, input: &Path) -> Result<MaximizeOutcome> {
    let chain = read_chain(input)?;
    let stem = chain_stem(input);

    info!(
        "Maximizing contacts for '{stem}' ({} residues, {} hydrophobic).",
        chain.len(),
        chain.hydrophobic_positions().len()
    );

    let cnf_path = config.work_dir.join(format!("{stem}.cnf"));
    let report_path = config.output_dir.join(format!("{stem}_opt.txt"));

    let mut oracle =
        ProcessOracle::new(&config.solver).with_args(config.solver_args.iter().cloned());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let outcome = maximize::run(&chain, &mut oracle, &cnf_path, &reporter)?;

    report::append_report(&report_path, &outcome)?;
    if config.json {
        report::write_json_summary(&report_path.with_extension("json"), &outcome)?;
    }

    Ok(outcome)
}

/// Reads the chain from the first line of the input file. Anything past the
/// first line is ignored, matching the one-sequence-per-file convention.
fn read_chain(path: &Path) -> Result<HpChain> {
    let text = std::fs::read_to_string(path)?;
    let line = text.lines().next().unwrap_or("").trim();
    if text.lines().count() > 1 {
        warn!(
            "'{}' has more than one line; only the first is used.",
            path.display()
        );
    }
    line.parse::<HpChain>().map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow::Error::new(e),
    })
}

fn chain_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chain".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn config_in(dir: &Path, solver_script: &str) -> RunConfig {
        // A stand-in solver that exits with the SAT contract statuses.
        let solver = write_input(dir, "solver.sh", solver_script);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&solver, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        RunConfig {
            solver,
            solver_args: Vec::new(),
            output_dir: dir.join("out"),
            work_dir: dir.join("work"),
            json: false,
        }
    }

    #[test]
    #[cfg(unix)]
    fn a_batch_writes_a_report_per_chain() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "#!/bin/sh\nexit 20\n");
        let a = write_input(dir.path(), "a.txt", "101\n");
        let b = write_input(dir.path(), "b.txt", "011\n");

        run(&config, &[a, b]).unwrap();

        let report = std::fs::read_to_string(config.output_dir.join("a_opt.txt")).unwrap();
        assert!(report.contains("Maximum contacts found for 101: 0"));
        assert!(config.output_dir.join("b_opt.txt").exists());
        assert!(config.work_dir.join("a.cnf").exists());
    }

    #[test]
    #[cfg(unix)]
    fn a_bad_input_does_not_sink_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "#!/bin/sh\nexit 20\n");
        let bad = write_input(dir.path(), "bad.txt", "10x1\n");
        let good = write_input(dir.path(), "good.txt", "101\n");

        run(&config, &[bad, good]).unwrap();

        assert!(!config.output_dir.join("bad_opt.txt").exists());
        assert!(config.output_dir.join("good_opt.txt").exists());
    }

    #[test]
    #[cfg(unix)]
    fn a_fully_failed_batch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "#!/bin/sh\nexit 20\n");
        let missing = dir.path().join("does-not-exist.txt");

        let result = run(&config, &[missing]);
        assert!(result.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn json_summaries_are_written_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "#!/bin/sh\nexit 20\n");
        config.json = true;
        let input = write_input(dir.path(), "a.txt", "11\n");

        run(&config, &[input]).unwrap();

        let json = std::fs::read_to_string(config.output_dir.join("a_opt.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sequence"], "11");
        assert_eq!(value["max_contacts"], 0);
    }
}
