use crate::error::Result;
use hpfold::workflows::maximize::MaximizeOutcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends one run's summary to the per-chain report file, creating it on
/// first use. Appending keeps earlier runs of the same chain visible.
pub fn append_report(path: &Path, outcome: &MaximizeOutcome) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    writeln!(file)?;
    writeln!(
        file,
        "Maximum contacts found for {}: {}",
        outcome.sequence, outcome.max_contacts
    )?;
    writeln!(
        file,
        "Solver time taken: {:.3}s",
        outcome.oracle_time.as_secs_f64()
    )?;
    writeln!(file, "Solver runs required: {}", outcome.oracle_calls)?;

    Ok(())
}

/// Writes the machine-readable summary, replacing any previous one.
pub fn write_json_summary(path: &Path, outcome: &MaximizeOutcome) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, outcome)
        .map_err(|e| anyhow::anyhow!("cannot serialize summary: {e}"))?;
    Ok(())
}
