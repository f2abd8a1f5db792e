use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Outcome of a decision call. Unsatisfiable is an expected, frequent result
/// of the threshold search, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Failed to launch solver '{program}': {source}", program = program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver reported failure (exit status {status}): {stderr}")]
    Failure { status: i32, stderr: String },

    #[error("Solver violated the exit-status contract with status {status} (expected 10 or 20)")]
    ContractViolation { status: i32 },

    #[error("Solver was terminated by a signal before reporting a verdict")]
    Interrupted,
}

/// A black-box decision procedure for CNF files.
pub trait Oracle {
    fn decide(&mut self, cnf: &Path) -> Result<Verdict, OracleError>;
}

/// Runs an external SAT solver process with the CNF file path as its final
/// argument and interprets its exit status: 10 means satisfiable, 20 means
/// unsatisfiable, anything below 10 is a solver failure (with the process's
/// standard error surfaced), and any other status breaks the contract and is
/// reported as such rather than folded into the failure path.
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessOracle {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Oracle for ProcessOracle {
    fn decide(&mut self, cnf: &Path) -> Result<Verdict, OracleError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(cnf)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| OracleError::Launch {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(10) => Ok(Verdict::Satisfiable),
            Some(20) => Ok(Verdict::Unsatisfiable),
            Some(status) if status < 10 => Err(OracleError::Failure {
                status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Some(status) => Err(OracleError::ContractViolation { status }),
            None => Err(OracleError::Interrupted),
        }
    }
}
