use crate::cli::Cli;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional TOML configuration file. Every field the command line can set is
/// also settable here; flags win when both are given.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub command: Option<PathBuf>,
    pub args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub directory: Option<PathBuf>,
    #[serde(rename = "work-directory")]
    pub work_directory: Option<PathBuf>,
    pub json: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read '{}': {e}", path.display()))
        })?;
        toml::from_str(&text).map_err(|e| {
            CliError::Config(format!("cannot parse '{}': {e}", path.display()))
        })
    }
}

/// The fully resolved settings one batch run operates with.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub solver: PathBuf,
    pub solver_args: Vec<String>,
    pub output_dir: PathBuf,
    pub work_dir: PathBuf,
    pub json: bool,
}

/// Merges the configuration file (if any) with the command line, flags
/// winning, and fills in the defaults.
pub fn resolve(cli: &Cli) -> Result<RunConfig> {
    let file = match &cli.config {
        Some(path) => {
            debug!("Loading configuration file {:?}", path);
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };

    let solver = cli
        .solver
        .clone()
        .or(file.solver.command)
        .ok_or_else(|| {
            CliError::Config(
                "no SAT solver given; pass --solver or set solver.command in the config file"
                    .to_string(),
            )
        })?;

    let solver_args = if cli.solver_args.is_empty() {
        file.solver.args.unwrap_or_default()
    } else {
        cli.solver_args.clone()
    };

    let output_dir = cli
        .output_dir
        .clone()
        .or(file.output.directory)
        .unwrap_or_else(|| PathBuf::from("."));

    let work_dir = cli
        .work_dir
        .clone()
        .or(file.output.work_directory)
        .unwrap_or_else(|| output_dir.clone());

    Ok(RunConfig {
        solver,
        solver_args,
        output_dir,
        work_dir,
        json: cli.json || file.output.json.unwrap_or(false),
    })
}
