use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "hpfold - maximizes hydrophobic contacts of 2D HP-model chains by \
             repeated reduction to SAT, using an external solver as the decision oracle.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Input files, each carrying one binary ({0,1}) HP sequence on its first line.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Directory for the per-chain report files (default: current directory).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// SAT solver executable, invoked with the CNF file path as its final argument.
    #[arg(short = 's', long, value_name = "PATH")]
    pub solver: Option<PathBuf>,

    /// Extra argument placed before the CNF path on the solver command line.
    /// Can be used multiple times.
    #[arg(long = "solver-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub solver_args: Vec<String>,

    /// Directory where the generated CNF files are kept (default: the output directory).
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Path to a TOML configuration file; command-line flags take precedence.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write a machine-readable JSON summary next to each report.
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_the_batch_invocation_shape() {
        let cli = Cli::parse_from([
            "hpfold",
            "chains/1meyF2",
            "chains/1bbo01",
            "-o",
            "results",
            "--solver",
            "glucose-syrup",
        ]);
        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("results")));
        assert_eq!(cli.solver, Some(PathBuf::from("glucose-syrup")));
        assert!(!cli.json);
    }

    #[test]
    fn solver_args_accumulate_in_order() {
        let cli = Cli::parse_from([
            "hpfold",
            "chain.txt",
            "--solver-arg",
            "-model",
            "--solver-arg",
            "-verb=0",
        ]);
        assert_eq!(cli.solver_args, vec!["-model", "-verb=0"]);
    }
}
