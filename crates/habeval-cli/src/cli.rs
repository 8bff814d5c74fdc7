use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "habeval - Evaluate 3-D equipment layouts inside rectangular space habitats.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to evaluate batches of layouts.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and score one or more layout files.
    Evaluate(EvaluateArgs),
    /// Check whether one module can be placed next to the modules already in a layout.
    Check(CheckArgs),
    /// List the modules of the built-in or a custom module catalog.
    Catalog(CatalogArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Layout JSON files. Each file holds one layout object or an array of them.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Module catalog file (.toml or .csv) used instead of the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Mission profile (MARS or LUNAR) applied to every layout, overriding the
    /// profile named inside the layout file.
    #[arg(short, long, value_name = "NAME")]
    pub mission: Option<String>,

    /// Override `validation.enforce-overlap-check` from the config file.
    #[command(flatten)]
    pub overlap_check: OverlapCheck,

    /// Treat module ids missing from the catalog as calculation errors.
    #[arg(long)]
    pub strict_catalog: bool,

    /// Knowledge file (TOML) consulted by the mission advisor.
    #[arg(long, value_name = "PATH")]
    pub knowledge: Option<PathBuf>,

    /// Add research considerations from the knowledge file to every valid layout.
    #[arg(long)]
    pub advanced: bool,

    /// Output format of the evaluation report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.weights.space=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for the overlap check.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct OverlapCheck {
    /// Reject layouts whose module boxes overlap.
    #[arg(long)]
    pub enforce_overlap: bool,
    /// Report overlapping module boxes without rejecting the layout.
    #[arg(long)]
    pub no_enforce_overlap: bool,
}

impl OverlapCheck {
    pub fn as_override(self) -> Option<bool> {
        match (self.enforce_overlap, self.no_enforce_overlap) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file with `habitatDimensions`, `newModule` and optional `existingModules`.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Module catalog file (.toml or .csv) used instead of the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Output format of the verdict.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Module catalog file (.toml or .csv) listed instead of the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Show a single module.
    #[arg(long, value_name = "ID")]
    pub id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_accepts_multiple_inputs_and_overrides() {
        let cli = Cli::try_parse_from([
            "habeval",
            "-vv",
            "evaluate",
            "a.json",
            "b.json",
            "--mission",
            "MARS",
            "--enforce-overlap",
            "-S",
            "validation.penalty-score=50",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected the evaluate command");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.mission.as_deref(), Some("MARS"));
        assert_eq!(args.overlap_check.as_override(), Some(true));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.set_values, vec!["validation.penalty-score=50"]);
    }

    #[test]
    fn overlap_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "habeval",
            "evaluate",
            "a.json",
            "--enforce-overlap",
            "--no-enforce-overlap",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn evaluate_requires_an_input() {
        assert!(Cli::try_parse_from(["habeval", "evaluate"]).is_err());
    }

    #[test]
    fn check_takes_one_input_and_a_catalog() {
        let cli = Cli::try_parse_from([
            "habeval",
            "check",
            "candidate.json",
            "--catalog",
            "modules.csv",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Check(args) = cli.command else {
            panic!("expected the check command");
        };
        assert_eq!(args.input, PathBuf::from("candidate.json"));
        assert_eq!(args.catalog, Some(PathBuf::from("modules.csv")));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["habeval", "check", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["habeval", "-q", "-v", "catalog"]).is_err());
    }
}
