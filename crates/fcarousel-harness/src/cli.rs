use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::{HarnessError, Result};
use crate::runner::run_scenario;
use crate::scenario::Scenario;
use crate::trace::{Trace, hash_jsonl};

#[derive(Debug, Parser)]
#[command(
    name = "fcarousel-harness",
    about = "Deterministic scenario runner and golden traces for fcarousel",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scenario and emit its frame trace as JSON lines.
    Run(RunArgs),

    /// Print the trace hash of one or more scenarios.
    Hash(HashArgs),

    /// Compare a scenario run against a recorded golden trace.
    Check(CheckArgs),

    /// Parse a scenario and validate its options without running it.
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Scenario file (.toml or .json).
    pub scenario: PathBuf,

    /// Write the trace here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only print the summary line.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HashArgs {
    /// Scenario files.
    #[arg(required = true)]
    pub scenarios: Vec<PathBuf>,

    /// Fail unless every scenario hashes to this value.
    #[arg(long)]
    pub expect: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Scenario file.
    pub scenario: PathBuf,

    /// Golden JSONL trace produced by `run --output`.
    #[arg(long)]
    pub golden: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Scenario files.
    #[arg(required = true)]
    pub scenarios: Vec<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_run(&args),
        Commands::Hash(args) => run_hash(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Validate(args) => run_validate(&args),
    }
}

fn load_and_run(path: &Path) -> Result<Trace> {
    let scenario = Scenario::from_file(path)?;
    tracing::debug!(path = %path.display(), name = %scenario.name, "loaded scenario");
    run_scenario(&scenario)
}

fn run_run(args: &RunArgs) -> Result<()> {
    let trace = load_and_run(&args.scenario)?;
    match &args.output {
        Some(path) => trace.write_jsonl(fs::File::create(path)?)?,
        None if !args.quiet => trace.write_jsonl(io::stdout().lock())?,
        None => {}
    }
    eprintln!(
        "{}: {} records, {}",
        trace.scenario,
        trace.len(),
        trace.hash()?
    );
    Ok(())
}

fn run_hash(args: &HashArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for path in &args.scenarios {
        let hash = load_and_run(path)?.hash()?;
        writeln!(stdout, "{hash}  {}", path.display())?;
        if let Some(expected) = &args.expect
            && *expected != hash
        {
            return Err(HarnessError::HashMismatch {
                expected: expected.clone(),
                actual: hash,
            });
        }
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let actual = load_and_run(&args.scenario)?;
    let golden = fs::read_to_string(&args.golden)?;
    let rendered = actual.to_jsonl()?;
    if golden != rendered {
        let diverged = golden
            .lines()
            .zip(rendered.lines())
            .position(|(a, b)| a != b)
            .unwrap_or(golden.lines().count().min(rendered.lines().count()));
        tracing::warn!(
            scenario = %actual.scenario,
            first_divergent_record = diverged,
            "trace differs from golden"
        );
        return Err(HarnessError::HashMismatch {
            expected: hash_jsonl(&golden),
            actual: hash_jsonl(&rendered),
        });
    }
    println!("ok {} ({} records)", actual.scenario, actual.len());
    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<()> {
    for path in &args.scenarios {
        let scenario = Scenario::from_file(path)?;
        scenario.options.validate()?;
        println!(
            "ok {} ({} cells, {} steps)",
            scenario.name,
            scenario.cells.len(),
            scenario.steps.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Commands, HashArgs, ValidateArgs, run};
    use crate::error::HarnessError;

    fn write_scenario(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("next.toml");
        std::fs::write(
            &path,
            r#"
name = "next"
container = { width = 300.0, height = 200.0 }
cells = [
  { width = 100.0, height = 100.0 },
  { width = 100.0, height = 100.0 },
  { width = 100.0, height = 100.0 },
]

[[steps]]
op = "next"

[[steps]]
op = "settle"
"#,
        )
        .expect("write scenario");
        path
    }

    #[test]
    fn parses_run_with_output() {
        let cli = Cli::parse_from(["fcarousel-harness", "run", "a.toml", "-o", "a.jsonl"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, PathBuf::from("a.toml"));
                assert_eq!(args.output, Some(PathBuf::from("a.jsonl")));
                assert!(!args.quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn validate_dispatches_successfully() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_scenario(dir.path());
        let result = run(Cli {
            command: Commands::Validate(ValidateArgs {
                scenarios: vec![path],
            }),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn hash_with_wrong_expectation_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_scenario(dir.path());
        let err = run(Cli {
            command: Commands::Hash(HashArgs {
                scenarios: vec![path],
                expect: Some("blake3:0000".to_string()),
            }),
        })
        .unwrap_err();
        assert!(matches!(err, HarnessError::HashMismatch { .. }));
    }

    #[test]
    fn check_accepts_its_own_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(dir.path());
        let golden = dir.path().join("next.jsonl");
        run(Cli::parse_from([
            "fcarousel-harness",
            "run",
            scenario.to_str().expect("utf-8 path"),
            "--output",
            golden.to_str().expect("utf-8 path"),
        ]))
        .expect("run");
        run(Cli::parse_from([
            "fcarousel-harness",
            "check",
            scenario.to_str().expect("utf-8 path"),
            "--golden",
            golden.to_str().expect("utf-8 path"),
        ]))
        .expect("check");
    }
}
