//! Fixture harness for the FlexKit layout engine.
//!
//! Provides commands for:
//! - Running JSON layout fixtures in LTR and RTL
//! - Dumping the computed box tree of a fixture
//!
//! ## Usage
//!
//! ```bash
//! # Run every fixture in a directory
//! layout-test run tools/layout-test/fixtures --report report.json
//!
//! # Print the boxes computed for one fixture
//! layout-test dump tools/layout-test/fixtures/static_root.json --direction rtl
//! ```

use clap::{Parser, Subcommand};
use flexkit_common::{init_logging, FlexkitError, LogConfig, LogFormat, Result};
use flexkit_layout::Direction;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

mod fixture;
mod runner;

#[derive(Parser)]
#[command(name = "layout-test")]
#[command(about = "Fixture harness for the FlexKit layout engine")]
struct Cli {
    /// Enable debug logging (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format: pretty, compact or json
    #[arg(long, default_value = "compact", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fixture file or every fixture in a directory
    Run {
        /// Fixture file or directory
        #[arg(default_value = "tools/layout-test/fixtures")]
        path: PathBuf,
        /// Allowed difference per box component
        #[arg(short, long, default_value = "0.001")]
        tolerance: f32,
        /// Output JSON report path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Lay out a fixture and print its box tree as JSON
    Dump {
        /// Fixture file
        fixture: PathBuf,
        /// Layout direction: ltr or rtl
        #[arg(short, long, default_value = "ltr")]
        direction: String,
    },
}

fn log_config(verbose: u8, format: &str) -> Result<LogConfig> {
    let format = LogFormat::parse(format)
        .ok_or_else(|| FlexkitError::InvalidArgument(format!("unknown log format: {}", format)))?;
    let config = match verbose {
        0 => LogConfig::default(),
        1 => LogConfig::debug(),
        _ => LogConfig::trace(),
    };
    Ok(config.with_format(format))
}

fn parse_direction(value: &str) -> Result<Direction> {
    match flexkit_style::parse_direction(value) {
        Some(Direction::Inherit) | None => Err(FlexkitError::InvalidArgument(format!(
            "direction must be ltr or rtl, got {}",
            value
        ))),
        Some(direction) => Ok(direction),
    }
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Run {
            path,
            tolerance,
            report,
        } => {
            let result = runner::run_path(&path, tolerance)?;

            for fixture in &result.fixtures {
                let status = if fixture.passed { "PASS" } else { "FAIL" };
                println!("  [{}] {}", status, fixture.name);
                if let Some(message) = &fixture.error {
                    println!("         {}", message);
                }
                for mismatch in &fixture.mismatches {
                    println!(
                        "         {} ({}): expected {:?}, got {:?}",
                        mismatch.path, mismatch.direction, mismatch.expected, mismatch.actual
                    );
                }
            }
            println!("{}/{} fixtures passed", result.passed, result.total);

            if let Some(report_path) = report {
                result.save_json(&report_path)?;
                println!("Report written to: {}", report_path.display());
            }
            Ok(result.all_passed())
        }

        Commands::Dump {
            fixture: path,
            direction,
        } => {
            let direction = parse_direction(&direction)?;
            let fixture = fixture::Fixture::load(&path)?;
            let dump = runner::dump_fixture(&fixture, direction)?;
            let json = serde_json::to_string_pretty(&dump)
                .map_err(|e| FlexkitError::fixture_with_source("cannot encode dump", e))?;
            println!("{}", json);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = log_config(cli.verbose, &cli.log_format).and_then(init_logging);
    if let Err(e) = logging {
        eprintln!("error: {}", e);
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(category = e.category(), "{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const FIXTURES: [(&str, &str); 7] = [
        ("static_root", include_str!("../fixtures/static_root.json")),
        ("row_reverse", include_str!("../fixtures/row_reverse.json")),
        ("padding_and_border", include_str!("../fixtures/padding_and_border.json")),
        ("amalgamation", include_str!("../fixtures/amalgamation.json")),
        ("relative_percent", include_str!("../fixtures/relative_percent.json")),
        ("justify_row", include_str!("../fixtures/justify_row.json")),
        ("wrap_reverse_center", include_str!("../fixtures/wrap_reverse_center.json")),
    ];

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::parse_from(["layout-test", "-vv", "run", "fixtures", "--tolerance", "0.5"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run { path, tolerance, report } => {
                assert_eq!(path, PathBuf::from("fixtures"));
                assert_eq!(tolerance, 0.5);
                assert!(report.is_none());
            }
            Commands::Dump { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_log_config() {
        let config = log_config(1, "json").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert!(log_config(0, "xml").is_err());
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("RTL").unwrap(), Direction::Rtl);
        assert!(parse_direction("inherit").is_err());
        assert!(parse_direction("sideways").is_err());
    }

    #[test]
    fn test_bundled_fixtures_pass() {
        for (name, json) in FIXTURES {
            let fixture = fixture::Fixture::from_json(json).unwrap();
            assert_eq!(fixture.name, name);
            let result = runner::run_fixture(&fixture, 0.001).unwrap();
            assert!(result.checked > 0, "{} checks nothing", name);
            assert!(result.passed, "{}: {:?}", name, result.mismatches);
        }
    }

    #[test]
    fn test_bundled_fixture_directory() {
        let dir = tempfile::tempdir().unwrap();
        for (name, json) in FIXTURES {
            std::fs::write(dir.path().join(format!("{}.json", name)), json).unwrap();
        }
        let report = runner::run_path(dir.path(), 0.001).unwrap();
        assert_eq!(report.total, FIXTURES.len());
        assert!(report.all_passed());
    }
}
