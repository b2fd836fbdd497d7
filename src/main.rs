use anyhow::{Context, Result};
use clap::Parser;
use perfmon_fixtures::cli::{Cli, DatasetKind};
use perfmon_fixtures::config::FixtureConfig;
use perfmon_fixtures::dataset::DatasetSpec;
use perfmon_fixtures::generator::{self, GenerationReport};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_confirmation(report: &GenerationReport) {
    println!("{}", report.confirmation());
}

/// Generate the datasets selected by the arguments
fn run(args: &Cli) -> Result<Vec<GenerationReport>> {
    let dir = &args.output_dir;

    let reports = if let Some(path) = &args.config {
        let specs = FixtureConfig::from_file(path)?.datasets()?;
        generator::generate_all(dir, &specs, args.line_ending, print_confirmation)
    } else {
        match args.only {
            Some(DatasetKind::Large) => generator::generate_all(
                dir,
                &[DatasetSpec::large(args.hours)?],
                args.line_ending,
                print_confirmation,
            ),
            Some(DatasetKind::Small) => generator::generate_all(
                dir,
                &[DatasetSpec::small()?],
                args.line_ending,
                print_confirmation,
            ),
            None => generator::generate_default_fixtures(
                dir,
                args.hours,
                args.line_ending,
                print_confirmation,
            ),
        }
    };

    reports.with_context(|| format!("Failed to generate fixtures in {}", dir.display()))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    run(&args)?;

    println!();
    println!("All test data generated!");

    Ok(())
}
