//! @ai:module:intent CLI for the Lighthouse report analyzer
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lighthouse_bench::{
    config::{AnalyzerConfig, DEFAULT_CONFIG_FILE},
    diagnostics::DiagnosticKind,
    metrics::AnalysisResults,
    Error, MetricCatalog, Pipeline,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lighthouse-bench")]
#[command(about = "Compare frontend framework performance from Lighthouse reports")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load reports, aggregate metrics and write dataset, summaries and charts
    Analyze {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding one sub-directory per framework
        #[arg(short, long)]
        results_dir: Option<PathBuf>,

        /// Output directory for dataset, reports and charts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frameworks to analyze (comma-separated)
        #[arg(short, long)]
        frameworks: Option<String>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// List the metrics extracted from each report
    Metrics,

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "lighthouse_bench=debug"
    } else {
        "lighthouse_bench=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    match cli.command {
        Commands::Analyze {
            config,
            results_dir,
            output,
            frameworks,
            no_charts,
        } => analyze(AnalyzeArgs {
            config,
            results_dir,
            output,
            frameworks,
            no_charts,
        }),
        Commands::Metrics => list_metrics(),
        Commands::Init { output } => init_config(output),
    }
}

struct AnalyzeArgs {
    config: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    frameworks: Option<String>,
    no_charts: bool,
}

/// @ai:intent Run the full analysis pipeline
/// @ai:effects fs:read, fs:write
fn analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = AnalyzerConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(results_dir) = args.results_dir {
        config.paths.results_dir = results_dir;
    }
    if let Some(output) = args.output {
        config.paths.output_dir = output;
    }
    if let Some(frameworks) = args.frameworks {
        config.run.frameworks = parse_list(&frameworks);
    }
    if args.no_charts {
        config.charts.disable_all();
    }

    match Pipeline::new(config).run() {
        Ok(outcome) => {
            print_summary(&outcome.analysis.results);
            print_diagnostics_summary(&outcome.analysis.diagnostics);
            println!("Artifacts written: {}", outcome.artifacts.join(", "));
            Ok(())
        }
        Err(Error::EmptyDataset {
            frameworks,
            diagnostics,
        }) => {
            for diagnostic in &diagnostics {
                eprintln!("  {}", diagnostic);
            }
            anyhow::bail!(
                "No data found for frameworks [{}]. Check the results directory.",
                frameworks.join(", ")
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// @ai:intent Split a comma-separated CLI list
/// @ai:effects pure
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// @ai:intent Print per-framework means to console
/// @ai:effects io
fn print_summary(results: &AnalysisResults) {
    println!();
    println!("Lighthouse Analysis Results");
    println!("===========================");
    println!();

    let frameworks = results.frameworks();

    print!("{:<34}", "Metric");
    for framework in &frameworks {
        print!(" {:>16}", framework);
    }
    println!();
    println!("{}", "-".repeat(34 + 17 * frameworks.len()));

    for metric in &results.metrics {
        print!("{:<34}", format!("{} ({})", metric.display_name, metric.unit));
        for aggregate in &results.aggregates {
            let cell = match aggregate.mean(&metric.key) {
                Some(mean) => format!("{:.1}", mean),
                None => "n/a".to_string(),
            };
            print!(" {:>16}", cell);
        }
        println!();
    }

    println!();
}

/// @ai:effects io
fn print_diagnostics_summary(diagnostics: &[lighthouse_bench::Diagnostic]) {
    let count = |kind: DiagnosticKind| diagnostics.iter().filter(|d| d.kind == kind).count();

    let missing = count(DiagnosticKind::MissingMetric);
    let malformed = count(DiagnosticKind::MalformedReport);
    let discovery = count(DiagnosticKind::DiscoveryMiss);

    if missing + malformed + discovery == 0 {
        return;
    }

    println!("Warnings:");
    if discovery > 0 {
        println!("  {} framework group(s) without reports", discovery);
    }
    if malformed > 0 {
        println!("  {} report file(s) skipped as malformed", malformed);
    }
    if missing > 0 {
        println!("  {} missing metric value(s), excluded from statistics", missing);
    }
    println!();
}

/// @ai:intent List the metric catalog
/// @ai:effects io
fn list_metrics() -> Result<()> {
    let catalog = MetricCatalog::lighthouse();

    println!("Metrics ({}):", catalog.len());
    println!();
    println!("{:<26} {:<34} {:<6} {}", "Key", "Name", "Unit", "Fallback");
    println!("{}", "-".repeat(76));

    for metric in catalog.iter() {
        let fallback = metric
            .extract
            .fallback
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<26} {:<34} {:<6} {}",
            metric.key, metric.display_name, metric.unit, fallback
        );
    }

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = AnalyzerConfig::default();
    config
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}
