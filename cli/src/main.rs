use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dsbench_core::alloc::{self, CountingAllocator};
use dsbench_core::report::{self, Measurement, RunRecord};
use dsbench_core::{Driver, HarnessConfig, PayloadKind, Workload};

mod runner;

use runner::ContainerKind;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const DEFAULT_TRACE_FILTER: &str = "dsbench_core=warn,dsbench=info";

#[derive(Debug, Parser)]
#[command(
    name = "dsbench",
    author,
    version,
    about = "Workload benchmarks for queue, stack and deque implementations",
    long_about = None
)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List workloads, their scale points and the built-in containers.
    List,
    /// Measure workloads against built-in containers.
    Run(RunArgs),
    /// Replay one repetition of a workload with operation counting.
    ///
    /// Shared-container workloads (refill_full, slow_decrease, stable) replay
    /// straight after their sweep setup; earlier scale points are not run, so
    /// the starting size can differ from what a full sweep sees at that count.
    Trace {
        #[arg(short, long)]
        workload: Workload,
        #[arg(short, long, value_enum, default_value_t = ContainerKind::VecDeque)]
        container: ContainerKind,
        /// Scale point to replay
        #[arg(short = 'n', long)]
        count: usize,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// TOML run configuration; flags override its values
    #[arg(long, value_name = "FILE", value_parser = parse_sanitized_path)]
    config: Option<PathBuf>,
    /// Workload to run (repeatable; default: all)
    #[arg(short, long = "workload", value_name = "WORKLOAD")]
    workloads: Vec<Workload>,
    /// Container to measure (repeatable; default: all)
    #[arg(short, long = "container", value_enum, value_name = "CONTAINER")]
    containers: Vec<ContainerKind>,
    /// Payload shape: inline, boxed or scalar
    #[arg(long, default_value = "inline")]
    payload: PayloadKind,
    /// Skip scale points above this count
    #[arg(long)]
    max_count: Option<usize>,
    /// Wall time a measured batch should reach
    #[arg(long)]
    target_ms: Option<u64>,
    /// Iteration cap per scale point
    #[arg(long)]
    max_iterations: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Directory receiving latest.json and latest.csv
    #[arg(long, value_name = "DIR", value_parser = parse_sanitized_path)]
    output: Option<PathBuf>,
    /// Free-form note stored with the report
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);

    for comp in p.components() {
        if matches!(comp, Component::ParentDir) {
            return Err(anyhow::anyhow!(
                "Parent directory components ('..') are not allowed in file paths."
            ));
        }
    }

    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter_expr = std::env::var("DSBENCH_LOG")
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .filter(|expr| !expr.trim().is_empty());

    let builder = fmt().with_writer(std::io::stderr);
    let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
        Some(filter) => builder.with_env_filter(filter),
        None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
    };
    let _ = builder.try_init();
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(args: &RunArgs) -> anyhow::Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if !args.workloads.is_empty() {
        config.workloads = args.workloads.clone();
    }
    if args.max_count.is_some() {
        config.max_count = args.max_count;
    }
    if let Some(ms) = args.target_ms {
        config.stopwatch.target_time_ms = ms;
    }
    if let Some(max) = args.max_iterations {
        config.stopwatch.max_iterations = max;
    }
    config.validated()
}

fn selected_containers(args: &RunArgs) -> Vec<ContainerKind> {
    ContainerKind::ALL
        .into_iter()
        .filter(|kind| args.containers.is_empty() || args.containers.contains(kind))
        .collect()
}

fn print_catalogue() {
    println!("Workloads:");
    for workload in Workload::ALL {
        let points: Vec<String> = workload.scale_range().points().map(|p| p.label()).collect();
        println!("  {:<14} {}", workload.key(), workload.title());
        println!("  {:<14} scale: {}", "", points.join(", "));
        println!("  {:<14} setup: {}", "", workload.setup_policy().describe());
    }
    println!();
    println!("Containers:");
    for container in ContainerKind::ALL {
        println!("  {:<14} {}", container.key(), container.discipline());
    }
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let driver = Driver::new(config);
    let mut measurements: Vec<Measurement> = Vec::new();
    for container in selected_containers(args) {
        tracing::info!(container = container.key(), payload = args.payload.key(), "measuring container");
        measurements.extend(runner::measure(&driver, container, args.payload)?);
    }
    let record = RunRecord::new(measurements, args.notes.clone(), alloc::is_installed());

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir).with_context(|| format!("create output directory {}", dir.display()))?;
        report::write_json(&dir.join("latest.json"), &record)?;
        report::write_csv(&dir.join("latest.csv"), &record.measurements)?;
        tracing::info!(dir = %dir.display(), "report written");
    }

    match args.format {
        OutputFormat::Table => print!("{}", report::render_table(&record.measurements)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&record).context("serialize run record")?
        ),
        OutputFormat::Csv => report::write_csv_to(std::io::stdout().lock(), &record.measurements)?,
    }
    Ok(())
}

fn trace(workload: Workload, container: ContainerKind, count: usize) -> anyhow::Result<()> {
    let outcome = runner::trace(workload, container, count)?;
    let r = &outcome.repetition;
    println!("{} on {} at N={}", outcome.workload, outcome.container, outcome.count);
    println!(
        "  setup:      {} inits, {} adds -> {} values",
        outcome.setup.inits, outcome.setup.adds, outcome.len_before
    );
    println!(
        "  repetition: {} inits, {} adds, {} removes ({} empty), {} empty checks -> {} values",
        r.inits, r.adds, r.removes_found, r.removes_empty, r.empty_checks, outcome.len_after
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        Commands::List => {
            print_catalogue();
            Ok(())
        }
        Commands::Run(run_args) => run(&run_args),
        Commands::Trace {
            workload,
            container,
            count,
        } => trace(workload, container, count),
    }
}
