use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use staramr_metadata::domain::{Analysis, AnalysisId, AnalysisType, Sample, SampleId, WorkflowId};
use staramr_metadata::error::PostProcessingError;
use staramr_metadata::metadata::FieldRegistry;
use staramr_metadata::output::JsonOutput;
use staramr_metadata::registry::UpdaterRegistry;
use staramr_metadata::report;
use staramr_metadata::sample::SampleStore;
use staramr_metadata::updater::{DEFAULT_WORKFLOW_ID, STARAMR_SUMMARY, STAR_AMR, StarAmrUpdater};
use staramr_metadata::workflow::WorkflowRegistry;

#[derive(Parser)]
#[command(name = "staramr-meta")]
#[command(about = "Attach staramr AMR detection results to sample metadata records")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    store: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Apply a staramr summary report to a stored sample")]
    Update(UpdateArgs),
    #[command(about = "Parse a staramr summary report and print the extracted fields")]
    Inspect(InspectArgs),
    #[command(about = "List samples in the local store")]
    Samples,
}

#[derive(Args)]
struct UpdateArgs {
    report: Utf8PathBuf,

    #[arg(long)]
    sample: SampleId,

    #[arg(long)]
    analysis: AnalysisId,

    #[arg(long, default_value = DEFAULT_WORKFLOW_ID)]
    workflow: WorkflowId,

    #[arg(long)]
    workflows: Option<Utf8PathBuf>,

    #[arg(long)]
    create: bool,

    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct InspectArgs {
    report: Utf8PathBuf,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<PostProcessingError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &PostProcessingError) -> u8 {
    match error {
        PostProcessingError::SampleNotFound { .. }
        | PostProcessingError::WorkflowNotFound { .. }
        | PostProcessingError::MissingRegistry
        | PostProcessingError::MissingOutputFile { .. } => 2,
        PostProcessingError::Report { .. }
        | PostProcessingError::Storage { .. }
        | PostProcessingError::Filesystem(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match cli.store {
        Some(root) => SampleStore::new_with_root(root),
        None => SampleStore::new()?,
    };

    match cli.command {
        Commands::Update(args) => run_update(args, store),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Samples => run_samples(store),
    }
}

fn run_update(args: UpdateArgs, store: SampleStore) -> miette::Result<()> {
    let workflows = WorkflowRegistry::resolve(args.workflows.as_deref())?;

    let sample = if store.contains(&args.sample) {
        store.load(&args.sample)?
    } else if args.create {
        let name = args.name.unwrap_or_else(|| args.sample.to_string());
        let sample = Sample::new(args.sample.clone(), name);
        store.save(&sample)?;
        sample
    } else {
        return Err(PostProcessingError::SampleNotFound {
            sample: args.sample,
        }
        .into());
    };

    let mut analysis = Analysis::new(args.analysis, args.workflow);
    analysis.add_output_file(STARAMR_SUMMARY, args.report);

    let mut updaters = UpdaterRegistry::new();
    updaters.register(Box::new(StarAmrUpdater::new(
        workflows,
        FieldRegistry::new(),
        store.clone(),
    )));

    let updated = updaters.dispatch(&AnalysisType::new(STAR_AMR), vec![sample], &analysis)?;
    JsonOutput::print_sample(&updated).into_diagnostic()?;
    Ok(())
}

fn run_inspect(args: InspectArgs) -> miette::Result<()> {
    let summary = report::read_summary(&args.report).map_err(|err| {
        PostProcessingError::Report {
            path: args.report.clone(),
            source: err,
        }
    })?;
    JsonOutput::print_summary(&summary).into_diagnostic()?;
    Ok(())
}

fn run_samples(store: SampleStore) -> miette::Result<()> {
    let samples = store.list()?;
    JsonOutput::print_samples(&samples).into_diagnostic()?;
    Ok(())
}
