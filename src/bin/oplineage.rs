//! oplineage CLI — inspect the extractor registry and run extraction.
//!
//! Usage:
//!   oplineage extractors [--config path]
//!   oplineage extract <spec.yaml> [--state failed] [--on-start] [--config path]

use clap::{Parser, Subcommand};
use oplineage::{
    DagRun, DeclarativeOperator, ExtractorCatalog, ExtractorManager, LineageConfig, Operator,
    TaskInstance, TaskInstanceState,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "oplineage",
    version,
    about = "Operator lineage extraction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to the lineage config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List task types with a registered extractor
    Extractors,
    /// Extract lineage for a declarative operator spec
    Extract {
        /// Path to the operator spec (YAML)
        spec: PathBuf,
        /// Task instance state the task reached
        #[arg(long)]
        state: Option<String>,
        /// Run the start phase instead of dispatching on state
        #[arg(long, conflicts_with = "state")]
        on_start: bool,
        #[arg(long, default_value = "oplineage")]
        dag_id: String,
        #[arg(long, default_value = "manual")]
        run_id: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn open_manager(config: Option<&Path>) -> Result<ExtractorManager, String> {
    let config =
        LineageConfig::load(config).map_err(|e| format!("Failed to load config: {}", e))?;
    Ok(ExtractorManager::from_config(&config, &ExtractorCatalog::builtin()))
}

fn cmd_extractors(manager: &ExtractorManager) -> i32 {
    let operators = manager.registered_operators();
    if operators.is_empty() {
        println!("No extractors registered.");
        return 0;
    }
    println!("{:<24}  {:<48}", "TASK TYPE", "EXTRACTOR");
    println!("{}", "-".repeat(74));
    for operator in operators {
        if let Some(class) = manager.registry().get(operator) {
            println!("{:<24}  {:<48}", operator, class.name());
        }
    }
    0
}

fn cmd_extract(
    manager: &ExtractorManager,
    spec: &Path,
    state: Option<&str>,
    on_start: bool,
    dagrun: &DagRun,
) -> i32 {
    let state = match state.map(str::parse::<TaskInstanceState>).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let operator = match DeclarativeOperator::from_path(spec) {
        Ok(op) => op,
        Err(e) => {
            eprintln!("Error: cannot load '{}': {}", spec.display(), e);
            return 1;
        }
    };
    let task: Arc<dyn Operator> = Arc::new(operator);

    let lineage = if on_start {
        manager.extract_start_metadata(dagrun, &task)
    } else {
        let mut ti = TaskInstance::new(&dagrun.dag_id, task.task_id(), &dagrun.run_id);
        if let Some(s) = state {
            ti = ti.with_state(s);
        }
        manager.extract_metadata(dagrun, &task, state, Some(&ti))
    };

    match serde_json::to_string_pretty(&lineage) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let manager = match open_manager(cli.config.as_deref()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Extractors => cmd_extractors(&manager),
        Commands::Extract { spec, state, on_start, dag_id, run_id } => {
            let dagrun = DagRun::new(dag_id, run_id);
            cmd_extract(&manager, &spec, state.as_deref(), on_start, &dagrun)
        }
    };
    std::process::exit(code);
}
