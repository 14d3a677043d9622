//! Desires CLI: guided reflection form, chart, and admin export.
//!
//! Usage:
//!   desires reflect [--answers FILE] [--chart FILE] [--legend] [--seed N] [--json]
//!   desires export [--out-dir DIR]
//!   desires list
//!
//! Global: --store csv|sqlite (DESIRES_STORE), --table PATH (DESIRES_TABLE)

use clap::{Parser, Subcommand};
use desires::form::prompt_form;
use desires::{
    analyze, export, save, AnalyzeOptions, ExportOutcome, FormState, LayoutConfig,
    ReflectionStore, Session, StoreConfig, StoreKind,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "desires",
    version,
    about = "Desire reflection and clarity tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend that keeps the reflection table
    #[arg(long, global = true, env = "DESIRES_STORE", value_enum, default_value_t = StoreKind::Csv)]
    store: StoreKind,

    /// Path of the reflection table (defaults to all_reflections.csv / .db)
    #[arg(long, global = true, env = "DESIRES_TABLE")]
    table: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form, analyze it, draw the chart and save the reflection
    Reflect {
        /// Read answers from a JSON file instead of prompting
        #[arg(long)]
        answers: Option<PathBuf>,
        /// Where to write the SVG chart
        #[arg(long, default_value = "reflection_tree.svg")]
        chart: PathBuf,
        /// Add a legend for the link colors
        #[arg(long)]
        legend: bool,
        /// Layout seed
        #[arg(long, default_value_t = desires::graph::DEFAULT_SEED)]
        seed: u64,
        /// Print the display graph and layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download all reflections
    Export {
        /// Directory to save all_reflections.csv into (stdout if omitted)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List saved reflections
    List,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("desires=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &StoreConfig) -> Result<Box<dyn ReflectionStore>, String> {
    config
        .open()
        .map_err(|e| format!("Failed to open {}: {}", config.resolved_path().display(), e))
}

/// Status lines go to stderr when stdout carries JSON
fn status(json: bool, message: std::fmt::Arguments<'_>) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

fn collect_form(answers: Option<&Path>, json: bool) -> Result<FormState, String> {
    match answers {
        Some(path) => FormState::from_json_file(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            status(json, format_args!("Desire Reflection and Clarity Tool\n"));
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let collected = if json {
                prompt_form(&mut input, &mut std::io::stderr())
            } else {
                prompt_form(&mut input, &mut std::io::stdout())
            };
            collected.map_err(|e| e.to_string())
        }
    }
}

fn cmd_reflect(
    store: &dyn ReflectionStore,
    answers: Option<&Path>,
    chart: &Path,
    options: &AnalyzeOptions,
    json: bool,
) -> i32 {
    let form = match collect_form(answers, json) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let session = Session::with_form(form);

    let analysis = match analyze(&session, options) {
        Ok(analysis) => analysis,
        Err(e) if e.is_warning() => {
            eprintln!("Warning: {}", e);
            return 1;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    for notice in &analysis.notices {
        eprintln!("Note: {}", notice);
    }

    if let Err(e) = std::fs::write(chart, &analysis.svg) {
        eprintln!("Error: cannot write chart '{}': {}", chart.display(), e);
        return 1;
    }

    if !json {
        println!();
    }
    if let Err(e) = analysis.write_report(&mut std::io::stdout().lock(), json) {
        eprintln!("Error: {}", e);
        return 1;
    }
    status(json, format_args!("Chart written to {}", chart.display()));

    match save(&session, &analysis, store) {
        Ok(()) => {
            status(json, format_args!("Your reflection has been saved."));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_export(store: &dyn ReflectionStore, out_dir: Option<&Path>) -> i32 {
    let (file_name, bytes) = match export(store) {
        Ok(ExportOutcome::Ready { file_name, bytes }) => (file_name, bytes),
        Ok(ExportOutcome::Empty) => {
            eprintln!("Warning: No data available yet.");
            return 0;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let written = match out_dir {
        Some(dir) => {
            let target = dir.join(file_name);
            std::fs::create_dir_all(dir)
                .and_then(|_| std::fs::write(&target, &bytes))
                .map(|_| eprintln!("Saved {}", target.display()))
        }
        None => std::io::stdout().write_all(&bytes),
    };

    match written {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_list(store: &dyn ReflectionStore) -> i32 {
    let rows = match store.load_all() {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if rows.is_empty() {
        println!("No reflections saved.");
        return 0;
    }
    println!("{:>4}  {:<20}  {:<32}  {}", "#", "NAME", "MAIN DESIRE", "LINKS");
    println!("{}", "-".repeat(80));
    for (idx, reflection) in rows.iter().enumerate() {
        let links = reflection
            .entries
            .iter()
            .map(|e| e.link_type.as_str())
            .collect::<Vec<_>>()
            .join("/");
        println!(
            "{:>4}  {:<20}  {:<32}  {}",
            idx + 1,
            reflection.name,
            reflection.main_desire,
            links
        );
    }
    0
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut config = StoreConfig::new(cli.store);
    if let Some(table) = cli.table {
        config = config.with_path(table);
    }
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Reflect {
            answers,
            chart,
            legend,
            seed,
            json,
        } => {
            let options = AnalyzeOptions {
                layout: LayoutConfig::default().with_seed(seed),
                legend,
                ..AnalyzeOptions::default()
            };
            cmd_reflect(store.as_ref(), answers.as_deref(), &chart, &options, json)
        }
        Commands::Export { out_dir } => cmd_export(store.as_ref(), out_dir.as_deref()),
        Commands::List => cmd_list(store.as_ref()),
    };
    std::process::exit(code);
}
