//! # o86 CLI Application
//!
//! Terminal front-end for the CSA O86:19 design checks.
//!
//! ```text
//! o86                      interactive clause menu
//! o86 run job.o86 --json   evaluate every check of a saved project
//! o86 new job.o86 --engineer "J. Doe" --job 25-001 --client ACME
//! o86 tables panels        print a property table
//! ```

mod menu;
mod prompt;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use o86_core::calculations::sawn_lumber::Resistances;
use o86_core::project::FILE_EXTENSION;
use o86_core::{load_project, save_project, AppConfig, Project, PropertyStore, TableStore};

use crate::menu::Selection;
use crate::prompt::Prompter;

/// CSA O86:19 timber design checks
#[derive(Parser, Debug)]
#[command(name = "o86", version, about, long_about = None)]
struct Cli {
    /// Configuration file, otherwise $O86_CONFIG or ./o86.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Property table file replacing the builtin tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Log intermediate values
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive clause menu (default)
    Menu,
    /// Evaluate every check of a saved project
    Run {
        file: PathBuf,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write an empty project
    New {
        file: PathBuf,
        #[arg(long, default_value = "")]
        engineer: String,
        #[arg(long, default_value = "")]
        job: String,
        #[arg(long, default_value = "")]
        client: String,
    },
    /// Print the property tables
    Tables {
        #[arg(value_enum, default_value_t = Table::All)]
        table: Table,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Table {
    All,
    Panels,
    Lumber,
    Sizes,
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config, cli.verbose);
    if let Some(path) = &config_path {
        tracing::info!(path = %path.display(), "using configuration");
    }

    let custom = match cli.tables.as_ref().or(config.tables.as_ref()) {
        Some(path) => {
            let tables = TableStore::from_path(path)
                .with_context(|| format!("loading property tables from {}", path.display()))?;
            tracing::info!(path = %path.display(), "using custom property tables");
            Some(tables)
        }
        None => None,
    };
    let store: &TableStore = match &custom {
        Some(tables) => tables,
        None => TableStore::builtin().context("loading builtin property tables")?,
    };

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => run_menu(store, &config),
        Command::Run { file, json } => run_project(&file, json, store),
        Command::New {
            file,
            engineer,
            job,
            client,
        } => new_project(&file, engineer, job, client, &config),
        Command::Tables { table } => {
            print_tables(store, table);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over the configured filter; `-v` raises it to debug.
fn init_tracing(config: &AppConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new(&config.log_filter),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

// ============================================================================
// Commands
// ============================================================================

fn run_menu(store: &dyn PropertyStore, config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match menu::run(&mut prompter, config)? {
        Selection::Check(item) => {
            tracing::debug!(check = item.calc_type(), clause = item.clause(), "evaluating");
            let outcome = item
                .evaluate(store)
                .with_context(|| format!("{} ({})", item.calc_type(), item.clause()))?;
            prompter.say(format!("\t{outcome}"))?;
            if let Some(passes) = outcome.passes() {
                prompter.say(format!("\t{}", status(passes)))?;
            }
        }
        Selection::NetSize {
            nominal,
            seasoning,
            surfacing,
        } => {
            let net = Resistances::net_size(store, nominal, seasoning, surfacing);
            prompter.say(format!("\tNet dimension = {net} mm"))?;
        }
    }
    prompter.say("")?;
    Ok(())
}

fn run_project(path: &Path, json: bool, store: &dyn PropertyStore) -> Result<()> {
    let project = load_project(path).with_context(|| format!("opening {}", path.display()))?;
    tracing::info!(job = %project.meta.job_id, items = project.items.len(), "running project");

    let reports = project.evaluate_all(store);
    let failures = reports
        .iter()
        .filter(|r| !matches!(r.outcome, Ok(ref o) if o.passes() != Some(false)))
        .count();

    if json {
        let rows: Vec<_> = reports
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.item.id,
                    "label": r.item.label,
                    "type": r.item.item.calc_type(),
                    "clause": r.item.item.clause(),
                    "result": r.outcome.as_ref().ok(),
                    "error": r.outcome.as_ref().err(),
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&rows).context("serializing results")?;
        println!("{text}");
    } else {
        println!("Job {} - {} ({})", project.meta.job_id, project.meta.client, project.settings.code);
        println!("Engineer: {}", project.meta.engineer);
        println!();
        for report in &reports {
            let item = &report.item.item;
            println!("[{}] {} ({})", item.clause(), report.item.label, item.calc_type());
            match &report.outcome {
                Ok(outcome) => {
                    println!("    {outcome}");
                    if let Some(passes) = outcome.passes() {
                        println!("    {}", status(passes));
                    }
                }
                Err(e) => println!("    {} {e}", e.error_code()),
            }
        }
        println!();
        println!("{} checks, {} failing or rejected", reports.len(), failures);
    }

    if failures > 0 {
        bail!("{failures} of {} checks did not pass", reports.len());
    }
    Ok(())
}

fn new_project(path: &Path, engineer: String, job: String, client: String, config: &AppConfig) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
        tracing::warn!(path = %path.display(), "project files normally use the .{FILE_EXTENSION} extension");
    }

    let mut project = Project::new(engineer, job, client);
    project.settings = config.project_settings();
    save_project(&project, path).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

fn print_tables(store: &TableStore, table: Table) {
    if matches!(table, Table::All | Table::Panels) {
        println!("Subfloor panels (A.1)");
        println!(
            "  {:<12} {:>8} {:>10} {:>10} {:>12} {:>12} {:>8}",
            "panel", "t mm", "EI|| ", "EI_|_", "EA||", "EA_|_", "rho"
        );
        for p in store.panels() {
            println!(
                "  {:<12} {:>8.1} {:>10.0} {:>10.0} {:>12.3e} {:>12.3e} {:>8.0}",
                p.panel,
                p.thickness_mm,
                p.bending_stiffness_parallel,
                p.bending_stiffness_perpendicular,
                p.axial_stiffness_parallel,
                p.axial_stiffness_perpendicular,
                p.density
            );
        }
        println!();
    }

    if matches!(table, Table::All | Table::Lumber) {
        println!("Specified strengths (6.3), MPa");
        println!(
            "  {:<7} {:<7} {:<10} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7}",
            "cat", "species", "grade", "fb", "fv", "fc", "fcp", "ft", "E", "E05"
        );
        for (category, species, grade, s) in store.strengths() {
            println!(
                "  {:<7} {:<7} {:<10} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7}",
                category.code(),
                species,
                grade,
                s.fb,
                s.fv,
                s.fc,
                s.fcp,
                s.ft,
                s.e,
                s.e05
            );
        }
        println!();
    }

    if matches!(table, Table::All | Table::Sizes) {
        println!("Lumber sizes (6.5.2), mm");
        println!(
            "  {:>7} {:>7} {:>7} {:>9} {:>11}",
            "nominal", "dry", "green", "dry rough", "green rough"
        );
        for size in store.sizes() {
            println!(
                "  {:>7} {:>7} {:>7} {:>9} {:>11}",
                size.nominal, size.dry, size.green, size.dry_rough, size.green_rough
            );
        }
        println!();
    }
}

fn status(passes: bool) -> &'static str {
    if passes {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
