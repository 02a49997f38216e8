mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, tasks::TasksSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "workplan",
    about = "Estimate project tasks and allocate them across developers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .workplan/ or .git/)
    #[arg(long, global = true, env = "WORKPLAN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .workplan/ with a default config
    Init,

    /// Import and inspect the task list
    Tasks {
        #[command(subcommand)]
        subcommand: TasksSubcommand,
    },

    /// Show the hour estimate for every task and sub-task
    Estimate {
        /// Read tasks from this JSON file instead of the imported list
        #[arg(long)]
        tasks: Option<PathBuf>,
    },

    /// Assign tasks to developers and compute their schedule
    Allocate {
        /// Developer as NAME or NAME:HOURS_PER_WEEK (repeatable)
        #[arg(long = "dev", short = 'd', required = true)]
        developers: Vec<String>,

        /// Read tasks from this JSON file instead of the imported list
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// First day of the schedule (YYYY-MM-DD, default: today)
        #[arg(long)]
        start: Option<String>,

        /// Draw the Gantt chart after the table
        #[arg(long)]
        chart: bool,
    },

    /// Show the last allocation
    Show {
        /// Draw the Gantt chart
        #[arg(long)]
        chart: bool,
    },

    /// Forget the last allocation
    Clear,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Tasks { subcommand } => cmd::tasks::run(&root, subcommand, cli.json),
        Commands::Estimate { tasks } => cmd::estimate::run(&root, tasks.as_deref(), cli.json),
        Commands::Allocate {
            developers,
            tasks,
            start,
            chart,
        } => cmd::allocate::run(
            &root,
            &developers,
            tasks.as_deref(),
            start.as_deref(),
            chart,
            cli.json,
        ),
        Commands::Show { chart } => cmd::allocate::show(&root, chart, cli.json),
        Commands::Clear => cmd::allocate::clear(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
