// Rust guideline compliant 2026-10-19

//! direq CLI Application
//!
//! Command-line interface for comparing directory trees and managing
//! directory snapshots.

use clap::Parser;
use direq_cli::commands::{self, diff::DiffArgs, FilterArgs};
use direq_cli::terminal::print_error;
use direq_cli::{create_formatter, is_stdout_terminal, logging, CliContext};
use direq_snapshot::SnapshotStore;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "direq",
    version,
    about = "direq: directory equality and directory snapshots",
    long_about = "direq compares a received file or directory tree against an expected one and renders a word-level diff. It also records and checks directory snapshots.",
    after_help = "Examples:\n  direq diff target/site tests/expected/site\n  direq diff out expected --exclude '**/*.log' --json\n  direq snapshot update out --name test_render\n  direq snapshot check out --name test_render\n  direq snapshot prune --keep test_render,test_render.1 --dry-run\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Color mode
    #[arg(long, global = true, value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, clap::Args)]
struct FilterFlags {
    /// Only compare files matching this relative-path glob
    #[arg(long)]
    include: Vec<String>,

    /// Skip entries matching this relative-path glob
    #[arg(long)]
    exclude: Vec<String>,

    /// Ignore entries whose file name matches this glob
    #[arg(long)]
    ignore: Vec<String>,

    /// Also compare version-control and cache directories
    #[arg(long)]
    no_default_ignores: bool,
}

impl From<FilterFlags> for FilterArgs {
    fn from(flags: FilterFlags) -> Self {
        Self {
            include: flags.include,
            exclude: flags.exclude,
            ignore: flags.ignore,
            no_default_ignores: flags.no_default_ignores,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Compare a received path against an expected path
    Diff {
        /// Received file or directory
        received: PathBuf,

        /// Expected file or directory
        expected: PathBuf,

        #[command(flatten)]
        filter: FilterFlags,

        /// Context lines around each hunk
        #[arg(long)]
        context: Option<usize>,
    },

    /// Manage snapshots
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum SnapshotAction {
    /// Check received data against a snapshot
    Check {
        /// Received file or directory
        received: PathBuf,

        /// Snapshot name
        #[arg(long)]
        name: String,

        /// Snapshot directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterFlags,
    },

    /// Record received data as a snapshot
    Update {
        /// Received file or directory
        received: PathBuf,

        /// Snapshot name
        #[arg(long)]
        name: String,

        /// Snapshot directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterFlags,
    },

    /// List snapshots
    List {
        /// Only list snapshots of this test
        #[arg(long)]
        test: Option<String>,

        /// Snapshot directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Delete a snapshot
    Delete {
        /// Snapshot name
        name: String,

        /// Snapshot directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Delete snapshots that are no longer used
    Prune {
        /// Snapshot names to keep
        #[arg(long, value_delimiter = ',')]
        keep: Vec<String>,

        /// Snapshot directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Only list what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(true) => std::process::exit(1),
        Ok(false) => {}
        Err(e) => {
            if json {
                eprintln!("{}", create_formatter(true).format_error(&format!("{:#}", e)));
            } else {
                print_error(&format!("{:#}", e));
            }
            std::process::exit(2);
        }
    }
}

/// Runs the selected command. `Ok(true)` means the compared paths differ.
fn run(cli: Cli) -> anyhow::Result<bool> {
    logging::init_tracing(&cli.log_level)?;

    let context = CliContext::load(
        cli.config.as_deref(),
        cli.color.as_deref(),
        cli.no_color,
        cli.json,
        is_stdout_terminal(),
    )?;
    let formatter = create_formatter(cli.json);

    match cli.command {
        Some(Commands::Diff {
            received,
            expected,
            filter,
            context: lines,
        }) => {
            let args = DiffArgs {
                received,
                expected,
                filter: filter.into(),
                context: lines,
            };
            commands::diff::execute(&args, &context, formatter.as_ref())
        }
        Some(Commands::Snapshot { action }) => match action {
            SnapshotAction::Check {
                received,
                name,
                dir,
                filter,
            } => {
                let store = SnapshotStore::new(context.snapshot_dir(dir));
                commands::snapshot::check(
                    &store,
                    &name,
                    &received,
                    &filter.into(),
                    &context,
                    formatter.as_ref(),
                )
            }
            SnapshotAction::Update {
                received,
                name,
                dir,
                filter,
            } => {
                let store = SnapshotStore::new(context.snapshot_dir(dir));
                commands::snapshot::update(&store, &name, &received, &filter.into(), &context)
                    .map(|()| false)
            }
            SnapshotAction::List { test, dir } => {
                let store = SnapshotStore::new(context.snapshot_dir(dir));
                commands::snapshot::list(&store, test.as_deref(), formatter.as_ref())
                    .map(|()| false)
            }
            SnapshotAction::Delete { name, dir } => {
                let store = SnapshotStore::new(context.snapshot_dir(dir));
                commands::snapshot::delete(&store, &name).map(|()| false)
            }
            SnapshotAction::Prune { keep, dir, dry_run } => {
                let store = SnapshotStore::new(context.snapshot_dir(dir));
                commands::snapshot::prune(&store, &keep, dry_run, formatter.as_ref())
                    .map(|_| false)
            }
        },
        None => {
            println!("Use --help for usage information");
            Ok(false)
        }
    }
}
