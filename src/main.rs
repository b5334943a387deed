use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use optsnap::audit::AuditLogger;
use optsnap::cli::{
    handle_list, handle_log, handle_now, handle_restore, handle_tick, handle_value_command,
    handle_view, ListArgs, NowArgs, RestoreArgs, ValueCommands, ViewArgs,
};
use optsnap::clock::SystemClock;
use optsnap::config::{OptsnapPaths, Settings};
use optsnap::restore::RestoreController;
use optsnap::scheduler::{BackupScheduler, ScheduleRegistry};
use optsnap::snapshot::{SnapshotStore, HISTORY_PREFIX};
use optsnap::storage::JsonOptionStore;

#[derive(Parser)]
#[command(
    name = "optsnap",
    author = "Kaylee Beyene",
    version,
    about = "Scheduled snapshots and restore for key-value options",
    long_about = "optsnap keeps a short rolling history of a fixed set of options. \
                  A daily backup captures each option's live value, and the \
                  list, view and restore commands let you inspect and roll back \
                  to any retained snapshot."
)]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Comma-separated option names to track instead of the configured list
    #[arg(long, global = true, env = "OPTSNAP_TRACKED_OPTIONS", value_delimiter = ',')]
    options: Option<Vec<String>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List backups of every tracked option
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a backed-up value
    View(ViewArgs),

    /// Restore an option from a backup
    Restore(RestoreArgs),

    /// Back up all tracked options immediately
    Now(NowArgs),

    /// Run scheduled events that are due
    Tick,

    /// Show recent captures and restores
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Read or write live option values
    #[command(subcommand)]
    Value(ValueCommands),

    /// Write the default settings and data files
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Initialize paths and settings
    let paths = OptsnapPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(names) = cli.options {
        settings = settings.with_tracked_options(names)?;
    }

    let command = match cli.command {
        Some(Commands::Init) => {
            println!("Initializing optsnap at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            JsonOptionStore::open(paths.options_file())?.save()?;
            println!("Initialization complete!");
            println!();
            println!("Tracked options: {}", settings.tracked_options.join(", "));
            println!("Backups kept per option: {}", settings.retention.count);
            return Ok(());
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("optsnap - Scheduled snapshots for key-value options");
            println!();
            println!("Run 'optsnap --help' for usage information.");
            return Ok(());
        }
    };

    // Initialize storage and register the daily backup
    paths.ensure_directories()?;
    let store = JsonOptionStore::open(paths.options_file())?;
    let registry = ScheduleRegistry::open(paths.schedule_file())?;
    let audit = AuditLogger::new(paths.audit_log());
    let clock = SystemClock;

    let snapshots = SnapshotStore::new(&store, &clock, &settings).with_audit(&audit);
    let scheduler = BackupScheduler::new(&settings, &snapshots);
    scheduler.ensure_scheduled(&registry)?;
    let controller = RestoreController::new(&settings, &snapshots);

    match command {
        Commands::List(args) => handle_list(&controller, args)?,
        Commands::View(args) => handle_view(&controller, args)?,
        Commands::Restore(args) => handle_restore(&controller, args)?,
        Commands::Now(args) => handle_now(&controller, args)?,
        Commands::Tick => handle_tick(&registry, &scheduler, &clock)?,
        Commands::Log { limit } => handle_log(&audit, limit)?,
        Commands::Value(cmd) => handle_value_command(&store, cmd)?,
        // Handled before storage is opened
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}

fn print_config(paths: &OptsnapPaths, settings: &Settings) {
    println!("optsnap Configuration");
    println!("=====================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Options store:   {}", paths.options_file().display());
    println!("Schedule:        {}", paths.schedule_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!("Initialized:     {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  Tracked options: {}", settings.tracked_options.join(", "));
    println!("  Backups kept:    {}", settings.retention.count);
    println!("  History prefix:  {}", HISTORY_PREFIX);
}
