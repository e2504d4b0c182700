//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::commands::show_config::OutputFormat;
use crate::app::config::{DEFAULT_CONFIG_FILE, default_base_dir};
use crate::app::logging::{DEFAULT_LOG_LEVEL, init_logging};
use crate::domain::{AppError, RunArgs};

#[derive(Parser)]
#[command(name = "dependency-updater")]
#[command(version)]
#[command(
    about = "Coordinate dependency updates through Gerrit and report to Teams",
    long_about = None
)]
struct Cli {
    /// Configuration file, relative to the base directory
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Directory holding the configuration file and its template
    #[arg(long, global = true, env = "DEPENDENCY_UPDATER_BASE_DIR")]
    base_dir: Option<PathBuf>,
    /// Branch the update round targets
    #[arg(short, long, global = true, default_value = "dev")]
    branch: String,
    /// Log notifications instead of posting them
    #[arg(long, global = true)]
    simulate: bool,
    /// Discard saved round state before starting
    #[arg(long, global = true)]
    reset: bool,
    /// Do not read or write round state
    #[arg(long, global = true)]
    no_state: bool,
    /// Abandon stale update changes before starting
    #[arg(long, global = true)]
    sweep_changes: bool,
    /// Repositories to update (comma separated)
    #[arg(long, global = true, value_delimiter = ',')]
    repos: Vec<String>,
    /// Repositories whose failures do not block the round (comma separated)
    #[arg(long, global = true, value_delimiter = ',')]
    non_blocking_repos: Vec<String>,
    /// Only report warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        global = true,
        env = "DEPENDENCY_UPDATER_LOG",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings
    #[clap(visible_alias = "c")]
    Config {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Yaml)]
        format: FormatArg,
    },
    /// Post a message to the configured Teams channel
    #[clap(visible_alias = "n")]
    Notify {
        /// Message text
        message: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn run_args(&self) -> RunArgs {
        RunArgs {
            branch: self.branch.clone(),
            simulate: self.simulate,
            reset: self.reset,
            no_state: self.no_state,
            sweep_changes: self.sweep_changes,
            repos: self.repos.clone(),
            non_blocking_repos: self.non_blocking_repos.clone(),
            quiet: self.quiet,
        }
    }
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.quiet);

    let base_dir = cli.base_dir.clone().unwrap_or_else(default_base_dir);
    let args = cli.run_args();

    let result: Result<(), AppError> = match &cli.command {
        Commands::Config { format } => {
            crate::show_config(&base_dir, &cli.config, args, (*format).into()).map(|output| {
                print!("{}", output);
            })
        }
        Commands::Notify { message } => {
            crate::notify(&base_dir, &cli.config, args, message).map(|_| {
                println!("✅ Notification sent");
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
