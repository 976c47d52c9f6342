use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, discover, watchlist};
use moodreel_config::{Config, PathManager};
use moodreel_core::criteria_from_inputs;
use std::process::ExitCode;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "moodreel")]
#[command(about = "MoodReel - Find a movie for the mood you're in")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Only show movies released in this year or range (2014, 2010-2015)
    #[arg(long, global = true, value_name = "YEAR")]
    year: Option<String>,

    /// Only show movies rated at least this high (0-10)
    #[arg(long, global = true, value_name = "RATING")]
    min_rating: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover movies for a mood
    #[command(long_about = "Discover popular movies for a mood. Each mood maps to a set of genres; run 'moodreel moods' to list them. Results can be narrowed with --year and --min-rating.")]
    Mood {
        /// Mood tag (happy, sad, excited, romantic, adventurous, mysterious)
        tag: String,
    },
    /// Search movies by title
    #[command(long_about = "Search movies by title. The query must be at least 2 characters after trimming whitespace.")]
    Search {
        /// Title text to search for
        text: String,
    },
    /// Pick a random popular movie and show its details
    Random,
    /// Show details for one movie (trailer, cast, runtime)
    Details {
        /// TMDb movie id
        id: String,
    },
    /// Manage the watchlist
    #[command(long_about = "List, count, or toggle movies in the watchlist. The watchlist holds at most 50 movies by default and is stored on disk.")]
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Interactive session with keyboard shortcuts
    #[command(long_about = "Start an interactive session. Number keys 1-6 pick a mood, 'r' picks a random movie, '/text' searches, 'w' and 'm' switch between the watchlist and movies views, and '?' lists every key.")]
    Browse {
        /// Mood to load on startup
        #[arg(long)]
        mood: Option<String>,
    },
    /// List the available moods and their genres
    Moods,
    /// Configure API keys and settings
    #[command(long_about = "Manage configuration and credentials for MoodReel. A TMDb API key is required for discovery; an OMDb key enables backup results when a mood query fails.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear the watchlist or stored credentials
    #[command(long_about = "Clear stored data. Use --watchlist to empty the watchlist, --credentials to remove stored API keys, or --all to clear both.")]
    Clear {
        /// Clear watchlist and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Empty the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Remove stored API keys
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Show saved movies
    List,
    /// Add a movie, or remove it if already saved
    Toggle {
        /// Movie id (TMDb number or IMDb id)
        id: String,
    },
    /// Number of saved movies
    Count,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current configuration (masks API keys)
    #[command(long_about = "Display the current configuration. API keys are masked unless --full is given.")]
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store an API key in the credentials file
    #[command(long_about = "Store a TMDb (default) or OMDb API key in the credentials file. The key is prompted for when not given. MOODREEL_TMDB_API_KEY and MOODREEL_OMDB_API_KEY override stored keys.")]
    SetKey {
        /// Set the TMDb key (default)
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "omdb")]
        tmdb: bool,

        /// Set the OMDb fallback key
        #[arg(long, action = ArgAction::SetTrue)]
        omdb: bool,

        /// API key (prompted when omitted)
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // A broken config file is reported by the command itself; logging just falls back to stderr.
    let log_file = Config::load_or_default(&PathManager::default().config_file())
        .ok()
        .and_then(|config| config.logging.file);
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let criteria = criteria_from_inputs(cli.year.as_deref(), cli.min_rating.as_deref());

    let result = match cli.command {
        Commands::Mood { tag } => discover::run_mood(&tag, criteria, &output).await,
        Commands::Search { text } => discover::run_search(&text, criteria, &output).await,
        Commands::Random => discover::run_random(&output).await,
        Commands::Details { id } => discover::run_details(&id, &output).await,
        Commands::Watchlist { cmd } => match cmd.unwrap_or(WatchlistCommands::List) {
            WatchlistCommands::List => watchlist::run_list(&output),
            WatchlistCommands::Toggle { id } => watchlist::run_toggle(&id, &output).await,
            WatchlistCommands::Count => watchlist::run_count(&output),
        },
        Commands::Browse { mood } => browse::run_browse(mood, criteria, &output).await,
        Commands::Moods => discover::run_moods(&output),
        Commands::Config { cmd } => {
            config::run_config(cmd.unwrap_or(ConfigCommands::Show { full: false }), &output)
        }
        Commands::Clear { all, watchlist, credentials } => {
            clear::run_clear(all, watchlist, credentials, &output)
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already printed as a one-line message
        Err(report) if report.downcast_ref::<commands::Reported>().is_some() => Ok(ExitCode::FAILURE),
        Err(report) => Err(report),
    }
}
