use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "commute-melody", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gemini API key (overrides MELODY_GEMINI_API_KEY and the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model used for generation (default: gemini-3-flash-preview)
    #[arg(long, global = true)]
    model: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Get 7 commute songs for a free-text theme
    ///
    /// The theme can be a genre, a mood, or a situation, for example
    /// "비 오는 날 감성", "신나는 팝" or "출근하기 싫을 때".
    ///
    /// The playlist always asks for 5 Korean and 2 foreign songs, each with a
    /// short reason why it suits a subway or bus ride.
    Recommend {
        /// Theme, genre, or mood for today's ride
        theme: String,
    },
    /// Get 7 commute songs from your genre, era, and mood preferences
    ///
    /// Select at least one genre or a vibe. Run 'commute-melody options' to
    /// see the values the preference form offers; other values are passed
    /// through as-is.
    Personalize {
        /// Preferred genre (repeatable)
        #[arg(long = "genre", short = 'g')]
        genres: Vec<String>,

        /// Preferred era (repeatable)
        #[arg(long = "era", short = 'e')]
        eras: Vec<String>,

        /// Mood for today's ride
        #[arg(long, short = 'v')]
        vibe: Option<String>,

        /// Anything else: favourite artists, situations
        #[arg(long, short = 'n')]
        note: Option<String>,
    },
    /// List the genres, eras, and vibes the preference form offers
    Options,
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one setting, or the whole config file when no key is given
    Get { key: Option<String> },
    /// Set one setting in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { theme } => {
            let config = commands::load_config(cli.api_key, cli.model)?;
            commands::run_recommend(&config, theme).await?;
        }
        Commands::Personalize {
            genres,
            eras,
            vibe,
            note,
        } => {
            let config = commands::load_config(cli.api_key, cli.model)?;
            let form = commands::build_form(&genres, &eras, vibe.as_deref(), note);
            commands::run_personalize(&config, &form).await?;
        }
        Commands::Options => commands::show_options(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
