//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use clipscrape_core::{DescriptionSource, HttpFetcher};
use clipscrape_shared::{
    AppConfig, FetchConfig, SceneFragment, init_config, load_config, load_config_from,
};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// clipscrape: scene metadata and clean descriptions from Clips4Sale.
#[derive(Parser, Debug)]
#[command(
    name = "clipscrape",
    version,
    about = "Scrape Clips4Sale scene metadata with a reconciled clip description.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.clipscrape/clipscrape.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CLIPSCRAPE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Read a scene fragment from stdin and print the scraped scene as JSON.
    Scene,

    /// Print the reconciled description of a clip page.
    Description {
        /// Clip page URL.
        url: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries
/// only the command's output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "clipscrape=info",
        1 => "clipscrape=debug",
        _ => "clipscrape=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Scene => {
            let input = std::io::read_to_string(std::io::stdin().lock())
                .wrap_err("failed to read scene fragment from stdin")?;
            cmd_scene(&cli, &input).await
        }
        Command::Description { url } => cmd_description(&cli, url).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&cli).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Config file (or defaults), with CLI flag overrides applied.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(secs) = cli.timeout {
        config.http.timeout_secs = secs;
    }

    Ok(config)
}

fn fetch_config(cli: &Cli) -> Result<FetchConfig> {
    let config = resolve_config(cli)?;
    Ok(FetchConfig::try_from(&config)?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_scene(cli: &Cli, input: &str) -> Result<()> {
    // Usage errors surface before any client is built or request made.
    let fragment = SceneFragment::from_json(input)?;
    let url = fragment.require_url()?;

    let config = fetch_config(cli)?;
    let fetcher = HttpFetcher::new(&config)?;

    let record = clipscrape_core::scrape_scene(&fetcher, &config, url).await?;
    println!("{}", record.to_json_pretty()?);
    Ok(())
}

async fn cmd_description(cli: &Cli, url: &str) -> Result<()> {
    let primary = Url::parse(url).wrap_err_with(|| format!("invalid clip URL '{url}'"))?;

    let config = fetch_config(cli)?;
    let fetcher = HttpFetcher::new(&config)?;

    let description = clipscrape_core::reconcile(&fetcher, &config, &primary).await?;

    match description.source {
        DescriptionSource::CrossReferenced {
            mismatches,
            redactions,
        } => info!(mismatches, redactions, "cross-referenced with lite page"),
        DescriptionSource::BaseOnly => info!("lite page unavailable, base description only"),
    }

    println!("{}", description.text);
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
