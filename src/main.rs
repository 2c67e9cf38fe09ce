mod config;
mod http;
mod repl;

use clap::{Parser, Subcommand};
use session::controller::{AnalysisSession, SubmitError};
use session::render::entry_text;
use tokio::io::BufReader;

use config::{ClientConfig, ConfigError};
use http::{HttpAnalysisClient, HttpClientBuildError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    HttpClient(#[from] HttpClientBuildError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Submit(#[from] SubmitError),
}

#[derive(Parser, Debug)]
#[command(name = "allerpredict", about = "Allergen, risk, and ethics checks for food products")]
struct Cli {
    /// Analysis service base URL (overrides `ALLERPREDICT_API_URL`).
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides `ALLERPREDICT_REQUEST_TIMEOUT_SECS`).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Show info-level diagnostics on stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive conversation (default).
    Chat,
    /// Analyze one product and print the report.
    Analyze {
        #[arg(required = true, num_args = 1..)]
        product: Vec<String>,
    },
    /// List catalog products, optionally filtered.
    Products {
        #[arg(long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::INFO } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?.with_overrides(cli.base_url, cli.timeout_secs)?;
    let api = HttpAnalysisClient::new(&config)?;
    tracing::info!(base_url = api.base_url(), "allerpredict client ready");

    let mut session = AnalysisSession::new();
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            session.catalog_mut().load(&api).await;
            println!("AllerPredict: {} products in catalog. /help for commands.", session.catalog().products().len());
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run(&mut session, &api, stdin, &mut stdout).await?;
        }
        Command::Analyze { product } => {
            session.analyze(&api, &product.join(" ")).await?;
            if let Some(entry) = session.log().last() {
                print!("{}", entry_text(entry));
            }
        }
        Command::Products { query } => {
            session.catalog_mut().load(&api).await;
            session.catalog_mut().set_query(query);
            repl::print_products(&session, &mut stdout)?;
        }
    }

    Ok(())
}
