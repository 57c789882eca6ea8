use clap::{Parser, ValueEnum};
use farmconnect::application::storefront::Storefront;
use farmconnect::config::{
    DEFAULT_CONFIRMATION_DELAY, DEFAULT_FAILURE_WINDOW, DEFAULT_MIN_CONTACT_LEN,
    DEFAULT_SUCCESS_RATE, DEFAULT_SUCCESS_WINDOW, SimulatorConfig,
};
use farmconnect::domain::listing::{Catalog, ListingId};
use farmconnect::infrastructure::confirmation::RandomConfirmation;
use farmconnect::infrastructure::in_memory::InMemoryTransactionLog;
use farmconnect::interfaces::csv::listing_reader::ListingReader;
use farmconnect::interfaces::csv::order_writer::{OrderWriter, write_orders_json};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    /// Compact, human-readable logs.
    Compact,
    /// Structured JSON logs.
    Json,
}

/// Plays one buyer session against the simulated mobile-money checkout and
/// prints the resulting order history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog CSV file (id,name,seller,price,unit,location). Uses the built-in produce list if omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Listing to add to the cart. Repeat to add more units.
    #[arg(long = "add", value_name = "LISTING_ID", required = true)]
    add: Vec<u32>,

    /// Phone number that confirms the payment.
    #[arg(long)]
    phone: String,

    /// Payment attempts before giving up on a declined confirmation.
    #[arg(long, default_value_t = 1)]
    attempts: u32,

    /// Probability that a confirmation goes through.
    #[arg(long, default_value_t = DEFAULT_SUCCESS_RATE)]
    success_rate: f64,

    /// Seed for the confirmation draw, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_CONFIRMATION_DELAY.as_millis() as u64)]
    confirmation_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_SUCCESS_WINDOW.as_millis() as u64)]
    success_window_ms: u64,

    #[arg(long, default_value_t = DEFAULT_FAILURE_WINDOW.as_millis() as u64)]
    failure_window_ms: u64,

    /// Order history output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl Cli {
    fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            confirmation_delay: Duration::from_millis(self.confirmation_delay_ms),
            success_window: Duration::from_millis(self.success_window_ms),
            failure_window: Duration::from_millis(self.failure_window_ms),
            success_rate: self.success_rate,
            min_contact_len: DEFAULT_MIN_CONTACT_LEN,
        }
    }
}

// Logs go to stderr so stdout only carries the order history.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .into_diagnostic()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| miette::miette!("Failed to install log subscriber: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format)?;

    let config = cli.simulator_config();
    let provider = match cli.seed {
        Some(seed) => RandomConfirmation::seeded(&config, seed),
        None => RandomConfirmation::from_config(&config),
    }
    .into_diagnostic()?;

    let catalog = match &cli.catalog {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            ListingReader::new(file).into_catalog()
        }
        None => Catalog::default_produce(),
    };
    info!(listings = catalog.len(), "Catalog loaded");

    let mut shop = Storefront::new(
        catalog,
        Arc::new(provider),
        Box::new(InMemoryTransactionLog::new()),
        config,
    );

    for id in &cli.add {
        shop.add_to_cart(ListingId(*id)).into_diagnostic()?;
    }
    info!(lines = shop.cart().len(), total = %shop.total(), "Cart ready");

    shop.open_checkout();
    shop.set_contact(&cli.phone).into_diagnostic()?;
    for attempt in 1..=cli.attempts {
        shop.checkout().into_diagnostic()?;
        shop.settle().await.into_diagnostic()?;
        if shop.cart().is_empty() {
            break;
        }
        warn!(attempt, "Payment declined; cart kept");
    }

    let orders = shop.transactions().await.into_diagnostic()?;
    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => OrderWriter::new(stdout.lock()).write_orders(orders),
        OutputFormat::Json => write_orders_json(stdout.lock(), &orders),
    }
    .into_diagnostic()?;

    Ok(())
}
