//! FX CLI
//!
//! Command-line front end for the currency converter. Builds the
//! Frankfurter adapter, wraps it in the conversion pipeline, and runs one
//! subcommand.

mod config;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_client::FrankfurterClient;
use fx_service::CurrencyService;
use fx_types::{ConversionOutcome, ConversionRequest, CurrencyCode, SupportedCurrencies};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency conversion via the Frankfurter API", long_about = None)]
struct Cli {
    /// Base URL of the rate service (overrides FX_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Cache time-to-live in milliseconds (overrides FX_CACHE_TTL_MS)
    #[arg(long)]
    ttl_ms: Option<u64>,

    /// Comma-separated supported currencies (overrides FX_SUPPORTED_CURRENCIES)
    #[arg(long)]
    currencies: Option<SupportedCurrencies>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        from: CurrencyCode,
        #[arg(long)]
        to: CurrencyCode,
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
    /// List supported currencies
    Currencies,
    /// Check whether a currency code is supported
    Check {
        /// Currency code, e.g. USD
        code: String,
    },
    /// Run the walkthrough: two conversions, a cached repeat, and lookups
    Demo,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_service=debug,fx_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(ms) = cli.ttl_ms {
        config.cache_ttl = Duration::from_millis(ms);
    }
    if let Some(supported) = cli.currencies {
        config.supported = supported;
    }

    tracing::debug!("Using rate service: {}", config.api_url);
    let client = FrankfurterClient::new(&config.api_url);
    let service = CurrencyService::with_ttl(client, config.supported, config.cache_ttl);

    match cli.command {
        Commands::Convert { from, to, amount } => {
            let outcome = service
                .convert(ConversionRequest::new(from, to, amount))
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Currencies => {
            for code in service.supported_currencies().iter() {
                println!("{}  {}  {}", code, code.symbol(), code.name());
            }
        }

        Commands::Check { code } => match service.is_supported(&code) {
            Some(code) => println!("✅ {} is supported", code),
            None => {
                println!("❌ {} is not supported", code);
                std::process::exit(1);
            }
        },

        Commands::Demo => run_demo(&service).await?,
    }

    Ok(())
}

async fn run_demo(service: &CurrencyService<FrankfurterClient>) -> Result<()> {
    let rule = "=".repeat(50);
    println!("\n{}\n🚀 Currency Conversion Demo\n{}\n", rule, rule);

    println!("📍 Example 1: USD to THB");
    let usd_thb = ConversionRequest::new(CurrencyCode::USD, CurrencyCode::THB, 100.0);
    display_outcome(&service.convert(usd_thb).await?);

    println!("\n📍 Example 2: EUR to JPY");
    let eur_jpy = ConversionRequest::new(CurrencyCode::EUR, CurrencyCode::JPY, 50.0);
    display_outcome(&service.convert(eur_jpy).await?);

    println!("\n📍 Example 3: Cached call (USD to THB again)");
    display_outcome(&service.convert(usd_thb).await?);

    println!("\n📍 Example 4: Supported currencies");
    println!("Supported: {}", service.supported_currencies());

    println!("\n📍 Example 5: Currency validation");
    if let Some(code) = service.is_supported("USD") {
        println!("✅ {} is supported", code);
    }

    println!("\n{}\n✨ Demo Complete!\n{}\n", rule, rule);
    Ok(())
}

fn display_outcome(outcome: &ConversionOutcome) {
    match outcome {
        ConversionOutcome::Success(data) => {
            println!("  Base: {}", data.base);
            println!("  Amount: {}", data.amount);
            println!("  Date: {}", data.date);
            for (code, value) in &data.rates {
                println!("  Rate: {} {}", code, value);
            }
        }
        ConversionOutcome::Failure(err) => eprintln!("  ❌ Error: {}", err.message),
    }
}
