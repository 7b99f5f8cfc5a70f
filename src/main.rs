//! Command-line front end for the intrinsic P/E analyzer.
//!
//! Collects the symbol and valuation assumptions, fetches the company
//! page, and prints the analysis. Assumption rates are entered in percent
//! and converted to fractions here - the engine only ever sees fractions.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use intrinsic_pe::report::{self, ReportFormat};
use intrinsic_pe::{analyze_document, ScreenerClient, ValuationAssumptions, ValueDriver};

#[derive(Parser, Debug)]
#[command(
    name = "intrinsic-pe",
    version,
    about = "Growth-RoC DCF valuation of Screener.in listed companies"
)]
struct Cli {
    /// NSE/BSE symbol, e.g. NESTLEIND
    symbol: String,

    /// Cost of capital in percent
    #[arg(long, default_value_t = 12.0)]
    cost_of_capital: f64,

    /// Return on capital employed in percent (default value-driver model)
    #[arg(long, default_value_t = 20.0)]
    roce: f64,

    /// Payout ratio in percent; switches to the dividend-payout model
    #[arg(long)]
    payout_ratio: Option<f64>,

    /// Growth rate during the high-growth period, in percent
    #[arg(long, default_value_t = 10.0)]
    growth_rate: f64,

    /// Terminal growth rate in percent
    #[arg(long, default_value_t = 2.0)]
    terminal_growth_rate: f64,

    /// High-growth period in years
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=15))]
    high_growth_years: u32,

    /// Fade period in years (0 disables the fade phase)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=15))]
    fade_years: u32,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: ReportFormat,
}

impl Cli {
    /// Build engine assumptions, converting percent inputs to fractions.
    fn assumptions(&self) -> ValuationAssumptions {
        let driver = match self.payout_ratio {
            Some(payout) => ValueDriver::Payout {
                payout_ratio: payout / 100.0,
            },
            None => ValueDriver::ReturnOnCapital {
                roce: self.roce / 100.0,
            },
        };

        ValuationAssumptions {
            driver,
            cost_of_capital: self.cost_of_capital / 100.0,
            growth_rate: self.growth_rate / 100.0,
            terminal_growth_rate: self.terminal_growth_rate / 100.0,
            high_growth_years: self.high_growth_years,
            fade_years: self.fade_years,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    tracing::debug!(symbol = %cli.symbol, "intrinsic-pe v{}", env!("CARGO_PKG_VERSION"));

    let assumptions = cli.assumptions();
    let client = ScreenerClient::new();
    let document = client
        .fetch_company(&cli.symbol)
        .await
        .with_context(|| format!("Failed to fetch data for {}. Please check the symbol.", cli.symbol))?;

    let analysis = analyze_document(&document, &cli.symbol, &assumptions);
    print!("{}", report::render(&analysis, cli.format));

    Ok(())
}
