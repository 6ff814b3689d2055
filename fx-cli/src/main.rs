//! FX Calc
//!
//! Command-line currency converter backed by a live rate API.

mod config;
mod monitor;
mod notifier;
mod repl;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use currency_catalog::{START_FROM, START_TO};
use fx_client::{RateClient, ReqwestTransport};
use fx_core::{ConnectivityGate, ConversionSession, ConversionState, RateFetchCoordinator, Refresh};
use fx_types::CurrencyCode;

use config::{Config, ConnectionArgs};
use monitor::DeviceMonitor;
use notifier::TerminalNotifier;

#[derive(Parser)]
#[command(name = "fxcalc")]
#[command(author, version, about = "Currency converter", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable currencies
    List,
    /// Convert a single amount
    Convert {
        /// Amount in the "from" currency
        amount: String,
        #[arg(long, default_value_t = START_FROM)]
        from: CurrencyCode,
        #[arg(long, default_value_t = START_TO)]
        to: CurrencyCode,
    },
    /// Interactive conversion session
    Session,
}

type Session = ConversionSession<ReqwestTransport, DeviceMonitor>;

fn build_session(config: &Config, state: ConversionState) -> Result<Session> {
    let notifier = Arc::new(TerminalNotifier);

    let transport = ReqwestTransport::new(config.connect_timeout, config.request_timeout)?;
    let client = RateClient::new(config.endpoint.clone(), transport);
    let gate = ConnectivityGate::new(DeviceMonitor::new(config.assume_online), notifier.clone())
        .with_poll_interval(config.poll_interval);
    let coordinator = RateFetchCoordinator::new(client, gate);

    Ok(ConversionSession::with_state(coordinator, notifier, state))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fx_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => repl::print_catalog(),

        Commands::Convert { amount, from, to } => {
            let config = Config::from_args(&cli.connection)?;
            tracing::debug!(?config, "Loaded configuration");

            let session = build_session(&config, ConversionState::new(from, to))?;
            session.set_amount_text(&amount);
            match session.start().await {
                Refresh::Applied(_) => println!("{}", repl::render(&session.snapshot())),
                Refresh::Failed(failure) => anyhow::bail!("Could not convert: {}", failure),
                Refresh::Superseded => anyhow::bail!("Conversion was superseded"),
            }
        }

        Commands::Session => {
            let config = Config::from_args(&cli.connection)?;
            tracing::debug!(?config, "Loaded configuration");

            let session = Arc::new(build_session(&config, ConversionState::default())?);
            repl::run(session).await?;
        }
    }

    Ok(())
}
