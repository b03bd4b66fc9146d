mod doctor;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use waypoint_core::config::{AppConfig, Credentials};
use waypoint_core::types::Variables;
use waypoint_gateway::GatewayServer;
use waypoint_graphql::{Dispatcher, RequestContext};
use waypoint_llm::ProviderSelector;

#[derive(Parser)]
#[command(
    name = "waypoint",
    version,
    about = "GraphQL-shaped gateway for greetings, MCP data and AI chat"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "waypoint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway (default)
    Serve {
        /// Address to bind, overrides gateway.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Dispatch a single GraphQL request and print the response envelope
    Query {
        /// Raw query text, e.g. 'query GetGreeting { greeting }'
        query: String,
        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
    /// Show effective configuration (API keys masked)
    Config,
    /// Run configuration health checks
    Doctor,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("waypoint=info,tower_http=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "waypoint", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        None => serve(config, None).await,
        Some(Commands::Serve { bind }) => serve(config, bind).await,
        Some(Commands::Query { query, variables }) => run_query(&config, &query, variables.as_deref()).await,
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config.redacted())?);
            Ok(())
        }
        Some(Commands::Doctor) => {
            doctor::run_doctor(&cli.config, &config);
            Ok(())
        }
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

async fn serve(config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.gateway.bind.clone());

    let credentials = Credentials::resolve(&config);
    match ProviderSelector::from_config(&config).select(&credentials) {
        Some((slot, _)) => info!(provider = %slot.label, "Chat provider configured"),
        None => warn!("No DEEPSEEK_API_KEY or OPENAI_API_KEY set, chat runs in mock mode"),
    }

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        signal.cancel();
    });

    GatewayServer::new(config).run(&bind, shutdown).await
}

async fn run_query(config: &AppConfig, query: &str, variables: Option<&str>) -> anyhow::Result<()> {
    let variables: Variables = match variables {
        Some(raw) => serde_json::from_str(raw).context("--variables must be a JSON object")?,
        None => Variables::new(),
    };

    let credentials = Credentials::resolve(config);
    let envelope = Dispatcher::from_config(config)
        .dispatch(
            query,
            &variables,
            RequestContext {
                credentials: &credentials,
            },
        )
        .await;

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
