use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use deskgate_server::{api, invoke, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deskgate")]
#[command(about = "Tool-protocol gateway for the Desk ticketing API", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "DESKGATE_CONFIG", default_value = "deskgate.toml")]
    config: PathBuf,

    /// Desk API base URL (overrides api.base_url)
    #[arg(long, env = "DESK_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the gateway over HTTP
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// Handle a single raw event and print the response
    Invoke {
        /// Event file; `-` or omitted reads stdin
        event: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "deskgate_server=info,deskgate_mcp=info,deskgate_client=info,tower_http=debug".into()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.with_line_number(true).init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = ServerConfig::load(&cli.config)?;
    if let Some(base_url) = cli.api_base_url {
        config.api.base_url = Some(base_url);
    }

    match cli.command {
        Command::Serve { host, port } => {
            tracing::info!("Starting deskgate {}", env!("CARGO_PKG_VERSION"));
            let addr = format!("{}:{}", host, port);
            api::serve(&addr, config).await?;
        }
        Command::Invoke { event } => {
            let response = invoke::run(&config, event.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
