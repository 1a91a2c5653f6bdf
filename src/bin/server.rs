//! Message board server
//!
//! Run with: board-server

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use board::config::{LogFormat, ServerConfig, DEFAULT_PORT};
use board::realtime::Channels;
use board::{App, BoardServer, CreateMessage, MessageService};

/// Text of the message inserted at startup
const SEED_TEXT: &str = "Hello world from the server";

#[derive(Parser, Debug)]
#[command(name = "board-server")]
#[command(about = "In-memory message board with REST and real-time WebSocket APIs")]
struct Args {
    /// Address to bind
    #[arg(long, env = "BOARD_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "BOARD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory served as static files at `/`
    #[arg(long, env = "BOARD_STATIC_ROOT", default_value = ".")]
    static_root: String,

    /// Skip inserting the demo message on startup
    #[arg(long, env = "BOARD_NO_SEED")]
    no_seed: bool,

    /// Log format (text or json)
    #[arg(long, env = "BOARD_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_format: LogFormat = args.log_format.parse()?;
    init_tracing(log_format);

    let config = ServerConfig::new(&args.host, args.port, &args.static_root)?
        .with_seed(!args.no_seed)
        .with_log_format(log_format);

    let app = App::new(MessageService::new(), Channels::new());

    let server = BoardServer::new(app.clone(), config.clone());
    let listener = server.bind().await?;

    if config.seed {
        let seeded = app.create(CreateMessage::new(SEED_TEXT));
        tracing::debug!(id = seeded.id, "seeded demo message");
    }

    tracing::info!(
        static_root = %config.static_root.display(),
        "message board starting..."
    );
    server.serve(listener).await?;

    Ok(())
}
