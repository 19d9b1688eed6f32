use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "lanesync-server")]
struct Cli {
    /// Path to the SQLite database (defaults to the XDG data dir)
    #[arg(long, env = "LANESYNC_DB")]
    db: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "LANESYNC_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port
    #[arg(long, env = "LANESYNC_PORT", default_value_t = 3720)]
    port: u16,
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
    let db = match &cli.db {
        Some(path) => lanesync_db::Db::open(path)?,
        None => lanesync_db::Db::open_default()?,
    };

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "lanesync-server listening");

    lanesync_server::serve(listener, db).await
}
