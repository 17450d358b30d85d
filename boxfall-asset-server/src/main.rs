mod server;

use std::env;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use server::handle_connection;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(3000);
    let root = env::args().nth(1).unwrap_or_else(|| "public".to_string());

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on {port}...");

    loop {
        let (stream, peer) = listener.accept().await?;
        let root = root.clone();
        tokio::spawn(async move {
            if let Err(error) = handle_connection(stream, &root).await {
                warn!("connection from {peer} failed: {error:#}");
            }
        });
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
