//! userchain API server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use userchain_ledger::Ledger;

mod app;
mod errors;
mod routes;

#[derive(Parser)]
#[command(name = "userchain-server")]
#[command(about = "HTTP API over the userchain ledger", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Directory of static files served at /
    #[arg(long, default_value = "public")]
    static_dir: PathBuf,

    /// Register a couple of demo users at startup
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    // The single ledger handle shared by every request for the lifetime of
    // the process. Nothing is persisted.
    let ledger = Arc::new(Ledger::new());

    if args.seed_demo {
        seed_demo_users(&ledger);
    }

    let app = app::build(ledger, &args.static_dir);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "ledger API server listening");
    log_routes();

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}

fn seed_demo_users(ledger: &Ledger) {
    for (username, email) in [("demo1", "demo1@example.com"), ("demo2", "demo2@example.com")] {
        match ledger.register(username, email) {
            Ok(user) => tracing::info!(username, id = %user.id, "seeded demo user"),
            Err(e) => tracing::warn!(username, error = %e, "failed to seed demo user"),
        }
    }
}

fn log_routes() {
    tracing::info!("GET  /api/info           - ledger info");
    tracing::info!("GET  /api/blocks         - all blocks");
    tracing::info!("GET  /api/block/:index   - one block");
    tracing::info!("GET  /api/users          - all users");
    tracing::info!("GET  /api/user/:username - one user");
    tracing::info!("POST /api/users          - register a user");
    tracing::info!("GET  /api/validate       - chain integrity check");
    tracing::info!("GET  /api/search/:query  - search users and blocks");
}
