use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use todo_server::{config::DEFAULT_PORT, AppState, ServerConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File-backed todo HTTP service.
#[derive(Debug, Parser)]
#[command(name = "todo-server", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// JSON file holding the todo array.
    #[arg(long, default_value = "todos.json")]
    todos_file: PathBuf,

    /// Request audit log, appended to.
    #[arg(long, default_value = "logs.txt")]
    log_file: PathBuf,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        ServerConfig {
            bind_addr: SocketAddr::new(cli.host, cli.port),
            todos_file: cli.todos_file,
            log_file: cli.log_file,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from(Cli::parse());

    let listener = TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    let state = AppState::from_config(&config);
    tracing::info!(
        todos = %config.todos_file.display(),
        log = %config.log_file.display(),
        "Server running at http://{addr}"
    );
    todo_server::run_until(listener, state, shutdown_signal()).await?;
    Ok(())
}
