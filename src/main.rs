use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fileglass::{config, routes, state::AppState, types::Folder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging: stdout plus a daily rotated file under ./logs
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "fileglass.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Non-blocking writers flush only while their guards live
    let _log_guards = (stdout_guard, file_guard);

    // Load configuration (embedded defaults -> fileglass.toml -> env/.env)
    let app_cfg = config::load()?;
    for folder in Folder::ALL {
        info!("{} -> {}", folder, app_cfg.folders.resolve(folder).display());
    }

    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let state = AppState::new(app_cfg);
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Fileglass listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received. Stopping server...");
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
