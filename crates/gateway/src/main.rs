use gateway::{app, build_app_state, get_config_info, get_log_level, setup_logger};
use log::info;
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli: gateway::Cli = get_config_info();
    setup_logger().level(get_log_level(&cli)).apply()?;

    let socket_addr = SocketAddr::from_str(&format!(
        "{}:{}",
        cli.domain.clone().unwrap_or(String::from("127.0.0.1")),
        cli.port.clone().unwrap_or(String::from("3000"))
    ))?;

    let app_state = build_app_state(&cli).await?;
    let listener = TcpListener::bind(socket_addr).await?;
    info!("listening on http://{}", socket_addr);

    axum::serve(
        listener,
        app(app_state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
