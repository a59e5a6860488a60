use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_dispatch::config::EnvironmentConfig;
use fleet_dispatch::database::DatabaseConnection;
use fleet_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚕 Fleet Dispatch - Backend de asignación de flota");
    info!("==================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(e);
    }

    let pool = db_connection.pool().clone();

    // Crear router de la API
    let config = EnvironmentConfig::default();
    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);
    let app = fleet_dispatch::app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Endpoints - Cars:");
    info!("   POST /cars - Registrar coche");
    info!("   GET  /cars - Listar coches");
    info!("   GET  /cars/:licensePlate - Obtener coche");
    info!("   DELETE /cars/:licensePlate - Eliminar coche");
    info!("👤 Endpoints - Drivers:");
    info!("   POST /drivers - Registrar conductor");
    info!("   GET  /drivers - Listar conductores (filtros: onlineStatus, username, deleted)");
    info!("   GET  /drivers/:driverId - Obtener conductor");
    info!("   PUT  /drivers/:driverId?longitude=..&latitude=.. - Actualizar ubicación");
    info!("   DELETE /drivers/:driverId - Borrar conductor (lógico)");
    info!("🔗 Endpoints - Asignación:");
    info!("   PUT  /drivers/:driverId/car/:licensePlate - Asignar coche");
    info!("   DELETE /drivers/:driverId/car/:licensePlate - Desasignar coche");

    // Iniciar servidor con apagado graceful
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
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
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
