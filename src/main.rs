use anyhow::Result;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use inmobiliaria_api::database::DatabaseConnection;
use inmobiliaria_api::{create_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = AppConfig::from_env();

    // Configurar logging: en desarrollo se registra también el nivel debug
    let development = config
        .as_ref()
        .map(|c| c.server.is_development())
        .unwrap_or(true);
    let default_filter = if development {
        "inmobiliaria_api=debug,tower_http=debug"
    } else {
        "inmobiliaria_api=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("🏘️  Inmobiliaria - API de Propiedades");
    info!("====================================");

    let config = config.map_err(|e| {
        error!("❌ Configuración inválida: {}", e);
        anyhow::anyhow!("Error de configuración: {}", e)
    })?;

    info!(
        "⚙️  Entorno: {} ({})",
        config.server.environment,
        if development { "logs de depuración activos" } else { "logs de depuración desactivados" }
    );

    // Proveedor de conexiones: no conecta hasta la primera solicitud
    let db_connection = DatabaseConnection::new(&config.database);

    let app = create_router(AppState::with_database(db_connection));

    let addr = config.server.server_addr();

    info!("🌐 Servidor corriendo en http://localhost:{}", addr.port());
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Estado del servicio");
    info!("   GET    /api/propiedades - Listar propiedades");
    info!("   GET    /api/propiedades/:id - Obtener propiedad");
    info!("   POST   /api/propiedades - Crear propiedad");
    info!("   PUT    /api/propiedades/:id - Actualizar propiedad");
    info!("   DELETE /api/propiedades/:id - Eliminar propiedad");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
