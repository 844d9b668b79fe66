use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use dotenvy::dotenv;

use cargo_tracking::config::environment::EnvironmentConfig;
use cargo_tracking::database::{self, DatabaseConnection};
use cargo_tracking::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use cargo_tracking::routes;
use cargo_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("📦 Cargo Tracking - Seguimiento y cobro de envíos");
    info!("=================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Crear tablas si no existen, antes de aceptar requests
    if let Err(e) = database::schema::init_schema(&pool).await {
        error!("❌ Error inicializando el esquema: {}", e);
        return Err(e);
    }
    info!("✅ Esquema de base de datos listo");

    // CORS: permisivo en desarrollo o sin orígenes configurados
    let cors = if config.is_development() || config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let server_url = config.server_url();
    let app_state = AppState::new(pool, config);

    let app = routes::create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", server_url);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Sonda de conectividad");
    info!("📦 Envíos:");
    info!("   GET    /shipments - Listar envíos (filtros + paginación)");
    info!("   POST   /shipments - Registrar envío");
    info!("   GET    /shipments/:id - Obtener envío");
    info!("   PUT    /shipments/:id - Actualizar envío (gate de PIN hacia entrega)");
    info!("   PATCH  /shipments/:id/status - Patch de estado (sin gate)");
    info!("   GET    /shipments/:id/payments - Historial de pagos");
    info!("   POST   /shipments/:id/payments - Registrar pago");
    info!("🔐 PINes de entrega:");
    info!("   POST /pins/ensure - Asegurar PIN de un teléfono");
    info!("   POST /pins/lookup - Consultar PIN (uso interno)");
    info!("📊 Estadísticas y contenido:");
    info!("   GET  /stats/summary - Resumen global");
    info!("   GET  /content - Leer secciones del sitio");
    info!("   PUT  /content - Guardar secciones del sitio");

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
