use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod config;
mod controllers;
mod db;

use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        Self {
            db,
            config,
            started_at: Instant::now(),
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    config::initialize_database_dir(&config)?;

    log::info!(
        "Initializing database at {} (pool size {})",
        config.database_url,
        config.db_pool_size
    );
    let db = Database::new(
        &config.database_url,
        config.db_pool_size,
        config.db_pool_timeout,
    )
    .map_err(|e| {
        log::error!("Failed to initialize database: {}", e);
        std::io::Error::other(e)
    })?;

    // Fail fast if the store is unreachable
    if let Err(e) = db.ping() {
        log::error!("Error connecting to the database: {}", e);
        return Err(std::io::Error::other(e));
    }
    log::info!("Database connection established");

    let bind_address = config.bind_address.clone();
    let port = config.port;
    let state = web::Data::new(AppState::new(Arc::new(db), config));

    log::info!("Notes backend listening on http://{}:{}", bind_address, port);

    let server = HttpServer::new(move || {
        // The browser client may be served from another origin
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
    })
    .bind((bind_address.as_str(), port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
