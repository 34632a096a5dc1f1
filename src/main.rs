use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use camp_finder::config::Settings;
use camp_finder::core::{BookingLedger, CampFinder, ZipDirectory};
use camp_finder::routes::{self, AppState};
use camp_finder::services::{CacheManager, CampCatalog, CatalogLoader, PostgresClient, SessionStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_tracing(level: &str, format: &str) {
    // LOG_LEVEL / RUST_LOG still win over the config file
    let filter = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|l| EnvFilter::try_new(l).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting camp finder service...");

    let zips = match ZipDirectory::with_overrides(&settings.catalog.zip_codes_file) {
        Ok(zips) => zips,
        Err(e) => {
            warn!("Ignoring ZIP code overrides ({}), using built-in Seattle ZIPs", e);
            ZipDirectory::seattle()
        }
    };

    info!("ZIP directory ready with {} codes", zips.len());

    // Redis is optional - the in-memory tier is always available
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(16);
    let cache = Arc::new(CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await);

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_redis()
    );

    let loader = CatalogLoader::new(&settings.catalog)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let catalog = Arc::new(CampCatalog::new(loader, cache));

    let initial = catalog.refresh().await;
    info!("Catalog loaded with {} camps", initial.len());

    let postgres = match &settings.database.url {
        Some(url) => match PostgresClient::from_settings(
            url,
            settings.database.max_connections,
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                error!("Failed to connect to PostgreSQL ({}), feedback and booking history disabled", e);
                None
            }
        },
        None => {
            info!("No database configured, feedback and booking history disabled");
            None
        }
    };

    let ledger = match &postgres {
        Some(pg) => match pg.load_bookings().await {
            Ok(bookings) => {
                info!("Restored {} bookings", bookings.len());
                BookingLedger::from_bookings(bookings)
            }
            Err(e) => {
                error!("Failed to load bookings: {}", e);
                BookingLedger::new()
            }
        },
        None => BookingLedger::new(),
    };

    let app_state = AppState {
        catalog,
        finder: CampFinder::new(settings.search.max_results),
        zips: Arc::new(zips),
        sessions: Arc::new(SessionStore::new(
            settings.session.capacity,
            settings.session.idle_timeout_secs,
        )),
        bookings: Arc::new(Mutex::new(ledger)),
        postgres,
        search: Arc::new(settings.search.clone()),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
