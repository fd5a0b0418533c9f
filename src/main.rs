use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use mooza_match::config::Settings;
use mooza_match::core::{Matcher, Taxonomy};
use mooza_match::models::ErrorResponse;
use mooza_match::routes::{self, AppState};
use mooza_match::services::{BackendClient, DirectoryCache, FriendsService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

fn config_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the log settings apply
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Mooza matching service...");
    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(settings.backend.timeout_secs.unwrap_or(10));
    let backend = Arc::new(
        BackendClient::new(settings.backend.base_url.clone(), settings.backend.api_token.clone(), timeout)
            .map_err(|e| config_error("Failed to create backend client", e))?,
    );

    info!("Backend client initialized for {}", backend.base_url());

    let taxonomy = match &settings.taxonomy.file {
        Some(path) => Taxonomy::load(path).map_err(|e| config_error("Failed to load taxonomy", e))?,
        None => Taxonomy::builtin(),
    };

    info!("Taxonomy loaded: {} categories, {} tags", taxonomy.categories().len(), taxonomy.tag_count());

    let fallback = match &settings.directory.fallback_file {
        Some(path) => DirectoryCache::load_fallback(path)
            .map_err(|e| config_error("Failed to load fallback directory", e))?,
        None => Vec::new(),
    };

    let ttl_secs = settings.directory.ttl_secs.unwrap_or(60);
    let directory = Arc::new(DirectoryCache::new(Duration::from_secs(ttl_secs), fallback));

    info!("Directory cache initialized (TTL: {}s)", ttl_secs);

    // Warm the directory; failures fall back and are retried on first search
    let warmed = directory.snapshot(&backend).await;
    info!("Directory warmed with {} profiles", warmed.len());

    let max_limit = settings.matching.max_limit.unwrap_or(500) as usize;
    let matcher = Matcher::new(settings.matching.default_sort, max_limit);

    info!("Matcher initialized (default sort: {:?}, max limit: {})", settings.matching.default_sort, max_limit);

    // Build application state
    let app_state = AppState {
        backend,
        directory,
        friends: Arc::new(FriendsService::new()),
        taxonomy: Arc::new(taxonomy),
        matcher,
        default_limit: settings.matching.default_limit.map(usize::from),
        reject_unknown_tags: settings.matching.reject_unknown_tags,
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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
