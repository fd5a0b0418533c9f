use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Matcher, Taxonomy};
use crate::models::{
    DirectoryRefreshResponse, HealthResponse, SearchRequest, SearchResponse, UserProfile,
};
use crate::routes::error_response;
use crate::services::{find_profile, BackendClient, BackendError, DirectoryCache, FriendsService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub directory: Arc<DirectoryCache>,
    pub friends: Arc<FriendsService>,
    pub taxonomy: Arc<Taxonomy>,
    pub matcher: Matcher,
    pub default_limit: Option<usize>,
    pub reject_unknown_tags: bool,
}

/// Configure search and directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/friends/search", web::post().to(search_friends))
        .route("/directory/refresh", web::post().to(refresh_directory));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Status follows the last fetch; the cached entry may simply have expired
    let status = if state.directory.last_fetch_ok() { "healthy" } else { "degraded" };
    let directory_size = state.directory.last_fetch_len();

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        directory_size,
    })
}

/// Resolve the viewer from the snapshot, falling back to a direct lookup
async fn resolve_viewer(
    state: &AppState,
    snapshot: &[UserProfile],
    viewer_id: &str,
) -> Result<UserProfile, HttpResponse> {
    if let Some(viewer) = find_profile(snapshot, viewer_id) {
        return Ok(viewer.clone());
    }

    match state.backend.get_profile(viewer_id).await {
        Ok(viewer) => Ok(viewer),
        Err(BackendError::NotFound(_)) => Err(error_response(
            StatusCode::NOT_FOUND,
            "viewer_not_found",
            format!("No profile for user {}", viewer_id),
        )),
        Err(e) => {
            tracing::error!("Failed to resolve viewer {}: {}", viewer_id, e);
            Err(error_response(StatusCode::BAD_GATEWAY, "backend_error", e.to_string()))
        }
    }
}

/// Validate a search request against the schema and the taxonomy
fn check_request(state: &AppState, req: &SearchRequest) -> Result<(), HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return Err(error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string()));
    }

    let unknown = state.taxonomy.unknown_tags(&req.selected_tags);
    if !unknown.is_empty() {
        if state.reject_unknown_tags {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "unknown_tags",
                format!("Unknown tags: {}", unknown.join(", ")),
            ));
        }
        tracing::debug!("Search names tags outside the taxonomy: {:?}", unknown);
    }

    Ok(())
}

/// Rank the directory for a viewer
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "viewerId": "string",
///   "selectedTags": ["Гитара"],
///   "strictMode": false,
///   "sortKey": "match_count|name|city|country",
///   "limit": 20
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(response) = check_request(&state, &req) {
        return response;
    }

    let snapshot = state.directory.snapshot(&state.backend).await;

    let viewer = match resolve_viewer(&state, &snapshot, &req.viewer_id).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    let query = state.matcher.query(
        req.selected_tags.clone(),
        req.strict_mode,
        req.sort_key,
        req.limit.map(usize::from).or(state.default_limit),
    );

    let membership = state.friends.sync_friends(&state.backend, &viewer.user_id).await;

    let mut result = state.matcher.rank(&viewer, &snapshot, &query);
    state.matcher.annotate(&mut result, &membership);

    tracing::info!(
        "Returning {} of {} matches for viewer {} (from {} candidates)",
        result.matches.len(),
        result.total_matched,
        viewer.user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(SearchResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        total_matched: result.total_matched,
    })
}

/// Rank the viewer's friends (the Friends page)
///
/// POST /api/v1/friends/search, same body as `/search`
async fn search_friends(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(response) = check_request(&state, &req) {
        return response;
    }

    let snapshot = state.directory.snapshot(&state.backend).await;

    let viewer = match resolve_viewer(&state, &snapshot, &req.viewer_id).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    let membership = state.friends.sync_friends(&state.backend, &viewer.user_id).await;

    let query = state.matcher.query(
        req.selected_tags.clone(),
        req.strict_mode,
        req.sort_key,
        req.limit.map(usize::from).or(state.default_limit),
    );

    let result = state.matcher.rank_friends(&viewer, &snapshot, &membership, &query);

    HttpResponse::Ok().json(SearchResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        total_matched: result.total_matched,
    })
}

/// Refetch the directory now
///
/// POST /api/v1/directory/refresh
async fn refresh_directory(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.directory.refresh(&state.backend).await;

    HttpResponse::Ok().json(DirectoryRefreshResponse {
        directory_size: snapshot.len(),
    })
}
