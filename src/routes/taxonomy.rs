use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::models::TagPathResponse;
use crate::routes::{error_response, AppState};
use std::collections::HashMap;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/taxonomy", web::get().to(get_taxonomy))
        .route("/taxonomy/path", web::get().to(get_tag_path));
}

/// GET /api/v1/taxonomy
async fn get_taxonomy(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.taxonomy.as_ref())
}

/// GET /api/v1/taxonomy/path?tag={tag}
async fn get_tag_path(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let tag = match query.get("tag") {
        Some(tag) => tag,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing tag parameter",
                "tag query parameter is required",
            );
        }
    };

    let paths = state.taxonomy.paths(tag);
    if paths.is_empty() {
        return error_response(StatusCode::NOT_FOUND, "unknown_tag", format!("Unknown tag: {}", tag));
    }

    HttpResponse::Ok().json(TagPathResponse {
        tag: tag.clone(),
        paths,
    })
}
