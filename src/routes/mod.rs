// Route exports
pub mod friends;
pub mod matches;
pub mod taxonomy;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::models::ErrorResponse;

pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(friends::configure)
            .configure(taxonomy::configure),
    );
}

/// JSON error body in the shape every endpoint uses
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}
