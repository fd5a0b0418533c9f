use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{FavoriteToggleResponse, FriendMutationResponse, FriendsResponse, MembershipRequest};
use crate::routes::{error_response, AppState};
use crate::services::FriendsError;
use std::collections::HashMap;

/// Configure friend and favorite routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/friends", web::get().to(get_friends))
        .route("/friends", web::post().to(add_friend))
        .route("/friends", web::delete().to(remove_friend))
        .route("/favorites/toggle", web::post().to(toggle_favorite));
}

fn friends_error_response(err: FriendsError) -> HttpResponse {
    match err {
        FriendsError::Membership(e) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_membership", e.to_string())
        }
        FriendsError::Backend(e) => {
            tracing::error!("Friend update failed at backend: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "backend_error", e.to_string())
        }
    }
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

/// Friends and favorites of a user
///
/// GET /api/v1/friends?userId={userId}
///
/// Re-reads the friend list from the backend first; favorites are local.
async fn get_friends(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing userId parameter",
                "userId query parameter is required",
            );
        }
    };

    let membership = state.friends.sync_friends(&state.backend, user_id).await;

    HttpResponse::Ok().json(FriendsResponse {
        user_id: user_id.clone(),
        friends: membership.friends(),
        favorites: membership.favorites(),
    })
}

/// Add a friend
///
/// POST /api/v1/friends
///
/// Request body:
/// ```json
/// { "userId": "string", "targetUserId": "string" }
/// ```
async fn add_friend(state: web::Data<AppState>, req: web::Json<MembershipRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state
        .friends
        .add_friend(&state.backend, &req.user_id, &req.target_user_id)
        .await
    {
        Ok(is_friend) => HttpResponse::Ok().json(FriendMutationResponse {
            success: true,
            is_friend,
        }),
        Err(e) => friends_error_response(e),
    }
}

/// Remove a friend
///
/// DELETE /api/v1/friends, same body as POST
async fn remove_friend(state: web::Data<AppState>, req: web::Json<MembershipRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state
        .friends
        .remove_friend(&state.backend, &req.user_id, &req.target_user_id)
        .await
    {
        Ok(is_friend) => HttpResponse::Ok().json(FriendMutationResponse {
            success: true,
            is_friend,
        }),
        Err(e) => friends_error_response(e),
    }
}

/// Toggle a favorite (local only)
///
/// POST /api/v1/favorites/toggle
async fn toggle_favorite(state: web::Data<AppState>, req: web::Json<MembershipRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.friends.toggle_favorite(&req.user_id, &req.target_user_id) {
        Ok(is_favorite) => HttpResponse::Ok().json(FavoriteToggleResponse {
            success: true,
            is_favorite,
        }),
        Err(e) => friends_error_response(e),
    }
}
