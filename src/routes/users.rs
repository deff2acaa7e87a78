use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::db::user_repository::RepositoryError;
use crate::models::user::{NewUser, OauthProvider};
use crate::responses::JsonResponse;
use crate::state::AppState;

pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return JsonResponse::invalid_fields(StatusCode::BAD_REQUEST, "Invalid account details", errors)
            .into_response();
    }

    create(&state, &payload).await
}

/// First sign-in creates the account; later sign-ins must come through the
/// provider the account was created with.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return JsonResponse::invalid_fields(StatusCode::BAD_REQUEST, "Invalid account details", errors)
            .into_response();
    }

    let existing = match state.db.find_user_by_email(&payload.email).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("DB query error: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    let Some(user) = existing else {
        return create(&state, &payload).await;
    };

    if !user.is_linked_to(payload.provider) {
        let msg = match user.provider.as_deref() {
            Some(tag) => format!(
                "This account is linked to {}. Please use that provider to sign in.",
                OauthProvider::from_tag(tag).map_or_else(|| tag.to_string(), |p| p.to_string())
            ),
            None => "This account was created without a sign-in provider.".to_string(),
        };
        return JsonResponse::conflict(&msg).into_response();
    }

    if user.external_id != payload.external_id {
        warn!(user_id = user.id, "sign-in external id mismatch");
        return JsonResponse::conflict("Account identity does not match").into_response();
    }

    Json(json!({ "success": true, "user": user })).into_response()
}

async fn create(state: &AppState, payload: &NewUser) -> Response {
    match state.db.create_user(payload).await {
        Ok(user) => {
            info!(user_id = user.id, "created account");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "user": user })),
            )
                .into_response()
        }
        Err(RepositoryError::UniqueViolation { .. }) => {
            JsonResponse::conflict("Email already in use").into_response()
        }
        Err(e) => {
            error!("Failed to insert user: {:?}", e);
            JsonResponse::server_error("Could not create user").into_response()
        }
    }
}
